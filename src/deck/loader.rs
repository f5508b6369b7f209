// src/deck/loader.rs
// Reads item banks from `.json` and `.sfmt` files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde_json::Value;

use super::Item;
use crate::debug::Tracer;
use crate::error::LoadError;

/// Text of the stand-in item used when nothing could be loaded.
pub const PLACEHOLDER_TEXT: &str = "No items were able to be loaded";

const SEGMENT_DELIMITER: char = '-';
const VARIANT_DELIMITER: char = '/';

/// Reads every file in `files` (relative to `directory`) and returns all items in order.
pub fn read_files<S: AsRef<str>>(directory: &Path, files: &[S]) -> Result<Vec<Item>, LoadError> {
    let _trace = Tracer::new(format!("load {} item file(s)", files.len()));

    let mut items = Vec::new();
    for file in files {
        let path = directory.join(file.as_ref());
        if !path.exists() {
            return Err(LoadError::NotFound(path));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => items.extend(read_json(&path)?),
            Some("sfmt") => items.extend(read_sfmt(&path)?),
            _ => return Err(LoadError::UnsupportedFormat(path)),
        }
    }

    if items.is_empty() {
        return Err(LoadError::Empty);
    }

    info!("Loaded {} items from {} file(s).", items.len(), files.len());
    Ok(items)
}

/// Like `read_files`, but logs the failure and falls back to a single placeholder item.
pub fn load_or_placeholder<S: AsRef<str>>(directory: &Path, files: &[S]) -> Vec<Item> {
    match read_files(directory, files) {
        Ok(items) => items,
        Err(e) => {
            error!("{}", e);
            vec![placeholder_item()]
        }
    }
}

/// The single item shown when the bank could not be loaded.
pub fn placeholder_item() -> Item {
    Item {
        segments: vec![vec![PLACEHOLDER_TEXT.to_string()]],
    }
}

/// Parses a JSON bank: a list of items, each a list of segments of strings.
pub fn read_json(path: &Path) -> Result<Vec<Item>, LoadError> {
    let text = read_to_string(path)?;
    parse_json(path, &text)
}

fn parse_json(path: &Path, text: &str) -> Result<Vec<Item>, LoadError> {
    let data: Value = serde_json::from_str(text).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let records = data
        .as_array()
        .ok_or_else(|| LoadError::NotAList(path.to_path_buf()))?;

    // Validate every record so all bad ones get reported, then fail on the first.
    let mut items = Vec::with_capacity(records.len());
    let mut first_error = None;
    for (record, value) in records.iter().enumerate() {
        match Item::from_json(value) {
            Ok(item) => items.push(item),
            Err(source) => {
                let e = LoadError::InvalidRecord {
                    path: path.to_path_buf(),
                    record,
                    source,
                };
                error!("{}: {}", e, value);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(items),
    }
}

/// Parses a "simple format" bank.
///
/// One item per line, `-` between segments and `/` between variants, so
/// `this - is / a - test` becomes `[["this"], ["is", "a"], ["test"]]`.
/// There is no escaping, blank lines are skipped. Every non-blank line yields
/// at least one segment, so only I/O can fail here.
pub fn read_sfmt(path: &Path) -> Result<Vec<Item>, LoadError> {
    let text = read_to_string(path)?;
    Ok(parse_sfmt(&text))
}

fn parse_sfmt(text: &str) -> Vec<Item> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Item {
            segments: line
                .split(SEGMENT_DELIMITER)
                .map(|segment| {
                    segment
                        .split(VARIANT_DELIMITER)
                        .map(|variant| variant.trim().to_string())
                        .collect()
                })
                .collect(),
        })
        .collect()
}

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: PathBuf::from(path),
        source,
    })
}
