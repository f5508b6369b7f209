// src/deck/mod.rs
// Quiz items and the rules for displaying and grading them.

pub mod loader;

use rand::{thread_rng, Rng};
use serde_json::Value;

use crate::error::ItemError;

/// Shown by `Item::display_full` when an item has no visible text.
pub const EMPTY_ITEM: &str = "[EMPTY]";

const SEPARATOR: &str = " | ";

/// Symbols stripped from both sides of a comparison.
const SYMBOLS: &[char] = &[
    '~', '`', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '_', '=', '+', '[', ']', '{',
    '}', '|', '\\', ':', ';', '\'', '"', ',', '<', '.', '>', '/', '?',
];

/// A single quiz entry.
///
/// An item is a list of segments and each segment is a list of interchangeable
/// variants. A segment can be shown on its own as the question, while an answer
/// is accepted if it matches any variant of any segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    segments: Vec<Vec<String>>,
}

impl Item {
    /// Builds an item, rejecting data without any segments.
    pub fn new(segments: Vec<Vec<String>>) -> Result<Self, ItemError> {
        if segments.is_empty() {
            return Err(ItemError::NoSegments);
        }
        Ok(Item { segments })
    }

    /// Builds an item from a JSON record shaped like `[["a", "b"], ["c"]]`.
    pub fn from_json(record: &Value) -> Result<Self, ItemError> {
        let raw_segments = record.as_array().ok_or(ItemError::NotAList)?;

        let mut segments = Vec::with_capacity(raw_segments.len());
        for (segment, raw) in raw_segments.iter().enumerate() {
            let raw_variants = raw
                .as_array()
                .ok_or(ItemError::SegmentNotAList { segment })?;

            let mut variants = Vec::with_capacity(raw_variants.len());
            for (variant, value) in raw_variants.iter().enumerate() {
                let text = value
                    .as_str()
                    .ok_or(ItemError::VariantNotAString { segment, variant })?;
                variants.push(text.to_string());
            }
            segments.push(variants);
        }

        Item::new(segments)
    }

    /// Builds an item from string literals.
    pub fn from_strs(segments: &[&[&str]]) -> Result<Self, ItemError> {
        Item::new(
            segments
                .iter()
                .map(|s| s.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Renders one segment as `"a | b | c"`.
    ///
    /// A negative index picks a random segment and an index past the end falls
    /// back to the first segment.
    pub fn display_segment(&self, index: i32) -> String {
        self.display_segment_with(index, &mut thread_rng())
    }

    /// Same as `display_segment`, drawing the random segment from `rng`.
    pub fn display_segment_with<R: Rng>(&self, index: i32, rng: &mut R) -> String {
        let idx = if index < 0 {
            rng.gen_range(0..self.segments.len())
        } else if index as usize >= self.segments.len() {
            0
        } else {
            index as usize
        };

        self.segments[idx].join(SEPARATOR).trim().to_string()
    }

    /// Every segment on its own line.
    pub fn display_full(&self) -> String {
        let full = (0..self.segments.len())
            .map(|i| self.display_segment(i as i32))
            .collect::<Vec<_>>()
            .join("\n");

        let full = full.trim();
        if full.is_empty() {
            EMPTY_ITEM.to_string()
        } else {
            full.to_string()
        }
    }

    /// True if `candidate` equals any variant of any segment once both are cleaned.
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = clean(candidate);
        self.segments
            .iter()
            .flatten()
            .any(|variant| clean(variant) == candidate)
    }
}

/// Normalizes text for comparison: drops ASCII symbols and spaces, then lowercases.
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && !SYMBOLS.contains(c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}
