// quizqueue - main.rs
// Terminal front end: loads the active item banks and quizzes the user one item at a time.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use quizqueue::config::{Overrides, Settings, DEFAULT_SETTINGS_PATH};
use quizqueue::deck::loader;
use quizqueue::Session;

const QUIT_COMMAND: &str = ":q";

#[derive(Parser)]
#[command(name = "quizqueue", version, about = "Quiz yourself on flash-card items")]
struct Cli {
    /// Settings document
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Directory the item files live in (overrides the settings)
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Segment to ask about, negative for a random one (overrides the settings)
    #[arg(long, allow_hyphen_values = true)]
    segment: Option<i32>,

    /// Theme to switch to (overrides the settings)
    #[arg(long)]
    theme: Option<String>,

    /// Write the overrides back to the settings document
    #[arg(long)]
    save: bool,

    /// Item files to quiz on (overrides the settings' active files)
    files: Vec<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // --- Settings, with command-line overrides ---
    let mut settings = Settings::load(&cli.settings);
    settings.apply(Overrides {
        directory: cli.directory,
        display_item: cli.segment,
        active_files: cli.files,
        theme: cli.theme,
    });
    if cli.save {
        settings.save(&cli.settings)?;
    }

    // --- Load the item bank ---
    let items = loader::load_or_placeholder(&settings.directory_path, &settings.active_files);
    let mut session = Session::new(items, settings.session_config())?;

    // --- Main quiz loop ---
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    println!("Type your answer and press enter, or {} to quit.", QUIT_COMMAND);

    loop {
        session.advance();
        println!();
        println!("{}", session.question());
        print!("> ");
        stdout.flush()?;

        let response = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if response.trim() == QUIT_COMMAND {
            break;
        }

        let mark = if session.check(&response) { "correct" } else { "incorrect" };
        println!("[{}]", mark);
        println!("{}", session.current_answer());
        println!("{}", session.stats_line());
    }

    info!("Session finished at {}", session.stats_line());
    println!();
    println!("{}", session.stats_line());
    Ok(())
}
