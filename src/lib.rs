// src/lib.rs
// Item presentation and retry scheduling for flash-card style self-quizzing.

pub mod config;
pub mod debug;
pub mod deck;
pub mod error;
pub mod scheduler;
pub mod session;

pub use deck::Item;
pub use error::{ConfigError, ItemError, LoadError, SchedulerError};
pub use scheduler::{RetryQueue, Scheduler};
pub use session::{Session, SessionConfig};
