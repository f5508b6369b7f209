// src/debug.rs
// Timing helpers for load paths.

use std::time::Instant;

use log::debug;

/// Logs how long a scope took once it is dropped.
///
/// ```ignore
/// let _trace = Tracer::new(format!("read {}", path.display()));
/// ```
pub struct Tracer {
    label: String,
    started: Instant,
}

impl Tracer {
    pub fn new(label: impl Into<String>) -> Self {
        Tracer {
            label: label.into(),
            started: Instant::now(),
        }
    }
}

impl Drop for Tracer {
    fn drop(&mut self) {
        debug!("[trace] {} took {:.2?}", self.label, self.started.elapsed());
    }
}
