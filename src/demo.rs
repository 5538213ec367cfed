//! Background producer for demo mode.
//!
//! Logs to document sources through ordinary tracing macros with a `source`
//! field, so entries travel the same path as any instrumented producer:
//! tracing → [`crate::logging::SourceLogLayer`] → channel → workbench.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// A running producer thread. Stops and joins on drop.
#[derive(Debug)]
pub struct DemoProducer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DemoProducer {
    /// Start logging to `sources` in turn, one event per `interval`.
    pub fn spawn(sources: Vec<String>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut step = 0u64;
            while !flag.load(Ordering::Relaxed) {
                if let Some(source) = sources.get((step as usize) % sources.len().max(1)) {
                    emit_step(source, step);
                }
                step += 1;
                thread::sleep(interval);
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for DemoProducer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Emit the demo event for `step` to `source`.
pub fn emit_step(source: &str, step: u64) {
    let cell = step / 6 + 1;
    match step % 6 {
        0 => info!(source = %source, "cell [{}] executed", cell),
        1 => debug!(source = %source, "kernel idle after cell [{}]", cell),
        2 => warn!(source = %source, "cell [{}] took longer than 2s", cell),
        3 => error!(source = %source, "NameError: name 'x{}' is not defined", cell),
        4 => info!(
            source = %source,
            mime = "text/markdown",
            "**Result** of cell [{}]: `ok`",
            cell
        ),
        _ => info!(
            source = %source,
            mime = "application/json",
            "{{\"cell\":{},\"status\":\"ok\"}}",
            cell
        ),
    }
}
