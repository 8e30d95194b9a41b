//! Build progress presentation
//!
//! All long-running steps report through the [`ProgressReporter`] trait so the
//! command layer can swap between an interactive spinner and silent output
//! (`--quiet`). Reporters are shared across the rayon batches, so the trait is
//! `Send + Sync` and works through shared references.

use std::time::Instant;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Progress reporter for build, fetch and cache-bust steps
pub trait ProgressReporter: Send + Sync {
    /// A named step started
    fn start_step(&self, name: &str);

    /// The most recently started step finished
    fn finish_step(&self, name: &str);

    /// An informational line (survives the spinner)
    fn note(&self, message: &str);

    /// A warning line for degraded, non-fatal outcomes
    fn warn(&self, message: &str);
}

/// Interactive reporter with a spinner and timing per step
pub struct InteractiveReporter {
    spinner: ProgressBar,
    started: Mutex<Option<Instant>>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        Self {
            spinner,
            started: Mutex::new(None),
        }
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for InteractiveReporter {
    fn start_step(&self, name: &str) {
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
        self.spinner.set_message(format!("{name}..."));
        self.spinner.tick();
    }

    fn finish_step(&self, name: &str) {
        let elapsed = self
            .started
            .lock()
            .ok()
            .and_then(|mut s| s.take())
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or_default();
        self.spinner.println(format!(
            "Finished {} after {}",
            style(name).cyan(),
            style(format!("{elapsed:.1} s")).magenta()
        ));
    }

    fn note(&self, message: &str) {
        self.spinner.println(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.spinner
            .println(format!("{} {message}", style("warning:").yellow().bold()));
    }
}

/// Silent reporter for `--quiet`; warnings still go to stderr
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn start_step(&self, _name: &str) {}

    fn finish_step(&self, _name: &str) {}

    fn note(&self, _message: &str) {}

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}
