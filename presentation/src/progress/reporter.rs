//! Progress reporting while an answer streams

use chatline_application::StreamProgress;
use chatline_domain::RequestState;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown on stderr until the answer has fully arrived
pub struct SpinnerProgress {
    target: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = guard.as_ref() {
            f(bar);
        }
    }
}

impl StreamProgress for SpinnerProgress {
    fn on_request_sent(&self) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix("Asking");
        bar.set_message(self.target.clone());
        bar.enable_steady_tick(Duration::from_millis(100));
        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(bar);
    }

    fn on_chunk(&self, total_bytes: usize) {
        self.with_bar(|bar| {
            bar.set_prefix("Receiving");
            bar.set_message(format!("{} bytes", total_bytes));
        });
    }

    fn on_finished(&self, state: RequestState) {
        let bar = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(bar) = bar {
            if state == RequestState::Completed {
                bar.finish_and_clear();
            } else {
                bar.abandon_with_message(format!("{}", state.as_str().red()));
            }
        }
    }
}
