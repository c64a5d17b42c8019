use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Spinner shown while waiting on the catalog. A no-op when progress is off.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.dim}{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Show which project of `total` is being queried.
    pub fn project(&self, index: usize, total: usize, project_id: &str) {
        if let Some(bar) = &self.bar {
            bar.set_prefix(step_prefix(index, total));
            bar.set_message(format!("checking project {project_id}"));
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// `[2/5] ` for multi-project runs, nothing for a single project.
fn step_prefix(index: usize, total: usize) -> String {
    if total <= 1 {
        String::new()
    } else {
        format!("[{}/{total}] ", index + 1)
    }
}
