//! Progress spinners for concurrent platform scans.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// One spinner line per running task, stacked in a shared [`MultiProgress`].
pub(crate) struct ScanSpinners {
    mp: MultiProgress,
    style: Option<ProgressStyle>,
}

impl ScanSpinners {
    /// When `hidden` is true no spinner is ever drawn.
    pub(crate) fn new(hidden: bool) -> Self {
        let mp = if hidden {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };
        // An invalid template only loses the styling.
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .ok()
            .map(|s| s.tick_chars("/-\\|"));
        Self { mp, style }
    }

    /// Add a ticking spinner showing `msg`. Finish it with `finish_and_clear`.
    pub(crate) fn start(&self, msg: String) -> ProgressBar {
        let pb = self.mp.add(ProgressBar::new_spinner());
        if let Some(style) = &self.style {
            pb.set_style(style.clone());
        }
        pb.set_message(msg);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Remove every spinner line from the terminal.
    pub(crate) fn clear(&self) {
        let _ = self.mp.clear();
    }
}
