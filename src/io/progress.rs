//! Terminal progress for the indexing and composition stages

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per pipeline stage
///
/// Bars are safe to advance from rayon worker threads. A hidden manager
/// hands out bars that draw nothing. Clones share the same bars.
#[derive(Clone)]
pub struct ProgressManager {
    multi_progress: MultiProgress,
    visible: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            visible: true,
        }
    }

    /// Create a manager whose bars are never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            visible: false,
        }
    }

    /// Whether bars from this manager are drawn
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Run `f` with every bar cleared from the terminal, redrawing afterwards
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.multi_progress.suspend(f)
    }

    /// Start a bar for a stage with `len` units of work
    pub fn stage(&self, label: &str, len: usize) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let bar = self
            .multi_progress
            .add(ProgressBar::new(len as u64).with_style(STAGE_STYLE.clone()));
        bar.set_prefix(label.to_string());
        bar
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
