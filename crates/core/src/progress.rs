//! Progress reporting for bounded runs.
//!
//! Purely cosmetic: a progress bar never reads or mutates model state and
//! never touches the model's RNG.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) ETA {eta}";

/// Create a progress bar for `len` steps, hidden when `enabled` is false.
pub fn progress_bar(len: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
