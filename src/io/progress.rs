//! Row-level progress display for one or many mosaics

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display while mosaics are rendered
///
/// Small batches get one bar per file. Larger batches add a file counter and
/// reuse a rolling window of bars for the most recent files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `rows_rendered`, `total_rows`) per started file
    file_states: Vec<(String, u32, u32)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create bars for a batch of `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(ROW_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Begin tracking a file with `rows` grid rows
    pub fn start_file(&mut self, index: usize, path: &Path, rows: u32) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, rows);
        }
        self.update_bars();
    }

    /// Report how many rows of file `index` are rendered
    pub fn update_rows(&mut self, index: usize, rows_rendered: u32) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.1 = rows_rendered;
        }
        self.update_bars();
    }

    /// Mark file `index` as saved
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images rendered");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the most recently started files on the available bars
    fn update_bars(&self) {
        let active: Vec<&(String, u32, u32)> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();
        let start = active.len().saturating_sub(self.file_bars.len());
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar, (name, rendered, total)) in self.file_bars.iter().zip(visible.iter().copied()) {
            bar.set_length(u64::from(*total));
            bar.set_position(u64::from(*rendered));
            let width = total.to_string().len();
            bar.set_message(format!("{rendered:>width$}/{total} rows"));
            bar.set_prefix(name.clone());
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
