//! Progress tracking and callbacks for filter execution.
//!
//! Filters split their output region into chunks and report after each one.
//! Callbacks observe those reports; the console callback logs them through
//! `tracing`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Progress information for one completed chunk.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Name of the reporting filter.
    pub filter: &'static str,
    /// Number of chunks completed so far.
    pub chunk: usize,
    /// Total number of chunks.
    pub total_chunks: usize,
    /// Pixels written so far.
    pub pixels_done: usize,
    /// Total pixels in the output region.
    pub total_pixels: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl ProgressInfo {
    /// Create new progress information.
    pub fn new(
        filter: &'static str,
        chunk: usize,
        total_chunks: usize,
        pixels_done: usize,
        total_pixels: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            filter,
            chunk,
            total_chunks,
            pixels_done,
            total_pixels,
            elapsed,
        }
    }

    /// Completed fraction of the output, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total_pixels == 0 {
            return 1.0;
        }
        self.pixels_done as f64 / self.total_pixels as f64
    }

    /// Calculate progress percentage.
    pub fn progress_percent(&self) -> f64 {
        self.fraction() * 100.0
    }

    /// Whether this is the final report.
    pub fn is_last(&self) -> bool {
        self.chunk >= self.total_chunks
    }
}

/// Progress callback trait for monitoring filter progress.
pub trait ProgressCallback: Send + Sync {
    /// Called after each chunk with progress information.
    fn on_progress(&self, info: &ProgressInfo);

    /// Called when the filter starts.
    fn on_start(&self, _filter: &'static str) {}

    /// Called when the filter completes successfully.
    fn on_complete(&self, _info: &ProgressInfo) {}

    /// Called when the filter fails.
    fn on_error(&self, _error: &str) {}
}

/// Console progress callback that logs to tracing.
#[derive(Debug, Clone)]
pub struct ConsoleProgressCallback {
    /// Log every `log_interval` chunks; the last chunk is always logged.
    pub log_interval: usize,
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self { log_interval: 1 }
    }
}

impl ConsoleProgressCallback {
    /// Create a new console progress callback.
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval: log_interval.max(1),
        }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_progress(&self, info: &ProgressInfo) {
        if info.chunk % self.log_interval == 0 || info.is_last() {
            tracing::info!(
                "{}: chunk {}/{} ({:.1}%) | Elapsed: {:.3}s",
                info.filter,
                info.chunk,
                info.total_chunks,
                info.progress_percent(),
                info.elapsed.as_secs_f64()
            );
        }
    }

    fn on_start(&self, filter: &'static str) {
        tracing::info!("{} started", filter);
    }

    fn on_complete(&self, info: &ProgressInfo) {
        tracing::info!(
            "{} completed {} pixels in {:.3}s",
            info.filter,
            info.total_pixels,
            info.elapsed.as_secs_f64()
        );
    }

    fn on_error(&self, error: &str) {
        tracing::error!("Filter failed: {}", error);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// History callback that records all progress information.
#[derive(Debug, Clone, Default)]
pub struct HistoryCallback {
    history: Arc<Mutex<Vec<ProgressInfo>>>,
    errors: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<bool>>,
}

impl HistoryCallback {
    /// Create a new history callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded history.
    pub fn get_history(&self) -> Vec<ProgressInfo> {
        lock(&self.history).clone()
    }

    /// Error messages reported so far.
    pub fn get_errors(&self) -> Vec<String> {
        lock(&self.errors).clone()
    }

    /// Whether `on_complete` has been seen.
    pub fn completed(&self) -> bool {
        *lock(&self.completed)
    }

    /// Clear the history.
    pub fn clear(&self) {
        lock(&self.history).clear();
        lock(&self.errors).clear();
        *lock(&self.completed) = false;
    }
}

impl ProgressCallback for HistoryCallback {
    fn on_progress(&self, info: &ProgressInfo) {
        lock(&self.history).push(info.clone());
    }

    fn on_complete(&self, _info: &ProgressInfo) {
        *lock(&self.completed) = true;
    }

    fn on_error(&self, error: &str) {
        lock(&self.errors).push(error.to_string());
    }
}

/// Progress tracker that fans reports out to multiple callbacks.
#[derive(Clone, Default)]
pub struct ProgressTracker {
    callbacks: Vec<Arc<dyn ProgressCallback>>,
    start_time: Arc<Mutex<Option<Instant>>>,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback.
    pub fn add_callback(&mut self, callback: Arc<dyn ProgressCallback>) {
        self.callbacks.push(callback);
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Start tracking.
    pub fn start(&self, filter: &'static str) {
        *lock(&self.start_time) = Some(Instant::now());
        for callback in &self.callbacks {
            callback.on_start(filter);
        }
    }

    fn elapsed(&self) -> Duration {
        let start_time = *lock(&self.start_time);
        start_time.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Report a completed chunk.
    pub fn update(
        &self,
        filter: &'static str,
        chunk: usize,
        total_chunks: usize,
        pixels_done: usize,
        total_pixels: usize,
    ) {
        let info = ProgressInfo::new(filter, chunk, total_chunks, pixels_done, total_pixels, self.elapsed());
        for callback in &self.callbacks {
            callback.on_progress(&info);
        }
    }

    /// Complete tracking.
    pub fn complete(&self, filter: &'static str, total_chunks: usize, total_pixels: usize) {
        let info = ProgressInfo::new(filter, total_chunks, total_chunks, total_pixels, total_pixels, self.elapsed());
        for callback in &self.callbacks {
            callback.on_complete(&info);
        }
    }

    /// Report error.
    pub fn error(&self, error: &str) {
        for callback in &self.callbacks {
            callback.on_error(error);
        }
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
