//! Live search progress shared between the search thread and the front end

use parking_lot::Mutex;

use std::sync::Arc;

/// Percentage added to the progress for every node the search visits
pub const NODE_TICK: f32 = 0.3;

/// The top-level score of one column
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ColumnScore {
    /// Not evaluated yet
    Pending,
    /// The column is full
    NotApplicable,
    Scored(i32),
}

impl ColumnScore {
    pub fn score(&self) -> Option<i32> {
        match self {
            ColumnScore::Scored(score) => Some(*score),
            _ => None,
        }
    }
}

/// A consistent view of a running (or finished) search
#[derive(Clone, PartialEq, Debug)]
pub struct AiProgress {
    /// Coarse completion estimate between 0 and 100
    pub percent: f32,
    /// The top-level column being explored
    pub current_column: Option<usize>,
    pub scores: Vec<ColumnScore>,
}

impl AiProgress {
    pub fn new(columns: usize) -> Self {
        Self {
            percent: 0.0,
            current_column: None,
            scores: vec![ColumnScore::Pending; columns],
        }
    }
}

/// Handle to an [`AiProgress`] guarded by a mutex
///
/// Every method takes the lock for the duration of a single read or update
/// only, so readers never observe a half-written snapshot and never wait for
/// more than one update.
#[derive(Clone, Debug)]
pub struct SharedProgress(Arc<Mutex<AiProgress>>);

impl SharedProgress {
    pub fn new(columns: usize) -> Self {
        Self(Arc::new(Mutex::new(AiProgress::new(columns))))
    }

    /// Copies the current state out of the lock
    pub fn snapshot(&self) -> AiProgress {
        self.0.lock().clone()
    }

    /// Clears all scores for a new search over `columns` columns
    pub fn reset(&self, columns: usize) {
        *self.0.lock() = AiProgress::new(columns);
    }

    /// Marks `column` as being explored, optionally moving the percentage
    pub fn begin_column(&self, column: usize, percent: Option<f32>) {
        let mut progress = self.0.lock();
        progress.current_column = Some(column);
        if let Some(percent) = percent {
            progress.percent = percent.min(100.0);
        }
    }

    /// Records one visited node
    pub fn tick(&self) {
        let mut progress = self.0.lock();
        progress.percent = (progress.percent + NODE_TICK).min(100.0);
    }

    pub fn publish(&self, column: usize, score: ColumnScore) {
        if let Some(slot) = self.0.lock().scores.get_mut(column) {
            *slot = score;
        }
    }

    /// Marks the search as complete
    pub fn finish(&self) {
        let mut progress = self.0.lock();
        progress.percent = 100.0;
        progress.current_column = None;
    }
}
