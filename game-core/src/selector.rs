use chrono::NaiveDate;
use game_types::SelectError;
use rand::Rng;

/// How the daily row index is chosen from the available words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Deterministic: days elapsed since `epoch` (dates only, so time of day
    /// never shifts the result), modulo the row count. Every process picks
    /// the same row on the same calendar day and the rotation cycles through
    /// all rows before repeating.
    Sequential { epoch: NaiveDate },
    /// Uniform random row, fresh RNG per call. Fallback/testing mode only.
    Random,
}

#[derive(Debug, Clone, Copy)]
pub struct DailyWordSelector {
    policy: SelectionPolicy,
}

impl DailyWordSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Pick today's row index in `[0, row_count)`.
    ///
    /// An empty word source is a configuration error: callers must fail
    /// startup rather than serve with no word.
    pub fn select(&self, row_count: usize, today: NaiveDate) -> Result<usize, SelectError> {
        if row_count == 0 {
            return Err(SelectError::NoWords);
        }

        match self.policy {
            SelectionPolicy::Sequential { epoch } => {
                let days = (today - epoch).num_days();
                Ok(days.rem_euclid(row_count as i64) as usize)
            }
            SelectionPolicy::Random => Ok(rand::thread_rng().gen_range(0..row_count)),
        }
    }
}
