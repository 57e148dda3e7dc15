use crate::word_source::WordSource;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use game_core::{DailyWordSelector, parse_row};
use game_types::WordRecord;
use tracing::info;

/// Fetch the word rows, pick today's, and parse it.
///
/// An unreadable or empty word source is fatal configuration; a malformed
/// selected row aborts this load attempt and propagates to the caller.
pub async fn load_daily_word(
    source: &dyn WordSource,
    selector: &DailyWordSelector,
) -> Result<WordRecord> {
    let rows = source.rows().await.context("read word source")?;
    if rows.is_empty() {
        bail!("no rows in word source");
    }

    let today = Utc::now().date_naive();
    let index = selector.select(rows.len(), today)?;
    let record = parse_row(&rows[index]).with_context(|| format!("parse word row {}", index))?;

    info!(
        index,
        categories = record.categories.len(),
        "loaded daily word"
    );
    Ok(record)
}
