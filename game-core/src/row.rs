use game_types::{RowParseError, WordRecord};
use std::collections::HashMap;
use tracing::warn;

/// Fixed wire width of a word-source row: the answer cell plus up to four
/// (category, hint, emoji) triples.
pub const MAX_ROW_CELLS: usize = 13;

/// Smallest usable row: the answer cell plus one complete triple.
pub const MIN_ROW_CELLS: usize = 4;

/// Parse one raw word-source row into a `WordRecord`.
///
/// Cell 0 is the answer; cells 1.. are walked in triples. Rows are
/// hand-edited spreadsheets, so two kinds of raggedness are tolerated: a
/// triple that would read past the available cells ends the walk early, and
/// a triple with an empty category cell is skipped without consuming a
/// display-label ordinal.
pub fn parse_row(cells: &[String]) -> Result<WordRecord, RowParseError> {
    if cells.len() < MIN_ROW_CELLS {
        return Err(RowParseError::TooFewCells {
            expected: MIN_ROW_CELLS,
            got: cells.len(),
        });
    }

    let mut record = WordRecord {
        answer: cells[0].clone(),
        categories: Vec::new(),
        hints: HashMap::new(),
        labels: HashMap::new(),
        emojis: HashMap::new(),
    };

    let mut accepted = 0u8;
    let mut i = 1;
    while i + 2 < MAX_ROW_CELLS {
        if i + 2 >= cells.len() {
            warn!(
                cells = cells.len(),
                triple_start = i,
                "row has fewer trailing cells than the maximum, stopping early"
            );
            break;
        }

        let category = cells[i].as_str();
        if category.is_empty() {
            i += 3;
            continue;
        }

        record
            .labels
            .insert(category.to_string(), format!("Category {}", (b'A' + accepted) as char));
        record
            .hints
            .insert(category.to_string(), cells[i + 1].clone());
        record
            .emojis
            .insert(category.to_string(), cells[i + 2].clone());
        record.categories.push(category.to_string());
        accepted += 1;
        i += 3;
    }

    if record.categories.is_empty() {
        return Err(RowParseError::NoValidCategories);
    }

    Ok(record)
}
