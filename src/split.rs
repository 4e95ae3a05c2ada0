//! Given a starting row and available height, finds the last row that fits
//! and whether a mid-row split is required.

use crate::constants::MIN_PARTIAL_ROW_HEIGHT;
use crate::fragment::PartialRowInfo;
use crate::measure::TableMeasure;
use crate::model::TableBlock;
use crate::partial::plan_partial_row;

/// Result of a split-point search: rows `[start_row, end_row)` fit, plus an
/// optional mid-row split of row `end_row` (when `end_row < start_row +
/// rows_consumed`, i.e. when `partial_row.is_some()`).
pub struct SplitPoint {
    pub end_row: usize,
    pub partial_row: Option<PartialRowInfo>,
}

/// Walks rows from `start_row`, accumulating height until one doesn't fit.
pub fn find_split_point(
    block: &TableBlock,
    measure: &TableMeasure,
    start_row: usize,
    available_height: f64,
    full_page_height: f64,
) -> SplitPoint {
    let mut accumulated = 0.0;
    let mut last_fit_row = start_row;

    for i in start_row..block.rows.len() {
        let row_height = measure.row_height(i);
        if accumulated + row_height <= available_height {
            accumulated += row_height;
            last_fit_row = i + 1;
            continue;
        }

        let remaining_height = available_height - accumulated;
        let row = &block.rows[i];

        // Over-tall rule: forces a mid-row split regardless of `cantSplit`.
        if row_height > full_page_height {
            let plan = plan_partial_row(i, row, &measure.rows[i], remaining_height, None);
            return SplitPoint { end_row: i + 1, partial_row: Some(plan) };
        }

        if row.attrs.cant_split {
            let end_row = if last_fit_row == start_row { start_row } else { last_fit_row };
            return SplitPoint { end_row, partial_row: None };
        }

        // Splittable row: try a partial slice if there's meaningfully more
        // room, otherwise stop before it.
        if remaining_height >= MIN_PARTIAL_ROW_HEIGHT {
            let plan = plan_partial_row(i, row, &measure.rows[i], remaining_height, None);
            let any_advanced = plan
                .to_line_by_cell
                .iter()
                .zip(plan.from_line_by_cell.iter())
                .any(|(to, from)| to > from);
            if any_advanced {
                return SplitPoint { end_row: i + 1, partial_row: Some(plan) };
            }
        }

        return SplitPoint { end_row: last_fit_row, partial_row: None };
    }

    SplitPoint { end_row: block.rows.len(), partial_row: None }
}
