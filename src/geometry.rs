//! Header counting, row-height summation, column-boundary generation,
//! indent application, and padding resolution.

use ecow::EcoVec;

use crate::constants::{DEFAULT_MIN_COLUMN_WIDTH, MAX_MIN_COLUMN_WIDTH};
use crate::fragment::ColumnBoundary;
use crate::measure::TableMeasure;
use crate::model::TableBlock;

/// Prefix count of rows whose `repeat_header == true`.
pub fn count_header_rows(block: &TableBlock) -> usize {
    block.header_count()
}

/// Sum of measured row heights in `[from, to)`. Tolerates `to` exceeding
/// `measure.rows.len()`.
pub fn sum_row_heights(measure: &TableMeasure, from: usize, to: usize) -> f64 {
    (from..to).map(|i| measure.row_height(i)).sum()
}

/// Clamped minimum width for column `i`.
pub fn calculate_column_min_width(i: usize, measure: &TableMeasure) -> f64 {
    let raw = measure.column_widths.get(i).copied().unwrap_or(DEFAULT_MIN_COLUMN_WIDTH);
    let raw = if raw > 0.0 { raw } else { DEFAULT_MIN_COLUMN_WIDTH };
    raw.clamp(DEFAULT_MIN_COLUMN_WIDTH, MAX_MIN_COLUMN_WIDTH)
}

/// Cumulative-x walk producing per-column boundary metadata for downstream
/// interactive features. Empty `column_widths` yields empty boundaries.
pub fn generate_column_boundaries(measure: &TableMeasure) -> EcoVec<ColumnBoundary> {
    let mut x = 0.0;
    let mut boundaries = EcoVec::with_capacity(measure.column_widths.len());
    for (i, &width) in measure.column_widths.iter().enumerate() {
        boundaries.push(ColumnBoundary {
            index: i,
            x,
            width,
            min_width: calculate_column_min_width(i, measure),
            resizable: true,
        });
        x += width;
    }
    boundaries
}

/// `attrs.tableIndent.width` iff a finite number, else `0`.
pub fn table_indent_width(block: &TableBlock) -> f64 {
    block
        .attrs
        .table_indent
        .map(|indent| indent.width)
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

/// Applies a table indent to an `(x, width)` pair.
pub fn apply_table_indent(x: f64, width: f64, indent: f64) -> (f64, f64) {
    (x + indent, (width - indent).max(0.0))
}
