//! Computes per-cell line cutoffs that preserve structural alignment when a
//! row is split mid-content.

use ecow::EcoVec;

use crate::fragment::PartialRowInfo;
use crate::measure::RowMeasure;
use crate::model::TableRow;

/// Plans a partial slice of `row_index`, starting each cell at
/// `from_line_by_cell[i]` (or `0` if `None`) and fitting as many lines as
/// possible into `available_height`.
///
/// A two-pass algorithm: a greedy per-cell fit, followed by a
/// line-advancement alignment pass that re-synchronizes cells whose lines
/// have different heights, unless every cell exhausted its remaining lines
/// in the first pass (the `all_exhausted` optimization).
pub fn plan_partial_row(
    row_index: usize,
    row: &TableRow,
    row_measure: &RowMeasure,
    available_height: f64,
    from_line_by_cell: Option<&[usize]>,
) -> PartialRowInfo {
    let n = row.cells.len().min(row_measure.cells.len());
    let start_lines: Vec<usize> = (0..n)
        .map(|i| from_line_by_cell.and_then(|v| v.get(i)).copied().unwrap_or(0))
        .collect();

    let total_lines: Vec<usize> =
        (0..n).map(|i| row_measure.cells[i].total_lines()).collect();

    // Pass 1: greedy fit per cell.
    let mut cut_line = vec![0usize; n];
    let mut height_by_cell = vec![0.0f64; n];
    for i in 0..n {
        let pad = row.cells[i].attrs.padding.vertical();
        let available_for_lines = (available_height - pad).max(0.0);
        let lines = row_measure.cells[i].lines();
        let mut accumulated = 0.0;
        let mut cut = start_lines[i];
        for line in lines.iter().skip(start_lines[i]) {
            if accumulated + line.line_height > available_for_lines {
                break;
            }
            accumulated += line.line_height;
            cut += 1;
        }
        cut_line[i] = cut;
        height_by_cell[i] = accumulated;
    }

    let advancement: Vec<usize> =
        (0..n).map(|i| cut_line[i] - start_lines[i]).collect();
    let min_adv = advancement.iter().copied().filter(|&a| a > 0).min().unwrap_or(0);
    let all_exhausted = (0..n).all(|i| cut_line[i] >= total_lines[i]);

    // Pass 2: line-advancement alignment, skipped when every cell already
    // consumed everything remaining (allComplete optimization).
    let (final_cut, final_height) = if all_exhausted {
        (cut_line.clone(), height_by_cell.clone())
    } else {
        let mut new_cut = vec![0usize; n];
        let mut new_height = vec![0.0f64; n];
        for i in 0..n {
            let cut = (start_lines[i] + min_adv).min(total_lines[i]);
            new_cut[i] = cut;
            new_height[i] = row_measure.cells[i]
                .lines()
                .get(start_lines[i]..cut)
                .unwrap_or(&[])
                .iter()
                .map(|l| l.line_height)
                .sum();
        }
        (new_cut, new_height)
    };

    let partial_height = (0..n)
        .map(|i| final_height[i] + row.cells[i].attrs.padding.vertical())
        .fold(0.0f64, f64::max);

    let is_first_part = start_lines.iter().all(|&s| s == 0);
    let made_progress = (0..n).any(|i| cut_line[i] > start_lines[i]);
    let is_last_part = all_exhausted || !made_progress;

    let partial_height = if partial_height == 0.0 && is_first_part {
        (0..n)
            .map(|i| row.cells[i].attrs.padding.vertical())
            .fold(0.0f64, f64::max)
    } else {
        partial_height
    };

    PartialRowInfo {
        row_index,
        from_line_by_cell: EcoVec::from(start_lines),
        to_line_by_cell: EcoVec::from(final_cut),
        is_first_part,
        is_last_part,
        partial_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Padding;
    use crate::measure::{BlockMeasure, CellMeasure, LineMeasure};
    use crate::model::{BlockKind, CellAttrs, TableCell};
    use smallvec::SmallVec;

    fn no_pad() -> Padding {
        Padding { top: 0.0, left: 0.0, right: 0.0, bottom: 0.0 }
    }

    fn cell(lines: &[f64]) -> (TableCell, CellMeasure) {
        let cell = TableCell {
            blocks: EcoVec::from([BlockKind::Paragraph]),
            attrs: CellAttrs { padding: no_pad(), background: None, vertical_align: None },
        };
        let measure = CellMeasure {
            blocks: EcoVec::from([BlockMeasure::Paragraph {
                lines: SmallVec::from_iter(
                    lines.iter().map(|&h| LineMeasure { line_height: h, total_height: h }),
                ),
            }]),
        };
        (cell, measure)
    }

    #[test]
    fn mid_row_split_aligns_by_line_count() {
        let (c0, m0) = cell(&[20.0, 20.0, 20.0, 20.0]);
        let (c1, m1) = cell(&[40.0, 40.0]);
        let row = TableRow {
            cells: EcoVec::from([c0, c1]),
            attrs: Default::default(),
        };
        let row_measure = RowMeasure { height: 80.0, cells: EcoVec::from([m0, m1]) };

        let plan = plan_partial_row(0, &row, &row_measure, 50.0, None);
        assert_eq!(plan.to_line_by_cell.as_slice(), [1, 1]);
        assert_eq!(plan.partial_height, 40.0);
        assert!(plan.is_first_part);
        assert!(!plan.is_last_part);
    }

    #[test]
    fn all_complete_keeps_pass_one_cutoffs() {
        let (c0, m0) = cell(&[10.0, 10.0]);
        let (c1, m1) = cell(&[5.0]);
        let row = TableRow { cells: EcoVec::from([c0, c1]), attrs: Default::default() };
        let row_measure = RowMeasure { height: 20.0, cells: EcoVec::from([m0, m1]) };

        let plan = plan_partial_row(0, &row, &row_measure, 100.0, None);
        assert_eq!(plan.to_line_by_cell.as_slice(), [2, 1]);
        assert!(plan.is_last_part);
    }

    #[test]
    fn no_progress_when_available_height_too_small() {
        let (c0, m0) = cell(&[20.0]);
        let row = TableRow { cells: EcoVec::from([c0]), attrs: Default::default() };
        let row_measure = RowMeasure { height: 20.0, cells: EcoVec::from([m0]) };

        let plan = plan_partial_row(0, &row, &row_measure, 5.0, None);
        assert_eq!(plan.to_line_by_cell.as_slice(), [0]);
        assert!(plan.is_last_part);
        assert_eq!(plan.partial_height, 0.0);
    }
}
