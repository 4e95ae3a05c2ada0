//! A minimal in-memory [`Paginator`] test double.
//!
//! Every call to `advance_column` opens a brand-new page/column with the
//! same geometry; this crate's driver never distinguishes "next column" from
//! "next page" (that's a decision left entirely to the real paginator), so
//! one fake page per advance is enough to exercise every code path.

use tablepage::{PageState, Paginator, TableFragment};

pub struct FakePaginator {
    content_bottom: f64,
    column_width: f64,
    margin_top: Option<f64>,
    states: Vec<PageState>,
}

impl FakePaginator {
    /// A single-column paginator whose pages all have `content_bottom`.
    pub fn new(content_bottom: f64) -> Self {
        FakePaginator { content_bottom, column_width: 500.0, margin_top: None, states: Vec::new() }
    }

    pub fn with_margin_top(mut self, margin_top: f64) -> Self {
        self.margin_top = Some(margin_top);
        self
    }

    fn fresh_state(&self) -> PageState {
        PageState {
            fragments: Vec::new(),
            cursor_y: 0.0,
            content_bottom: self.content_bottom,
            column_index: self.states.len(),
            margin_top: self.margin_top,
        }
    }

    /// All fragments emitted across every page/column, in emission order.
    pub fn all_fragments(&self) -> Vec<&TableFragment> {
        self.states.iter().flat_map(|s| s.fragments.iter()).collect()
    }

    pub fn page_count(&self) -> usize {
        self.states.len()
    }
}

impl Paginator for FakePaginator {
    fn ensure_page(&mut self) -> &mut PageState {
        if self.states.is_empty() {
            let state = self.fresh_state();
            self.states.push(state);
        }
        self.states.last_mut().unwrap()
    }

    fn advance_column(&mut self) -> &mut PageState {
        let state = self.fresh_state();
        self.states.push(state);
        self.states.last_mut().unwrap()
    }

    fn column_x(&self, column_index: usize) -> f64 {
        column_index as f64 * self.column_width
    }

    fn column_width(&self) -> f64 {
        self.column_width
    }
}

/// Builds a row with the given `cant_split`/`repeat_header` flags and no
/// cells (scenarios that only care about row-granularity splitting).
pub fn plain_row(repeat_header: bool, cant_split: bool) -> tablepage::TableRow {
    tablepage::TableRow {
        cells: Default::default(),
        attrs: tablepage::RowAttrs { repeat_header, cant_split },
    }
}

pub fn plain_block(id: &str, rows: Vec<tablepage::TableRow>) -> tablepage::TableBlock {
    tablepage::TableBlock { id: id.into(), rows: rows.into(), attrs: Default::default() }
}

pub fn row_measure(height: f64) -> tablepage::RowMeasure {
    tablepage::RowMeasure { height, cells: Default::default() }
}

pub fn table_measure(row_heights: &[f64], column_widths: &[f64]) -> tablepage::TableMeasure {
    let rows: Vec<tablepage::RowMeasure> = row_heights.iter().map(|&h| row_measure(h)).collect();
    tablepage::TableMeasure {
        rows: rows.into(),
        column_widths: column_widths.iter().copied().collect(),
        total_width: column_widths.iter().sum(),
        total_height: row_heights.iter().sum(),
    }
}

/// A zero-padding cell plus its measurement, with one paragraph block whose
/// lines have the given heights.
pub fn line_cell(line_heights: &[f64]) -> (tablepage::TableCell, tablepage::CellMeasure) {
    let cell = tablepage::TableCell {
        blocks: std::iter::once(tablepage::BlockKind::Paragraph).collect(),
        attrs: tablepage::CellAttrs {
            padding: tablepage::Padding { top: 0.0, left: 0.0, right: 0.0, bottom: 0.0 },
            background: None,
            vertical_align: None,
        },
    };
    let measure = tablepage::CellMeasure {
        blocks: std::iter::once(tablepage::BlockMeasure::Paragraph {
            lines: line_heights
                .iter()
                .map(|&h| tablepage::LineMeasure { line_height: h, total_height: h })
                .collect(),
        })
        .collect(),
    };
    (cell, measure)
}

/// A row/row-measure pair built from parallel `(cell, cell_measure)` pairs.
pub fn row_with_cells(
    cant_split: bool,
    cells: Vec<(tablepage::TableCell, tablepage::CellMeasure)>,
    height: f64,
) -> (tablepage::TableRow, tablepage::RowMeasure) {
    let (cells, cell_measures): (Vec<_>, Vec<_>) = cells.into_iter().unzip();
    let row = tablepage::TableRow {
        cells: cells.into_iter().collect(),
        attrs: tablepage::RowAttrs { repeat_header: false, cant_split },
    };
    let measure = tablepage::RowMeasure { height, cells: cell_measures.into_iter().collect() };
    (row, measure)
}
