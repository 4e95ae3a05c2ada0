//! Table pagination core for a word-processor-style document layout engine.
//!
//! Given a measured table ([`model::TableBlock`] + [`measure::TableMeasure`])
//! and a paginator supplying page/column geometry ([`paginator::Paginator`]),
//! [`driver::layout_table`] produces an ordered sequence of
//! [`fragment::TableFragment`]s: rectangular slices of the table placed on
//! pages, split on row or line boundaries as needed, with header rows
//! repeated on continuation fragments.

mod anchor;
mod constants;
mod driver;
mod fragment;
mod geometry;
mod instrument;
mod measure;
mod model;
mod paginator;
mod partial;
mod split;

pub use self::anchor::create_anchored_table_fragment;
pub use self::constants::{
    Padding, DEFAULT_CELL_PADDING, DEFAULT_MIN_COLUMN_WIDTH, MAX_MIN_COLUMN_WIDTH,
    MIN_PARTIAL_ROW_HEIGHT,
};
pub use self::driver::{layout_table, layout_table_with_context};
pub use self::fragment::{
    ColumnBoundary, CoordinateSystem, FragmentKind, FragmentMetadata, PartialRowInfo,
    TableFragment,
};
pub use self::geometry::{
    apply_table_indent, calculate_column_min_width, count_header_rows, generate_column_boundaries,
    sum_row_heights, table_indent_width,
};
pub use self::instrument::{LayoutContext, Timings};
pub use self::measure::{BlockMeasure, CellMeasure, LineMeasure, RowMeasure, TableMeasure};
pub use self::model::{
    Anchor, BlockId, BlockKind, CellAttrs, FloatingTableProperties, RowAttrs, TableAttrs,
    TableBlock, TableCell, TableIndent, TableProperties, TableRow, VerticalAlign,
};
pub use self::paginator::{PageState, Paginator};
pub use self::split::{find_split_point, SplitPoint};
