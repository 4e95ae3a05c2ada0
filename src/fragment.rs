//! Output data model: rectangular slices of a table placed on pages.

use ecow::EcoVec;
use serde::{Deserialize, Serialize};

use crate::model::BlockId;

/// One emitted slice of a table: a rectangle placed on a page, covering
/// rows `[from_row, to_row)` plus, optionally, part of one more row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFragment {
    pub kind: FragmentKind,
    pub block_id: BlockId,
    /// Inclusive.
    pub from_row: usize,
    /// Exclusive.
    pub to_row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub continues_from_prev: bool,
    pub continues_on_next: bool,
    /// Header rows prepended on this fragment; `0` on the first fragment of
    /// a table (headers are never repeated there — they're already part of
    /// the body).
    pub repeat_header_count: usize,
    pub partial_row: Option<PartialRowInfo>,
    pub metadata: FragmentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Table,
}

/// Describes a row that is split mid-content across fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialRowInfo {
    pub row_index: usize,
    /// Per-cell global line index (inclusive), across all paragraph blocks.
    pub from_line_by_cell: EcoVec<usize>,
    /// Per-cell global line index (exclusive).
    pub to_line_by_cell: EcoVec<usize>,
    pub is_first_part: bool,
    pub is_last_part: bool,
    /// The height this slice contributes: the max over cells of each cell's
    /// included lines plus its padding, since cells share the row height
    /// rather than stacking.
    pub partial_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentMetadata {
    pub column_boundaries: EcoVec<ColumnBoundary>,
    pub coordinate_system: CoordinateSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    Fragment,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        CoordinateSystem::Fragment
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnBoundary {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    pub min_width: f64,
    pub resizable: bool,
}
