//! Measurement results: input to the layout core, produced by the
//! (out-of-scope) measurement pass.

use ecow::EcoVec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Per-table measurement output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeasure {
    pub rows: EcoVec<RowMeasure>,
    pub column_widths: EcoVec<f64>,
    pub total_width: f64,
    pub total_height: f64,
}

impl TableMeasure {
    /// Height of `measure.rows[row]`, or `0.0` if out of range.
    pub fn row_height(&self, row: usize) -> f64 {
        self.rows.get(row).map_or(0.0, |r| r.height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowMeasure {
    pub height: f64,
    pub cells: EcoVec<CellMeasure>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMeasure {
    pub blocks: EcoVec<BlockMeasure>,
}

impl CellMeasure {
    /// Flattens every paragraph block's lines into one global per-cell
    /// sequence, in block order. Non-paragraph blocks contribute nothing.
    pub fn lines(&self) -> Vec<&LineMeasure> {
        self.blocks.iter().flat_map(BlockMeasure::lines).collect()
    }

    pub fn total_lines(&self) -> usize {
        self.blocks.iter().map(|b| b.line_count()).sum()
    }
}

/// A single content block's measurement. Only [`BlockMeasure::Paragraph`]
/// carries lines; any other kind measures as zero lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockMeasure {
    Paragraph { lines: SmallVec<[LineMeasure; 4]> },
    Other,
}

impl BlockMeasure {
    pub fn lines(&self) -> &[LineMeasure] {
        match self {
            BlockMeasure::Paragraph { lines } => lines,
            BlockMeasure::Other => &[],
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }
}

/// A single line of text within a paragraph block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineMeasure {
    pub line_height: f64,
    pub total_height: f64,
}
