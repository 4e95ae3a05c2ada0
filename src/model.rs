//! Input data model: the table as given to the layout core.
//!
//! The core only ever sees the uniform, normalized shape below, regardless
//! of which legacy fields a producer emitted.

use ecow::EcoVec;
use serde::{Deserialize, Serialize};

use crate::constants::Padding;

/// An opaque block identifier, passed through to fragments unchanged.
pub type BlockId = ecow::EcoString;

/// A measured table, as handed to [`crate::driver::layout_table`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    pub id: BlockId,
    pub rows: EcoVec<TableRow>,
    #[serde(default)]
    pub attrs: TableAttrs,
}

impl TableBlock {
    /// Prefix count of rows with `repeat_header == true`.
    pub fn header_count(&self) -> usize {
        self.rows.iter().take_while(|r| r.attrs.repeat_header).count()
    }
}

/// Attributes that live on the table block itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableAttrs {
    #[serde(default)]
    pub table_indent: Option<TableIndent>,
    #[serde(default)]
    pub table_properties: Option<TableProperties>,
    #[serde(default)]
    pub anchor: Option<Anchor>,
}

impl TableAttrs {
    /// Whether a floating-table layout should be used: the properties bag
    /// is present *and* non-empty.
    pub fn has_floating_table_properties(&self) -> bool {
        self.table_properties
            .as_ref()
            .and_then(|p| p.floating_table_properties.as_ref())
            .is_some_and(|f| !f.is_empty())
    }

    /// Whether the float manager owns this table entirely.
    pub fn is_anchored(&self) -> bool {
        self.anchor.as_ref().is_some_and(|a| a.is_anchored)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TableIndent {
    pub width: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableProperties {
    #[serde(default)]
    pub floating_table_properties: Option<FloatingTableProperties>,
}

/// Opaque bag: the core only cares whether it's present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloatingTableProperties(#[serde(default)] serde_json::Map<String, serde_json::Value>);

impl FloatingTableProperties {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anchor {
    pub is_anchored: bool,
}

/// A row of cells, plus per-row layout attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: EcoVec<TableCell>,
    #[serde(default)]
    pub attrs: RowAttrs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowAttrs {
    /// Contiguous `true` values from row 0 define the header prefix.
    #[serde(default)]
    pub repeat_header: bool,
    /// Forbids splitting mid-content, except the over-tall escape hatch.
    #[serde(default)]
    pub cant_split: bool,
}

/// A single cell: a sequence of content blocks plus padding/paint hints.
///
/// Deserializes through [`RawTableCell`] so that a producer emitting the
/// legacy single-`paragraph` shape and one emitting `blocks` both arrive at
/// the same in-memory representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawTableCell", into = "RawTableCell")]
pub struct TableCell {
    pub blocks: EcoVec<BlockKind>,
    pub attrs: CellAttrs,
}

/// The kind of a content block; only [`BlockKind::Paragraph`] contributes
/// lines to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellAttrs {
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub vertical_align: Option<VerticalAlign>,
}

/// Consumed by the painter only; the core never reads this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawTableCell {
    #[serde(default)]
    blocks: Option<EcoVec<BlockKind>>,
    /// Legacy single-paragraph shape: presence implies one paragraph block.
    #[serde(default)]
    paragraph: Option<serde_json::Value>,
    #[serde(default)]
    attrs: CellAttrs,
}

impl From<RawTableCell> for TableCell {
    fn from(raw: RawTableCell) -> Self {
        let blocks = match raw.blocks {
            Some(blocks) => blocks,
            None if raw.paragraph.is_some() => EcoVec::from([BlockKind::Paragraph]),
            None => EcoVec::new(),
        };
        TableCell { blocks, attrs: raw.attrs }
    }
}

impl From<TableCell> for RawTableCell {
    fn from(cell: TableCell) -> Self {
        RawTableCell { blocks: Some(cell.blocks), paragraph: None, attrs: cell.attrs }
    }
}
