//! Builds a fragment for a table the float manager has already placed.
//!
//! Called by the float manager once it has computed a placement for a table
//! whose `attrs.anchor.isAnchored` is `true` — the pagination driver
//! short-circuits entirely for such tables (see
//! [`crate::driver::layout_table`]'s first early exit).

use crate::fragment::{CoordinateSystem, FragmentKind, FragmentMetadata, TableFragment};
use crate::geometry::generate_column_boundaries;
use crate::measure::TableMeasure;
use crate::model::TableBlock;

/// Builds a single fragment covering every row of `block`, at the given
/// document-coordinate position.
pub fn create_anchored_table_fragment(
    block: &TableBlock,
    measure: &TableMeasure,
    x: f64,
    y: f64,
) -> TableFragment {
    TableFragment {
        kind: FragmentKind::Table,
        block_id: block.id.clone(),
        from_row: 0,
        to_row: block.rows.len(),
        x,
        y,
        width: measure.total_width,
        height: measure.total_height,
        continues_from_prev: false,
        continues_on_next: false,
        repeat_header_count: 0,
        partial_row: None,
        metadata: FragmentMetadata {
            column_boundaries: generate_column_boundaries(measure),
            coordinate_system: CoordinateSystem::Fragment,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecow::EcoVec;
    use crate::model::TableAttrs;

    #[test]
    fn covers_all_rows_at_given_position() {
        let block = TableBlock {
            id: "anchored".into(),
            rows: EcoVec::from([
                crate::model::TableRow { cells: EcoVec::new(), attrs: Default::default() },
                crate::model::TableRow { cells: EcoVec::new(), attrs: Default::default() },
            ]),
            attrs: TableAttrs::default(),
        };
        let measure = TableMeasure {
            rows: EcoVec::new(),
            column_widths: EcoVec::from([100.0]),
            total_width: 100.0,
            total_height: 80.0,
        };
        let frag = create_anchored_table_fragment(&block, &measure, 10.0, 20.0);
        assert_eq!(frag.from_row, 0);
        assert_eq!(frag.to_row, 2);
        assert_eq!((frag.x, frag.y), (10.0, 20.0));
        assert_eq!(frag.height, 80.0);
    }
}
