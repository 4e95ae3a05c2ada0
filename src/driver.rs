//! The top-level loop that decides monolithic vs. split layout, manages
//! continuation state, emits fragments, and advances the paginator's cursor.

use std::time::Instant;

use ecow::EcoVec;

use crate::fragment::{
    ColumnBoundary, CoordinateSystem, FragmentKind, FragmentMetadata, PartialRowInfo,
    TableFragment,
};
use crate::geometry::{
    apply_table_indent, count_header_rows, generate_column_boundaries, sum_row_heights,
    table_indent_width,
};
use crate::instrument::LayoutContext;
use crate::measure::TableMeasure;
use crate::model::TableBlock;
use crate::paginator::Paginator;
use crate::partial::plan_partial_row;
use crate::split::find_split_point;

/// Lays out `block` into `paginator`, emitting [`TableFragment`]s for every
/// page/column the table spans.
///
/// This is a pure function of its inputs plus the paginator handle: no
/// global state, no return value — fragments are pushed directly onto the
/// paginator's current page. Equivalent to [`layout_table_with_context`]
/// with no timings attached.
pub fn layout_table<P: Paginator>(block: &TableBlock, measure: &TableMeasure, paginator: &mut P) {
    layout_table_with_context(block, measure, paginator, &mut LayoutContext::new());
}

/// Like [`layout_table`], but threads an optional [`LayoutContext`] through
/// so a caller can collect [`crate::instrument::Timings`] for the
/// split-point search and partial-row planning.
pub fn layout_table_with_context<P: Paginator>(
    block: &TableBlock,
    measure: &TableMeasure,
    paginator: &mut P,
    ctx: &mut LayoutContext<'_>,
) {
    if block.attrs.is_anchored() {
        // The float manager will later call `create_anchored_table_fragment`.
        return;
    }

    if block.rows.is_empty() {
        if measure.total_height <= 0.0 {
            return;
        }
        layout_monolithic(block, measure, paginator);
        return;
    }

    if block.attrs.has_floating_table_properties() {
        layout_monolithic(block, measure, paginator);
        return;
    }

    let one_page_height = content_height_of_one_page(paginator);
    if measure.total_height <= one_page_height {
        layout_monolithic(block, measure, paginator);
        return;
    }

    layout_split(block, measure, paginator, ctx);
}

/// `content_bottom - margin_top`: the content height of a single page, used
/// to decide whether a table needs to split at all. Preserved as exactly
/// this formula even though `cursor_y` may already be below `margin_top`
/// when earlier content occupies the page.
fn content_height_of_one_page<P: Paginator>(paginator: &mut P) -> f64 {
    let page = paginator.ensure_page();
    page.content_bottom - page.margin_top.unwrap_or(0.0)
}

fn fragment_geometry<P: Paginator>(
    paginator: &P,
    column_index: usize,
    indent: f64,
    total_width: f64,
    column_width: f64,
) -> (f64, f64) {
    let effective_width =
        if total_width > 0.0 { column_width.min(total_width) } else { column_width };
    let base_x = paginator.column_x(column_index);
    apply_table_indent(base_x, effective_width, indent)
}

fn metadata(boundaries: &EcoVec<ColumnBoundary>) -> FragmentMetadata {
    FragmentMetadata {
        column_boundaries: boundaries.clone(),
        coordinate_system: CoordinateSystem::Fragment,
    }
}

fn layout_monolithic<P: Paginator>(block: &TableBlock, measure: &TableMeasure, paginator: &mut P) {
    let needs_advance = {
        let page = paginator.ensure_page();
        page.cursor_y + measure.total_height > page.content_bottom && !page.fragments.is_empty()
    };
    if needs_advance {
        paginator.advance_column();
    }

    let (height, column_index, y) = {
        let page = paginator.ensure_page();
        (measure.total_height.min(page.content_bottom - page.cursor_y), page.column_index, page.cursor_y)
    };

    let indent = table_indent_width(block);
    let column_width = paginator.column_width();
    let (x, width) =
        fragment_geometry(paginator, column_index, indent, measure.total_width, column_width);
    let boundaries = generate_column_boundaries(measure);

    let fragment = TableFragment {
        kind: FragmentKind::Table,
        block_id: block.id.clone(),
        from_row: 0,
        to_row: block.rows.len(),
        x,
        y,
        width,
        height,
        continues_from_prev: false,
        continues_on_next: false,
        repeat_header_count: 0,
        partial_row: None,
        metadata: metadata(&boundaries),
    };

    let page = paginator.ensure_page();
    page.fragments.push(fragment);
    page.cursor_y += height;
}

fn layout_split<P: Paginator>(
    block: &TableBlock,
    measure: &TableMeasure,
    paginator: &mut P,
    ctx: &mut LayoutContext<'_>,
) {
    let header_count = count_header_rows(block);
    let header_height = sum_row_heights(measure, 0, header_count);
    let indent = table_indent_width(block);
    let boundaries = generate_column_boundaries(measure);

    preflight(block, measure, paginator);

    let mut current_row = 0usize;
    let mut is_table_continuation = false;
    let mut pending_partial_row: Option<PartialRowInfo> = None;

    loop {
        if current_row >= block.rows.len() && pending_partial_row.is_none() {
            break;
        }

        let page = paginator.ensure_page();
        let available_height = page.available_height();
        let has_fragments = !page.fragments.is_empty();
        let content_bottom = page.content_bottom;
        let column_index = page.column_index;

        let repeat_header_count =
            if current_row == 0 && pending_partial_row.is_none() {
                0
            } else if header_height <= available_height {
                header_count
            } else {
                0
            };
        let available_for_body =
            available_height - if repeat_header_count > 0 { header_height } else { 0.0 };

        if let Some(pending) = pending_partial_row.take() {
            continue_partial_row(
                block,
                measure,
                paginator,
                pending,
                available_for_body,
                repeat_header_count,
                header_height,
                indent,
                &boundaries,
                column_index,
                &mut current_row,
                &mut pending_partial_row,
                ctx,
            );
            is_table_continuation = true;
            continue;
        }

        let t0 = Instant::now();
        let sp = find_split_point(block, measure, current_row, available_for_body, content_bottom);
        ctx.record("split_point", t0.elapsed());

        let (end_row, partial_row) = if sp.end_row == current_row && sp.partial_row.is_none() {
            if has_fragments {
                paginator.advance_column();
                continue;
            }
            // Over-tall escape hatch: force a mid-row split on an empty page
            // even if the row is `cantSplit`.
            let row = &block.rows[current_row];
            let t0 = Instant::now();
            let plan = plan_partial_row(
                current_row,
                row,
                &measure.rows[current_row],
                available_for_body,
                None,
            );
            ctx.record("partial_row", t0.elapsed());
            (current_row + 1, Some(plan))
        } else {
            (sp.end_row, sp.partial_row)
        };

        let (full_rows_end, partial) = match &partial_row {
            Some(p) => (p.row_index, Some(p.clone())),
            None => (end_row, None),
        };
        let full_rows_sum = sum_row_heights(measure, current_row, full_rows_end);
        let fragment_height = full_rows_sum
            + partial.as_ref().map_or(0.0, |p| p.partial_height)
            + if repeat_header_count > 0 { header_height } else { 0.0 };

        let (x, width) = fragment_geometry(
            paginator,
            column_index,
            indent,
            measure.total_width,
            paginator.column_width(),
        );

        let continues_on_next =
            end_row < block.rows.len() || partial.as_ref().is_some_and(|p| !p.is_last_part);

        let page = paginator.ensure_page();
        let y = page.cursor_y;
        let fragment = TableFragment {
            kind: FragmentKind::Table,
            block_id: block.id.clone(),
            from_row: current_row,
            to_row: end_row,
            x,
            y,
            width,
            height: fragment_height,
            continues_from_prev: is_table_continuation,
            continues_on_next,
            repeat_header_count,
            partial_row: partial.clone(),
            metadata: metadata(&boundaries),
        };
        page.fragments.push(fragment);
        page.cursor_y += fragment_height;

        match partial {
            Some(p) if !p.is_last_part => {
                current_row = p.row_index;
                pending_partial_row = Some(p);
            }
            _ => {
                current_row = end_row;
                pending_partial_row = None;
            }
        }
        is_table_continuation = true;
    }
}

/// Decides, at the start of a split table, whether the table begins on the
/// current (already non-empty) page or advances to a fresh one first.
fn preflight<P: Paginator>(block: &TableBlock, measure: &TableMeasure, paginator: &mut P) {
    let page = paginator.ensure_page();
    if page.fragments.is_empty() {
        return;
    }
    let available = page.available_height();

    if let Some(row0) = block.rows.first() {
        if row0.attrs.cant_split {
            if measure.row_height(0) > available {
                paginator.advance_column();
            }
        } else {
            let plan = plan_partial_row(0, row0, &measure.rows[0], available, None);
            let made_progress = plan
                .to_line_by_cell
                .iter()
                .zip(plan.from_line_by_cell.iter())
                .any(|(to, from)| to > from);
            if !made_progress && plan.partial_height <= 0.0 {
                paginator.advance_column();
            }
        }
    } else if measure.total_height > available {
        paginator.advance_column();
    }
}

/// Continues a row that was only partially emitted on the previous
/// page/column.
#[allow(clippy::too_many_arguments)]
fn continue_partial_row<P: Paginator>(
    block: &TableBlock,
    measure: &TableMeasure,
    paginator: &mut P,
    pending: PartialRowInfo,
    available_for_body: f64,
    repeat_header_count: usize,
    header_height: f64,
    indent: f64,
    boundaries: &EcoVec<ColumnBoundary>,
    column_index: usize,
    current_row: &mut usize,
    pending_partial_row: &mut Option<PartialRowInfo>,
    ctx: &mut LayoutContext<'_>,
) {
    let row = &block.rows[pending.row_index];
    let row_measure = &measure.rows[pending.row_index];
    let t0 = Instant::now();
    let new_plan = plan_partial_row(
        pending.row_index,
        row,
        row_measure,
        available_for_body,
        Some(pending.to_line_by_cell.as_slice()),
    );
    ctx.record("partial_row", t0.elapsed());
    let made_progress = new_plan
        .to_line_by_cell
        .iter()
        .zip(new_plan.from_line_by_cell.iter())
        .any(|(to, from)| to > from);

    if !made_progress {
        let page = paginator.ensure_page();
        if !page.fragments.is_empty() {
            paginator.advance_column();
        }
        // Retry with the same pending partial row next iteration. On an
        // empty page this would stall forever, but a fresh page always has
        // room for at least one line, so reaching here with no fragments is
        // an invariant violation rather than a reachable state.
        debug_assert!(
            paginator.ensure_page().available_height() > 0.0,
            "paginator did not provide a fresh page with room to make progress"
        );
        *pending_partial_row = Some(pending);
        return;
    }

    let has_more = new_plan
        .to_line_by_cell
        .iter()
        .enumerate()
        .any(|(i, &to)| to < row_measure.cells[i].total_lines());

    if new_plan.partial_height > 0.0 {
        let continues_on_next = has_more || (pending.row_index + 1 < block.rows.len());
        let (x, width) = fragment_geometry(
            paginator,
            column_index,
            indent,
            measure.total_width,
            paginator.column_width(),
        );
        let fragment_height =
            new_plan.partial_height + if repeat_header_count > 0 { header_height } else { 0.0 };

        let page = paginator.ensure_page();
        let y = page.cursor_y;
        let fragment = TableFragment {
            kind: FragmentKind::Table,
            block_id: block.id.clone(),
            from_row: pending.row_index,
            to_row: pending.row_index,
            x,
            y,
            width,
            height: fragment_height,
            continues_from_prev: true,
            continues_on_next,
            repeat_header_count,
            partial_row: Some(new_plan.clone()),
            metadata: metadata(boundaries),
        };
        page.fragments.push(fragment);
        page.cursor_y += fragment_height;
    }

    if !has_more {
        *current_row = pending.row_index + 1;
        *pending_partial_row = None;
    } else {
        *current_row = pending.row_index;
        *pending_partial_row = Some(new_plan);
    }
}
