//! Spec: CSS 2.2 §10.3.7 / §10.6.4 Absolutely positioned, non-replaced elements
//!
//! For `absolute` and `fixed` boxes the used position depends on which of the
//! two offsets on an axis are `auto`. Dragging rewrites the axis so that only
//! the start offset remains, pinning the size when removing an offset would
//! otherwise let the box shrink-to-fit.

use drag_host::{BoxMetrics, NodeKey, StyleMutation, VisualHost};
use drag_values_units::{AbsoluteValues, resolve_absolute};
use log::trace;

use crate::axis::Axis;
use crate::{PositionScheme, offset_px, px};

/// Reduce one axis of an out-of-flow box to its start offset.
/// Returns the start offset in pixels.
pub fn pin_axis<H>(
    host: &H,
    node: NodeKey,
    scheme: PositionScheme,
    axis: Axis,
    values: &AbsoluteValues,
    metrics: &BoxMetrics,
    mutation: &mut StyleMutation,
) -> f64
where
    H: VisualHost + ?Sized,
{
    let start = offset_px(values, axis.start());
    let end = offset_px(values, axis.end());
    match (start, end) {
        (Some(start_px), Some(_)) => {
            mutation.set(axis.size().css_name(), pinned_size(host, node, axis, values, metrics));
            mutation.set(axis.end().css_name(), "auto");
            mutation.set(axis.start().css_name(), px(start_px));
            start_px
        }
        // Neither offset resolves: fall back to where layout put the box.
        (None, None) => {
            mutation.set(axis.size().css_name(), pinned_size(host, node, axis, values, metrics));
            let start_px = axis.offset_start(metrics);
            mutation.set(axis.start().css_name(), px(start_px));
            start_px
        }
        (None, Some(end_px)) => {
            let container = containing_extent(host, node, scheme, axis);
            let start_px = container - axis.offset_size(metrics) - end_px;
            trace!(
                "{node}: {} {end_px}px in {container}px container -> {} {start_px}px",
                axis.end(),
                axis.start()
            );
            mutation.set(axis.start().css_name(), px(start_px));
            mutation.set(axis.end().css_name(), "auto");
            start_px
        }
        (Some(start_px), None) => start_px,
    }
}

/// The specified size, or the content size derived from the border box.
fn pinned_size<H>(
    host: &H,
    node: NodeKey,
    axis: Axis,
    values: &AbsoluteValues,
    metrics: &BoxMetrics,
) -> String
where
    H: VisualHost + ?Sized,
{
    if let Some(size_px) = offset_px(values, axis.size()) {
        return px(size_px);
    }
    let edges: f64 = axis
        .box_edges()
        .iter()
        .map(|&edge| resolve_absolute(host, node, edge).px_or(0.0))
        .sum();
    px(axis.offset_size(metrics) - edges)
}

/// Size of the box the end offset is measured from: the offset parent's
/// padding box for `absolute`, the viewport for `fixed`.
fn containing_extent<H>(host: &H, node: NodeKey, scheme: PositionScheme, axis: Axis) -> f64
where
    H: VisualHost + ?Sized,
{
    let offset_parent = match scheme {
        PositionScheme::Fixed => None,
        _ => host.offset_parent(node),
    };
    offset_parent.map_or_else(
        || axis.viewport_extent(&host.viewport()),
        |parent| {
            let borders: f64 = axis
                .borders()
                .iter()
                .map(|&border| resolve_absolute(host, parent, border).px_or(0.0))
                .sum();
            axis.offset_size(&host.box_metrics(parent)) - borders
        },
    )
}
