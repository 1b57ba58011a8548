//! Spec: CSS 2.2 §9.4.3 Relative positioning — pinning offsets for dragging
//!
//! A relatively positioned box moves by `top`/`left` from its normal-flow
//! position; `bottom`/`right` only apply when the opposite offset is `auto`
//! and then act as negated `top`/`left`.

use drag_host::StyleMutation;
use drag_values_units::AbsoluteValues;

use crate::axis::Axis;
use crate::{offset_px, px};

/// Reduce one axis to its start offset, recording the edits in `mutation`.
/// Returns the start offset in pixels.
pub fn pin_axis(axis: Axis, values: &AbsoluteValues, mutation: &mut StyleMutation) -> f64 {
    let start = offset_px(values, axis.start());
    let end = offset_px(values, axis.end());
    match (start, end) {
        (None, None) => {
            mutation.set(axis.start().css_name(), "0");
            0.0
        }
        (None, Some(end_px)) => {
            // `0 - x` keeps a zero offset from serializing as `-0px`.
            let start_px = 0.0 - end_px;
            mutation.set(axis.start().css_name(), px(start_px));
            mutation.set(axis.end().css_name(), "auto");
            start_px
        }
        // Over-constrained: the start offset already wins.
        (Some(start_px), Some(_)) => {
            mutation.set(axis.end().css_name(), "auto");
            start_px
        }
        (Some(start_px), None) => start_px,
    }
}
