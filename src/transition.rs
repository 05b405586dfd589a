//! Minimal-Diff State Transitions
//!
//! [`apply_transition`] switches the bound render state block, issuing only
//! the device bind calls whose state actually changed. This runs once per
//! draw batch, so the comparisons are kept cheap: native objects compare by
//! handle, floats compare exactly (config-driven values are stable, not
//! computed), and the four state categories diff independently of each
//! other.
//!
//! Sampler diffing is deliberately all-or-nothing: if the count or any
//! matching slot differs, the whole array is rebound to every sampler-
//! consuming stage. Per-slot diffing would save little and cost
//! bookkeeping.

use crate::block::RenderStateBlock;
use crate::device::{SAMPLER_STAGES, StateContext, StateDevice};

/// Bind `new`, diffed against the currently bound block.
///
/// Pass `None` for `current` when nothing has been bound yet (e.g. the
/// first draw of a frame). The baseline then assumed is a pristine device:
/// no state objects bound, sample mask all ones, blend factor `(1,1,1,1)`,
/// no stencil reference, zero samplers. The object and stencil-reference
/// sentinels are unset values distinct from anything a loaded block can
/// hold, so the first bind of any block always applies those categories.
pub fn apply_transition<D, C>(
    new: &RenderStateBlock<D>,
    current: Option<&RenderStateBlock<D>>,
    ctx: &mut C,
) where
    D: StateDevice,
    C: StateContext<D>,
{
    if let Some(current) = current
        && std::ptr::eq(new, current)
    {
        return;
    }

    // Blend: object identity, sample mask, or any blend factor component.
    let (current_blend, current_mask, current_factor) = match current {
        Some(c) => (Some(c.blend_state()), c.sample_mask(), c.blend_factor()),
        None => (None, u32::MAX, [1.0; 4]),
    };
    if Some(new.blend_state()) != current_blend
        || new.sample_mask() != current_mask
        || new.blend_factor() != current_factor
    {
        ctx.set_blend_state(new.blend_state(), new.blend_factor(), new.sample_mask());
    }

    // Depth-stencil: object identity or stencil reference.
    let (current_depth_stencil, current_stencil_ref) = match current {
        Some(c) => (Some(c.depth_stencil_state()), Some(c.stencil_ref())),
        None => (None, None),
    };
    if Some(new.depth_stencil_state()) != current_depth_stencil
        || Some(new.stencil_ref()) != current_stencil_ref
    {
        ctx.set_depth_stencil_state(new.depth_stencil_state(), new.stencil_ref());
    }

    // Rasterizer: object identity only.
    let current_rasterizer = current.map(RenderStateBlock::rasterizer_state);
    if Some(new.rasterizer_state()) != current_rasterizer {
        ctx.set_rasterizer_state(new.rasterizer_state());
    }

    // Samplers: slice equality covers both count and per-slot differences.
    let current_samplers = current.map_or(&[][..], RenderStateBlock::samplers);
    if new.samplers() != current_samplers {
        for stage in SAMPLER_STAGES {
            ctx.set_samplers(stage, 0, new.samplers());
        }
    }
}
