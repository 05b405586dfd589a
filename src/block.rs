//! Render State Block
//!
//! A [`RenderStateBlock`] owns one fully populated [`DescriptorSet`] plus
//! the native state objects derived from it 1:1. Objects are created once
//! at load and are immutable for the block's lifetime; many blocks may
//! coexist (typically one per material) and share nothing.
//!
//! # Block naming in the config file
//!
//! - `BlendState`, `DepthStencilState`, `RasterizerState`: fixed names,
//!   each optional.
//! - `RenderTargetBlendState_1` .. `_8`: all eight indices are attempted
//!   unconditionally; a missing index keeps defaults.
//! - `Sampler_1`, `Sampler_2`, …: scanned from 1 until the first missing
//!   index. The scan length becomes the active sampler count and index
//!   order is bind-slot order, so `Sampler_3` without `Sampler_2` is never
//!   picked up.
//!
//! The render-target loop and the sampler loop intentionally differ:
//! render targets have a fixed API maximum of eight, while samplers have no
//! implied boundary short of the slot limit.

use std::path::Path;

use smallvec::SmallVec;

use crate::config::ConfigFile;
use crate::descriptors::{DescriptorSet, MAX_RENDER_TARGETS, MAX_SAMPLER_SLOTS};
use crate::device::{SAMPLER_STAGES, StateContext, StateDevice};
use crate::errors::{Result, StateError};
use crate::field_map::{
    BLEND_FIELDS, DEPTH_STENCIL_FIELDS, RASTERIZER_FIELDS, RENDER_TARGET_BLEND_FIELDS,
    SAMPLER_FIELDS, populate,
};

fn creation_failure(kind: &'static str, source: StateError) -> StateError {
    match source {
        e @ StateError::StateObjectCreation { .. } => e,
        e => StateError::StateObjectCreation {
            kind,
            message: e.to_string(),
        },
    }
}

/// One descriptor set and its derived immutable native state objects.
#[derive(Debug)]
pub struct RenderStateBlock<D: StateDevice> {
    name: String,
    desc: DescriptorSet,
    blend_state: D::BlendState,
    depth_stencil_state: D::DepthStencilState,
    rasterizer_state: D::RasterizerState,
    samplers: SmallVec<[D::SamplerState; MAX_SAMPLER_SLOTS]>,
}

impl<D: StateDevice> RenderStateBlock<D> {
    /// Load a render state block from a file.
    pub fn load(device: &D, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_str(device, &path.display().to_string(), &text)
    }

    /// Load a render state block from already-read config text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(device: &D, name: &str, text: &str) -> Result<Self> {
        let file = ConfigFile::parse(text)?;
        let desc = Self::populate_descriptors(&file)?;
        Self::from_descriptors(device, name, desc)
    }

    /// Create a block from an already-built descriptor set, bypassing the
    /// config layer.
    pub fn from_descriptors(device: &D, name: &str, desc: DescriptorSet) -> Result<Self> {
        let blend_state = device
            .create_blend_state(&desc.blend)
            .map_err(|e| creation_failure("blend", e))?;
        let depth_stencil_state = device
            .create_depth_stencil_state(&desc.depth_stencil)
            .map_err(|e| creation_failure("depth-stencil", e))?;
        let rasterizer_state = device
            .create_rasterizer_state(&desc.rasterizer)
            .map_err(|e| creation_failure("rasterizer", e))?;

        let mut samplers = SmallVec::new();
        for sampler_desc in desc.active_samplers() {
            samplers.push(
                device
                    .create_sampler_state(sampler_desc)
                    .map_err(|e| creation_failure("sampler", e))?,
            );
        }

        log::debug!(
            "loaded render state block '{name}' ({} samplers)",
            desc.sampler_count
        );

        Ok(Self {
            name: name.to_string(),
            desc,
            blend_state,
            depth_stencil_state,
            rasterizer_state,
            samplers,
        })
    }

    fn populate_descriptors(file: &ConfigFile) -> Result<DescriptorSet> {
        let mut desc = DescriptorSet::default();

        // All eight render target indices, gaps keep defaults.
        for i in 0..MAX_RENDER_TARGETS {
            populate(
                file,
                &format!("RenderTargetBlendState_{}", i + 1),
                &RENDER_TARGET_BLEND_FIELDS,
                &mut desc.blend.render_target[i],
            )?;
        }

        populate(file, "BlendState", &BLEND_FIELDS, &mut desc)?;
        populate(file, "DepthStencilState", &DEPTH_STENCIL_FIELDS, &mut desc)?;
        populate(file, "RasterizerState", &RASTERIZER_FIELDS, &mut desc.rasterizer)?;

        // Samplers: scan until the first missing index.
        for i in 0..MAX_SAMPLER_SLOTS {
            let found = populate(
                file,
                &format!("Sampler_{}", i + 1),
                &SAMPLER_FIELDS,
                &mut desc.samplers[i],
            )?;
            if !found {
                break;
            }
            desc.sampler_count = i + 1;
        }

        Ok(desc)
    }

    /// The name the block was loaded under (usually the file path).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The populated descriptor set.
    #[must_use]
    pub fn descriptors(&self) -> &DescriptorSet {
        &self.desc
    }

    #[must_use]
    pub fn blend_state(&self) -> &D::BlendState {
        &self.blend_state
    }

    #[must_use]
    pub fn depth_stencil_state(&self) -> &D::DepthStencilState {
        &self.depth_stencil_state
    }

    #[must_use]
    pub fn rasterizer_state(&self) -> &D::RasterizerState {
        &self.rasterizer_state
    }

    /// The native sampler objects, in bind-slot order.
    #[must_use]
    pub fn samplers(&self) -> &[D::SamplerState] {
        &self.samplers
    }

    #[must_use]
    pub fn sampler_count(&self) -> usize {
        self.samplers.len()
    }

    #[must_use]
    pub fn blend_factor(&self) -> [f32; 4] {
        self.desc.blend_factor
    }

    #[must_use]
    pub fn sample_mask(&self) -> u32 {
        self.desc.sample_mask
    }

    #[must_use]
    pub fn stencil_ref(&self) -> u32 {
        self.desc.stencil_ref
    }

    /// Bind every state category unconditionally, with no diffing.
    pub fn bind_all<C: StateContext<D>>(&self, ctx: &mut C) {
        ctx.set_blend_state(&self.blend_state, self.desc.blend_factor, self.desc.sample_mask);
        ctx.set_depth_stencil_state(&self.depth_stencil_state, self.desc.stencil_ref);
        ctx.set_rasterizer_state(&self.rasterizer_state);
        for stage in SAMPLER_STAGES {
            ctx.set_samplers(stage, 0, &self.samplers);
        }
    }
}
