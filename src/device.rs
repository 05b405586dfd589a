//! Device & Context Abstraction
//!
//! Render state blocks never talk to a graphics API directly. Object
//! creation goes through a [`StateDevice`] passed into the load, and binding
//! goes through a [`StateContext`] passed into each transition — there is no
//! global device.
//!
//! # Identity contract
//!
//! The transition diff compares native objects by handle equality, not by
//! descriptor contents. Implementations must guarantee that handle equality
//! correlates 1:1 with descriptor-value equality: equal handles must mean
//! identical state. The converse (distinct handles for equal descriptors)
//! is allowed and merely costs a redundant rebind.

use crate::descriptors::{BlendDesc, DepthStencilDesc, RasterizerDesc, SamplerDesc};
use crate::errors::Result;

/// Shader stages that consume samplers.
///
/// Sampler binds always target every stage listed in [`SAMPLER_STAGES`];
/// per-stage customization is deliberately not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

/// The stages a sampler array is bound to, in bind order.
pub const SAMPLER_STAGES: [ShaderStage; 3] = [
    ShaderStage::Vertex,
    ShaderStage::Geometry,
    ShaderStage::Fragment,
];

/// Creates immutable native state objects from finished descriptors.
pub trait StateDevice {
    type BlendState: PartialEq;
    type DepthStencilState: PartialEq;
    type RasterizerState: PartialEq;
    type SamplerState: PartialEq;

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<Self::BlendState>;
    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> Result<Self::DepthStencilState>;
    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Self::RasterizerState>;
    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Self::SamplerState>;
}

/// Receives bind calls. Typically a thin wrapper over a command encoder or
/// an immediate device context; bind operations have no failure path at
/// this layer.
pub trait StateContext<D: StateDevice> {
    fn set_blend_state(&mut self, state: &D::BlendState, blend_factor: [f32; 4], sample_mask: u32);
    fn set_depth_stencil_state(&mut self, state: &D::DepthStencilState, stencil_ref: u32);
    fn set_rasterizer_state(&mut self, state: &D::RasterizerState);
    fn set_samplers(&mut self, stage: ShaderStage, start_slot: u32, samplers: &[D::SamplerState]);
}

/// A headless device whose "native objects" are the descriptor values
/// themselves.
///
/// Handle equality is descriptor equality, so the identity contract holds
/// trivially. Useful for tools, tests, and renderers that fold state into
/// pipeline creation instead of discrete objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescDevice;

impl StateDevice for DescDevice {
    type BlendState = BlendDesc;
    type DepthStencilState = DepthStencilDesc;
    type RasterizerState = RasterizerDesc;
    type SamplerState = SamplerDesc;

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<BlendDesc> {
        Ok(*desc)
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> Result<DepthStencilDesc> {
        Ok(*desc)
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<RasterizerDesc> {
        Ok(*desc)
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<SamplerDesc> {
        Ok(desc.clone())
    }
}
