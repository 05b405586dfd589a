//! renderstate — config-driven fixed-function render state blocks.
//!
//! A [`RenderStateBlock`] is loaded from a text file of named key-value
//! blocks, populated over engine defaults through static field maps,
//! turned into immutable native state objects through a [`StateDevice`],
//! and bound with [`apply_transition`], which issues only the device calls
//! whose state actually changed since the previously bound block.
//!
//! ```rust
//! use renderstate::{DescDevice, RenderStateBlock, apply_transition};
//!
//! let text = "
//!     [DepthStencilState]
//!     DepthFunc = less_equal
//!     [Sampler_1]
//!     AddressU = clamp
//! ";
//! let block = RenderStateBlock::from_str(&DescDevice, "example", text)?;
//! assert_eq!(block.sampler_count(), 1);
//! # Ok::<(), renderstate::StateError>(())
//! ```
//!
//! Loading and transitions are single-threaded and synchronous. Blocks are
//! immutable after load, so sharing them across render passes read-only is
//! safe; callers that render from multiple threads must serialize
//! transition calls against the one context they mutate.

pub mod block;
pub mod config;
pub mod descriptors;
pub mod device;
pub mod errors;
pub mod field_map;
pub mod transition;
pub mod wgpu_interop;

pub use block::RenderStateBlock;
pub use config::{ConfigBlock, ConfigEntry, ConfigFile};
pub use descriptors::{
    AddressMode, Blend, BlendDesc, BlendOp, ColorWriteMask, ComparisonFunc, CullMode,
    DepthStencilDesc, DepthWriteMask, DescriptorSet, EnumToken, FillMode, Filter,
    MAX_RENDER_TARGETS, MAX_SAMPLER_SLOTS, MAX_STATE_LABEL, RasterizerDesc,
    RenderTargetBlendDesc, SamplerDesc, StencilOp, StencilOpDesc,
};
pub use device::{DescDevice, SAMPLER_STAGES, ShaderStage, StateContext, StateDevice};
pub use errors::{FieldError, Result, StateError};
pub use transition::apply_transition;
pub use wgpu_interop::{WgpuSampler, WgpuStateDevice};
