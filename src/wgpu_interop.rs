//! wgpu Interop
//!
//! Conversions from the crate's descriptors to `wgpu` types, plus
//! [`WgpuStateDevice`], a [`StateDevice`] backed by a `wgpu::Device`.
//!
//! wgpu folds blend, depth-stencil and rasterizer state into pipeline
//! creation instead of discrete state objects, so for those categories the
//! "native object" is the converted descriptor value itself; handle
//! equality is value equality and the identity contract holds exactly.
//! Samplers are real `wgpu::Sampler`s wrapped for pointer equality — two
//! blocks with identical sampler descriptors get distinct objects, which
//! at worst costs a redundant rebind.

use std::sync::Arc;

use crate::descriptors::{
    AddressMode, Blend, BlendDesc, BlendOp, ColorWriteMask, ComparisonFunc, CullMode,
    DepthStencilDesc, DepthWriteMask, FillMode, Filter, RasterizerDesc, RenderTargetBlendDesc,
    SamplerDesc, StencilOp, StencilOpDesc,
};
use crate::device::StateDevice;
use crate::errors::Result;

impl From<ComparisonFunc> for wgpu::CompareFunction {
    fn from(func: ComparisonFunc) -> Self {
        match func {
            ComparisonFunc::Never => wgpu::CompareFunction::Never,
            ComparisonFunc::Less => wgpu::CompareFunction::Less,
            ComparisonFunc::Equal => wgpu::CompareFunction::Equal,
            ComparisonFunc::LessEqual => wgpu::CompareFunction::LessEqual,
            ComparisonFunc::Greater => wgpu::CompareFunction::Greater,
            ComparisonFunc::NotEqual => wgpu::CompareFunction::NotEqual,
            ComparisonFunc::GreaterEqual => wgpu::CompareFunction::GreaterEqual,
            ComparisonFunc::Always => wgpu::CompareFunction::Always,
        }
    }
}

impl From<AddressMode> for wgpu::AddressMode {
    fn from(mode: AddressMode) -> Self {
        match mode {
            AddressMode::Wrap => wgpu::AddressMode::Repeat,
            AddressMode::Mirror => wgpu::AddressMode::MirrorRepeat,
            AddressMode::Clamp => wgpu::AddressMode::ClampToEdge,
            AddressMode::Border => wgpu::AddressMode::ClampToBorder,
        }
    }
}

impl From<Blend> for wgpu::BlendFactor {
    fn from(blend: Blend) -> Self {
        match blend {
            Blend::Zero => wgpu::BlendFactor::Zero,
            Blend::One => wgpu::BlendFactor::One,
            Blend::SrcColor => wgpu::BlendFactor::Src,
            Blend::InvSrcColor => wgpu::BlendFactor::OneMinusSrc,
            Blend::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            Blend::InvSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            Blend::DestAlpha => wgpu::BlendFactor::DstAlpha,
            Blend::InvDestAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
            Blend::DestColor => wgpu::BlendFactor::Dst,
            Blend::InvDestColor => wgpu::BlendFactor::OneMinusDst,
            Blend::SrcAlphaSat => wgpu::BlendFactor::SrcAlphaSaturated,
            Blend::BlendFactor => wgpu::BlendFactor::Constant,
            Blend::InvBlendFactor => wgpu::BlendFactor::OneMinusConstant,
        }
    }
}

impl From<BlendOp> for wgpu::BlendOperation {
    fn from(op: BlendOp) -> Self {
        match op {
            BlendOp::Add => wgpu::BlendOperation::Add,
            BlendOp::Subtract => wgpu::BlendOperation::Subtract,
            BlendOp::RevSubtract => wgpu::BlendOperation::ReverseSubtract,
            BlendOp::Min => wgpu::BlendOperation::Min,
            BlendOp::Max => wgpu::BlendOperation::Max,
        }
    }
}

impl From<StencilOp> for wgpu::StencilOperation {
    fn from(op: StencilOp) -> Self {
        match op {
            StencilOp::Keep => wgpu::StencilOperation::Keep,
            StencilOp::Zero => wgpu::StencilOperation::Zero,
            StencilOp::Replace => wgpu::StencilOperation::Replace,
            StencilOp::IncrSat => wgpu::StencilOperation::IncrementClamp,
            StencilOp::DecrSat => wgpu::StencilOperation::DecrementClamp,
            StencilOp::Invert => wgpu::StencilOperation::Invert,
            StencilOp::Incr => wgpu::StencilOperation::IncrementWrap,
            StencilOp::Decr => wgpu::StencilOperation::DecrementWrap,
        }
    }
}

impl From<FillMode> for wgpu::PolygonMode {
    fn from(mode: FillMode) -> Self {
        match mode {
            FillMode::Solid => wgpu::PolygonMode::Fill,
            FillMode::Wireframe => wgpu::PolygonMode::Line,
        }
    }
}

impl From<CullMode> for Option<wgpu::Face> {
    fn from(mode: CullMode) -> Self {
        match mode {
            CullMode::None => None,
            CullMode::Front => Some(wgpu::Face::Front),
            CullMode::Back => Some(wgpu::Face::Back),
        }
    }
}

impl From<ColorWriteMask> for wgpu::ColorWrites {
    fn from(mask: ColorWriteMask) -> Self {
        // Same bit layout: R=1, G=2, B=4, A=8.
        wgpu::ColorWrites::from_bits_truncate(u32::from(mask.bits()))
    }
}

impl From<StencilOpDesc> for wgpu::StencilFaceState {
    fn from(desc: StencilOpDesc) -> Self {
        wgpu::StencilFaceState {
            compare: desc.func.into(),
            fail_op: desc.fail_op.into(),
            depth_fail_op: desc.depth_fail_op.into(),
            pass_op: desc.pass_op.into(),
        }
    }
}

impl Filter {
    fn wgpu_filters(self) -> (wgpu::FilterMode, wgpu::FilterMode, wgpu::MipmapFilterMode) {
        match self {
            Filter::MinMagMipPoint | Filter::ComparisonMinMagMipPoint => (
                wgpu::FilterMode::Nearest,
                wgpu::FilterMode::Nearest,
                wgpu::MipmapFilterMode::Nearest,
            ),
            Filter::MinMagPointMipLinear => (
                wgpu::FilterMode::Nearest,
                wgpu::FilterMode::Nearest,
                wgpu::MipmapFilterMode::Linear,
            ),
            Filter::MinMagLinearMipPoint => (
                wgpu::FilterMode::Linear,
                wgpu::FilterMode::Linear,
                wgpu::MipmapFilterMode::Nearest,
            ),
            // Anisotropic sampling requires all-linear filters in wgpu.
            Filter::MinMagMipLinear
            | Filter::Anisotropic
            | Filter::ComparisonMinMagMipLinear
            | Filter::ComparisonAnisotropic => (
                wgpu::FilterMode::Linear,
                wgpu::FilterMode::Linear,
                wgpu::MipmapFilterMode::Linear,
            ),
        }
    }
}

impl RenderTargetBlendDesc {
    /// The wgpu blend state for this target, `None` when blending is
    /// disabled.
    #[must_use]
    pub fn to_wgpu_blend(&self) -> Option<wgpu::BlendState> {
        self.blend_enable.then(|| wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: self.src_blend.into(),
                dst_factor: self.dest_blend.into(),
                operation: self.blend_op.into(),
            },
            alpha: wgpu::BlendComponent {
                src_factor: self.src_blend_alpha.into(),
                dst_factor: self.dest_blend_alpha.into(),
                operation: self.blend_op_alpha.into(),
            },
        })
    }

    /// Build a full color target state for `format`.
    #[must_use]
    pub fn to_wgpu_color_target(&self, format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format,
            blend: self.to_wgpu_blend(),
            write_mask: self.write_mask.into(),
        }
    }
}

impl DepthStencilDesc {
    /// Build a wgpu depth-stencil state for a depth buffer of `format`.
    ///
    /// wgpu has no depth-enable toggle; a disabled depth test becomes
    /// `Always` with writes off. `bias` comes from the rasterizer
    /// descriptor ([`RasterizerDesc::to_wgpu_bias`]).
    #[must_use]
    pub fn to_wgpu(
        &self,
        format: wgpu::TextureFormat,
        bias: wgpu::DepthBiasState,
    ) -> wgpu::DepthStencilState {
        let stencil = if self.stencil_enable {
            wgpu::StencilState {
                front: self.front_face.into(),
                back: self.back_face.into(),
                read_mask: u32::from(self.stencil_read_mask),
                write_mask: u32::from(self.stencil_write_mask),
            }
        } else {
            wgpu::StencilState::default()
        };

        wgpu::DepthStencilState {
            format,
            depth_write_enabled: Some(
                self.depth_enable && self.depth_write_mask == DepthWriteMask::All,
            ),
            depth_compare: Some(if self.depth_enable {
                self.depth_func.into()
            } else {
                wgpu::CompareFunction::Always
            }),
            stencil,
            bias,
        }
    }
}

impl RasterizerDesc {
    /// Build a wgpu primitive state for `topology`.
    ///
    /// Scissor, multisample and line-AA toggles have no wgpu equivalent at
    /// this level and are ignored here.
    #[must_use]
    pub fn to_wgpu_primitive(&self, topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology,
            front_face: if self.front_counter_clockwise {
                wgpu::FrontFace::Ccw
            } else {
                wgpu::FrontFace::Cw
            },
            cull_mode: self.cull_mode.into(),
            polygon_mode: self.fill_mode.into(),
            unclipped_depth: !self.depth_clip_enable,
            ..Default::default()
        }
    }

    /// The depth bias portion, consumed by [`DepthStencilDesc::to_wgpu`].
    #[must_use]
    pub fn to_wgpu_bias(&self) -> wgpu::DepthBiasState {
        wgpu::DepthBiasState {
            constant: self.depth_bias,
            slope_scale: self.slope_scaled_depth_bias,
            clamp: self.depth_bias_clamp,
        }
    }
}

impl SamplerDesc {
    /// Build a wgpu sampler descriptor.
    ///
    /// wgpu expresses LOD clamps in `[0, 32]` and only supports a few fixed
    /// border colors, so those fields are mapped best-effort.
    #[must_use]
    pub fn to_wgpu(&self) -> wgpu::SamplerDescriptor<'_> {
        let (min_filter, mag_filter, mipmap_filter) = self.filter.wgpu_filters();

        let border_color = uses_border(self).then(|| match self.border_color {
            [1.0, 1.0, 1.0, 1.0] => wgpu::SamplerBorderColor::OpaqueWhite,
            [0.0, 0.0, 0.0, 1.0] => wgpu::SamplerBorderColor::OpaqueBlack,
            _ => wgpu::SamplerBorderColor::TransparentBlack,
        });

        wgpu::SamplerDescriptor {
            label: (!self.label.is_empty()).then_some(self.label.as_str()),
            address_mode_u: self.address_u.into(),
            address_mode_v: self.address_v.into(),
            address_mode_w: self.address_w.into(),
            mag_filter,
            min_filter,
            mipmap_filter,
            lod_min_clamp: self.min_lod.clamp(0.0, 32.0),
            lod_max_clamp: self.max_lod.clamp(0.0, 32.0),
            compare: self
                .filter
                .is_comparison()
                .then(|| self.comparison_func.into()),
            anisotropy_clamp: if self.filter.is_anisotropic() {
                self.max_anisotropy.clamp(1, 16) as u16
            } else {
                1
            },
            border_color,
        }
    }
}

fn uses_border(desc: &SamplerDesc) -> bool {
    desc.address_u == AddressMode::Border
        || desc.address_v == AddressMode::Border
        || desc.address_w == AddressMode::Border
}

/// A created `wgpu::Sampler` comparing by pointer identity.
#[derive(Debug, Clone)]
pub struct WgpuSampler(Arc<wgpu::Sampler>);

impl WgpuSampler {
    /// The underlying sampler, for bind group building.
    #[must_use]
    pub fn raw(&self) -> &wgpu::Sampler {
        &self.0
    }
}

impl PartialEq for WgpuSampler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// [`StateDevice`] backed by a `wgpu::Device`.
///
/// Only samplers become real device objects; the other categories stay as
/// converted descriptor values for the caller to fold into pipeline
/// creation.
pub struct WgpuStateDevice<'a> {
    device: &'a wgpu::Device,
}

impl<'a> WgpuStateDevice<'a> {
    #[must_use]
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }
}

impl StateDevice for WgpuStateDevice<'_> {
    type BlendState = BlendDesc;
    type DepthStencilState = DepthStencilDesc;
    type RasterizerState = RasterizerDesc;
    type SamplerState = WgpuSampler;

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<Self::BlendState> {
        Ok(*desc)
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> Result<DepthStencilDesc> {
        Ok(*desc)
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<RasterizerDesc> {
        Ok(*desc)
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<WgpuSampler> {
        let sampler = self.device.create_sampler(&desc.to_wgpu());
        Ok(WgpuSampler(Arc::new(sampler)))
    }
}
