//! wgpu Conversion Tests
//!
//! Tests for descriptor → wgpu mappings:
//! - Enum conversions (address modes, blend factors, compare functions, ...)
//! - Blend state assembly and the disabled-blend case
//! - Sampler descriptor assembly: filters, LOD clamps, anisotropy, borders
//! - Depth-stencil and primitive state assembly
//!
//! No GPU is required; only plain wgpu value types are built.

use renderstate::{
    AddressMode, Blend, BlendOp, ColorWriteMask, ComparisonFunc, CullMode, DepthStencilDesc,
    DepthWriteMask, FillMode, Filter, RasterizerDesc, RenderTargetBlendDesc, SamplerDesc,
    StencilOp,
};

#[test]
fn address_mode_conversions() {
    assert_eq!(wgpu::AddressMode::from(AddressMode::Wrap), wgpu::AddressMode::Repeat);
    assert_eq!(wgpu::AddressMode::from(AddressMode::Mirror), wgpu::AddressMode::MirrorRepeat);
    assert_eq!(wgpu::AddressMode::from(AddressMode::Clamp), wgpu::AddressMode::ClampToEdge);
    assert_eq!(wgpu::AddressMode::from(AddressMode::Border), wgpu::AddressMode::ClampToBorder);
}

#[test]
fn blend_factor_conversions() {
    assert_eq!(wgpu::BlendFactor::from(Blend::SrcColor), wgpu::BlendFactor::Src);
    assert_eq!(wgpu::BlendFactor::from(Blend::InvDestColor), wgpu::BlendFactor::OneMinusDst);
    assert_eq!(wgpu::BlendFactor::from(Blend::SrcAlphaSat), wgpu::BlendFactor::SrcAlphaSaturated);
    assert_eq!(wgpu::BlendFactor::from(Blend::BlendFactor), wgpu::BlendFactor::Constant);
}

#[test]
fn comparison_and_stencil_conversions() {
    assert_eq!(
        wgpu::CompareFunction::from(ComparisonFunc::GreaterEqual),
        wgpu::CompareFunction::GreaterEqual
    );
    assert_eq!(
        wgpu::StencilOperation::from(StencilOp::IncrSat),
        wgpu::StencilOperation::IncrementClamp
    );
    assert_eq!(
        wgpu::StencilOperation::from(StencilOp::Decr),
        wgpu::StencilOperation::DecrementWrap
    );
}

#[test]
fn color_write_mask_bits_map_across() {
    let mask = ColorWriteMask::RED | ColorWriteMask::ALPHA;
    let writes: wgpu::ColorWrites = mask.into();
    assert_eq!(writes, wgpu::ColorWrites::RED | wgpu::ColorWrites::ALPHA);
    assert_eq!(wgpu::ColorWrites::from(ColorWriteMask::ALL), wgpu::ColorWrites::ALL);
}

#[test]
fn disabled_blend_converts_to_none() {
    let desc = RenderTargetBlendDesc::default();
    assert_eq!(desc.to_wgpu_blend(), None);
}

#[test]
fn enabled_blend_assembles_both_components() {
    let desc = RenderTargetBlendDesc {
        blend_enable: true,
        src_blend: Blend::SrcAlpha,
        dest_blend: Blend::InvSrcAlpha,
        blend_op: BlendOp::Add,
        src_blend_alpha: Blend::One,
        dest_blend_alpha: Blend::Zero,
        blend_op_alpha: BlendOp::RevSubtract,
        ..Default::default()
    };
    let state = desc.to_wgpu_blend().unwrap();
    assert_eq!(state.color.src_factor, wgpu::BlendFactor::SrcAlpha);
    assert_eq!(state.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    assert_eq!(state.alpha.operation, wgpu::BlendOperation::ReverseSubtract);
}

#[test]
fn default_sampler_converts_to_repeat_linear() {
    let desc = SamplerDesc::default();
    let sampler = desc.to_wgpu();
    assert_eq!(sampler.address_mode_u, wgpu::AddressMode::Repeat);
    assert_eq!(sampler.min_filter, wgpu::FilterMode::Linear);
    assert_eq!(sampler.mipmap_filter, wgpu::MipmapFilterMode::Linear);
    assert_eq!(sampler.compare, None);
    assert_eq!(sampler.anisotropy_clamp, 1);
    assert_eq!(sampler.border_color, None);
    // Engine LOD range is unbounded; wgpu's is [0, 32].
    assert_eq!(sampler.lod_min_clamp, 0.0);
    assert_eq!(sampler.lod_max_clamp, 32.0);
    assert_eq!(sampler.label, None);
}

#[test]
fn anisotropic_filter_forces_linear_and_sets_clamp() {
    let desc = SamplerDesc {
        filter: Filter::Anisotropic,
        max_anisotropy: 8,
        ..Default::default()
    };
    let sampler = desc.to_wgpu();
    assert_eq!(sampler.anisotropy_clamp, 8);
    assert_eq!(sampler.min_filter, wgpu::FilterMode::Linear);
    assert_eq!(sampler.mag_filter, wgpu::FilterMode::Linear);
}

#[test]
fn comparison_filter_carries_the_comparison_func() {
    let desc = SamplerDesc {
        filter: Filter::ComparisonMinMagMipLinear,
        comparison_func: ComparisonFunc::LessEqual,
        ..Default::default()
    };
    assert_eq!(desc.to_wgpu().compare, Some(wgpu::CompareFunction::LessEqual));
}

#[test]
fn border_addressing_picks_a_border_color() {
    let desc = SamplerDesc {
        address_u: AddressMode::Border,
        border_color: [1.0, 1.0, 1.0, 1.0],
        label: "shadow".to_string(),
        ..Default::default()
    };
    let sampler = desc.to_wgpu();
    assert_eq!(sampler.border_color, Some(wgpu::SamplerBorderColor::OpaqueWhite));
    assert_eq!(sampler.label, Some("shadow"));
}

#[test]
fn depth_stencil_conversion_handles_disabled_depth() {
    let desc = DepthStencilDesc {
        depth_enable: false,
        ..Default::default()
    };
    let state = desc.to_wgpu(
        wgpu::TextureFormat::Depth24PlusStencil8,
        wgpu::DepthBiasState::default(),
    );
    assert!(!state.depth_write_enabled.unwrap());
    assert_eq!(state.depth_compare, Some(wgpu::CompareFunction::Always));
    assert_eq!(state.stencil, wgpu::StencilState::default());
}

#[test]
fn depth_stencil_conversion_round_trip() {
    let desc = DepthStencilDesc {
        depth_write_mask: DepthWriteMask::Zero,
        stencil_enable: true,
        stencil_read_mask: 0x0F,
        ..Default::default()
    };
    let state = desc.to_wgpu(wgpu::TextureFormat::Depth32Float, wgpu::DepthBiasState::default());
    assert!(!state.depth_write_enabled.unwrap());
    assert_eq!(state.depth_compare, Some(wgpu::CompareFunction::GreaterEqual));
    assert_eq!(state.stencil.read_mask, 0x0F);
    assert_eq!(state.stencil.front.compare, wgpu::CompareFunction::Always);
}

#[test]
fn rasterizer_conversion_assembles_primitive_and_bias() {
    let desc = RasterizerDesc {
        fill_mode: FillMode::Wireframe,
        cull_mode: CullMode::None,
        front_counter_clockwise: true,
        depth_clip_enable: false,
        depth_bias: 2,
        slope_scaled_depth_bias: 0.5,
        depth_bias_clamp: 1.0,
        ..Default::default()
    };
    let primitive = desc.to_wgpu_primitive(wgpu::PrimitiveTopology::TriangleList);
    assert_eq!(primitive.front_face, wgpu::FrontFace::Ccw);
    assert_eq!(primitive.cull_mode, None);
    assert_eq!(primitive.polygon_mode, wgpu::PolygonMode::Line);
    assert!(primitive.unclipped_depth);

    let bias = desc.to_wgpu_bias();
    assert_eq!(bias.constant, 2);
    assert_eq!(bias.slope_scale, 0.5);
    assert_eq!(bias.clamp, 1.0);
}
