//! Render State Block Load Tests
//!
//! Tests for:
//! - Engine defaults for every descriptor kind (documented deviations from
//!   host-API defaults included)
//! - Field-map population: typed values, enum tokens, case-insensitivity
//! - Fatal load errors: unknown property, unknown enum token, bad value,
//!   device rejection
//! - Numbered block protocols: sampler scan-until-miss vs. all-eight
//!   render-target population

use renderstate::{
    AddressMode, Blend, BlendOp, ColorWriteMask, ComparisonFunc, CullMode, DepthWriteMask,
    DescDevice, FillMode, Filter, MAX_RENDER_TARGETS, RenderStateBlock, StateDevice, StateError,
    StencilOp,
};

fn load(text: &str) -> RenderStateBlock<DescDevice> {
    let _ = env_logger::builder().is_test(true).try_init();
    RenderStateBlock::from_str(&DescDevice, "test", text).unwrap()
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn empty_config_yields_engine_defaults() {
    let block = load("");
    let desc = block.descriptors();

    // Deviations from host-API defaults, by design.
    assert_eq!(desc.depth_stencil.depth_func, ComparisonFunc::GreaterEqual);
    for sampler in &desc.samplers {
        assert_eq!(sampler.address_u, AddressMode::Wrap);
        assert_eq!(sampler.address_v, AddressMode::Wrap);
        assert_eq!(sampler.address_w, AddressMode::Wrap);
        assert_eq!(sampler.filter, Filter::MinMagMipLinear);
    }
    assert!(desc.rasterizer.multisample_enable);

    assert!(desc.depth_stencil.depth_enable);
    assert_eq!(desc.depth_stencil.depth_write_mask, DepthWriteMask::All);
    assert!(!desc.depth_stencil.stencil_enable);
    assert_eq!(desc.depth_stencil.stencil_read_mask, 0xFF);
    assert_eq!(desc.depth_stencil.front_face.pass_op, StencilOp::Keep);
    assert_eq!(desc.depth_stencil.front_face.func, ComparisonFunc::Always);

    for target in &desc.blend.render_target {
        assert!(!target.blend_enable);
        assert_eq!(target.src_blend, Blend::One);
        assert_eq!(target.dest_blend, Blend::Zero);
        assert_eq!(target.blend_op, BlendOp::Add);
        assert_eq!(target.write_mask, ColorWriteMask::ALL);
    }
    assert!(!desc.blend.alpha_to_coverage_enable);

    assert_eq!(desc.rasterizer.fill_mode, FillMode::Solid);
    assert_eq!(desc.rasterizer.cull_mode, CullMode::Back);
    assert_eq!(desc.rasterizer.depth_bias, 0);
    assert!(desc.rasterizer.depth_clip_enable);

    assert_eq!(block.blend_factor(), [1.0; 4]);
    assert_eq!(block.sample_mask(), u32::MAX);
    assert_eq!(block.stencil_ref(), 0);
    assert_eq!(block.sampler_count(), 0);
}

// ============================================================================
// Population round-trips
// ============================================================================

#[test]
fn render_target_blend_overrides_round_trip() {
    let block = load(
        "
        [RenderTargetBlendState_1]
        BlendEnable = true
        SrcBlend = src_alpha
        DestBlend = inv_src_alpha
        BlendOp = rev_subtract
        SrcBlendAlpha = one
        DestBlendAlpha = one
        BlendOpAlpha = max
        RenderTargetWriteMask = rgb
        ",
    );
    let target = &block.descriptors().blend.render_target[0];
    assert!(target.blend_enable);
    assert_eq!(target.src_blend, Blend::SrcAlpha);
    assert_eq!(target.dest_blend, Blend::InvSrcAlpha);
    assert_eq!(target.blend_op, BlendOp::RevSubtract);
    assert_eq!(target.blend_op_alpha, BlendOp::Max);
    assert_eq!(
        target.write_mask,
        ColorWriteMask::RED | ColorWriteMask::GREEN | ColorWriteMask::BLUE
    );
}

#[test]
fn blend_block_sets_factor_and_sample_mask() {
    let block = load(
        "
        [BlendState]
        AlphaToCoverageEnable = true
        BlendFactor1 = 0.25
        BlendFactor4 = 0.5
        SampleMask = 0x0000000F
        ",
    );
    assert!(block.descriptors().blend.alpha_to_coverage_enable);
    assert_eq!(block.blend_factor(), [0.25, 1.0, 1.0, 0.5]);
    assert_eq!(block.sample_mask(), 0x0F);
}

#[test]
fn depth_stencil_block_round_trip() {
    let block = load(
        "
        [DepthStencilState]
        DepthEnable = false
        DepthWriteMask = zero
        DepthFunc = less
        StencilEnable = true
        StencilReadMask = 0x0F
        FrontStencilPassOp = replace
        FrontStencilFunc = equal
        BackStencilDepthFailOp = incr_sat
        StencilRef = 7
        ",
    );
    let desc = &block.descriptors().depth_stencil;
    assert!(!desc.depth_enable);
    assert_eq!(desc.depth_write_mask, DepthWriteMask::Zero);
    assert_eq!(desc.depth_func, ComparisonFunc::Less);
    assert!(desc.stencil_enable);
    assert_eq!(desc.stencil_read_mask, 0x0F);
    assert_eq!(desc.front_face.pass_op, StencilOp::Replace);
    assert_eq!(desc.front_face.func, ComparisonFunc::Equal);
    assert_eq!(desc.back_face.depth_fail_op, StencilOp::IncrSat);
    assert_eq!(block.stencil_ref(), 7);
}

#[test]
fn rasterizer_block_round_trip() {
    let block = load(
        "
        [RasterizerState]
        FillMode = wireframe
        CullMode = none
        FrontCounterClockwise = true
        DepthBias = -4
        SlopeScaledDepthBias = 1.5
        ScissorEnable = true
        ",
    );
    let desc = &block.descriptors().rasterizer;
    assert_eq!(desc.fill_mode, FillMode::Wireframe);
    assert_eq!(desc.cull_mode, CullMode::None);
    assert!(desc.front_counter_clockwise);
    assert_eq!(desc.depth_bias, -4);
    assert_eq!(desc.slope_scaled_depth_bias, 1.5);
    assert!(desc.scissor_enable);
}

#[test]
fn property_names_and_tokens_are_case_insensitive() {
    let block = load(
        "
        [depthstencilstate]
        DEPTHFUNC = Less_Equal
        ",
    );
    assert_eq!(
        block.descriptors().depth_stencil.depth_func,
        ComparisonFunc::LessEqual
    );
}

// ============================================================================
// Fatal load errors
// ============================================================================

#[test]
fn unknown_property_fails_the_load() {
    let err = RenderStateBlock::from_str(
        &DescDevice,
        "test",
        "[DepthStencilState]\nDepthFnc = less\n",
    )
    .unwrap_err();
    match err {
        StateError::UnknownProperty { block, key } => {
            assert_eq!(block, "DepthStencilState");
            assert_eq!(key, "DepthFnc");
        }
        other => panic!("expected UnknownProperty, got {other:?}"),
    }
}

#[test]
fn unknown_enum_token_fails_the_load() {
    let err = RenderStateBlock::from_str(
        &DescDevice,
        "test",
        "[RasterizerState]\nCullMode = backwards\n",
    )
    .unwrap_err();
    match err {
        StateError::UnknownEnumToken { block, key, token } => {
            assert_eq!(block, "RasterizerState");
            assert_eq!(key, "CullMode");
            assert_eq!(token, "backwards");
        }
        other => panic!("expected UnknownEnumToken, got {other:?}"),
    }
}

#[test]
fn unconvertible_value_fails_the_load() {
    let err = RenderStateBlock::from_str(
        &DescDevice,
        "test",
        "[DepthStencilState]\nDepthEnable = maybe\n",
    )
    .unwrap_err();
    assert!(matches!(err, StateError::BadValue { .. }));
}

// ============================================================================
// Numbered block protocols
// ============================================================================

#[test]
fn sampler_scan_stops_at_first_missing_index() {
    let block = load(
        "
        [Sampler_1]
        AddressU = clamp
        [Sampler_2]
        Filter = min_mag_mip_point
        ",
    );
    assert_eq!(block.sampler_count(), 2);
    let desc = block.descriptors();
    assert_eq!(desc.samplers[0].address_u, AddressMode::Clamp);
    assert_eq!(desc.samplers[1].filter, Filter::MinMagMipPoint);
}

#[test]
fn sampler_after_a_gap_is_not_picked_up() {
    let block = load(
        "
        [Sampler_1]
        AddressU = clamp
        [Sampler_3]
        AddressU = border
        ",
    );
    assert_eq!(block.sampler_count(), 1);
    // Sampler_3 keeps its default in the inactive tail.
    assert_eq!(block.descriptors().samplers[2].address_u, AddressMode::Wrap);
}

#[test]
fn all_render_target_indices_populate_independently_of_gaps() {
    let block = load(
        "
        [RenderTargetBlendState_2]
        BlendEnable = true
        [RenderTargetBlendState_7]
        RenderTargetWriteMask = alpha
        ",
    );
    let targets = &block.descriptors().blend.render_target;
    assert!(targets[1].blend_enable);
    assert_eq!(targets[6].write_mask, ColorWriteMask::ALPHA);
    for i in [0, 2, 3, 4, 5, 7] {
        assert!(!targets[i].blend_enable);
        assert_eq!(targets[i].write_mask, ColorWriteMask::ALL);
    }
    assert_eq!(MAX_RENDER_TARGETS, 8);
}

// ============================================================================
// Labels, files, device failures
// ============================================================================

#[test]
fn sampler_label_is_silently_truncated() {
    let long = "x".repeat(100);
    let block = load(&format!("[Sampler_1]\nLabel = {long}\n"));
    assert_eq!(block.descriptors().samplers[0].label.len(), 64);
}

#[test]
fn load_reads_from_disk_and_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("renderstate_block_test.rstate");
    std::fs::write(&path, "[RasterizerState]\nCullMode = front\n").unwrap();

    let block = RenderStateBlock::load(&DescDevice, &path).unwrap();
    assert_eq!(block.descriptors().rasterizer.cull_mode, CullMode::Front);
    assert_eq!(block.name(), path.display().to_string());
    std::fs::remove_file(&path).unwrap();

    let err = RenderStateBlock::load(&DescDevice, &path).unwrap_err();
    assert!(matches!(err, StateError::Io(_)));
}

/// Device that rejects every descriptor.
#[derive(Debug)]
struct RejectingDevice;

impl StateDevice for RejectingDevice {
    type BlendState = ();
    type DepthStencilState = ();
    type RasterizerState = ();
    type SamplerState = ();

    fn create_blend_state(&self, _: &renderstate::BlendDesc) -> renderstate::Result<()> {
        Err(StateError::StateObjectCreation {
            kind: "blend",
            message: "rejected".to_string(),
        })
    }

    fn create_depth_stencil_state(
        &self,
        _: &renderstate::DepthStencilDesc,
    ) -> renderstate::Result<()> {
        Err(StateError::StateObjectCreation {
            kind: "depth-stencil",
            message: "rejected".to_string(),
        })
    }

    fn create_rasterizer_state(&self, _: &renderstate::RasterizerDesc) -> renderstate::Result<()> {
        Err(StateError::StateObjectCreation {
            kind: "rasterizer",
            message: "rejected".to_string(),
        })
    }

    fn create_sampler_state(&self, _: &renderstate::SamplerDesc) -> renderstate::Result<()> {
        Err(StateError::StateObjectCreation {
            kind: "sampler",
            message: "rejected".to_string(),
        })
    }
}

#[test]
fn device_rejection_aborts_the_load() {
    let err = RenderStateBlock::from_str(&RejectingDevice, "test", "").unwrap_err();
    match err {
        StateError::StateObjectCreation { kind, .. } => assert_eq!(kind, "blend"),
        other => panic!("expected StateObjectCreation, got {other:?}"),
    }
}
