//! Fixed-Function State Descriptors
//!
//! Plain data structures describing blend, depth-stencil, rasterizer and
//! sampler state, consumed by [`crate::device::StateDevice`] object creation.
//!
//! # Engine defaults
//!
//! The `Default` impls here are *engine* defaults, not the host graphics
//! API's defaults. The deviations are deliberate and load-bearing: a config
//! file that mentions nothing must still produce these values.
//!
//! - texture addressing defaults to **wrap** on all axes (APIs default to clamp)
//! - the depth test defaults to **greater-or-equal** (APIs default to less),
//!   matching a reversed-Z depth buffer
//! - rasterizer multisampling defaults to **on**
//!
//! # Enum tokens
//!
//! Every enum-valued field carries an ordered translation table from config
//! token to enum value. Token lookup is **case-insensitive** (`SRC_ALPHA`,
//! `src_alpha` and `Src_Alpha` are the same token).

use bitflags::bitflags;

/// Maximum simultaneously bound render targets.
pub const MAX_RENDER_TARGETS: usize = 8;

/// Upper bound on simultaneously bound sampler slots.
pub const MAX_SAMPLER_SLOTS: usize = 16;

/// Maximum byte length of a state label; longer labels are silently
/// truncated.
pub const MAX_STATE_LABEL: usize = 64;

// ─── Enum Translation ────────────────────────────────────────────────────────

/// An enum-valued descriptor field with a config-token translation table.
pub trait EnumToken: Sized + Copy + 'static {
    /// Ordered (token, value) pairs, used during descriptor population.
    const TOKENS: &'static [(&'static str, Self)];

    /// Translate a config token, case-insensitively.
    #[must_use]
    fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|&(_, value)| value)
    }
}

macro_rules! enum_tokens {
    ($ty:ty { $($token:literal => $variant:ident),+ $(,)? }) => {
        impl EnumToken for $ty {
            const TOKENS: &'static [(&'static str, Self)] = &[
                $(($token, Self::$variant)),+
            ];
        }
    };
}

// ─── State Enums ─────────────────────────────────────────────────────────────

/// Blend coefficient applied to a source or destination color/alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blend {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DestAlpha,
    InvDestAlpha,
    DestColor,
    InvDestColor,
    SrcAlphaSat,
    /// The constant blend factor set at bind time.
    BlendFactor,
    InvBlendFactor,
}

enum_tokens!(Blend {
    "zero" => Zero,
    "one" => One,
    "src_color" => SrcColor,
    "inv_src_color" => InvSrcColor,
    "src_alpha" => SrcAlpha,
    "inv_src_alpha" => InvSrcAlpha,
    "dest_alpha" => DestAlpha,
    "inv_dest_alpha" => InvDestAlpha,
    "dest_color" => DestColor,
    "inv_dest_color" => InvDestColor,
    "src_alpha_sat" => SrcAlphaSat,
    "blend_factor" => BlendFactor,
    "inv_blend_factor" => InvBlendFactor,
});

/// Operation combining the weighted source and destination terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
    Add,
    Subtract,
    RevSubtract,
    Min,
    Max,
}

enum_tokens!(BlendOp {
    "add" => Add,
    "subtract" => Subtract,
    "rev_subtract" => RevSubtract,
    "min" => Min,
    "max" => Max,
});

/// Depth buffer write policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthWriteMask {
    Zero,
    All,
}

enum_tokens!(DepthWriteMask {
    "zero" => Zero,
    "all" => All,
});

/// Comparison used by the depth test, stencil test and comparison samplers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

enum_tokens!(ComparisonFunc {
    "never" => Never,
    "less" => Less,
    "equal" => Equal,
    "less_equal" => LessEqual,
    "greater" => Greater,
    "not_equal" => NotEqual,
    "greater_equal" => GreaterEqual,
    "always" => Always,
});

/// Stencil buffer update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrSat,
    DecrSat,
    Invert,
    Incr,
    Decr,
}

enum_tokens!(StencilOp {
    "keep" => Keep,
    "zero" => Zero,
    "replace" => Replace,
    "incr_sat" => IncrSat,
    "decr_sat" => DecrSat,
    "invert" => Invert,
    "incr" => Incr,
    "decr" => Decr,
});

/// Triangle fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    Wireframe,
    Solid,
}

enum_tokens!(FillMode {
    "wireframe" => Wireframe,
    "solid" => Solid,
});

/// Triangle face culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    Front,
    Back,
}

enum_tokens!(CullMode {
    "none" => None,
    "front" => Front,
    "back" => Back,
});

/// Texture filtering mode for a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    MinMagMipPoint,
    MinMagPointMipLinear,
    MinMagLinearMipPoint,
    MinMagMipLinear,
    Anisotropic,
    ComparisonMinMagMipPoint,
    ComparisonMinMagMipLinear,
    ComparisonAnisotropic,
}

enum_tokens!(Filter {
    "min_mag_mip_point" => MinMagMipPoint,
    "min_mag_point_mip_linear" => MinMagPointMipLinear,
    "min_mag_linear_mip_point" => MinMagLinearMipPoint,
    "min_mag_mip_linear" => MinMagMipLinear,
    "anisotropic" => Anisotropic,
    "comparison_min_mag_mip_point" => ComparisonMinMagMipPoint,
    "comparison_min_mag_mip_linear" => ComparisonMinMagMipLinear,
    "comparison_anisotropic" => ComparisonAnisotropic,
});

impl Filter {
    /// Whether this filter feeds samples through the comparison function.
    #[must_use]
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Filter::ComparisonMinMagMipPoint
                | Filter::ComparisonMinMagMipLinear
                | Filter::ComparisonAnisotropic
        )
    }

    /// Whether this filter uses anisotropic sampling.
    #[must_use]
    pub fn is_anisotropic(self) -> bool {
        matches!(self, Filter::Anisotropic | Filter::ComparisonAnisotropic)
    }
}

/// Texture addressing outside the [0, 1] coordinate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
    Border,
}

enum_tokens!(AddressMode {
    "wrap" => Wrap,
    "mirror" => Mirror,
    "clamp" => Clamp,
    "border" => Border,
});

bitflags! {
    /// Per-render-target color channel write mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

enum_tokens!(ColorWriteMask {
    "none" => empty_alias,
    "red" => RED,
    "green" => GREEN,
    "blue" => BLUE,
    "alpha" => ALPHA,
    "rgb" => rgb_alias,
    "all" => ALL,
});

#[allow(non_upper_case_globals)]
impl ColorWriteMask {
    // Aliases so the token table can name masks that aren't single flags.
    const empty_alias: Self = Self::empty();
    const rgb_alias: Self =
        Self::from_bits_retain(Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits());
}

// ─── Descriptors ─────────────────────────────────────────────────────────────

/// Blend configuration for a single render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetBlendDesc {
    pub blend_enable: bool,
    pub src_blend: Blend,
    pub dest_blend: Blend,
    pub blend_op: BlendOp,
    pub src_blend_alpha: Blend,
    pub dest_blend_alpha: Blend,
    pub blend_op_alpha: BlendOp,
    pub write_mask: ColorWriteMask,
}

impl Default for RenderTargetBlendDesc {
    fn default() -> Self {
        Self {
            blend_enable: false,
            src_blend: Blend::One,
            dest_blend: Blend::Zero,
            blend_op: BlendOp::Add,
            src_blend_alpha: Blend::One,
            dest_blend_alpha: Blend::Zero,
            blend_op_alpha: BlendOp::Add,
            write_mask: ColorWriteMask::ALL,
        }
    }
}

/// Output-merger blend configuration across all render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendDesc {
    pub alpha_to_coverage_enable: bool,
    pub independent_blend_enable: bool,
    pub render_target: [RenderTargetBlendDesc; MAX_RENDER_TARGETS],
}

/// Stencil behavior for one triangle facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilOpDesc {
    pub fail_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub func: ComparisonFunc,
}

impl Default for StencilOpDesc {
    fn default() -> Self {
        Self {
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            func: ComparisonFunc::Always,
        }
    }
}

/// Depth and stencil test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilDesc {
    pub depth_enable: bool,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: StencilOpDesc,
    pub back_face: StencilOpDesc,
}

impl Default for DepthStencilDesc {
    /// Depth testing on with a **greater-or-equal** test (reversed-Z),
    /// stencil off.
    fn default() -> Self {
        Self {
            depth_enable: true,
            depth_write_mask: DepthWriteMask::All,
            depth_func: ComparisonFunc::GreaterEqual,
            stencil_enable: false,
            stencil_read_mask: 0xFF,
            stencil_write_mask: 0xFF,
            front_face: StencilOpDesc::default(),
            back_face: StencilOpDesc::default(),
        }
    }
}

/// Rasterizer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDesc {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
}

impl Default for RasterizerDesc {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::Solid,
            cull_mode: CullMode::Back,
            front_counter_clockwise: false,
            depth_bias: 0,
            depth_bias_clamp: 0.0,
            slope_scaled_depth_bias: 0.0,
            depth_clip_enable: true,
            scissor_enable: false,
            multisample_enable: true,
            antialiased_line_enable: false,
        }
    }
}

/// Sampler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: ComparisonFunc,
    pub border_color: [f32; 4],
    pub min_lod: f32,
    pub max_lod: f32,
    /// Debug label, truncated to [`MAX_STATE_LABEL`] bytes.
    pub label: String,
}

impl Default for SamplerDesc {
    /// Trilinear filtering with **wrap** addressing on all axes.
    fn default() -> Self {
        Self {
            filter: Filter::MinMagMipLinear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
            mip_lod_bias: 0.0,
            max_anisotropy: 1,
            comparison_func: ComparisonFunc::Never,
            border_color: [0.0; 4],
            min_lod: f32::MIN,
            max_lod: f32::MAX,
            label: String::new(),
        }
    }
}

/// The full descriptor aggregate owned by one render state block.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSet {
    pub blend: BlendDesc,
    /// Constant blend factor passed at blend bind time.
    pub blend_factor: [f32; 4],
    /// Multisample coverage mask passed at blend bind time.
    pub sample_mask: u32,
    pub depth_stencil: DepthStencilDesc,
    /// Stencil reference value passed at depth-stencil bind time.
    pub stencil_ref: u32,
    pub rasterizer: RasterizerDesc,
    pub samplers: [SamplerDesc; MAX_SAMPLER_SLOTS],
    /// Number of leading `samplers` entries that are active.
    pub sampler_count: usize,
}

impl Default for DescriptorSet {
    fn default() -> Self {
        Self {
            blend: BlendDesc::default(),
            blend_factor: [1.0; 4],
            sample_mask: u32::MAX,
            depth_stencil: DepthStencilDesc::default(),
            stencil_ref: 0,
            rasterizer: RasterizerDesc::default(),
            samplers: std::array::from_fn(|_| SamplerDesc::default()),
            sampler_count: 0,
        }
    }
}

impl DescriptorSet {
    /// The active sampler descriptors, in bind-slot order.
    #[must_use]
    pub fn active_samplers(&self) -> &[SamplerDesc] {
        &self.samplers[..self.sampler_count]
    }
}
