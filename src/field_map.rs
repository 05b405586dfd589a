//! Field Maps & Descriptor Population
//!
//! A [`FieldMap`] is the declarative table that drives config parsing: one
//! static table per descriptor kind, mapping a case-insensitive property
//! name to a typed setter that writes the converted value into the
//! destination descriptor.
//!
//! Tables are built once per process into an `FxHashMap` keyed by the
//! lowercased canonical name, so lookup is a single hash probe. Property
//! names are matched case-insensitively but must otherwise be exact
//! (`SrcBlend`, `srcblend` — same property; `src_blend` — unknown).
//!
//! [`populate`] is a pure transform: it only writes into the destination
//! descriptor. A missing block is not an error; an unknown property or
//! enum token is fatal.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::config::{ConfigEntry, ConfigFile};
use crate::descriptors::{
    ColorWriteMask, DescriptorSet, EnumToken, MAX_STATE_LABEL, RasterizerDesc,
    RenderTargetBlendDesc, SamplerDesc,
};
use crate::errors::{FieldError, Result, StateError};

/// A typed setter writing one converted config value into a descriptor.
pub type FieldSetter<T> = fn(&mut T, &ConfigEntry) -> std::result::Result<(), FieldError>;

/// Case-insensitive property-name → setter table for one descriptor kind.
pub struct FieldMap<T: 'static> {
    fields: FxHashMap<&'static str, FieldSetter<T>>,
}

impl<T> FieldMap<T> {
    fn new(entries: &[(&'static str, FieldSetter<T>)]) -> Self {
        let mut fields = FxHashMap::default();
        for &(name, setter) in entries {
            debug_assert!(
                name.chars().all(|c| !c.is_ascii_uppercase()),
                "field map keys must be lowercase: {name}"
            );
            let previous = fields.insert(name, setter);
            debug_assert!(previous.is_none(), "duplicate field map key: {name}");
        }
        Self { fields }
    }

    /// Look up the setter for a property name, case-insensitively.
    #[must_use]
    pub fn setter(&self, name: &str) -> Option<FieldSetter<T>> {
        self.fields
            .get(name.to_ascii_lowercase().as_str())
            .copied()
    }
}

/// Populate `dest` from the named config block.
///
/// Returns `Ok(false)` when the block is absent — not an error, since state
/// blocks are sparse overrides over defaults. Every entry of a present block
/// must match a field map property; unknown names and unknown enum tokens
/// abort the load.
pub fn populate<T>(
    file: &ConfigFile,
    block_name: &str,
    map: &FieldMap<T>,
    dest: &mut T,
) -> Result<bool> {
    let Some(block) = file.block(block_name) else {
        return Ok(false);
    };

    for entry in block.entries() {
        let Some(setter) = map.setter(entry.name()) else {
            return Err(StateError::UnknownProperty {
                block: block.name().to_string(),
                key: entry.name().to_string(),
            });
        };
        setter(dest, entry).map_err(|e| e.into_state_error(block.name(), entry.name()))?;
    }
    Ok(true)
}

fn parse_enum<E: EnumToken>(entry: &ConfigEntry) -> std::result::Result<E, FieldError> {
    E::from_token(entry.value_as_str()).ok_or_else(|| FieldError::UnknownToken {
        token: entry.value_as_str().to_string(),
    })
}

// ─── Static Tables ───────────────────────────────────────────────────────────

/// Properties of one `RenderTargetBlendState_N` block.
pub static RENDER_TARGET_BLEND_FIELDS: LazyLock<FieldMap<RenderTargetBlendDesc>> =
    LazyLock::new(|| {
        FieldMap::new(&[
            ("blendenable", |d, e| {
                d.blend_enable = e.value_as_bool()?;
                Ok(())
            }),
            ("srcblend", |d, e| {
                d.src_blend = parse_enum(e)?;
                Ok(())
            }),
            ("destblend", |d, e| {
                d.dest_blend = parse_enum(e)?;
                Ok(())
            }),
            ("blendop", |d, e| {
                d.blend_op = parse_enum(e)?;
                Ok(())
            }),
            ("srcblendalpha", |d, e| {
                d.src_blend_alpha = parse_enum(e)?;
                Ok(())
            }),
            ("destblendalpha", |d, e| {
                d.dest_blend_alpha = parse_enum(e)?;
                Ok(())
            }),
            ("blendopalpha", |d, e| {
                d.blend_op_alpha = parse_enum(e)?;
                Ok(())
            }),
            ("rendertargetwritemask", |d, e| {
                d.write_mask = parse_enum::<ColorWriteMask>(e)?;
                Ok(())
            }),
        ])
    });

/// Properties of the `BlendState` block.
///
/// Targets the whole descriptor set: the constant blend factor and sample
/// mask are bind-time parameters that live next to the blend descriptor.
pub static BLEND_FIELDS: LazyLock<FieldMap<DescriptorSet>> = LazyLock::new(|| {
    FieldMap::new(&[
        ("alphatocoverageenable", |d, e| {
            d.blend.alpha_to_coverage_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("independentblendenable", |d, e| {
            d.blend.independent_blend_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("blendfactor1", |d, e| {
            d.blend_factor[0] = e.value_as_float()?;
            Ok(())
        }),
        ("blendfactor2", |d, e| {
            d.blend_factor[1] = e.value_as_float()?;
            Ok(())
        }),
        ("blendfactor3", |d, e| {
            d.blend_factor[2] = e.value_as_float()?;
            Ok(())
        }),
        ("blendfactor4", |d, e| {
            d.blend_factor[3] = e.value_as_float()?;
            Ok(())
        }),
        ("samplemask", |d, e| {
            d.sample_mask = e.value_as_uint()?;
            Ok(())
        }),
    ])
});

/// Properties of the `DepthStencilState` block.
pub static DEPTH_STENCIL_FIELDS: LazyLock<FieldMap<DescriptorSet>> = LazyLock::new(|| {
    FieldMap::new(&[
        ("depthenable", |d, e| {
            d.depth_stencil.depth_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("depthwritemask", |d, e| {
            d.depth_stencil.depth_write_mask = parse_enum(e)?;
            Ok(())
        }),
        ("depthfunc", |d, e| {
            d.depth_stencil.depth_func = parse_enum(e)?;
            Ok(())
        }),
        ("stencilenable", |d, e| {
            d.depth_stencil.stencil_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("stencilreadmask", |d, e| {
            d.depth_stencil.stencil_read_mask = e.value_as_uint()? as u8;
            Ok(())
        }),
        ("stencilwritemask", |d, e| {
            d.depth_stencil.stencil_write_mask = e.value_as_uint()? as u8;
            Ok(())
        }),
        ("frontstencilfailop", |d, e| {
            d.depth_stencil.front_face.fail_op = parse_enum(e)?;
            Ok(())
        }),
        ("frontstencildepthfailop", |d, e| {
            d.depth_stencil.front_face.depth_fail_op = parse_enum(e)?;
            Ok(())
        }),
        ("frontstencilpassop", |d, e| {
            d.depth_stencil.front_face.pass_op = parse_enum(e)?;
            Ok(())
        }),
        ("frontstencilfunc", |d, e| {
            d.depth_stencil.front_face.func = parse_enum(e)?;
            Ok(())
        }),
        ("backstencilfailop", |d, e| {
            d.depth_stencil.back_face.fail_op = parse_enum(e)?;
            Ok(())
        }),
        ("backstencildepthfailop", |d, e| {
            d.depth_stencil.back_face.depth_fail_op = parse_enum(e)?;
            Ok(())
        }),
        ("backstencilpassop", |d, e| {
            d.depth_stencil.back_face.pass_op = parse_enum(e)?;
            Ok(())
        }),
        ("backstencilfunc", |d, e| {
            d.depth_stencil.back_face.func = parse_enum(e)?;
            Ok(())
        }),
        ("stencilref", |d, e| {
            d.stencil_ref = e.value_as_uint()?;
            Ok(())
        }),
    ])
});

/// Properties of the `RasterizerState` block.
pub static RASTERIZER_FIELDS: LazyLock<FieldMap<RasterizerDesc>> = LazyLock::new(|| {
    FieldMap::new(&[
        ("fillmode", |d, e| {
            d.fill_mode = parse_enum(e)?;
            Ok(())
        }),
        ("cullmode", |d, e| {
            d.cull_mode = parse_enum(e)?;
            Ok(())
        }),
        ("frontcounterclockwise", |d, e| {
            d.front_counter_clockwise = e.value_as_bool()?;
            Ok(())
        }),
        ("depthbias", |d, e| {
            d.depth_bias = e.value_as_int()?;
            Ok(())
        }),
        ("depthbiasclamp", |d, e| {
            d.depth_bias_clamp = e.value_as_float()?;
            Ok(())
        }),
        ("slopescaleddepthbias", |d, e| {
            d.slope_scaled_depth_bias = e.value_as_float()?;
            Ok(())
        }),
        ("depthclipenable", |d, e| {
            d.depth_clip_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("scissorenable", |d, e| {
            d.scissor_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("multisampleenable", |d, e| {
            d.multisample_enable = e.value_as_bool()?;
            Ok(())
        }),
        ("antialiasedlineenable", |d, e| {
            d.antialiased_line_enable = e.value_as_bool()?;
            Ok(())
        }),
    ])
});

/// Properties of one `Sampler_N` block.
pub static SAMPLER_FIELDS: LazyLock<FieldMap<SamplerDesc>> = LazyLock::new(|| {
    FieldMap::new(&[
        ("filter", |d, e| {
            d.filter = parse_enum(e)?;
            Ok(())
        }),
        ("addressu", |d, e| {
            d.address_u = parse_enum(e)?;
            Ok(())
        }),
        ("addressv", |d, e| {
            d.address_v = parse_enum(e)?;
            Ok(())
        }),
        ("addressw", |d, e| {
            d.address_w = parse_enum(e)?;
            Ok(())
        }),
        ("miplodbias", |d, e| {
            d.mip_lod_bias = e.value_as_float()?;
            Ok(())
        }),
        ("maxanisotropy", |d, e| {
            d.max_anisotropy = e.value_as_uint()?;
            Ok(())
        }),
        ("comparisonfunc", |d, e| {
            d.comparison_func = parse_enum(e)?;
            Ok(())
        }),
        ("bordercolor1", |d, e| {
            d.border_color[0] = e.value_as_float()?;
            Ok(())
        }),
        ("bordercolor2", |d, e| {
            d.border_color[1] = e.value_as_float()?;
            Ok(())
        }),
        ("bordercolor3", |d, e| {
            d.border_color[2] = e.value_as_float()?;
            Ok(())
        }),
        ("bordercolor4", |d, e| {
            d.border_color[3] = e.value_as_float()?;
            Ok(())
        }),
        ("minlod", |d, e| {
            d.min_lod = e.value_as_float()?;
            Ok(())
        }),
        ("maxlod", |d, e| {
            d.max_lod = e.value_as_float()?;
            Ok(())
        }),
        ("label", |d, e| {
            d.label = e.value_as_string_truncated(MAX_STATE_LABEL);
            Ok(())
        }),
    ])
});
