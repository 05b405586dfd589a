//! Error Types
//!
//! This module defines the error types used by the crate.
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, StateError>`.
//!
//! A render state block load has no partial-success state: either every
//! descriptor is populated and every native object is created, or the load
//! fails with one of the variants below and the block must not be used.

use thiserror::Error;

/// The main error type for render state loading.
#[derive(Error, Debug)]
pub enum StateError {
    /// File I/O error while reading a render state file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config text could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of what was wrong with the line
        message: String,
    },

    /// A config entry named a property that no field map knows about.
    ///
    /// This is deliberately fatal: a silently ignored typo would produce
    /// wrong rendering with no symptom.
    #[error("unknown render state property '{key}' in block [{block}]")]
    UnknownProperty {
        /// Block containing the offending entry
        block: String,
        /// The unrecognized property name
        key: String,
    },

    /// An enum-valued property was given a token that is not in the
    /// field's translation table.
    #[error("unknown token '{token}' for property '{key}' in block [{block}]")]
    UnknownEnumToken {
        /// Block containing the offending entry
        block: String,
        /// Property the token was assigned to
        key: String,
        /// The unrecognized token
        token: String,
    },

    /// A property value could not be converted to the field's type.
    #[error("bad value for property '{key}' in block [{block}]: {message}")]
    BadValue {
        /// Block containing the offending entry
        block: String,
        /// Property with the unconvertible value
        key: String,
        /// Conversion failure detail
        message: String,
    },

    /// The device rejected a finished descriptor.
    ///
    /// Indicates an invalid descriptor combination; not recoverable at
    /// this layer.
    #[error("failed to create {kind} state object: {message}")]
    StateObjectCreation {
        /// Which state category failed ("blend", "depth-stencil", ...)
        kind: &'static str,
        /// Device-reported failure detail
        message: String,
    },
}

/// Failure produced by a single field setter, before block/key context is
/// attached.
///
/// [`crate::field_map::populate`] maps these into [`StateError`] variants
/// carrying the block and property names.
#[derive(Error, Debug)]
pub enum FieldError {
    /// The textual value could not be converted to the field's type.
    #[error("{message}")]
    Value {
        /// Conversion failure detail
        message: String,
    },

    /// The token is not present in the field's enum translation table.
    #[error("unknown token '{token}'")]
    UnknownToken {
        /// The unrecognized token
        token: String,
    },
}

impl FieldError {
    /// Attach block/entry context, producing the fatal load error.
    #[must_use]
    pub fn into_state_error(self, block: &str, key: &str) -> StateError {
        match self {
            FieldError::Value { message } => StateError::BadValue {
                block: block.to_string(),
                key: key.to_string(),
                message,
            },
            FieldError::UnknownToken { token } => StateError::UnknownEnumToken {
                block: block.to_string(),
                key: key.to_string(),
                token,
            },
        }
    }
}

/// Alias for `Result<T, StateError>`.
pub type Result<T> = std::result::Result<T, StateError>;
