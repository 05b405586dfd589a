//! Config File Collaborator
//!
//! Parser for the block/key-value text format that render state files are
//! written in:
//!
//! ```text
//! // comment ('#' also starts a comment line)
//! [DepthStencilState]
//! DepthFunc   = less
//! StencilRef  = 1
//! ```
//!
//! Blocks are looked up case-insensitively. Entries keep file order, which
//! matters for numbered blocks (bind-slot order). Values stay textual until
//! a field setter asks for a typed view; conversion failures surface as
//! [`FieldError::Value`] so the populator can attach block/key context.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::errors::{FieldError, Result, StateError};

/// One `key = value` entry inside a config block.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    name: String,
    value: String,
}

impl ConfigEntry {
    /// The property name, exactly as written in the file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw textual value.
    #[must_use]
    pub fn value_as_str(&self) -> &str {
        &self.value
    }

    /// The value as an owned string, silently truncated to at most
    /// `max_len` bytes (on a char boundary).
    #[must_use]
    pub fn value_as_string_truncated(&self, max_len: usize) -> String {
        let mut end = self.value.len().min(max_len);
        while !self.value.is_char_boundary(end) {
            end -= 1;
        }
        self.value[..end].to_string()
    }

    /// The value as a signed integer.
    pub fn value_as_int(&self) -> std::result::Result<i32, FieldError> {
        self.value.parse::<i32>().map_err(|e| FieldError::Value {
            message: format!("'{}' is not an integer: {e}", self.value),
        })
    }

    /// The value as an unsigned integer. Accepts a `0x` prefix, which is
    /// the usual way to write sample masks.
    pub fn value_as_uint(&self) -> std::result::Result<u32, FieldError> {
        let parsed = if let Some(hex) = self
            .value
            .strip_prefix("0x")
            .or_else(|| self.value.strip_prefix("0X"))
        {
            u32::from_str_radix(hex, 16)
        } else {
            self.value.parse::<u32>()
        };
        parsed.map_err(|e| FieldError::Value {
            message: format!("'{}' is not an unsigned integer: {e}", self.value),
        })
    }

    /// The value as a bool. Accepts `true`/`false`/`1`/`0`, case-insensitive.
    pub fn value_as_bool(&self) -> std::result::Result<bool, FieldError> {
        match self.value.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(FieldError::Value {
                message: format!("'{}' is not a bool", self.value),
            }),
        }
    }

    /// The value as a float.
    pub fn value_as_float(&self) -> std::result::Result<f32, FieldError> {
        self.value.parse::<f32>().map_err(|e| FieldError::Value {
            message: format!("'{}' is not a float: {e}", self.value),
        })
    }
}

/// A named group of key-value entries.
#[derive(Debug, Clone)]
pub struct ConfigBlock {
    name: String,
    entries: Vec<ConfigEntry>,
}

impl ConfigBlock {
    /// The block name, exactly as written in the file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries in the block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, in file order.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ConfigEntry> {
        self.entries.get(index)
    }

    /// Iterate entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter()
    }
}

/// A parsed config file: an ordered list of blocks with case-insensitive
/// lookup by name.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    blocks: Vec<ConfigBlock>,
    // lowercase block name -> index into `blocks`; first occurrence wins
    index: FxHashMap<String, usize>,
}

impl ConfigFile {
    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut file = ConfigFile::default();

        for (line_index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let Some(name) = header.strip_suffix(']').map(str::trim) else {
                    return Err(StateError::Parse {
                        line: line_index + 1,
                        message: format!("unterminated block header '{line}'"),
                    });
                };
                if name.is_empty() {
                    return Err(StateError::Parse {
                        line: line_index + 1,
                        message: "empty block name".to_string(),
                    });
                }
                file.index
                    .entry(name.to_ascii_lowercase())
                    .or_insert(file.blocks.len());
                file.blocks.push(ConfigBlock {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(StateError::Parse {
                    line: line_index + 1,
                    message: format!("expected 'key = value', got '{line}'"),
                });
            };
            let Some(block) = file.blocks.last_mut() else {
                return Err(StateError::Parse {
                    line: line_index + 1,
                    message: format!("entry '{}' appears before any [block]", key.trim()),
                });
            };
            block.entries.push(ConfigEntry {
                name: key.trim().to_string(),
                value: value.trim().to_string(),
            });
        }

        Ok(file)
    }

    /// Parse a config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Look up a block by name, case-insensitively. Returns the first block
    /// with that name. Absence is not an error: render state blocks are
    /// sparse overrides over defaults.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&ConfigBlock> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.blocks[i])
    }

    /// Iterate all blocks in file order.
    pub fn blocks(&self) -> impl Iterator<Item = &ConfigBlock> {
        self.blocks.iter()
    }
}
