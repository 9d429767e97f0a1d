//! Module `core::materials`
//!
//! Defines [`MaterialTable`], an ordered mapping from semantic material names (`"iron"`,
//! `"belt"`, `"arrow"`, ...) to colors. The table order decides which palette slot a
//! material occupies when a [`Palette`](crate::Palette) is built from it.
//!
//! Tables are either the built-in defaults or loaded from TOML:
//!
//! ```toml
//! [[material]]
//! name = "iron"
//! rgba = [115, 115, 120, 255]
//! ```
//!
//! # Examples
//!
//! ```rust
//! use voxform::{MaterialTable, Rgba};
//!
//! let table = MaterialTable::from_toml_str(
//!     r#"
//!     [[material]]
//!     name = "glass"
//!     rgba = [200, 220, 255, 128]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(table.get("glass"), Some(Rgba::new(200, 220, 255, 128)));
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, core::Rgba};

/// Maximum number of named materials; one per addressable palette slot.
pub const MAX_MATERIALS: usize = 255;

const DEFAULT_MATERIALS: [(&str, Rgba); 18] = [
    ("iron", Rgba::opaque(115, 115, 120)),
    ("copper", Rgba::opaque(184, 115, 51)),
    ("brass", Rgba::opaque(201, 163, 38)),
    ("dark_steel", Rgba::opaque(46, 46, 51)),
    ("wood", Rgba::opaque(140, 105, 20)),
    ("stone", Rgba::opaque(105, 105, 105)),
    ("frame", Rgba::opaque(102, 102, 102)),
    ("belt", Rgba::opaque(68, 68, 68)),
    ("roller", Rgba::opaque(34, 34, 34)),
    ("arrow", Rgba::opaque(255, 255, 0)),
    ("furnace_body", Rgba::opaque(139, 90, 43)),
    ("furnace_glow", Rgba::opaque(255, 100, 30)),
    ("crusher_body", Rgba::opaque(102, 77, 128)),
    ("miner_body", Rgba::opaque(204, 153, 51)),
    ("danger", Rgba::opaque(204, 51, 51)),
    ("warning", Rgba::opaque(204, 170, 51)),
    ("power", Rgba::opaque(51, 102, 204)),
    ("active", Rgba::opaque(51, 204, 102)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTable {
    entries: Vec<(String, Rgba)>,
}

#[derive(Deserialize)]
struct MaterialFile {
    #[serde(default)]
    material: Vec<MaterialEntry>,
}

#[derive(Deserialize)]
struct MaterialEntry {
    name: String,
    rgba: Rgba,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MATERIALS
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
        }
    }
}

impl MaterialTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a material at the end of the table.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::DuplicateMaterial`] if `name` is already present.
    /// * [`ConfigError::TooManyMaterials`] if the table already holds [`MAX_MATERIALS`] entries.
    pub fn insert(&mut self, name: impl Into<String>, color: Rgba) -> Result<(), ConfigError> {
        let name = name.into();

        if self.index_of(&name).is_some() {
            return Err(ConfigError::DuplicateMaterial(name));
        }

        if self.entries.len() >= MAX_MATERIALS {
            return Err(ConfigError::TooManyMaterials(self.entries.len() + 1));
        }

        self.entries.push((name, color));

        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rgba> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, color)| *color)
    }

    /// Position of `name` in table order, which is also its palette slot.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| entry == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba)> + '_ {
        self.entries
            .iter()
            .map(|(name, color)| (name.as_str(), *color))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a table from TOML, keeping the declaration order.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: MaterialFile = toml::from_str(source)?;

        if file.material.len() > MAX_MATERIALS {
            return Err(ConfigError::TooManyMaterials(file.material.len()));
        }

        let mut table = Self::new();
        for entry in file.material {
            table.insert(entry.name, entry.rgba)?;
        }

        Ok(table)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: &P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&source)?;

        log::info!(
            "Loaded {} materials from {}",
            table.len(),
            path.as_ref().display()
        );

        Ok(table)
    }
}
