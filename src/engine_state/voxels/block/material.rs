//! # Material Module
//!
//! Every [`BlockId`] maps to a [`Material`] describing how it is drawn and how
//! it participates in face culling:
//! - `color`: packed `0xRRGGBB`, decoded to 0..1 channels for mesh vertex colors
//! - `solid`: whether collision/solidity queries treat the block as solid
//! - `transparent`: whether faces behind it stay visible
//!
//! The built-in definitions live in a compile-time perfect-hash map. A
//! [`MaterialTable`] starts from those and can be overridden from JSON.

use std::path::Path;

use log::info;
use phf::phf_map;
use serde::Deserialize;

use super::{is_air, BlockId};
use crate::error::{Result, VoxelError};

/// Drawing and culling properties of one block identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Material {
    /// Packed `0xRRGGBB` colour.
    pub color: u32,
    /// Whether the block blocks movement.
    pub solid: bool,
    /// Whether faces behind this block remain visible.
    pub transparent: bool,
}

impl Material {
    /// An opaque, solid material of the given colour.
    pub const fn opaque(color: u32) -> Self {
        Material {
            color,
            solid: true,
            transparent: false,
        }
    }

    /// A transparent material of the given colour and solidity.
    pub const fn transparent(color: u32, solid: bool) -> Self {
        Material {
            color,
            solid,
            transparent: true,
        }
    }

    /// The colour decoded into `[r, g, b]` channels in the 0..1 range.
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.color >> 16) & 0xFF) as f32 / 255.0,
            ((self.color >> 8) & 0xFF) as f32 / 255.0,
            (self.color & 0xFF) as f32 / 255.0,
        ]
    }
}

/// Material used for identifiers with no definition: solid, opaque, magenta.
pub const UNKNOWN_MATERIAL: Material = Material::opaque(0xFF00FF);

/// Material of the empty block.
pub const AIR_MATERIAL: Material = Material::transparent(0x000000, false);

/// Built-in material definitions keyed by block identifier.
pub static BUILTIN_MATERIALS: phf::Map<u8, Material> = phf_map! {
    0u8 => AIR_MATERIAL,
    1u8 => Material::opaque(0x808080), // STONE
    2u8 => Material::opaque(0x8B5A2B), // DIRT
    3u8 => Material::opaque(0x4CAF50), // GRASS
    4u8 => Material::opaque(0xE0D090), // SAND
    5u8 => Material::transparent(0x3F76E4, false), // WATER
    6u8 => Material::opaque(0x6D4C2F), // WOOD
    7u8 => Material::transparent(0x2E7D32, true), // LEAVES
    8u8 => Material::transparent(0xC8E6FF, true), // GLASS
    9u8 => Material::opaque(0xF5F5F5), // SNOW
};

/// A JSON material entry: `{ "id": 3, "color": "#4CAF50", "solid": true, "transparent": false }`.
#[derive(Deserialize, Debug)]
struct MaterialEntry {
    id: BlockId,
    color: ColorSpec,
    #[serde(default = "default_true")]
    solid: bool,
    #[serde(default)]
    transparent: bool,
}

/// Colours may be written as `"#RRGGBB"` strings or packed integers.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ColorSpec {
    Packed(u32),
    Hex(String),
}

fn default_true() -> bool {
    true
}

impl ColorSpec {
    fn to_packed(&self) -> Result<u32> {
        match self {
            ColorSpec::Packed(color) => Ok(color & 0xFF_FFFF),
            ColorSpec::Hex(text) => {
                let digits = text.strip_prefix('#').unwrap_or(text);
                if digits.len() != 6 {
                    return Err(VoxelError::InvalidColor(text.clone()));
                }
                u32::from_str_radix(digits, 16).map_err(|_| VoxelError::InvalidColor(text.clone()))
            }
        }
    }
}

/// Lookup table from every possible [`BlockId`] to its [`Material`].
///
/// Lookups never fail: identifiers without a definition resolve to
/// [`UNKNOWN_MATERIAL`], except `AIR`, which is always empty.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    materials: Box<[Material; 256]>,
}

impl MaterialTable {
    /// Creates a table holding the built-in definitions.
    pub fn new() -> Self {
        let mut materials = Box::new([UNKNOWN_MATERIAL; 256]);
        for (id, material) in BUILTIN_MATERIALS.entries() {
            materials[*id as usize] = *material;
        }
        MaterialTable { materials }
    }

    /// Creates a table from the built-in definitions overridden by a JSON array
    /// of material entries.
    ///
    /// # Errors
    /// Returns [`VoxelError::Json`] for malformed JSON and
    /// [`VoxelError::InvalidColor`] for unparseable colours.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<MaterialEntry> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for entry in entries {
            let material = Material {
                color: entry.color.to_packed()?,
                solid: entry.solid,
                transparent: entry.transparent,
            };
            table.set(entry.id, material);
        }
        Ok(table)
    }

    /// Reads a JSON material file, see [`MaterialTable::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&json)?;
        info!("Loaded material table from {}", path.display());
        Ok(table)
    }

    /// Replaces the definition of one identifier. `AIR` cannot be redefined.
    pub fn set(&mut self, id: BlockId, material: Material) {
        if !is_air(id) {
            self.materials[id as usize] = material;
        }
    }

    /// The material of an identifier.
    #[inline]
    pub fn get(&self, id: BlockId) -> &Material {
        &self.materials[id as usize]
    }

    /// Whether the identifier is transparent. `AIR` counts as transparent.
    #[inline]
    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.materials[id as usize].transparent
    }

    /// Whether the identifier is solid for collision queries. `AIR` is not.
    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        !is_air(id) && self.materials[id as usize].solid
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, AIR};

    #[test]
    fn builtin_flags() {
        let table = MaterialTable::new();
        assert!(table.is_solid(BlockType::STONE.id()));
        assert!(!table.is_transparent(BlockType::STONE.id()));
        assert!(table.is_transparent(BlockType::WATER.id()));
        assert!(!table.is_solid(BlockType::WATER.id()));
        assert!(!table.is_solid(AIR));
    }

    #[test]
    fn unknown_ids_resolve_to_the_fallback() {
        let table = MaterialTable::new();
        assert_eq!(*table.get(250), UNKNOWN_MATERIAL);
    }

    #[test]
    fn color_decodes_to_unit_channels() {
        let rgb = Material::opaque(0xFF8000).rgb();
        assert_eq!(rgb[0], 1.0);
        assert!((rgb[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgb[2], 0.0);
    }

    #[test]
    fn json_overrides_builtins() {
        let table = MaterialTable::from_json_str(
            r##"[
                {"id": 1, "color": "#102030"},
                {"id": 42, "color": 16711680, "solid": false, "transparent": true}
            ]"##,
        )
        .unwrap();
        assert_eq!(table.get(1).color, 0x102030);
        assert!(table.is_transparent(42));
        assert!(!table.is_solid(42));
    }

    #[test]
    fn bad_colors_are_rejected() {
        let result = MaterialTable::from_json_str(r#"[{"id": 1, "color": "green"}]"#);
        assert!(matches!(result, Err(VoxelError::InvalidColor(_))));
    }
}
