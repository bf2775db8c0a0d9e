//! Map and zone value objects.
//!
//! A zone is the persisted unit of a campaign map: a rectangular tile grid
//! identified by `(campaign_seed, zone_id)`. Procedurally generated chunks
//! are zones whose id follows the `chunk_{x}_{y}` convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Upper bound on either grid dimension.
pub const MAX_WIDTH: u32 = 1024;
/// Upper bound on either grid dimension.
pub const MAX_HEIGHT: u32 = 1024;
/// Upper bound on total cell count (1,048,576 cells).
pub const MAX_TILES: u64 = 1024 * 1024;

/// Biome/zone classification for a persisted map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Dungeon,
    Forest,
    Plains,
    Town,
}

impl ZoneType {
    pub const ALL: [ZoneType; 4] = [
        ZoneType::Dungeon,
        ZoneType::Forest,
        ZoneType::Plains,
        ZoneType::Town,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Dungeon => "dungeon",
            ZoneType::Forest => "forest",
            ZoneType::Plains => "plains",
            ZoneType::Town => "town",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dungeon" => Ok(ZoneType::Dungeon),
            "forest" => Ok(ZoneType::Forest),
            "plains" => Ok(ZoneType::Plains),
            "town" => Ok(ZoneType::Town),
            other => Err(DomainError::parse(format!("Unknown zone type: {other}"))),
        }
    }
}

/// A single grid cell. Only `x`, `y`, and `biome` are mandatory; the rest
/// default when a generator does not care about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTile {
    pub x: u32,
    pub y: u32,
    pub biome: String,
    #[serde(default)]
    pub elevation: i32,
    #[serde(default = "default_traversable")]
    pub traversable: bool,
    #[serde(default)]
    pub explored: bool,
}

fn default_traversable() -> bool {
    true
}

/// Entry point into a zone. Must lie within `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: u32,
    pub y: u32,
}
