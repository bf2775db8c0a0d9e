//! Map service: validation, normalization, persistence, and error mapping.
//!
//! Owns every invariant about map geometry. All validation runs before any
//! store I/O, and each failure carries a field-level message.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use ashfen_domain::{MapTile, SpawnPoint, ZoneType, MAX_HEIGHT, MAX_TILES, MAX_WIDTH};

use crate::infrastructure::ports::{
    MapListItem, MapRecord, MapRepo, MapRowPatch, NewMapRow, RandomPort, RepoError,
};

/// Service-level error taxonomy, mapped 1:1 onto HTTP statuses by the API
/// layer.
#[derive(Debug, thiserror::Error)]
pub enum MapServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Map already exists for this campaignSeed and zoneId")]
    Conflict,

    #[error("Map not found")]
    NotFound,

    #[error("{message}")]
    Store {
        message: String,
        code: Option<String>,
    },
}

impl MapServiceError {
    fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Conflict => 409,
            Self::NotFound => 404,
            Self::Store { .. } => 500,
        }
    }

    /// Machine-readable error code for the response body.
    pub fn code(&self) -> String {
        match self {
            Self::Validation(_) => "validation_error".to_string(),
            Self::Conflict => "unique_violation".to_string(),
            Self::NotFound => "not_found".to_string(),
            Self::Store { code, .. } => {
                code.clone().unwrap_or_else(|| "store_error".to_string())
            }
        }
    }
}

impl From<RepoError> for MapServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation(_) => Self::Conflict,
            RepoError::NotFound { .. } => Self::NotFound,
            RepoError::Database { code, message, .. } => Self::Store { message, code },
            RepoError::Serialization(message) => Self::Store {
                message,
                code: Some("serialization_error".to_string()),
            },
        }
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Create request body. Both camelCase and snake_case field names are
/// accepted for compatibility; camelCase wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapCreateRequest {
    #[serde(default, rename = "campaignSeed")]
    pub campaign_seed: Option<String>,
    #[serde(default, rename = "campaign_seed")]
    pub campaign_seed_snake: Option<String>,
    #[serde(default, rename = "zoneId")]
    pub zone_id: Option<String>,
    #[serde(default, rename = "zone_id")]
    pub zone_id_snake: Option<String>,
    #[serde(default, rename = "zoneType")]
    pub zone_type: Option<String>,
    #[serde(default, rename = "zone_type")]
    pub zone_type_snake: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub tiles: Option<Value>,
    #[serde(default, rename = "spawnPoint")]
    pub spawn_point: Option<Value>,
    #[serde(default, rename = "spawn_point")]
    pub spawn_point_snake: Option<Value>,
    #[serde(default)]
    pub seed: Option<f64>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Update request body. Only tiles, spawnPoint, metadata, and seed are
/// patchable; identity fields are immutable post-creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapUpdateRequest {
    #[serde(default)]
    pub tiles: Option<Value>,
    #[serde(default, rename = "spawnPoint")]
    pub spawn_point: Option<Value>,
    #[serde(default, rename = "spawn_point")]
    pub spawn_point_snake: Option<Value>,
    #[serde(default, deserialize_with = "double_option")]
    pub metadata: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub seed: Option<Option<f64>>,
}

/// Options for server-side generation fallback.
#[derive(Debug, Clone, Default)]
pub struct MapGenerateOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<i64>,
    pub tiles: Option<Vec<Vec<Value>>>,
    pub spawn_point: Option<SpawnPoint>,
    pub metadata: Option<Value>,
}

fn validate_zone_id(zone_id: &str) -> Result<(), MapServiceError> {
    let valid = !zone_id.is_empty()
        && zone_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | ':'));
    if !valid {
        return Err(MapServiceError::validation(
            "zoneId must be alphanumeric with \"-\", \"_\", \"/\", \":\" allowed",
        ));
    }
    Ok(())
}

fn parse_spawn_point(value: &Value) -> Result<(f64, f64), MapServiceError> {
    let (Some(x), Some(y)) = (
        value.get("x").and_then(Value::as_f64),
        value.get("y").and_then(Value::as_f64),
    ) else {
        return Err(MapServiceError::validation(
            "spawnPoint must be an object with numeric x and y",
        ));
    };
    Ok((x, y))
}

fn validate_spawn_point(
    value: &Value,
    width: u32,
    height: u32,
) -> Result<SpawnPoint, MapServiceError> {
    let (x, y) = parse_spawn_point(value)?;
    if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
        return Err(MapServiceError::validation(
            "spawnPoint must be within map bounds",
        ));
    }
    Ok(SpawnPoint { x: x as u32, y: y as u32 })
}

/// Structural tile validation. Row and column counts are exact; cell shape
/// is sampled (first and middle cell of each row) rather than scanned,
/// keeping the check O(height) on large grids.
fn validate_tiles(
    tiles: &Value,
    width: u32,
    height: u32,
) -> Result<Vec<Vec<Value>>, MapServiceError> {
    let Some(rows) = tiles.as_array() else {
        return Err(MapServiceError::validation("tiles must be a 2D array"));
    };
    if rows.len() != height as usize {
        return Err(MapServiceError::validation(format!(
            "tiles row count {} does not match height {}",
            rows.len(),
            height
        )));
    }

    let mut grid = Vec::with_capacity(rows.len());
    for (y, row) in rows.iter().enumerate() {
        let Some(cells) = row.as_array() else {
            return Err(MapServiceError::validation(format!(
                "tiles row {y} is not an array"
            )));
        };
        if cells.len() != width as usize {
            return Err(MapServiceError::validation(format!(
                "tiles[{y}] column count {} does not match width {}",
                cells.len(),
                width
            )));
        }

        if !cells.is_empty() {
            for tile in [&cells[0], &cells[cells.len() / 2]] {
                if !tile.is_object() {
                    return Err(MapServiceError::validation("tiles entries must be objects"));
                }
                let has_coords = tile.get("x").and_then(Value::as_f64).is_some()
                    && tile.get("y").and_then(Value::as_f64).is_some();
                if !has_coords {
                    return Err(MapServiceError::validation(
                        "each tile should include numeric x and y",
                    ));
                }
            }
        }

        grid.push(cells.clone());
    }

    Ok(grid)
}

fn normalize_create(body: MapCreateRequest) -> Result<NewMapRow, MapServiceError> {
    let campaign_seed = body
        .campaign_seed
        .or(body.campaign_seed_snake)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| MapServiceError::validation("campaignSeed is required"))?;
    let zone_id = body
        .zone_id
        .or(body.zone_id_snake)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| MapServiceError::validation("zoneId is required"))?;
    let zone_type_raw = body
        .zone_type
        .or(body.zone_type_snake)
        .ok_or_else(|| MapServiceError::validation("zoneType is required"))?;
    let zone_type = zone_type_raw.parse::<ZoneType>().map_err(|_| {
        MapServiceError::validation(format!(
            "zoneType must be one of: {}",
            ZoneType::ALL.map(|z| z.as_str()).join(", ")
        ))
    })?;

    let (Some(width_raw), Some(height_raw)) = (body.width, body.height) else {
        return Err(MapServiceError::validation(
            "width and height are required numeric values",
        ));
    };

    let width = width_raw.floor();
    let height = height_raw.floor();
    if width <= 0.0 || height <= 0.0 {
        return Err(MapServiceError::validation("width and height must be > 0"));
    }
    if width > MAX_WIDTH as f64 || height > MAX_HEIGHT as f64 {
        return Err(MapServiceError::validation(format!(
            "width and height must be <= {MAX_WIDTH}x{MAX_HEIGHT}"
        )));
    }
    let width = width as u32;
    let height = height as u32;
    if width as u64 * height as u64 > MAX_TILES {
        return Err(MapServiceError::validation(format!(
            "tile count exceeds maximum {MAX_TILES}"
        )));
    }

    let tiles_value = body
        .tiles
        .filter(Value::is_array)
        .ok_or_else(|| MapServiceError::validation("tiles must be provided as 2D array"))?;

    let spawn_value = body
        .spawn_point
        .or(body.spawn_point_snake)
        .ok_or_else(|| MapServiceError::validation("spawnPoint is required"))?;

    let seed = body.seed.map(|s| s.floor() as i64);
    let metadata = match body.metadata {
        Some(Value::Null) | None => None,
        Some(other) => Some(other),
    };

    // structural validation
    validate_zone_id(&zone_id)?;
    let spawn_point = validate_spawn_point(&spawn_value, width, height)?;
    let tiles = validate_tiles(&tiles_value, width, height)?;

    Ok(NewMapRow {
        campaign_seed,
        zone_id,
        zone_type,
        width,
        height,
        tiles,
        spawn_point,
        seed,
        metadata,
    })
}

/// Partially-validated update patch; spawn/tiles still need bounds checks
/// against the stored dimensions.
struct NormalizedUpdate {
    tiles: Option<Value>,
    spawn_point: Option<Value>,
    metadata: Option<Option<Value>>,
    seed: Option<Option<i64>>,
}

fn normalize_update(body: MapUpdateRequest) -> Result<NormalizedUpdate, MapServiceError> {
    if let Some(tiles) = &body.tiles {
        if !tiles.is_array() {
            return Err(MapServiceError::validation("tiles must be a 2D array"));
        }
    }

    let spawn_point = body.spawn_point.or(body.spawn_point_snake);
    if let Some(spawn) = &spawn_point {
        parse_spawn_point(spawn)?;
    }

    let metadata = match body.metadata {
        None => None,
        Some(None) | Some(Some(Value::Null)) => Some(None),
        Some(Some(other)) => {
            if !other.is_object() {
                return Err(MapServiceError::validation("metadata must be an object or null"));
            }
            Some(Some(other))
        }
    };

    let seed = body.seed.map(|s| s.map(|v| v.floor() as i64));

    Ok(NormalizedUpdate {
        tiles: body.tiles,
        spawn_point,
        metadata,
        seed,
    })
}

/// Map persistence service.
pub struct MapService {
    repo: Arc<dyn MapRepo>,
    random: Arc<dyn RandomPort>,
}

impl MapService {
    pub fn new(repo: Arc<dyn MapRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { repo, random }
    }

    /// Load a map by campaignSeed and zoneId. `Ok(None)` when absent.
    pub async fn load_map(
        &self,
        campaign_seed: &str,
        zone_id: &str,
    ) -> Result<Option<MapRecord>, MapServiceError> {
        Ok(self.repo.find(campaign_seed, zone_id).await?)
    }

    /// Save a new map. Fails with a 409 conflict if the map already exists
    /// per unique (campaign_seed, zone_id).
    pub async fn save_map(&self, body: MapCreateRequest) -> Result<MapRecord, MapServiceError> {
        let normalized = normalize_create(body)?;
        Ok(self.repo.insert(normalized).await?)
    }

    /// Update a map by id. Supports tiles, spawnPoint, metadata, and seed;
    /// identity fields (campaignSeed, zoneId, width, height, zoneType) are
    /// immutable.
    pub async fn update_map_by_id(
        &self,
        id: &str,
        body: MapUpdateRequest,
    ) -> Result<MapRecord, MapServiceError> {
        if id.is_empty() {
            return Err(MapServiceError::validation("id is required"));
        }

        let normalized = normalize_update(body)?;

        let mut patch = MapRowPatch {
            metadata: normalized.metadata,
            seed: normalized.seed,
            ..Default::default()
        };

        // New tiles/spawn values are checked against the stored dimensions,
        // which themselves are not patchable.
        if normalized.tiles.is_some() || normalized.spawn_point.is_some() {
            let (width, height) = self
                .repo
                .find_dimensions(id)
                .await?
                .ok_or(MapServiceError::NotFound)?;

            if let Some(spawn) = &normalized.spawn_point {
                patch.spawn_point = Some(validate_spawn_point(spawn, width, height)?);
            }
            if let Some(tiles) = &normalized.tiles {
                patch.tiles = Some(validate_tiles(tiles, width, height)?);
            }
        }

        Ok(self.repo.update(id, patch).await?)
    }

    /// List maps for a campaign without tiles (faster and lighter).
    pub async fn list_campaign_maps(
        &self,
        campaign_seed: &str,
    ) -> Result<Vec<MapListItem>, MapServiceError> {
        Ok(self.repo.list(campaign_seed).await?)
    }

    /// Generate a basic map if missing, then save it. Returns the existing
    /// row when one is already persisted (idempotent).
    pub async fn generate_and_save_map(
        &self,
        campaign_seed: &str,
        zone_id: &str,
        zone_type: ZoneType,
        options: MapGenerateOptions,
    ) -> Result<MapRecord, MapServiceError> {
        if let Some(existing) = self.load_map(campaign_seed, zone_id).await? {
            return Ok(existing);
        }

        let width = options.width.unwrap_or(64).max(1);
        let height = options.height.unwrap_or(64).max(1);
        let seed = options
            .seed
            .unwrap_or_else(|| self.random.gen_range(0, 2_147_483_646));

        let tiles = match options.tiles {
            Some(tiles) => tiles,
            None => blank_grid(width, height, zone_type)?,
        };
        let spawn_point = options
            .spawn_point
            .unwrap_or(SpawnPoint { x: width / 2, y: height / 2 });
        let metadata = options
            .metadata
            .unwrap_or_else(|| serde_json::json!({ "generator": "basic", "version": 1 }));

        self.save_map(MapCreateRequest {
            campaign_seed: Some(campaign_seed.to_string()),
            zone_id: Some(zone_id.to_string()),
            zone_type: Some(zone_type.as_str().to_string()),
            width: Some(width as f64),
            height: Some(height as f64),
            tiles: Some(Value::Array(tiles.into_iter().map(Value::Array).collect())),
            spawn_point: Some(
                serde_json::to_value(spawn_point)
                    .map_err(|e| MapServiceError::validation(e.to_string()))?,
            ),
            seed: Some(seed as f64),
            metadata: Some(metadata),
            ..Default::default()
        })
        .await
    }
}

/// A fully-traversable single-biome grid.
fn blank_grid(
    width: u32,
    height: u32,
    zone_type: ZoneType,
) -> Result<Vec<Vec<Value>>, MapServiceError> {
    let mut rows = Vec::with_capacity(height as usize);
    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize);
        for x in 0..width {
            let tile = MapTile {
                x,
                y,
                biome: zone_type.as_str().to_string(),
                elevation: 0,
                traversable: true,
                explored: false,
            };
            row.push(
                serde_json::to_value(tile)
                    .map_err(|e| MapServiceError::Store {
                        message: e.to_string(),
                        code: Some("serialization_error".to_string()),
                    })?,
            );
        }
        rows.push(row);
    }
    Ok(rows)
}
