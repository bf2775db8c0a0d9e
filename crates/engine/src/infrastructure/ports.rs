//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ashfen_domain::{SpawnPoint, ZoneType};

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Row not found - includes entity type and ID for actionable messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Unique constraint violated on insert.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, err: &sqlx::Error) -> Self {
        let code = match err {
            sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
            _ => None,
        };
        Self::Database {
            operation,
            code,
            message: err.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// One persisted map/zone row, in the external (camelCase) shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRecord {
    pub id: String,
    pub campaign_seed: String,
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<serde_json::Value>>,
    pub spawn_point: SpawnPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: everything but the tile grid (payload optimization).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapListItem {
    pub id: String,
    pub campaign_seed: String,
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub width: u32,
    pub height: u32,
    pub spawn_point: SpawnPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated column values for an insert.
#[derive(Debug, Clone)]
pub struct NewMapRow {
    pub campaign_seed: String,
    pub zone_id: String,
    pub zone_type: ZoneType,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<serde_json::Value>>,
    pub spawn_point: SpawnPoint,
    pub seed: Option<i64>,
    pub metadata: Option<serde_json::Value>,
}

/// Validated patch for an update. `None` fields are left untouched;
/// `metadata`/`seed` use a double Option so "set to null" is expressible.
#[derive(Debug, Clone, Default)]
pub struct MapRowPatch {
    pub tiles: Option<Vec<Vec<serde_json::Value>>>,
    pub spawn_point: Option<SpawnPoint>,
    pub metadata: Option<Option<serde_json::Value>>,
    pub seed: Option<Option<i64>>,
}

impl MapRowPatch {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_none()
            && self.spawn_point.is_none()
            && self.metadata.is_none()
            && self.seed.is_none()
    }
}

/// Database port for the maps table.
#[async_trait]
pub trait MapRepo: Send + Sync {
    /// Single-row lookup by the natural key. `Ok(None)` when absent.
    async fn find(
        &self,
        campaign_seed: &str,
        zone_id: &str,
    ) -> Result<Option<MapRecord>, RepoError>;

    /// Declared dimensions of a row, by surrogate id. Used to validate
    /// patches against the immutable width/height.
    async fn find_dimensions(&self, id: &str) -> Result<Option<(u32, u32)>, RepoError>;

    /// Insert a new row. `RepoError::UniqueViolation` when the natural key
    /// `(campaign_seed, zone_id)` already exists.
    async fn insert(&self, row: NewMapRow) -> Result<MapRecord, RepoError>;

    /// Patch a row by surrogate id. `RepoError::NotFound` when absent.
    async fn update(&self, id: &str, patch: MapRowPatch) -> Result<MapRecord, RepoError>;

    /// All rows for a campaign, tiles omitted, ordered by zone_id ascending.
    async fn list(&self, campaign_seed: &str) -> Result<Vec<MapListItem>, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    fn gen_range(&self, min: i64, max: i64) -> i64;
    fn gen_uuid(&self) -> Uuid;
}
