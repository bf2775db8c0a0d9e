//! SQLite-backed map storage.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use ashfen_domain::{MapId, SpawnPoint, ZoneType};

use crate::infrastructure::ports::{
    ClockPort, MapListItem, MapRecord, MapRepo, MapRowPatch, NewMapRow, RepoError,
};

/// SQLite implementation of the maps table.
///
/// The natural key `(campaign_seed, zone_id)` is enforced with a unique
/// index; the resulting constraint violation is the single concurrency
/// mechanism map creation relies on.
pub struct SqliteMapRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteMapRepo {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS maps (
                id TEXT PRIMARY KEY,
                campaign_seed TEXT NOT NULL,
                zone_id TEXT NOT NULL,
                zone_type TEXT NOT NULL,
                width INTEGER NOT NULL,
                height INTEGER NOT NULL,
                tiles TEXT NOT NULL,
                spawn_point TEXT NOT NULL,
                seed INTEGER,
                metadata TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("maps schema", &e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_maps_campaign_zone \
             ON maps (campaign_seed, zone_id)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("maps schema", &e))?;

        Ok(Self { pool, clock })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn record_from_row(row: &SqliteRow) -> Result<MapRecord, RepoError> {
        let zone_type: String = row.get("zone_type");
        let tiles_json: String = row.get("tiles");
        let spawn_json: String = row.get("spawn_point");
        let metadata_json: Option<String> = row.get("metadata");

        Ok(MapRecord {
            id: row.get("id"),
            campaign_seed: row.get("campaign_seed"),
            zone_id: row.get("zone_id"),
            zone_type: zone_type
                .parse::<ZoneType>()
                .map_err(|e| RepoError::serialization(e))?,
            width: row.get::<i64, _>("width") as u32,
            height: row.get::<i64, _>("height") as u32,
            tiles: serde_json::from_str(&tiles_json).map_err(|e| RepoError::serialization(e))?,
            spawn_point: serde_json::from_str(&spawn_json)
                .map_err(|e| RepoError::serialization(e))?,
            seed: row.get("seed"),
            metadata: metadata_json
                .map(|m| serde_json::from_str(&m))
                .transpose()
                .map_err(|e| RepoError::serialization(e))?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn list_item_from_row(row: &SqliteRow) -> Result<MapListItem, RepoError> {
        let zone_type: String = row.get("zone_type");
        let spawn_json: String = row.get("spawn_point");
        let metadata_json: Option<String> = row.get("metadata");

        Ok(MapListItem {
            id: row.get("id"),
            campaign_seed: row.get("campaign_seed"),
            zone_id: row.get("zone_id"),
            zone_type: zone_type
                .parse::<ZoneType>()
                .map_err(|e| RepoError::serialization(e))?,
            width: row.get::<i64, _>("width") as u32,
            height: row.get::<i64, _>("height") as u32,
            spawn_point: serde_json::from_str(&spawn_json)
                .map_err(|e| RepoError::serialization(e))?,
            seed: row.get("seed"),
            metadata: metadata_json
                .map(|m| serde_json::from_str(&m))
                .transpose()
                .map_err(|e| RepoError::serialization(e))?,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<MapRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM maps WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps fetch", &e))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    fn encode_tiles(tiles: &[Vec<serde_json::Value>]) -> Result<String, RepoError> {
        serde_json::to_string(tiles).map_err(|e| RepoError::serialization(e))
    }

    fn encode_spawn(spawn_point: &SpawnPoint) -> Result<String, RepoError> {
        serde_json::to_string(spawn_point).map_err(|e| RepoError::serialization(e))
    }

    fn encode_metadata(
        metadata: &Option<serde_json::Value>,
    ) -> Result<Option<String>, RepoError> {
        metadata
            .as_ref()
            .map(|m| serde_json::to_string(m))
            .transpose()
            .map_err(|e| RepoError::serialization(e))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

#[async_trait]
impl MapRepo for SqliteMapRepo {
    async fn find(
        &self,
        campaign_seed: &str,
        zone_id: &str,
    ) -> Result<Option<MapRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM maps WHERE campaign_seed = ? AND zone_id = ?")
            .bind(campaign_seed)
            .bind(zone_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps find", &e))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn find_dimensions(&self, id: &str) -> Result<Option<(u32, u32)>, RepoError> {
        let row = sqlx::query("SELECT width, height FROM maps WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps dimensions", &e))?;

        Ok(row.map(|r| (r.get::<i64, _>("width") as u32, r.get::<i64, _>("height") as u32)))
    }

    async fn insert(&self, new_row: NewMapRow) -> Result<MapRecord, RepoError> {
        let id = MapId::new().to_string();
        let now = self.clock.now();
        let tiles_json = Self::encode_tiles(&new_row.tiles)?;
        let spawn_json = Self::encode_spawn(&new_row.spawn_point)?;
        let metadata_json = Self::encode_metadata(&new_row.metadata)?;

        sqlx::query(
            r#"
            INSERT INTO maps
                (id, campaign_seed, zone_id, zone_type, width, height,
                 tiles, spawn_point, seed, metadata, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&new_row.campaign_seed)
        .bind(&new_row.zone_id)
        .bind(new_row.zone_type.as_str())
        .bind(new_row.width as i64)
        .bind(new_row.height as i64)
        .bind(&tiles_json)
        .bind(&spawn_json)
        .bind(new_row.seed)
        .bind(&metadata_json)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::UniqueViolation(format!(
                    "maps ({}, {})",
                    new_row.campaign_seed, new_row.zone_id
                ))
            } else {
                RepoError::database("maps insert", &e)
            }
        })?;

        Ok(MapRecord {
            id,
            campaign_seed: new_row.campaign_seed,
            zone_id: new_row.zone_id,
            zone_type: new_row.zone_type,
            width: new_row.width,
            height: new_row.height,
            tiles: new_row.tiles,
            spawn_point: new_row.spawn_point,
            seed: new_row.seed,
            metadata: new_row.metadata,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: &str, patch: MapRowPatch) -> Result<MapRecord, RepoError> {
        if patch.is_empty() {
            return self
                .fetch_by_id(id)
                .await?
                .ok_or_else(|| RepoError::not_found("Map", id));
        }

        let mut sets: Vec<&str> = Vec::new();
        let tiles_json = patch.tiles.as_deref().map(Self::encode_tiles).transpose()?;
        let spawn_json = patch.spawn_point.as_ref().map(Self::encode_spawn).transpose()?;
        let metadata_json = patch.metadata.as_ref().map(Self::encode_metadata).transpose()?;

        if tiles_json.is_some() {
            sets.push("tiles = ?");
        }
        if spawn_json.is_some() {
            sets.push("spawn_point = ?");
        }
        if metadata_json.is_some() {
            sets.push("metadata = ?");
        }
        if patch.seed.is_some() {
            sets.push("seed = ?");
        }
        sets.push("updated_at = ?");

        let sql = format!("UPDATE maps SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(tiles) = &tiles_json {
            query = query.bind(tiles);
        }
        if let Some(spawn) = &spawn_json {
            query = query.bind(spawn);
        }
        if let Some(metadata) = &metadata_json {
            query = query.bind(metadata);
        }
        if let Some(seed) = patch.seed {
            query = query.bind(seed);
        }
        query = query.bind(self.clock.now()).bind(id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("maps update", &e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Map", id));
        }

        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| RepoError::not_found("Map", id))
    }

    async fn list(&self, campaign_seed: &str) -> Result<Vec<MapListItem>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, campaign_seed, zone_id, zone_type, width, height, \
                    spawn_point, seed, metadata, created_at, updated_at \
             FROM maps WHERE campaign_seed = ? ORDER BY zone_id ASC",
        )
        .bind(campaign_seed)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("maps list", &e))?;

        rows.iter().map(Self::list_item_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::TimeZone;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repo() -> SqliteMapRepo {
        // A single connection keeps every query on the same in-memory DB.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        let clock = Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid"),
        ));
        SqliteMapRepo::new(pool, clock).await.expect("schema")
    }

    fn sample_row(zone_id: &str) -> NewMapRow {
        NewMapRow {
            campaign_seed: "seed-1".to_string(),
            zone_id: zone_id.to_string(),
            zone_type: ZoneType::Town,
            width: 2,
            height: 2,
            tiles: vec![
                vec![json!({"x": 0, "y": 0, "biome": "town"}), json!({"x": 1, "y": 0, "biome": "town"})],
                vec![json!({"x": 0, "y": 1, "biome": "town"}), json!({"x": 1, "y": 1, "biome": "town"})],
            ],
            spawn_point: SpawnPoint { x: 1, y: 1 },
            seed: Some(42),
            metadata: Some(json!({"generator": "test"})),
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = test_repo().await;
        let inserted = repo.insert(sample_row("zone-a")).await.expect("insert");

        let found = repo
            .find("seed-1", "zone-a")
            .await
            .expect("find")
            .expect("row exists");
        assert_eq!(found, inserted);
        assert_eq!(found.zone_type, ZoneType::Town);
        assert_eq!(found.seed, Some(42));
    }

    #[tokio::test]
    async fn find_absent_row_is_none() {
        let repo = test_repo().await;
        let found = repo.find("seed-1", "nope").await.expect("find");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_natural_key_is_a_unique_violation() {
        let repo = test_repo().await;
        repo.insert(sample_row("zone-a")).await.expect("first insert");

        let err = repo.insert(sample_row("zone-a")).await.unwrap_err();
        assert!(matches!(err, RepoError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn update_patches_only_requested_fields() {
        let repo = test_repo().await;
        let inserted = repo.insert(sample_row("zone-a")).await.expect("insert");

        let patch = MapRowPatch {
            spawn_point: Some(SpawnPoint { x: 0, y: 0 }),
            seed: Some(None),
            ..Default::default()
        };
        let updated = repo.update(&inserted.id, patch).await.expect("update");

        assert_eq!(updated.spawn_point, SpawnPoint { x: 0, y: 0 });
        assert_eq!(updated.seed, None);
        assert_eq!(updated.tiles, inserted.tiles);
        assert_eq!(updated.metadata, inserted.metadata);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let repo = test_repo().await;
        let patch = MapRowPatch {
            spawn_point: Some(SpawnPoint { x: 0, y: 0 }),
            ..Default::default()
        };
        let err = repo.update("missing-id", patch).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_orders_by_zone_id_and_omits_tiles() {
        let repo = test_repo().await;
        repo.insert(sample_row("zone-b")).await.expect("insert b");
        repo.insert(sample_row("zone-a")).await.expect("insert a");

        let items = repo.list("seed-1").await.expect("list");
        let ids: Vec<&str> = items.iter().map(|i| i.zone_id.as_str()).collect();
        assert_eq!(ids, vec!["zone-a", "zone-b"]);
    }

    #[tokio::test]
    async fn dimensions_lookup() {
        let repo = test_repo().await;
        let inserted = repo.insert(sample_row("zone-a")).await.expect("insert");

        let dims = repo
            .find_dimensions(&inserted.id)
            .await
            .expect("lookup")
            .expect("row exists");
        assert_eq!(dims, (2, 2));
        assert_eq!(repo.find_dimensions("missing").await.expect("lookup"), None);
    }
}
