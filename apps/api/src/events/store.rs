use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::event::EventRow;
use crate::tier::Tier;

/// Read side of the events collection.
///
/// Carried in `AppState` as `Arc<dyn EventStore>`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events whose tier is in `tiers`, ordered by `event_date` ascending.
    async fn list_for_tiers(&self, tiers: &[Tier]) -> Result<Vec<EventRow>, sqlx::Error>;
}

pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list_for_tiers(&self, tiers: &[Tier]) -> Result<Vec<EventRow>, sqlx::Error> {
        if tiers.is_empty() {
            return Ok(Vec::new());
        }
        let tiers: Vec<String> = tiers.iter().map(|t| t.as_str().to_string()).collect();

        sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, tier, event_date, image_url
            FROM events
            WHERE tier = ANY($1)
            ORDER BY event_date ASC
            "#,
        )
        .bind(&tiers)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn test_empty_tier_set_skips_query() {
        // Lazy pool: any real query would fail to connect.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let store = PgEventStore::new(pool);
        assert!(store.list_for_tiers(&[]).await.unwrap().is_empty());
    }
}
