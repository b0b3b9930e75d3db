//! In-memory event store for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::store::EventStore;
use crate::models::event::EventRow;
use crate::tier::Tier;

/// Fixed list of events held in memory.
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<EventRow>>,
    fail: AtomicBool,
}

impl MemoryEventStore {
    pub fn new(events: Vec<EventRow>) -> Self {
        Self {
            events: RwLock::new(events),
            fail: AtomicBool::new(false),
        }
    }

    /// Makes every query fail as if the database were unreachable.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_for_tiers(&self, tiers: &[Tier]) -> Result<Vec<EventRow>, sqlx::Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }
        let mut matching: Vec<EventRow> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| tiers.iter().any(|t| t == e.tier.as_str()))
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.event_date);
        Ok(matching)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tier::{TierAccess, TierRank};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    pub(crate) fn event(title: &str, tier: &str, day: u32) -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} description"),
            tier: tier.to_string(),
            event_date: Utc.with_ymd_and_hms(2026, 11, day, 18, 0, 0).unwrap(),
            image_url: None,
        }
    }

    pub(crate) fn sample_events() -> Vec<EventRow> {
        vec![
            event("Platinum Gala", "platinum", 3),
            event("Gold Summit", "gold", 1),
            event("Silver Meetup", "silver", 20),
            event("Open House", "free", 12),
            event("Community Picnic", "free", 2),
        ]
    }

    #[tokio::test]
    async fn test_filters_out_higher_tiers() {
        let store = MemoryEventStore::new(sample_events());
        let rank = TierRank::default();
        let access = TierAccess::for_tier(&rank, "silver").unwrap();

        let events = store.list_for_tiers(access.allowed_tiers()).await.unwrap();

        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.tier != "gold" && e.tier != "platinum"));
    }

    #[tokio::test]
    async fn test_orders_by_event_date_ascending() {
        let store = MemoryEventStore::new(sample_events());
        let rank = TierRank::default();

        let events = store.list_for_tiers(rank.tiers()).await.unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Gold Summit",
                "Community Picnic",
                "Platinum Gala",
                "Open House",
                "Silver Meetup"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_tier_set_returns_nothing() {
        let store = MemoryEventStore::new(sample_events());
        assert!(store.list_for_tiers(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_surfaces_as_error() {
        let store = MemoryEventStore::new(sample_events());
        store.set_fail(true);
        assert!(store.list_for_tiers(TierRank::default().tiers()).await.is_err());
    }
}
