use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tier: String,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
}
