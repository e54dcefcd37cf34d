//! Farmer account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered farmer account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
