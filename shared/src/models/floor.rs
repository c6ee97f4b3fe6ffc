//! Floor Model

use serde::{Deserialize, Serialize};

/// Floor entity (a physical level or zone inside a branch)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub is_active: bool,
}
