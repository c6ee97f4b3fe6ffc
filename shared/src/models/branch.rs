//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity (a single restaurant venue)
///
/// There is no ambient "current branch" anywhere in the engine; every
/// operation takes an explicit `branch_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub timezone: String,
    pub is_active: bool,
}
