//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub name: String,
}

/// Create tag payload
#[derive(Debug, Clone, Deserialize)]
pub struct TagCreate {
    pub name: String,
}
