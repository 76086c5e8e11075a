//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Ingredient entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub name: String,
}

/// Create ingredient payload
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
}
