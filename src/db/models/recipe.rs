//! Recipe Model
//!
//! Prices are decimals stored as TEXT in SQLite and surfaced as
//! `rust_decimal::Decimal`, so `FromRow` is implemented by hand.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::{Ingredient, Tag};

/// Recipe entity matching the `recipe` table (association sets not included)
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: i64,
}

impl sqlx::FromRow<'_, SqliteRow> for Recipe {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_price: String = row.try_get("price")?;
        let price = raw_price
            .parse::<Decimal>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            time_minutes: row.try_get("time_minutes")?,
            price,
            link: row.try_get("link")?,
            image: row.try_get("image")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Create payload (POST), doubling as the full-replace payload (PUT)
///
/// Omitted association arrays default to empty sets, so a PUT without
/// `tags`/`ingredients` clears both relations.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub ingredients: Vec<i64>,
}

/// Partial update payload (PATCH)
///
/// Only supplied fields change; a supplied association array fully
/// replaces that relation's set.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub time_minutes: Option<i64>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub tags: Option<Vec<i64>>,
    pub ingredients: Option<Vec<i64>>,
}

/// List representation: associations as id arrays
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

impl RecipeSummary {
    pub fn from_recipe(recipe: Recipe, tags: Vec<i64>, ingredients: Vec<i64>) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            image: recipe.image,
            tags,
            ingredients,
        }
    }
}

/// Detail representation: associations embedded as full objects
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDetail {
    pub fn from_recipe(recipe: Recipe, tags: Vec<Tag>, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            image: recipe.image,
            tags,
            ingredients,
        }
    }
}

/// Aggregate endpoint response
#[derive(Debug, Clone, Serialize)]
pub struct RecipeAggregate {
    pub recipe: String,
    #[serde(rename = "noOfTags")]
    pub no_of_tags: i64,
    #[serde(rename = "noOfIngredients")]
    pub no_of_ingredients: i64,
    pub price: Decimal,
}
