//! Database Models

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::{Ingredient, IngredientCreate};
pub use recipe::{
    Recipe, RecipeAggregate, RecipeCreate, RecipeDetail, RecipePatch, RecipeSummary,
};
pub use tag::{Tag, TagCreate};
pub use user::{User, UserCreate, UserPatch, UserResponse};
