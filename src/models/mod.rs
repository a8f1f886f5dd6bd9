mod ingredient;
mod recipe;

pub use ingredient::{CostLine, Ingredient, RecipeIngredientLine};
pub use recipe::Recipe;
