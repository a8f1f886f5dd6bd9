mod book;
mod json_book;
mod persistence;

pub use book::{RecipeBook, RecipeEdit};
pub use json_book::JsonRecipeBook;
pub use persistence::{load_book, save_book};

use crate::costing::CostParameters;
use crate::error::Result;
use crate::models::{CostLine, Recipe};

/// Source of recipes joined with their priced ingredient lines.
///
/// Implementations enforce ownership: another owner's recipe is `RecipeNotFound`.
pub trait RecipeRepository {
    fn fetch_recipe_with_ingredients(
        &self,
        recipe_id: u64,
        owner: &str,
    ) -> Result<(Recipe, Vec<CostLine>)>;
}

/// Somewhere to remember the cost parameters last used for a recipe.
///
/// Writes are scoped like reads: another owner's recipe is `RecipeNotFound`.
pub trait RecipeStore {
    fn persist_cost_parameters(
        &self,
        recipe_id: u64,
        owner: &str,
        params: CostParameters,
    ) -> Result<()>;
}

impl RecipeRepository for RecipeBook {
    fn fetch_recipe_with_ingredients(
        &self,
        recipe_id: u64,
        owner: &str,
    ) -> Result<(Recipe, Vec<CostLine>)> {
        self.recipe_with_lines(recipe_id, owner)
    }
}
