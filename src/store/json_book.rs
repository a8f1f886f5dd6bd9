use std::path::{Path, PathBuf};

use tracing::debug;

use crate::costing::CostParameters;
use crate::error::Result;
use crate::models::{CostLine, Recipe};
use crate::store::{RecipeBook, RecipeRepository, RecipeStore, load_book, save_book};

/// Recipe book backed by a JSON file.
///
/// Every call reads the file fresh; writes replace it whole, so the last writer wins.
#[derive(Debug, Clone)]
pub struct JsonRecipeBook {
    path: PathBuf,
}

impl JsonRecipeBook {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<RecipeBook> {
        load_book(&self.path)
    }

    pub fn save(&self, book: &RecipeBook) -> Result<()> {
        save_book(&self.path, book)
    }
}

impl RecipeRepository for JsonRecipeBook {
    fn fetch_recipe_with_ingredients(
        &self,
        recipe_id: u64,
        owner: &str,
    ) -> Result<(Recipe, Vec<CostLine>)> {
        debug!(recipe_id, owner, path = %self.path.display(), "fetching recipe");
        self.load()?.recipe_with_lines(recipe_id, owner)
    }
}

impl RecipeStore for JsonRecipeBook {
    fn persist_cost_parameters(
        &self,
        recipe_id: u64,
        owner: &str,
        params: CostParameters,
    ) -> Result<()> {
        let mut book = self.load()?;
        book.save_cost_parameters(recipe_id, owner, params)?;
        self.save(&book)
    }
}
