use clap::{Args, Parser, Subcommand};

use crate::costing::{CostParameters, DISPLAY_DECIMALS, MAX_DISPLAY_DECIMALS};
use crate::store::RecipeEdit;

/// recipe_cost: batch costing and pricing for recipes in a JSON recipe book.
#[derive(Parser, Debug)]
#[command(name = "recipe_cost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the recipe book JSON file.
    #[arg(short, long, global = true, env = "RECIPE_BOOK_FILE", default_value = "recipe_book.json")]
    pub file: String,

    /// Owner whose recipes and ingredients are visible.
    #[arg(long, global = true, env = "RECIPE_OWNER", default_value = "default")]
    pub owner: String,

    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Per-calculation cost parameters. Unset flags fall back to the recipe's saved values.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Labor cost per hour.
    #[arg(long, allow_negative_numbers = true)]
    pub labor_rate: Option<f64>,

    /// Overhead as a percentage of ingredient cost.
    #[arg(long, allow_negative_numbers = true)]
    pub overhead: Option<f64>,

    /// Fixed packaging cost per batch.
    #[arg(long, allow_negative_numbers = true)]
    pub packaging: Option<f64>,

    /// Profit margin percentage.
    #[arg(long, allow_negative_numbers = true)]
    pub margin: Option<f64>,
}

impl ParamArgs {
    pub fn to_params(&self) -> CostParameters {
        CostParameters {
            labor_cost_per_hour: self.labor_rate,
            overhead_percentage: self.overhead,
            packaging_cost: self.packaging,
            profit_margin_percentage: self.margin,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cost a recipe batch and suggest a price.
    Cost {
        /// Recipe name or id.
        recipe: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Do not remember the parameters on the recipe.
        #[arg(long)]
        no_save: bool,

        /// Print the breakdown as JSON.
        #[arg(long)]
        json: bool,

        /// Decimal places for money in the output.
        #[arg(
            long,
            default_value_t = DISPLAY_DECIMALS,
            value_parser = clap::value_parser!(u32).range(0..=MAX_DISPLAY_DECIMALS as i64)
        )]
        decimals: u32,

        /// Prompt for each cost parameter.
        #[arg(short, long)]
        interactive: bool,
    },

    /// Compare suggested prices across several profit margins.
    Margins {
        /// Recipe name or id.
        recipe: String,

        /// Margins to compare (comma-separated percentages).
        #[arg(long, value_delimiter = ',', default_values_t = vec![20.0, 30.0, 50.0])]
        margins: Vec<f64>,

        #[command(flatten)]
        params: ParamArgs,

        /// Decimal places for money in the output.
        #[arg(
            long,
            default_value_t = DISPLAY_DECIMALS,
            value_parser = clap::value_parser!(u32).range(0..=MAX_DISPLAY_DECIMALS as i64)
        )]
        decimals: u32,
    },

    /// List recipes.
    Recipes,

    /// List ingredients.
    Ingredients,

    /// Add an ingredient.
    AddIngredient {
        name: String,

        /// Cost per unit.
        cost: f64,

        /// Unit label ("g", "each", ...).
        #[arg(default_value = "each")]
        unit: String,
    },

    /// Change an ingredient's cost per unit.
    SetCost {
        /// Ingredient name.
        ingredient: String,

        #[arg(allow_negative_numbers = true)]
        cost: f64,
    },

    /// Create a recipe.
    AddRecipe {
        name: String,

        /// Units produced per batch.
        #[arg(allow_negative_numbers = true)]
        batch_size: i64,

        /// Prep time in minutes.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        prep: f64,

        /// Bake time in minutes.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        bake: f64,
    },

    /// Change a recipe's name, batch size or times.
    EditRecipe {
        /// Recipe name or id.
        recipe: String,

        #[command(flatten)]
        edit: RecipeEditArgs,
    },

    /// Delete a recipe.
    RemoveRecipe {
        /// Recipe name or id.
        recipe: String,
    },

    /// Set the quantity of an ingredient in a recipe, adding it if missing.
    AddLine {
        /// Recipe name or id.
        recipe: String,

        /// Ingredient name.
        ingredient: String,

        /// Quantity in the ingredient's unit.
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },

    /// Remove an ingredient from a recipe.
    RemoveLine {
        /// Recipe name or id.
        recipe: String,

        /// Ingredient name.
        ingredient: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecipeEditArgs {
    /// New name.
    #[arg(long)]
    pub name: Option<String>,

    /// New batch size.
    #[arg(long, allow_negative_numbers = true)]
    pub batch: Option<i64>,

    /// New prep time in minutes.
    #[arg(long, allow_negative_numbers = true)]
    pub prep: Option<f64>,

    /// New bake time in minutes.
    #[arg(long, allow_negative_numbers = true)]
    pub bake: Option<f64>,
}

impl RecipeEditArgs {
    pub fn to_edit(&self) -> RecipeEdit {
        RecipeEdit {
            name: self.name.clone(),
            batch_size: self.batch,
            prep_time_minutes: self.prep,
            bake_time_minutes: self.bake,
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::Recipes
    }
}
