pub mod cli;
pub mod costing;
pub mod error;
pub mod interface;
pub mod models;
pub mod service;
pub mod store;

pub use costing::{CostBreakdown, CostParameters, CostReport, compute_cost};
pub use error::{CostError, ErrorKind, Result};
pub use models::{CostLine, Ingredient, Recipe, RecipeIngredientLine};
