use serde::{Deserialize, Serialize};

/// A purchasable input with a cost per unit of its own measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: u64,

    pub owner: String,

    pub name: String,

    pub cost_per_unit: f64,

    /// Free-text unit label ("g", "each", ...).
    #[serde(default)]
    pub unit_type: String,
}

impl Ingredient {
    /// Non-empty name and a finite, non-negative cost.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.cost_per_unit.is_finite() && self.cost_per_unit >= 0.0
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// One ingredient quantity on a recipe, in the ingredient's unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientLine {
    pub ingredient_id: u64,
    pub quantity: f64,
}

/// A recipe line joined with its ingredient: what the calculator prices.
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
}

impl CostLine {
    pub fn new(name: &str, unit: &str, quantity: f64, cost_per_unit: f64) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            quantity,
            cost_per_unit,
        }
    }

    pub fn from_ingredient(ingredient: &Ingredient, quantity: f64) -> Self {
        Self::new(
            &ingredient.name,
            &ingredient.unit_type,
            quantity,
            ingredient.cost_per_unit,
        )
    }
}
