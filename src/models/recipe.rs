use serde::{Deserialize, Serialize};

use crate::costing::CostParameters;
use crate::error::{CostError, Result};
use crate::models::RecipeIngredientLine;

/// An output definition produced in batches of `batch_size` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,

    pub owner: String,

    pub name: String,

    /// Units produced per batch. Must be at least 1 to be costed.
    pub batch_size: i64,

    #[serde(default)]
    pub prep_time_minutes: f64,

    #[serde(default)]
    pub bake_time_minutes: f64,

    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientLine>,

    /// Last-used cost parameters, saved after a successful costing.
    #[serde(default, skip_serializing_if = "CostParameters::is_empty")]
    pub cost_parameters: CostParameters,
}

impl Recipe {
    pub fn new(id: u64, owner: &str, name: &str, batch_size: i64) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            batch_size,
            prep_time_minutes: 0.0,
            bake_time_minutes: 0.0,
            ingredients: Vec::new(),
            cost_parameters: CostParameters::default(),
        }
    }

    /// Total hands-on plus oven time, in minutes.
    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.prep_time_minutes + self.bake_time_minutes
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// A costable recipe has at least one unit per batch and finite, non-negative times.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size < 1 {
            return Err(CostError::InvalidRecipe {
                field: "batchSize",
                value: self.batch_size as f64,
            });
        }

        for (field, value) in [
            ("prepTimeMinutes", self.prep_time_minutes),
            ("bakeTimeMinutes", self.bake_time_minutes),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CostError::InvalidRecipe { field, value });
            }
        }
        Ok(())
    }
}
