use serde::Serialize;

use crate::costing::constants::MAX_DISPLAY_DECIMALS;
use crate::costing::params::ResolvedParameters;

/// Cost of one ingredient line in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCost {
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Full result of costing one recipe batch. Values are unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub recipe_id: u64,
    pub recipe_name: String,
    pub batch_size: i64,
    pub prep_time_minutes: f64,
    pub bake_time_minutes: f64,

    pub lines: Vec<LineCost>,
    pub ingredient_total: f64,

    pub labor_hours: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub packaging_cost: f64,

    pub total_batch_cost: f64,
    pub cost_per_unit: f64,

    pub suggested_price: f64,
    pub markup: f64,

    /// Parameters actually used, after defaults.
    pub params: ResolvedParameters,
}

impl CostBreakdown {
    /// Build the wire-level report.
    pub fn to_report(&self) -> CostReport {
        CostReport {
            recipe: RecipeSummary {
                id: self.recipe_id,
                name: self.recipe_name.clone(),
                batch_size: self.batch_size,
                prep_time_minutes: self.prep_time_minutes,
                bake_time_minutes: self.bake_time_minutes,
            },
            costs: CostSection {
                ingredients: IngredientSection {
                    items: self
                        .lines
                        .iter()
                        .map(|l| IngredientItem {
                            name: l.name.clone(),
                            quantity: l.quantity,
                            unit: l.unit.clone(),
                            unit_cost: l.unit_cost,
                            total_cost: l.total_cost,
                        })
                        .collect(),
                    total: self.ingredient_total,
                },
                labor: LaborSection {
                    hours: self.labor_hours,
                    rate: self.params.labor_cost_per_hour,
                    total: self.labor_cost,
                },
                overhead: OverheadSection {
                    percentage: self.params.overhead_percentage,
                    total: self.overhead_cost,
                },
                packaging: self.packaging_cost,
                total_batch_cost: self.total_batch_cost,
                cost_per_unit: self.cost_per_unit,
            },
            pricing: PricingSection {
                profit_margin_percentage: self.params.profit_margin_percentage,
                suggested_price: self.suggested_price,
                markup: self.markup,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    pub recipe: RecipeSummary,
    pub costs: CostSection,
    pub pricing: PricingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    pub name: String,
    pub batch_size: i64,
    pub prep_time_minutes: f64,
    pub bake_time_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSection {
    pub ingredients: IngredientSection,
    pub labor: LaborSection,
    pub overhead: OverheadSection,
    pub packaging: f64,
    pub total_batch_cost: f64,
    pub cost_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientSection {
    pub items: Vec<IngredientItem>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborSection {
    pub hours: f64,
    pub rate: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverheadSection {
    pub percentage: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSection {
    pub profit_margin_percentage: f64,
    pub suggested_price: f64,
    pub markup: f64,
}

/// Round a value to n decimal places, n capped at `MAX_DISPLAY_DECIMALS`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals.min(MAX_DISPLAY_DECIMALS) as i32);
    (value * factor).round() / factor
}

impl CostReport {
    /// Copy with every monetary field rounded for display.
    ///
    /// Quantities, hours and percentages are left as they are.
    pub fn rounded(&self, decimals: u32) -> Self {
        let r = |v: f64| round_to(v, decimals);
        let mut out = self.clone();

        for item in &mut out.costs.ingredients.items {
            item.unit_cost = r(item.unit_cost);
            item.total_cost = r(item.total_cost);
        }
        out.costs.ingredients.total = r(out.costs.ingredients.total);
        out.costs.labor.rate = r(out.costs.labor.rate);
        out.costs.labor.total = r(out.costs.labor.total);
        out.costs.overhead.total = r(out.costs.overhead.total);
        out.costs.packaging = r(out.costs.packaging);
        out.costs.total_batch_cost = r(out.costs.total_batch_cost);
        out.costs.cost_per_unit = r(out.costs.cost_per_unit);
        out.pricing.suggested_price = r(out.pricing.suggested_price);
        out.pricing.markup = r(out.pricing.markup);
        out
    }
}
