use tracing::debug;

use crate::costing::breakdown::{CostBreakdown, LineCost};
use crate::costing::constants::MINUTES_PER_HOUR;
use crate::costing::params::CostParameters;
use crate::error::{CostError, Result};
use crate::models::{CostLine, Recipe};

/// Cost of one ingredient line.
#[inline]
pub fn line_cost(quantity: f64, cost_per_unit: f64) -> f64 {
    quantity * cost_per_unit
}

/// Labor cost for the given minutes at an hourly rate.
///
/// Returns (hours, cost).
pub fn labor_cost(total_minutes: f64, rate_per_hour: f64) -> (f64, f64) {
    let hours = total_minutes / MINUTES_PER_HOUR;
    (hours, hours * rate_per_hour)
}

/// Overhead is charged on ingredient cost only, never on labor or packaging.
#[inline]
pub fn overhead_cost(ingredient_total: f64, overhead_percentage: f64) -> f64 {
    ingredient_total * (overhead_percentage / 100.0)
}

/// Price per unit with the profit margin applied on top of cost.
#[inline]
pub fn suggested_price(cost_per_unit: f64, profit_margin_percentage: f64) -> f64 {
    cost_per_unit * (1.0 + profit_margin_percentage / 100.0)
}

fn check_line(line: &CostLine) -> Result<()> {
    for (field, value) in [
        ("quantity", line.quantity),
        ("costPerUnit", line.cost_per_unit),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CostError::InvalidQuantity {
                ingredient: line.name.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

/// Reject an intermediate result that overflowed to infinity.
fn finite(value: f64, err: impl FnOnce(f64) -> CostError) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(err(value))
    }
}

/// Compute the cost breakdown and suggested price for one recipe batch.
///
/// All inputs are validated before any arithmetic runs, and every step that
/// can overflow is checked, so a returned breakdown never holds inf or NaN. Nothing is rounded here;
/// rounding belongs to presentation.
pub fn compute_cost(
    recipe: &Recipe,
    lines: &[CostLine],
    params: &CostParameters,
) -> Result<CostBreakdown> {
    recipe.validate()?;
    for line in lines {
        check_line(line)?;
    }
    let params = params.resolve()?;

    let line_costs = lines
        .iter()
        .map(|l| {
            let total_cost = finite(line_cost(l.quantity, l.cost_per_unit), |value| {
                CostError::InvalidQuantity {
                    ingredient: l.name.clone(),
                    field: "totalCost",
                    value,
                }
            })?;
            Ok(LineCost {
                name: l.name.clone(),
                unit: l.unit.clone(),
                quantity: l.quantity,
                unit_cost: l.cost_per_unit,
                total_cost,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let ingredient_total = finite(line_costs.iter().map(|l| l.total_cost).sum(), |value| {
        CostError::InvalidQuantity {
            ingredient: recipe.name.clone(),
            field: "ingredientTotal",
            value,
        }
    })?;
    let total_minutes = finite(recipe.total_minutes(), |value| CostError::InvalidRecipe {
        field: "totalTimeMinutes",
        value,
    })?;
    let (labor_hours, labor) = labor_cost(total_minutes, params.labor_cost_per_hour);
    let labor = finite(labor, |value| CostError::InvalidParameter {
        field: "laborCostPerHour",
        value,
    })?;
    let overhead = finite(
        overhead_cost(ingredient_total, params.overhead_percentage),
        |value| CostError::InvalidParameter {
            field: "overheadPercentage",
            value,
        },
    )?;

    let total_batch_cost = finite(
        ingredient_total + labor + overhead + params.packaging_cost,
        |value| CostError::InvalidRecipe {
            field: "totalBatchCost",
            value,
        },
    )?;
    let cost_per_unit = total_batch_cost / recipe.batch_size as f64;
    let price = finite(
        suggested_price(cost_per_unit, params.profit_margin_percentage),
        |value| CostError::InvalidParameter {
            field: "profitMarginPercentage",
            value,
        },
    )?;

    debug!(
        recipe_id = recipe.id,
        lines = line_costs.len(),
        total_batch_cost,
        cost_per_unit,
        "computed recipe cost"
    );

    Ok(CostBreakdown {
        recipe_id: recipe.id,
        recipe_name: recipe.name.clone(),
        batch_size: recipe.batch_size,
        prep_time_minutes: recipe.prep_time_minutes,
        bake_time_minutes: recipe.bake_time_minutes,
        lines: line_costs,
        ingredient_total,
        labor_hours,
        labor_cost: labor,
        overhead_cost: overhead,
        packaging_cost: params.packaging_cost,
        total_batch_cost,
        cost_per_unit,
        suggested_price: price,
        markup: price - cost_per_unit,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe(batch_size: i64) -> Recipe {
        let mut recipe = Recipe::new(1, "bakery", "Muffins", batch_size);
        recipe.prep_time_minutes = 30.0;
        recipe.bake_time_minutes = 30.0;
        recipe
    }

    #[test]
    fn test_line_cost() {
        assert!((line_cost(2.0, 3.0) - 6.0).abs() < 1e-12);
        assert_eq!(line_cost(0.0, 9.99), 0.0);
    }

    #[test]
    fn test_labor_cost() {
        let (hours, cost) = labor_cost(90.0, 20.0);
        assert!((hours - 1.5).abs() < 1e-12);
        assert!((cost - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_overhead_on_ingredients_only() {
        assert!((overhead_cost(11.0, 15.0) - 1.65).abs() < 1e-12);
        assert_eq!(overhead_cost(0.0, 15.0), 0.0);
    }

    #[test]
    fn test_suggested_price() {
        assert!((suggested_price(10.0, 30.0) - 13.0).abs() < 1e-12);
        assert_eq!(suggested_price(10.0, 0.0), 10.0);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = compute_cost(&sample_recipe(0), &[], &CostParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            CostError::InvalidRecipe {
                field: "batchSize",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_time_rejected() {
        let mut recipe = sample_recipe(4);
        recipe.bake_time_minutes = -5.0;
        let err = compute_cost(&recipe, &[], &CostParameters::default()).unwrap_err();
        assert_eq!(err.field(), Some("bakeTimeMinutes"));
    }

    #[test]
    fn test_negative_cost_per_unit_rejected() {
        let lines = vec![CostLine::new("Butter", "g", 100.0, -0.01)];
        let err = compute_cost(&sample_recipe(4), &lines, &CostParameters::default()).unwrap_err();
        match err {
            CostError::InvalidQuantity {
                ingredient, field, ..
            } => {
                assert_eq!(ingredient, "Butter");
                assert_eq!(field, "costPerUnit");
            }
            other => panic!("expected InvalidQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_line_rejected() {
        let lines = vec![CostLine::new("Gold Leaf", "sheet", 1e200, 1e200)];
        let err = compute_cost(&sample_recipe(4), &lines, &CostParameters::default()).unwrap_err();
        match err {
            CostError::InvalidQuantity {
                ingredient, field, ..
            } => {
                assert_eq!(ingredient, "Gold Leaf");
                assert_eq!(field, "totalCost");
            }
            other => panic!("expected InvalidQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_sum_rejected() {
        let lines = vec![
            CostLine::new("A", "g", 1e308, 1.5),
            CostLine::new("B", "g", 1e308, 1.5),
        ];
        let err = compute_cost(&sample_recipe(4), &lines, &CostParameters::default()).unwrap_err();
        assert_eq!(err.field(), Some("ingredientTotal"));
    }

    #[test]
    fn test_overflowing_time_rejected() {
        let mut recipe = sample_recipe(4);
        recipe.prep_time_minutes = f64::MAX;
        recipe.bake_time_minutes = f64::MAX;
        let err = compute_cost(&recipe, &[], &CostParameters::default()).unwrap_err();
        assert!(matches!(
            err,
            CostError::InvalidRecipe {
                field: "totalTimeMinutes",
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_margin_rejected() {
        let params = CostParameters {
            packaging_cost: Some(1e300),
            profit_margin_percentage: Some(1e300),
            ..Default::default()
        };
        let err = compute_cost(&sample_recipe(1), &[], &params).unwrap_err();
        assert_eq!(err.field(), Some("profitMarginPercentage"));
    }

    #[test]
    fn test_zero_quantity_contributes_nothing() {
        let lines = vec![
            CostLine::new("Salt", "g", 0.0, 0.5),
            CostLine::new("Sugar", "g", 10.0, 0.1),
        ];
        let breakdown = compute_cost(&sample_recipe(1), &lines, &CostParameters::default()).unwrap();
        assert_eq!(breakdown.lines[0].total_cost, 0.0);
        assert!((breakdown.ingredient_total - 1.0).abs() < 1e-12);
    }
}
