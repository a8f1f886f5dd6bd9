use crate::costing::{CostBreakdown, CostReport};
use crate::models::{Ingredient, Recipe};

/// Display a cost breakdown as a formatted table, money to `decimals` places.
///
/// `report` is expected to be rounded already; only layout happens here.
pub fn display_breakdown(report: &CostReport, decimals: u32) {
    let recipe = &report.recipe;
    let costs = &report.costs;
    let prec = decimals as usize;

    println!();
    println!("=== {} (batch of {}) ===", recipe.name, recipe.batch_size);
    println!();

    let items = &costs.ingredients.items;
    if items.is_empty() {
        println!("  (no ingredients)");
    } else {
        let width = items.iter().map(|i| i.name.len()).max().unwrap_or(10);
        for item in items {
            println!(
                "  {:<width$}  {:>8} {:<5} x {:>8.prec$} = {:>8.prec$}",
                item.name,
                item.quantity,
                item.unit,
                item.unit_cost,
                item.total_cost,
            );
        }
    }

    println!();
    for line in summary_lines(report, decimals) {
        println!("{}", line);
    }
    println!();
}

/// The cost and pricing rows of a breakdown, money to `decimals` places.
pub fn summary_lines(report: &CostReport, decimals: u32) -> Vec<String> {
    let costs = &report.costs;
    let prec = decimals as usize;

    vec![
        "--- Costs ---".to_string(),
        format!("Ingredients:      {:>10.prec$}", costs.ingredients.total),
        format!(
            "Labor:            {:>10.prec$}  ({:.2} h at {:.prec$}/h)",
            costs.labor.total, costs.labor.hours, costs.labor.rate
        ),
        format!(
            "Overhead:         {:>10.prec$}  ({}% of ingredients)",
            costs.overhead.total, costs.overhead.percentage
        ),
        format!("Packaging:        {:>10.prec$}", costs.packaging),
        format!("Total per batch:  {:>10.prec$}", costs.total_batch_cost),
        format!("Cost per unit:    {:>10.prec$}", costs.cost_per_unit),
        String::new(),
        "--- Pricing ---".to_string(),
        format!(
            "Suggested price:  {:>10.prec$}  ({}% margin)",
            report.pricing.suggested_price, report.pricing.profit_margin_percentage
        ),
        format!("Markup per unit:  {:>10.prec$}", report.pricing.markup),
    ]
}

/// Display suggested prices for several margins side by side.
pub fn display_margin_table(breakdowns: &[CostBreakdown], decimals: u32) {
    let Some(first) = breakdowns.first() else {
        println!("No margins to compare.");
        return;
    };

    println!();
    println!(
        "=== {}: cost per unit {:.*} ===",
        first.recipe_name, decimals as usize, first.cost_per_unit
    );
    println!();
    println!("{:>8}  {:>10}  {:>10}", "margin", "price", "markup");
    for b in breakdowns {
        println!(
            "{:>7}%  {:>10.*}  {:>10.*}",
            b.params.profit_margin_percentage,
            decimals as usize,
            b.suggested_price,
            decimals as usize,
            b.markup
        );
    }
    println!();
}

/// Display an owner's recipes with their saved parameters.
pub fn display_recipe_list(recipes: &[&Recipe]) {
    if recipes.is_empty() {
        println!("No recipes.");
        return;
    }

    let width = recipes.iter().map(|r| r.name.len()).max().unwrap_or(10);
    for recipe in recipes {
        let saved = if recipe.cost_parameters.is_empty() {
            String::new()
        } else {
            serde_json::to_string(&recipe.cost_parameters).unwrap_or_default()
        };
        println!(
            "{:>4}. {:<width$}  batch {:>4}  {:>5} min  {} ingredients  {}",
            recipe.id,
            recipe.name,
            recipe.batch_size,
            recipe.total_minutes(),
            recipe.ingredients.len(),
            saved,
            width = width
        );
    }
}

/// Display an owner's ingredients.
pub fn display_ingredient_list(ingredients: &[&Ingredient]) {
    if ingredients.is_empty() {
        println!("No ingredients.");
        return;
    }

    let width = ingredients.iter().map(|i| i.name.len()).max().unwrap_or(10);
    for ingredient in ingredients {
        println!(
            "{:>4}. {:<width$}  {:.4} per {}",
            ingredient.id,
            ingredient.name,
            ingredient.cost_per_unit,
            if ingredient.unit_type.is_empty() {
                "unit"
            } else {
                ingredient.unit_type.as_str()
            },
            width = width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::{CostParameters, compute_cost};
    use crate::models::{CostLine, Recipe};

    fn report(decimals: u32) -> CostReport {
        let recipe = Recipe::new(1, "bakery", "Rolls", 10);
        let lines = vec![
            CostLine::new("Flour", "cup", 2.0, 3.0),
            CostLine::new("Butter", "block", 1.0, 5.0),
        ];
        compute_cost(&recipe, &lines, &CostParameters::default())
            .unwrap()
            .to_report()
            .rounded(decimals)
    }

    #[test]
    fn test_summary_follows_decimals() {
        let whole = summary_lines(&report(0), 0);
        assert_eq!(whole[1], format!("Ingredients:      {:>10}", "11"));

        let fine = summary_lines(&report(3), 3);
        assert_eq!(fine[1], format!("Ingredients:      {:>10}", "11.000"));
        assert!(fine[6].ends_with("1.265"));
    }
}
