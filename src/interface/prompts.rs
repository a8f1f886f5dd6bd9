use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::costing::{CostParameters, ResolvedParameters};
use crate::error::{CostError, Result};
use crate::models::Recipe;
use crate::store::RecipeBook;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Owner's recipes whose names resemble `query`, best match first.
pub fn suggest_recipes<'a>(recipes: &[&'a Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = query.to_lowercase();
    let mut candidates: Vec<(&Recipe, f64)> = recipes
        .iter()
        .map(|r| (*r, jaro_winkler(&r.key(), &query)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().take(5).map(|(r, _)| r).collect()
}

/// Find a recipe id from a name or numeric id.
///
/// Exact (case-insensitive) names and ids match directly. Otherwise, when
/// `interactive` is set the user picks among close names; when it is not the
/// lookup fails and the error lists the suggestions.
pub fn resolve_recipe(book: &RecipeBook, query: &str, owner: &str, interactive: bool) -> Result<u64> {
    let query = query.trim();

    if let Ok(id) = query.parse::<u64>() {
        if book.recipe(id, owner).is_some() {
            return Ok(id);
        }
    }
    if let Some(recipe) = book.recipe_by_name(query, owner) {
        return Ok(recipe.id);
    }

    let owned = book.recipes_for(owner);
    let candidates = suggest_recipes(&owned, query);

    if candidates.is_empty() {
        return Err(CostError::RecipeNotFound(query.to_string()));
    }

    if !interactive {
        let names: Vec<&str> = candidates.iter().map(|r| r.name.as_str()).collect();
        return Err(CostError::RecipeNotFound(format!(
            "{} (did you mean: {}?)",
            query,
            names.join(", ")
        )));
    }

    if candidates.len() == 1 {
        let recipe = candidates[0];
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", recipe.name))
            .default(true)
            .interact()?;

        return if confirm {
            Ok(recipe.id)
        } else {
            Err(CostError::RecipeNotFound(query.to_string()))
        };
    }

    let mut options: Vec<String> = candidates.iter().map(|r| r.name.clone()).collect();
    options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which recipe did you mean?")
        .items(&options)
        .default(0)
        .interact()?;

    candidates
        .get(selection)
        .map(|r| r.id)
        .ok_or_else(|| CostError::RecipeNotFound(query.to_string()))
}

fn prompt_amount(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| CostError::InvalidInput(format!("'{}' is not a number", input.trim())))
}

/// Ask for each cost parameter, offering `current` as the default answer.
pub fn prompt_cost_parameters(current: ResolvedParameters) -> Result<CostParameters> {
    Ok(CostParameters {
        labor_cost_per_hour: Some(prompt_amount(
            "Labor cost per hour",
            current.labor_cost_per_hour,
        )?),
        overhead_percentage: Some(prompt_amount(
            "Overhead (% of ingredient cost)",
            current.overhead_percentage,
        )?),
        packaging_cost: Some(prompt_amount("Packaging cost per batch", current.packaging_cost)?),
        profit_margin_percentage: Some(prompt_amount(
            "Profit margin (%)",
            current.profit_margin_percentage,
        )?),
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
