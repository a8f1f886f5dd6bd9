use clap::Parser;
use tracing_subscriber::EnvFilter;

use recipe_cost_rs::cli::{Cli, Command, ParamArgs};
use recipe_cost_rs::costing::CostParameters;
use recipe_cost_rs::error::Result;
use recipe_cost_rs::interface::{
    display_breakdown, display_ingredient_list, display_margin_table, display_recipe_list,
    prompt_cost_parameters, prompt_yes_no, resolve_recipe,
};
use recipe_cost_rs::models::Recipe;
use recipe_cost_rs::service::{quote_recipe, remember_parameters, resolve_parameters};
use recipe_cost_rs::store::{JsonRecipeBook, RecipeEdit};

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "recipe_cost_rs=debug,recipe_cost=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        let kind = e.kind();
        eprintln!("Error ({}): {}", kind.response_class(), e);
        std::process::exit(kind.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = JsonRecipeBook::new(&cli.file);
    let owner = cli.owner.as_str();

    match cli.command.unwrap_or_default() {
        Command::Cost {
            recipe,
            params,
            no_save,
            json,
            decimals,
            interactive,
        } => cmd_cost(&store, owner, &recipe, &params, !no_save, json, decimals, interactive),
        Command::Margins {
            recipe,
            margins,
            params,
            decimals,
        } => cmd_margins(&store, owner, &recipe, &margins, &params, decimals),
        Command::Recipes => cmd_recipes(&store, owner),
        Command::Ingredients => cmd_ingredients(&store, owner),
        Command::AddIngredient { name, cost, unit } => {
            cmd_add_ingredient(&store, owner, &name, cost, &unit)
        }
        Command::SetCost { ingredient, cost } => cmd_set_cost(&store, owner, &ingredient, cost),
        Command::AddRecipe {
            name,
            batch_size,
            prep,
            bake,
        } => cmd_add_recipe(&store, owner, &name, batch_size, prep, bake),
        Command::EditRecipe { recipe, edit } => {
            cmd_edit_recipe(&store, owner, &recipe, &edit.to_edit())
        }
        Command::RemoveRecipe { recipe } => cmd_remove_recipe(&store, owner, &recipe),
        Command::AddLine {
            recipe,
            ingredient,
            quantity,
        } => cmd_add_line(&store, owner, &recipe, &ingredient, quantity),
        Command::RemoveLine { recipe, ingredient } => {
            cmd_remove_line(&store, owner, &recipe, &ingredient)
        }
    }
}

/// Cost one recipe, print the breakdown, then remember the parameters used.
#[allow(clippy::too_many_arguments)]
fn cmd_cost(
    store: &JsonRecipeBook,
    owner: &str,
    query: &str,
    params: &ParamArgs,
    save: bool,
    json: bool,
    decimals: u32,
    interactive: bool,
) -> Result<()> {
    let book = store.load()?;
    let recipe_id = resolve_recipe(&book, query, owner, interactive)?;

    let mut requested = params.to_params();
    if interactive {
        let saved = book
            .recipe(recipe_id, owner)
            .map(|r| r.cost_parameters)
            .unwrap_or_default();
        let current = resolve_parameters(requested, saved).resolve()?;
        requested = prompt_cost_parameters(current)?;
    }

    let breakdown = quote_recipe(store, store, recipe_id, owner, requested, false)?;
    let report = breakdown.to_report().rounded(decimals);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_breakdown(&report, decimals);
    }

    // Saving happens after output; a failure is logged and never fails the command.
    let save = if save && interactive {
        prompt_yes_no("Remember these parameters for this recipe?", true)?
    } else {
        save
    };
    if save {
        remember_parameters(store, owner, &breakdown);
    }

    Ok(())
}

fn cmd_margins(
    store: &JsonRecipeBook,
    owner: &str,
    query: &str,
    margins: &[f64],
    params: &ParamArgs,
    decimals: u32,
) -> Result<()> {
    let book = store.load()?;
    let recipe_id = resolve_recipe(&book, query, owner, false)?;
    let base = params.to_params();

    let breakdowns = margins
        .iter()
        .map(|&margin| {
            let requested = CostParameters {
                profit_margin_percentage: Some(margin),
                ..base
            };
            quote_recipe(store, store, recipe_id, owner, requested, false)
        })
        .collect::<Result<Vec<_>>>()?;

    display_margin_table(&breakdowns, decimals);
    Ok(())
}

fn cmd_recipes(store: &JsonRecipeBook, owner: &str) -> Result<()> {
    let book = store.load()?;
    println!("Recipes for '{}' in {}:", owner, store.path().display());
    display_recipe_list(&book.recipes_for(owner));
    Ok(())
}

fn cmd_ingredients(store: &JsonRecipeBook, owner: &str) -> Result<()> {
    let book = store.load()?;
    println!("Ingredients for '{}' in {}:", owner, store.path().display());
    display_ingredient_list(&book.ingredients_for(owner));
    Ok(())
}

fn cmd_add_ingredient(
    store: &JsonRecipeBook,
    owner: &str,
    name: &str,
    cost: f64,
    unit: &str,
) -> Result<()> {
    let mut book = store.load()?;
    let id = book.add_ingredient(owner, name, cost, unit)?;
    store.save(&book)?;
    println!("Added ingredient #{}: {}", id, name.trim());
    Ok(())
}

fn cmd_set_cost(store: &JsonRecipeBook, owner: &str, ingredient: &str, cost: f64) -> Result<()> {
    let mut book = store.load()?;
    book.set_ingredient_cost(owner, ingredient, cost)?;
    store.save(&book)?;
    println!("Updated cost of {} to {}.", ingredient, cost);
    Ok(())
}

fn cmd_add_recipe(
    store: &JsonRecipeBook,
    owner: &str,
    name: &str,
    batch_size: i64,
    prep: f64,
    bake: f64,
) -> Result<()> {
    let mut book = store.load()?;
    let mut recipe = Recipe::new(0, owner, name, batch_size);
    recipe.prep_time_minutes = prep;
    recipe.bake_time_minutes = bake;

    let id = book.add_recipe(recipe)?;
    store.save(&book)?;
    println!("Added recipe #{}: {}", id, name.trim());
    Ok(())
}

fn cmd_edit_recipe(store: &JsonRecipeBook, owner: &str, query: &str, edit: &RecipeEdit) -> Result<()> {
    if edit.is_empty() {
        println!("Nothing to change. Use --name, --batch, --prep or --bake.");
        return Ok(());
    }

    let mut book = store.load()?;
    let id = resolve_recipe(&book, query, owner, false)?;
    book.edit_recipe(id, owner, edit)?;
    store.save(&book)?;
    println!("Updated recipe #{}.", id);
    Ok(())
}

fn cmd_remove_recipe(store: &JsonRecipeBook, owner: &str, query: &str) -> Result<()> {
    let mut book = store.load()?;
    let id = resolve_recipe(&book, query, owner, false)?;
    let removed = book.remove_recipe(id, owner)?;
    store.save(&book)?;
    println!("Removed recipe #{}: {}", id, removed.name);
    Ok(())
}

fn cmd_add_line(
    store: &JsonRecipeBook,
    owner: &str,
    query: &str,
    ingredient: &str,
    quantity: f64,
) -> Result<()> {
    let mut book = store.load()?;
    let id = resolve_recipe(&book, query, owner, false)?;
    book.set_line(id, owner, ingredient, quantity)?;
    store.save(&book)?;
    println!("Set {} to {} in recipe #{}.", ingredient, quantity, id);
    Ok(())
}

fn cmd_remove_line(store: &JsonRecipeBook, owner: &str, query: &str, ingredient: &str) -> Result<()> {
    let mut book = store.load()?;
    let id = resolve_recipe(&book, query, owner, false)?;
    book.remove_line(id, owner, ingredient)?;
    store.save(&book)?;
    println!("Removed {} from recipe #{}.", ingredient, id);
    Ok(())
}
