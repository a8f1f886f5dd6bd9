pub mod prompts;
pub mod render;

pub use prompts::{prompt_cost_parameters, prompt_yes_no, resolve_recipe, suggest_recipes};
pub use render::{
    display_breakdown, display_ingredient_list, display_margin_table, display_recipe_list,
};
