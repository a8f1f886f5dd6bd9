use serde::{Deserialize, Serialize};

use crate::costing::CostParameters;
use crate::error::{CostError, Result};
use crate::models::{CostLine, Ingredient, Recipe, RecipeIngredientLine};

/// All ingredients and recipes, across owners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeBook {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Changes to a recipe's own fields. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeEdit {
    pub name: Option<String>,
    pub batch_size: Option<i64>,
    pub prep_time_minutes: Option<f64>,
    pub bake_time_minutes: Option<f64>,
}

impl RecipeEdit {
    pub fn is_empty(&self) -> bool {
        *self == RecipeEdit::default()
    }
}

impl RecipeBook {
    /// Get a recipe by id, only if `owner` owns it.
    pub fn recipe(&self, id: u64, owner: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id == id && r.owner == owner)
    }

    /// Mutable counterpart of [`RecipeBook::recipe`], scoped the same way.
    pub fn recipe_mut(&mut self, id: u64, owner: &str) -> Option<&mut Recipe> {
        self.recipes
            .iter_mut()
            .find(|r| r.id == id && r.owner == owner)
    }

    /// Get a recipe by name (case-insensitive) within an owner's recipes.
    pub fn recipe_by_name(&self, name: &str, owner: &str) -> Option<&Recipe> {
        let key = name.to_lowercase();
        self.recipes
            .iter()
            .find(|r| r.owner == owner && r.key() == key)
    }

    pub fn ingredient(&self, id: u64) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    /// Get an ingredient by name (case-insensitive) within an owner's ingredients.
    pub fn ingredient_by_name(&self, name: &str, owner: &str) -> Option<&Ingredient> {
        let key = name.to_lowercase();
        self.ingredients
            .iter()
            .find(|i| i.owner == owner && i.key() == key)
    }

    pub fn ingredient_by_name_mut(&mut self, name: &str, owner: &str) -> Option<&mut Ingredient> {
        let key = name.to_lowercase();
        self.ingredients
            .iter_mut()
            .find(|i| i.owner == owner && i.key() == key)
    }

    pub fn recipes_for(&self, owner: &str) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.owner == owner).collect()
    }

    pub fn ingredients_for(&self, owner: &str) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.owner == owner)
            .collect()
    }

    fn next_ingredient_id(&self) -> u64 {
        self.ingredients.iter().map(|i| i.id).max().unwrap_or(0) + 1
    }

    fn next_recipe_id(&self) -> u64 {
        self.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    /// Add an ingredient for `owner`, returning its new id.
    ///
    /// Names are unique per owner (case-insensitive).
    pub fn add_ingredient(
        &mut self,
        owner: &str,
        name: &str,
        cost_per_unit: f64,
        unit_type: &str,
    ) -> Result<u64> {
        let ingredient = Ingredient {
            id: self.next_ingredient_id(),
            owner: owner.to_string(),
            name: name.trim().to_string(),
            cost_per_unit,
            unit_type: unit_type.to_string(),
        };

        if !ingredient.is_valid() {
            return Err(CostError::InvalidInput(format!(
                "ingredient needs a name and a non-negative cost, got '{}' at {}",
                name, cost_per_unit
            )));
        }
        if self
            .ingredients
            .iter()
            .any(|i| i.owner == owner && i.key() == ingredient.key())
        {
            return Err(CostError::InvalidInput(format!(
                "ingredient '{}' already exists",
                ingredient.name
            )));
        }

        let id = ingredient.id;
        self.ingredients.push(ingredient);
        Ok(id)
    }

    /// Update the unit cost of an owner's ingredient.
    pub fn set_ingredient_cost(&mut self, owner: &str, name: &str, cost_per_unit: f64) -> Result<()> {
        if !cost_per_unit.is_finite() || cost_per_unit < 0.0 {
            return Err(CostError::InvalidQuantity {
                ingredient: name.to_string(),
                field: "costPerUnit",
                value: cost_per_unit,
            });
        }

        let ingredient = self
            .ingredient_by_name_mut(name, owner)
            .ok_or_else(|| CostError::IngredientNotFound(name.to_string()))?;
        ingredient.cost_per_unit = cost_per_unit;
        Ok(())
    }

    fn check_recipe_name(&self, name: &str, owner: &str, except_id: Option<u64>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CostError::InvalidInput("recipe needs a name".to_string()));
        }
        let key = name.trim().to_lowercase();
        if self
            .recipes
            .iter()
            .any(|r| r.owner == owner && r.key() == key && Some(r.id) != except_id)
        {
            return Err(CostError::InvalidInput(format!(
                "recipe '{}' already exists",
                name.trim()
            )));
        }
        Ok(())
    }

    /// Add a recipe, assigning it a fresh id. Returns the id.
    ///
    /// The recipe must be costable as it stands and its name unique for its owner.
    pub fn add_recipe(&mut self, mut recipe: Recipe) -> Result<u64> {
        recipe.name = recipe.name.trim().to_string();
        self.check_recipe_name(&recipe.name, &recipe.owner, None)?;
        recipe.validate()?;

        recipe.id = self.next_recipe_id();
        let id = recipe.id;
        self.recipes.push(recipe);
        Ok(id)
    }

    /// Apply an edit to an owner's recipe. Nothing changes if the result is invalid.
    pub fn edit_recipe(&mut self, id: u64, owner: &str, edit: &RecipeEdit) -> Result<()> {
        let mut updated = self
            .recipe(id, owner)
            .cloned()
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;

        if let Some(name) = &edit.name {
            self.check_recipe_name(name, owner, Some(id))?;
            updated.name = name.trim().to_string();
        }
        if let Some(batch_size) = edit.batch_size {
            updated.batch_size = batch_size;
        }
        if let Some(prep) = edit.prep_time_minutes {
            updated.prep_time_minutes = prep;
        }
        if let Some(bake) = edit.bake_time_minutes {
            updated.bake_time_minutes = bake;
        }
        updated.validate()?;

        if let Some(recipe) = self.recipe_mut(id, owner) {
            *recipe = updated;
        }
        Ok(())
    }

    /// Delete an owner's recipe, returning it.
    pub fn remove_recipe(&mut self, id: u64, owner: &str) -> Result<Recipe> {
        let idx = self
            .recipes
            .iter()
            .position(|r| r.id == id && r.owner == owner)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;
        Ok(self.recipes.remove(idx))
    }

    /// Set how much of an ingredient a recipe uses, adding the line if needed.
    pub fn set_line(&mut self, id: u64, owner: &str, ingredient: &str, quantity: f64) -> Result<()> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(CostError::InvalidQuantity {
                ingredient: ingredient.to_string(),
                field: "quantity",
                value: quantity,
            });
        }

        let ingredient_id = self
            .ingredient_by_name(ingredient, owner)
            .map(|i| i.id)
            .ok_or_else(|| CostError::IngredientNotFound(ingredient.to_string()))?;
        let recipe = self
            .recipe_mut(id, owner)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;

        match recipe
            .ingredients
            .iter_mut()
            .find(|l| l.ingredient_id == ingredient_id)
        {
            Some(line) => line.quantity = quantity,
            None => recipe.ingredients.push(RecipeIngredientLine {
                ingredient_id,
                quantity,
            }),
        }
        Ok(())
    }

    /// Drop an ingredient's line from a recipe.
    pub fn remove_line(&mut self, id: u64, owner: &str, ingredient: &str) -> Result<()> {
        let ingredient_id = self
            .ingredient_by_name(ingredient, owner)
            .map(|i| i.id)
            .ok_or_else(|| CostError::IngredientNotFound(ingredient.to_string()))?;
        let recipe = self
            .recipe_mut(id, owner)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;

        let before = recipe.ingredients.len();
        recipe.ingredients.retain(|l| l.ingredient_id != ingredient_id);
        if recipe.ingredients.len() == before {
            return Err(CostError::IngredientNotFound(format!(
                "{} is not in {}",
                ingredient, recipe.name
            )));
        }
        Ok(())
    }

    /// Resolve an owner's recipe and join each line with its ingredient.
    pub fn recipe_with_lines(&self, id: u64, owner: &str) -> Result<(Recipe, Vec<CostLine>)> {
        let recipe = self
            .recipe(id, owner)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;

        let lines = recipe
            .ingredients
            .iter()
            .map(|line| {
                self.ingredient(line.ingredient_id)
                    .filter(|i| i.owner == owner)
                    .map(|i| CostLine::from_ingredient(i, line.quantity))
                    .ok_or_else(|| CostError::IngredientNotFound(line.ingredient_id.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((recipe.clone(), lines))
    }

    /// Overwrite the saved cost parameters on an owner's recipe.
    pub fn save_cost_parameters(&mut self, id: u64, owner: &str, params: CostParameters) -> Result<()> {
        let recipe = self
            .recipe_mut(id, owner)
            .ok_or_else(|| CostError::RecipeNotFound(id.to_string()))?;
        recipe.cost_parameters = params;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> RecipeBook {
        let mut book = RecipeBook::default();
        book.add_ingredient("bakery", "Flour", 0.002, "g").unwrap();
        book.add_ingredient("bakery", "Egg", 0.3, "each").unwrap();
        book.add_ingredient("other", "Saffron", 9.0, "g").unwrap();

        let mut bread = Recipe::new(0, "bakery", "Bread", 2);
        bread.ingredients = vec![
            RecipeIngredientLine {
                ingredient_id: 1,
                quantity: 500.0,
            },
            RecipeIngredientLine {
                ingredient_id: 2,
                quantity: 2.0,
            },
        ];
        book.add_recipe(bread).unwrap();
        book
    }

    #[test]
    fn test_ids_are_assigned_sequentially() {
        let book = sample_book();
        let ids: Vec<u64> = book.ingredients.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(book.recipes[0].id, 1);
    }

    #[test]
    fn test_duplicate_ingredient_rejected() {
        let mut book = sample_book();
        assert!(book.add_ingredient("bakery", "FLOUR", 0.003, "g").is_err());
        // Other owners keep their own namespace
        assert!(book.add_ingredient("other", "Flour", 0.003, "g").is_ok());
    }

    #[test]
    fn test_recipe_scoped_to_owner() {
        let book = sample_book();
        assert!(book.recipe(1, "bakery").is_some());
        assert!(book.recipe(1, "other").is_none());
        assert!(book.recipe_by_name("bread", "bakery").is_some());
        assert!(book.recipe_by_name("bread", "other").is_none());
    }

    #[test]
    fn test_recipe_with_lines_joins_ingredients() {
        let book = sample_book();
        let (recipe, lines) = book.recipe_with_lines(1, "bakery").unwrap();
        assert_eq!(recipe.name, "Bread");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].name, "Egg");
        assert_eq!(lines[1].unit, "each");
        assert_eq!(lines[1].cost_per_unit, 0.3);
    }

    #[test]
    fn test_foreign_ingredient_is_not_found() {
        let mut book = sample_book();
        book.recipes[0].ingredients.push(RecipeIngredientLine {
            ingredient_id: 3,
            quantity: 1.0,
        });
        let err = book.recipe_with_lines(1, "bakery").unwrap_err();
        assert!(matches!(err, CostError::IngredientNotFound(_)));
    }

    #[test]
    fn test_set_ingredient_cost() {
        let mut book = sample_book();
        book.set_ingredient_cost("bakery", "egg", 0.35).unwrap();
        assert_eq!(book.ingredient(2).unwrap().cost_per_unit, 0.35);

        assert!(book.set_ingredient_cost("bakery", "egg", -1.0).is_err());
        assert!(book.set_ingredient_cost("bakery", "saffron", 1.0).is_err());
    }

    #[test]
    fn test_add_recipe_validates() {
        let mut book = sample_book();
        let err = book
            .add_recipe(Recipe::new(0, "bakery", "Empty Batch", 0))
            .unwrap_err();
        assert_eq!(err.field(), Some("batchSize"));
        assert!(book.add_recipe(Recipe::new(0, "bakery", " bread ", 4)).is_err());
        assert_eq!(book.recipes.len(), 1);
    }

    #[test]
    fn test_edit_recipe_is_all_or_nothing() {
        let mut book = sample_book();
        let bad = RecipeEdit {
            name: Some("Sourdough".to_string()),
            batch_size: Some(0),
            ..Default::default()
        };
        assert!(book.edit_recipe(1, "bakery", &bad).is_err());
        assert_eq!(book.recipes[0].name, "Bread");

        let good = RecipeEdit {
            bake_time_minutes: Some(40.0),
            ..Default::default()
        };
        book.edit_recipe(1, "bakery", &good).unwrap();
        assert_eq!(book.recipes[0].bake_time_minutes, 40.0);
        assert_eq!(book.recipes[0].batch_size, 2);

        assert!(book.edit_recipe(1, "other", &good).is_err());
    }

    #[test]
    fn test_set_and_remove_line() {
        let mut book = sample_book();
        book.set_line(1, "bakery", "egg", 3.0).unwrap();
        assert_eq!(book.recipes[0].ingredients.len(), 2);
        assert_eq!(book.recipes[0].ingredients[1].quantity, 3.0);

        assert!(book.set_line(1, "bakery", "egg", -1.0).is_err());
        assert!(book.set_line(1, "bakery", "saffron", 1.0).is_err());

        book.remove_line(1, "bakery", "Flour").unwrap();
        assert_eq!(book.recipes[0].ingredients.len(), 1);
        assert!(book.remove_line(1, "bakery", "Flour").is_err());
    }

    #[test]
    fn test_mutations_scoped_to_owner() {
        let mut book = sample_book();
        assert!(
            book.save_cost_parameters(1, "other", CostParameters::default())
                .is_err()
        );
        assert!(book.remove_recipe(1, "other").is_err());
        assert_eq!(book.remove_recipe(1, "bakery").unwrap().name, "Bread");
        assert!(book.recipes.is_empty());
    }
}
