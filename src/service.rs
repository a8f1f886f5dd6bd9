use tracing::{info, warn};

use crate::costing::{CostBreakdown, CostParameters, compute_cost};
use crate::error::Result;
use crate::store::{RecipeRepository, RecipeStore};

/// Merge requested parameters over a recipe's saved ones.
///
/// Fields absent from both are left unset so the calculator applies its defaults.
pub fn resolve_parameters(requested: CostParameters, saved: CostParameters) -> CostParameters {
    requested.or(saved)
}

/// Fetch a recipe, cost it, and optionally remember the parameters used.
///
/// Remembering is best-effort: a failed write is logged and the breakdown is
/// still returned.
pub fn quote_recipe<R, S>(
    repo: &R,
    store: &S,
    recipe_id: u64,
    owner: &str,
    requested: CostParameters,
    persist: bool,
) -> Result<CostBreakdown>
where
    R: RecipeRepository + ?Sized,
    S: RecipeStore + ?Sized,
{
    let (recipe, lines) = repo.fetch_recipe_with_ingredients(recipe_id, owner)?;
    let params = resolve_parameters(requested, recipe.cost_parameters);
    let breakdown = compute_cost(&recipe, &lines, &params)?;

    if persist {
        remember_parameters(store, owner, &breakdown);
    }

    Ok(breakdown)
}

/// Persist the resolved parameters of a finished breakdown, logging any failure.
///
/// Returns whether the write succeeded.
pub fn remember_parameters<S: RecipeStore + ?Sized>(
    store: &S,
    owner: &str,
    breakdown: &CostBreakdown,
) -> bool {
    match store.persist_cost_parameters(breakdown.recipe_id, owner, breakdown.params.into()) {
        Ok(()) => {
            info!(recipe_id = breakdown.recipe_id, "saved cost parameters");
            true
        }
        Err(e) => {
            warn!(
                recipe_id = breakdown.recipe_id,
                error = %e,
                "could not save cost parameters"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::CostError;
    use crate::models::{Recipe, RecipeIngredientLine};
    use crate::store::RecipeBook;

    struct FailingStore;

    impl RecipeStore for FailingStore {
        fn persist_cost_parameters(&self, _: u64, _: &str, _: CostParameters) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "read-only").into())
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        writes: RefCell<Vec<(u64, CostParameters)>>,
    }

    impl RecipeStore for RecordingStore {
        fn persist_cost_parameters(&self, id: u64, _: &str, params: CostParameters) -> Result<()> {
            self.writes.borrow_mut().push((id, params));
            Ok(())
        }
    }

    fn sample_book() -> RecipeBook {
        let mut book = RecipeBook::default();
        book.add_ingredient("bakery", "Butter", 0.01, "g").unwrap();
        let mut shortbread = Recipe::new(0, "bakery", "Shortbread", 20);
        shortbread.ingredients = vec![RecipeIngredientLine {
            ingredient_id: 1,
            quantity: 250.0,
        }];
        shortbread.cost_parameters = CostParameters {
            labor_cost_per_hour: Some(18.0),
            ..Default::default()
        };
        book.add_recipe(shortbread).unwrap();
        book
    }

    #[test]
    fn test_saved_parameters_fill_gaps() {
        let book = sample_book();
        let store = RecordingStore::default();
        let requested = CostParameters {
            profit_margin_percentage: Some(50.0),
            ..Default::default()
        };

        let breakdown = quote_recipe(&book, &store, 1, "bakery", requested, false).unwrap();
        assert_eq!(breakdown.params.labor_cost_per_hour, 18.0);
        assert_eq!(breakdown.params.profit_margin_percentage, 50.0);
        assert_eq!(breakdown.params.overhead_percentage, 15.0);
        assert!(store.writes.borrow().is_empty());
    }

    #[test]
    fn test_persists_resolved_parameters() {
        let book = sample_book();
        let store = RecordingStore::default();

        quote_recipe(&book, &store, 1, "bakery", CostParameters::default(), true).unwrap();

        let writes = store.writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, 1);
        assert_eq!(writes[0].1.labor_cost_per_hour, Some(18.0));
        assert_eq!(writes[0].1.packaging_cost, Some(0.0));
    }

    #[test]
    fn test_store_failure_does_not_fail_quote() {
        let book = sample_book();
        let breakdown =
            quote_recipe(&book, &FailingStore, 1, "bakery", CostParameters::default(), true);
        assert!(breakdown.is_ok());
    }

    #[test]
    fn test_validation_failure_skips_persist() {
        let book = sample_book();
        let store = RecordingStore::default();
        let requested = CostParameters {
            packaging_cost: Some(-1.0),
            ..Default::default()
        };

        let err = quote_recipe(&book, &store, 1, "bakery", requested, true).unwrap_err();
        assert!(matches!(err, CostError::InvalidParameter { .. }));
        assert!(store.writes.borrow().is_empty());
    }

    #[test]
    fn test_unknown_recipe_is_not_found() {
        let book = sample_book();
        let err = quote_recipe(&book, &FailingStore, 9, "bakery", CostParameters::default(), true)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }
}
