use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("Invalid recipe: {field} = {value}")]
    InvalidRecipe { field: &'static str, value: f64 },

    #[error("Invalid quantity for '{ingredient}': {field} = {value}")]
    InvalidQuantity {
        ingredient: String,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid cost parameter: {field} = {value}")]
    InvalidParameter { field: &'static str, value: f64 },

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification used by handlers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Dependency,
}

impl ErrorKind {
    pub fn response_class(self) -> &'static str {
        match self {
            ErrorKind::Validation => "bad request",
            ErrorKind::NotFound => "not found",
            ErrorKind::Dependency => "unavailable",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Dependency => 1,
            ErrorKind::Validation => 2,
            ErrorKind::NotFound => 3,
        }
    }
}

impl CostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CostError::InvalidRecipe { .. }
            | CostError::InvalidQuantity { .. }
            | CostError::InvalidParameter { .. }
            | CostError::InvalidInput(_) => ErrorKind::Validation,
            CostError::RecipeNotFound(_) | CostError::IngredientNotFound(_) => {
                ErrorKind::NotFound
            }
            CostError::Io(_) | CostError::Json(_) | CostError::Prompt(_) => {
                ErrorKind::Dependency
            }
        }
    }

    /// Name of the offending field, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CostError::InvalidRecipe { field, .. }
            | CostError::InvalidQuantity { field, .. }
            | CostError::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CostError>;
