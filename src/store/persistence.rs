use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::store::RecipeBook;

/// Load a recipe book from a JSON file.
///
/// A missing file is an empty book.
pub fn load_book<P: AsRef<Path>>(path: P) -> Result<RecipeBook> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RecipeBook::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Save a recipe book to a JSON file.
pub fn save_book<P: AsRef<Path>>(path: P, book: &RecipeBook) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    fs::write(path, json)?;
    Ok(())
}
