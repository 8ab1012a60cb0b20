//! Where ingredient text comes from.
//!
//! - [`text`]: inline text and plain-text files (or stdin).
//! - [`products`]: JSON product files as written by `--save`.

use crate::error::Result;
use crate::models::Product;

pub mod products;
pub mod text;

pub trait IngredientSource {
    fn load(&self) -> Result<Vec<Product>>;
}
