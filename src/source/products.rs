use std::path::PathBuf;

use crate::error::{CheckError, Result};
use crate::models::Product;

use super::text::decode;

/// JSON array of products, the format `--save` writes after a catalog fetch.
pub struct ProductFileSource {
    path: PathBuf,
}

impl ProductFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl super::IngredientSource for ProductFileSource {
    fn load(&self) -> Result<Vec<Product>> {
        let origin = self.path.display().to_string();
        let content = decode(std::fs::read(&self.path)?, &origin)?;
        serde_json::from_str(&content).map_err(|e| {
            CheckError::invalid_input(format!("{origin} is not a product list: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IngredientSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_products() {
        let json = r#"[
  {
    "off_id": "3017620422003",
    "name": "Hazelnut Spread",
    "brand": "Acme",
    "ingredients_text": "Sugar, Palm Oil, Hazelnuts 13%, Skimmed Milk Powder, Whey",
    "labels": ["en:no-gluten"]
  },
  { "name": "Mystery Bar" }
]"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", json).unwrap();

        let products = ProductFileSource::new(f.path()).load().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].off_id.as_deref(), Some("3017620422003"));
        assert_eq!(products[0].labels, vec!["en:no-gluten"]);
        assert_eq!(products[1].brand, "");
    }

    #[test]
    fn test_malformed_product_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{\"name\": 1}}").unwrap();
        let err = ProductFileSource::new(f.path()).load().unwrap_err();
        assert!(matches!(err, CheckError::InvalidInput { .. }));
    }
}
