use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};
use crate::models::Product;

/// Ingredient text passed directly on the command line.
pub struct InlineSource {
    text: Option<String>,
}

impl InlineSource {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }
}

impl super::IngredientSource for InlineSource {
    fn load(&self) -> Result<Vec<Product>> {
        match &self.text {
            Some(text) => Ok(vec![Product::from_text("inline", text.clone())]),
            None => Err(CheckError::invalid_input("no ingredient text supplied")),
        }
    }
}

/// A plain-text ingredient list read from a file, or stdin when the path is `-`.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path == Path::new("-")
    }
}

impl super::IngredientSource for FileSource {
    fn load(&self) -> Result<Vec<Product>> {
        let (name, bytes) = if self.is_stdin() {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            ("stdin".to_string(), buf)
        } else {
            let name = self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("input")
                .to_string();
            (name, std::fs::read(&self.path)?)
        };

        let text = decode(bytes, &name)?;
        Ok(vec![Product::from_text(name, text)])
    }
}

/// Reject input that is not UTF-8 text. Empty input is valid.
pub fn decode(bytes: Vec<u8>, origin: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        CheckError::invalid_input(format!(
            "{origin} is not UTF-8 text (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })
}
