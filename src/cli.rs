use std::path::PathBuf;

use clap::Parser;

use crate::models::RiskLevel;

#[derive(Parser, Debug)]
#[command(
    name = "ingredient-checkr",
    about = "Classify product ingredient lists against a curated risk dictionary",
    version
)]
pub struct Cli {
    /// Ingredient text to classify, e.g. "Sugar, Gelatin (Pork), Carmine"
    pub text: Option<String>,

    /// Read a plain-text ingredient list from FILE ('-' for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Classify every product in a JSON product file (as written by --save)
    #[arg(long, value_name = "FILE")]
    pub products: Option<PathBuf>,

    /// Fetch products from the Open Food Facts catalog
    #[arg(long)]
    pub online: bool,

    /// Catalog category to fetch with --online (repeatable)
    #[arg(
        long = "category",
        value_name = "CATEGORY",
        default_values_t = vec!["snacks".to_string(), "confectionery".to_string(), "beverages".to_string()]
    )]
    pub categories: Vec<String>,

    /// Products to fetch per category
    #[arg(long, default_value_t = 50, value_name = "N")]
    pub page_size: u32,

    /// Write the loaded products to FILE as JSON before classifying
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Config file [default: ./.ingredient-checkr/config.toml, fallback ~/.config/ingredient-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replace the configured dictionary with a term list downloaded from URL
    #[arg(long, value_name = "URL")]
    pub dictionary_url: Option<String>,

    /// Report every ingredient, including those that match no dictionary term
    #[arg(long)]
    pub include_unmatched: bool,

    /// Exit with code 1 when a product reaches LEVEL [default: from config, else high]
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<LevelArg>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to ingredient-digest.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "ingredient-digest.pdf")]
    pub pdf: Option<PathBuf>,

    /// Show every product and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
    Digest,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<&LevelArg> for RiskLevel {
    fn from(arg: &LevelArg) -> Self {
        match arg {
            LevelArg::Low => RiskLevel::Low,
            LevelArg::Medium => RiskLevel::Medium,
            LevelArg::High => RiskLevel::High,
        }
    }
}
