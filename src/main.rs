//! `ingredient-checkr`: classify ingredient lists against a risk dictionary.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config ([`config::load_config`]) and build the dictionary snapshot ([`dictionary`]).
//! 3. Optionally replace the snapshot from a remote term list (`--dictionary-url`, [`catalog`]).
//! 4. Load products from text, files or the online catalog ([`source`], [`catalog`]).
//! 5. Classify each product's ingredients ([`tagger::classify`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0`, or `1` when a product reaches the configured `fail_on` level.

mod catalog;
mod cli;
mod config;
mod dictionary;
mod error;
mod logging;
mod models;
mod report;
mod source;
mod tagger;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cli::{Cli, ReportFormat};
use config::load_config;
use dictionary::store::DictionaryStore;
use models::Product;
use source::products::ProductFileSource;
use source::text::{FileSource, InlineSource};
use source::IngredientSource;
use tagger::{classify_products, MatchPolicy};

const API_KEY_ENV: &str = "INGREDIENT_CHECKR_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(level) = &cli.fail_on {
        config.policy.fail_on = level.into();
    }
    let policy = if cli.include_unmatched {
        MatchPolicy::EveryItem
    } else {
        config.policy.match_policy()
    };

    let store = DictionaryStore::new(config.dictionary()?);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    if let Some(url) = &cli.dictionary_url {
        let api_key = std::env::var(API_KEY_ENV).ok();
        match catalog::dictionary::fetch_dictionary(&client, url, api_key.as_deref()).await? {
            Some(remote) => {
                store.replace(remote);
            }
            None => warn!(url = %url, "keeping configured dictionary"),
        }
    }

    let mut products = load_offline(&cli)?;
    if cli.online {
        products.extend(fetch_catalog(&client, &cli.categories, cli.page_size, cli.quiet).await);
    }

    if products.is_empty() {
        eprintln!("No products to check");
        std::process::exit(1);
    }

    if let Some(path) = &cli.save {
        save_products(&products, path)?;
        if !cli.quiet {
            eprintln!("  {} saved {} products to {}", "→".cyan(), products.len(), path.display());
        }
    }

    // Every product in this run is classified against the same snapshot.
    let dictionary = store.snapshot();
    if dictionary.is_empty() {
        warn!("dictionary has no terms; every product will classify as unknown");
    }
    info!(
        products = products.len(),
        terms = dictionary.len(),
        policy = ?policy,
        "classifying"
    );
    let reports = classify_products(products, &dictionary, policy);

    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report.clone(),
    };
    let pdf_path = cli
        .pdf
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("ingredient-digest.pdf"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&reports, &dictionary, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        ReportFormat::Pdf => {
            report::pdf::render(&reports, &dictionary, &pdf_path)?;
        }
        ReportFormat::Digest => {
            let today = chrono::Local::now().date_naive();
            println!("{}", report::digest::render(&reports, today));
        }
    }

    let failing = reports
        .iter()
        .any(|r| config.policy.fails(r.verdict.overall_level));

    if failing {
        std::process::exit(1);
    }

    Ok(())
}

/// Products from inline text and local files. With none of them given and
/// no `--online`, the missing text is an input error.
fn load_offline(cli: &Cli) -> Result<Vec<Product>> {
    let mut sources: Vec<Box<dyn IngredientSource>> = Vec::new();

    if let Some(path) = &cli.products {
        sources.push(Box::new(ProductFileSource::new(path)));
    }
    if let Some(path) = &cli.file {
        sources.push(Box::new(FileSource::new(path)));
    }
    if cli.text.is_some() || (sources.is_empty() && !cli.online) {
        sources.push(Box::new(InlineSource::new(cli.text.clone())));
    }

    let mut products = Vec::new();
    for source in &sources {
        products.extend(source.load()?);
    }
    Ok(products)
}

async fn fetch_catalog(
    client: &reqwest::Client,
    categories: &[String],
    page_size: u32,
    quiet: bool,
) -> Vec<Product> {
    use futures::future::join_all;

    let pb = if !quiet {
        let pb = ProgressBar::new(categories.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let futures: Vec<_> = categories
        .iter()
        .map(|category| {
            let pb = pb.clone();
            async move {
                let result = catalog::open_food_facts::fetch_products(
                    client,
                    catalog::open_food_facts::OFF_BASE_URL,
                    category,
                    page_size,
                )
                .await;
                if let Some(pb) = &pb {
                    pb.set_message(category.clone());
                    pb.inc(1);
                }
                (category, result)
            }
        })
        .collect();

    let mut products = Vec::new();
    for (category, result) in join_all(futures).await {
        match result {
            Ok(fetched) => {
                if !quiet {
                    eprintln!("  {} {} {} products", "→".cyan(), category, fetched.len());
                }
                products.extend(fetched);
            }
            Err(e) => warn!(category = %category, error = %e, "catalog fetch failed"),
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    products
}

fn save_products(products: &[Product], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(products)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write products to {}", path.display()))
}
