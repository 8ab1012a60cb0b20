use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::Product;

pub const OFF_BASE_URL: &str = "https://world.openfoodfacts.org";

const FIELDS: &str = "code,product_name,brands,ingredients_text,labels_tags";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

/// Raw product as returned by the search endpoint; every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    code: Option<String>,
    product_name: Option<String>,
    brands: Option<String>,
    ingredients_text: Option<String>,
    #[serde(default)]
    labels_tags: Vec<String>,
}

/// Fetch up to `page_size` products tagged with `category`.
pub async fn fetch_products(
    client: &Client,
    base_url: &str,
    category: &str,
    page_size: u32,
) -> Result<Vec<Product>> {
    let url = format!("{}/cgi/search.pl", base_url.trim_end_matches('/'));
    let page_size = page_size.to_string();

    let response = client
        .get(&url)
        .header("User-Agent", super::USER_AGENT)
        .query(&[
            ("action", "process"),
            ("tagtype_0", "categories"),
            ("tag_contains_0", "contains"),
            ("tag_0", category),
            ("json", "true"),
            ("page_size", page_size.as_str()),
            ("fields", FIELDS),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        warn!(category = %category, status = %response.status(), "catalog search failed");
        return Ok(Vec::new());
    }

    let data: SearchResponse = response.json().await?;
    info!(category = %category, count = data.products.len(), "catalog products fetched");

    Ok(data.products.into_iter().map(normalize_product).collect())
}

/// Map a raw catalog record onto [`Product`], filling display defaults.
pub fn normalize_product(raw: OffProduct) -> Product {
    Product {
        off_id: raw.code,
        name: non_blank(raw.product_name).unwrap_or_else(|| "Unknown Product".to_string()),
        brand: non_blank(raw.brands).unwrap_or_else(|| "Unknown Brand".to_string()),
        ingredients_text: raw.ingredients_text.unwrap_or_default(),
        labels: raw.labels_tags,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_normalize_defaults() {
        let product = normalize_product(OffProduct::default());
        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.brand, "Unknown Brand");
        assert!(product.off_id.is_none());
        assert!(product.ingredients_text.is_empty());
    }

    #[test]
    fn test_normalize_blank_name() {
        let product = normalize_product(OffProduct {
            code: Some("123".to_string()),
            product_name: Some("  ".to_string()),
            brands: Some("Acme".to_string()),
            ingredients_text: Some("Sugar".to_string()),
            labels_tags: vec!["en:halal".to_string()],
        });
        assert_eq!(product.name, "Unknown Product");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.labels, vec!["en:halal"]);
    }

    #[tokio::test]
    async fn test_fetch_products() {
        let server = MockServer::start_async().await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/cgi/search.pl")
                    .query_param("tag_0", "confectionery")
                    .query_param("page_size", "2")
                    .query_param("json", "true");
                then.status(200).json_body(serde_json::json!({
                    "count": 2,
                    "products": [
                        {
                            "code": "5000159461122",
                            "product_name": "Fruit Gums",
                            "brands": "Sweetco",
                            "ingredients_text": "Glucose Syrup, Sugar, Gelatine, Carmine",
                            "labels_tags": []
                        },
                        { "code": "42" }
                    ]
                }));
            })
            .await;

        let client = Client::new();
        let products = fetch_products(&client, &server.base_url(), "confectionery", 2)
            .await
            .unwrap();

        search.assert_async().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Fruit Gums");
        assert_eq!(products[1].name, "Unknown Product");
    }

    #[tokio::test]
    async fn test_fetch_products_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/cgi/search.pl");
                then.status(503);
            })
            .await;

        let products = fetch_products(&Client::new(), &server.base_url(), "snacks", 50)
            .await
            .unwrap();
        assert!(products.is_empty());
    }
}
