//! Async HTTP client for SSB's classification database (KLASS).
//!
//! Only the two read endpoints the groupings need are covered: the codes of a
//! classification valid from a date, and the items of a classification variant.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::KlassConfig;
use crate::error::{Error, Result};

/// One classification item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KlassCode {
    pub code: String,
    #[serde(default)]
    pub parent_code: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CodesResponse {
    #[serde(default)]
    codes: Vec<KlassCode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantResponse {
    #[serde(default)]
    classification_items: Vec<KlassCode>,
}

#[derive(Debug, Clone)]
pub struct KlassClient {
    client: Client,
    base_url: String,
}

impl KlassClient {
    pub fn new(config: &KlassConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("arbmark/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(KlassClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Codes of `classification` valid from `from`.
    pub async fn fetch_codes(
        &self,
        classification: u32,
        from: NaiveDate,
    ) -> Result<Vec<KlassCode>> {
        let url = codes_url(&self.base_url, classification, from);
        let body = self.get(&url).await?;
        parse_codes(&body)
    }

    /// All items of a classification variant.
    pub async fn fetch_variant(&self, variant: u32) -> Result<Vec<KlassCode>> {
        let url = format!("{}/variants/{}.json", self.base_url, variant);
        let body = self.get(&url).await?;
        parse_variant(&body)
    }

    async fn get(&self, url: &str) -> Result<String> {
        debug!(url, "fetching from KLASS");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Klass {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

fn codes_url(base_url: &str, classification: u32, from: NaiveDate) -> String {
    format!(
        "{}/classifications/{}/codes.json?from={}",
        base_url,
        classification,
        from.format("%Y-%m-%d")
    )
}

fn parse_codes(body: &str) -> Result<Vec<KlassCode>> {
    let response: CodesResponse = serde_json::from_str(body)?;
    Ok(response.codes)
}

fn parse_variant(body: &str) -> Result<Vec<KlassCode>> {
    let response: VariantResponse = serde_json::from_str(body)?;
    Ok(response.classification_items)
}
