use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const STOCK_ASSET_TYPE: &str = "Stock";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
}

impl CatalogRecord {
    /// Label offered to the user; only the leading symbol matters when submitted.
    pub fn label(&self) -> String {
        format!("{} | {}", self.symbol, self.name)
    }
}

/// Known symbols used for autocomplete suggestions only. Non-stock records are
/// dropped once when the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    stocks: Vec<CatalogRecord>,
}

impl SymbolCatalog {
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let stocks = records
            .into_iter()
            .filter(|r| r.asset_type == STOCK_ASSET_TYPE)
            .collect();
        Self { stocks }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(s).context("failed to parse symbol catalog JSON")?;
        Ok(Self::from_records(records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)?;
        if catalog.is_empty() {
            tracing::warn!(path = %path.display(), "Symbol catalog has no stocks");
        }
        tracing::info!(path = %path.display(), stocks = catalog.len(), "Symbol catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Symbol-prefix matches first, then company-name substring matches, both
    /// case-insensitive on the first token of `input`.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<String> {
        let Some(token) = input.split_whitespace().next() else {
            return Vec::new();
        };
        let needle = token.to_ascii_lowercase();

        let by_symbol = self
            .stocks
            .iter()
            .filter(|r| r.symbol.to_ascii_lowercase().starts_with(&needle));
        let by_name = self.stocks.iter().filter(|r| {
            !r.symbol.to_ascii_lowercase().starts_with(&needle)
                && r.name.to_ascii_lowercase().contains(&needle)
        });

        by_symbol.chain(by_name).take(limit).map(CatalogRecord::label).collect()
    }
}
