//! Descriptive metadata for a tradable asset.

use serde::{Deserialize, Serialize};

/// What the provider knows about a ticker besides its prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    /// Human-readable name (e.g. "S&P 500"). `None` when the provider has none.
    pub display_name: Option<String>,
}

impl AssetMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
        }
    }

    /// Display name, falling back to the ticker itself.
    pub fn display_name_or<'a>(&'a self, ticker: &'a str) -> &'a str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ticker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_ticker() {
        assert_eq!(AssetMetadata::default().display_name_or("AAPL"), "AAPL");
        assert_eq!(AssetMetadata::named("  ").display_name_or("AAPL"), "AAPL");
        assert_eq!(
            AssetMetadata::named("Apple Inc.").display_name_or("AAPL"),
            "Apple Inc."
        );
    }
}
