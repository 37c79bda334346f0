//! Asset positions loaded from a flat JSON mapping.
//!
//! The positions document maps an asset name to its contract description:
//!
//! ```json
//! {
//!     "BTCUSD": { "factor": 0.001, "amount": 20, "price": 60000 },
//!     "ETHUSD": { "factor": 0.01,  "amount": 40, "price": 4000 }
//! }
//! ```
//!
//! Mapping order is preserved and defines the axis order of the radial plot.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CoreError;
use crate::ladder::PriceLadder;

/// A single position on one asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset name, used as the axis label
    name: String,
    /// Units of the underlying per contract
    factor: f64,
    /// Number of contracts held
    amount: f64,
    /// Maximum quoted price, the top of the price ladder
    price: f64,
}

impl Asset {
    /// Create a validated asset.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAsset`] when factor or amount is negative or
    /// not finite, or when price is not a finite positive number.
    pub fn new(
        name: impl Into<String>,
        factor: f64,
        amount: f64,
        price: f64,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::invalid_asset(name, "name cannot be empty"));
        }
        // short positions are not collateral
        if !factor.is_finite() || factor < 0.0 {
            return Err(CoreError::invalid_asset(
                name,
                format!("factor must be finite and non-negative, got {}", factor),
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::invalid_asset(
                name,
                format!("amount must be finite and non-negative, got {}", amount),
            ));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::invalid_asset(
                name,
                format!("price must be positive, got {}", price),
            ));
        }
        Ok(Self {
            name,
            factor,
            amount,
            price,
        })
    }

    /// Asset name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units per contract.
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Contract count.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Maximum quoted price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Value of the position per unit of price (`factor × amount`).
    #[inline]
    pub fn weight(&self) -> f64 {
        self.factor * self.amount
    }

    /// Position value at the given price.
    #[inline]
    pub fn value_at(&self, price: f64) -> f64 {
        price * self.weight()
    }

    /// Build the evenly spaced price ladder from zero to the asset's price.
    pub fn ladder(&self, n_tick: usize) -> Result<PriceLadder, CoreError> {
        PriceLadder::linspace(self.price, n_tick)
    }
}

/// Ordered collection of asset positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetBook {
    assets: Vec<Asset>,
}

impl AssetBook {
    /// Build a book from already validated assets.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] for an empty list or duplicated names.
    pub fn from_assets(assets: Vec<Asset>) -> Result<Self, CoreError> {
        if assets.is_empty() {
            return Err(CoreError::invalid_input("asset book is empty"));
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].iter().any(|a| a.name == asset.name) {
                return Err(CoreError::invalid_input(format!(
                    "duplicate asset name: {}",
                    asset.name
                )));
            }
        }
        Ok(Self { assets })
    }

    /// Parse a positions document.
    ///
    /// # Example
    ///
    /// ```
    /// use radar_core::AssetBook;
    ///
    /// let book = AssetBook::from_json_str(
    ///     r#"{"A": {"factor": 1, "amount": 10, "price": 100},
    ///         "B": {"factor": 1, "amount": 5, "price": 200}}"#,
    /// ).unwrap();
    ///
    /// assert_eq!(book.names(), vec!["A", "B"]);
    /// assert_eq!(book.max_prices(), vec![100.0, 200.0]);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| CoreError::Parse(e.to_string()))?;

        let Value::Object(entries) = document else {
            return Err(CoreError::Parse(
                "positions document must be a JSON object".to_string(),
            ));
        };

        let mut assets = Vec::with_capacity(entries.len());
        for (name, entry) in &entries {
            let Value::Object(fields) = entry else {
                return Err(CoreError::invalid_asset(
                    name.as_str(),
                    "entry must be an object with factor, amount and price",
                ));
            };
            let asset = Asset::new(
                name.as_str(),
                numeric_field(name, fields, "factor")?,
                numeric_field(name, fields, "amount")?,
                numeric_field(name, fields, "price")?,
            )?;
            debug!(
                asset = asset.name(),
                factor = asset.factor(),
                amount = asset.amount(),
                price = asset.price(),
                "Loaded position"
            );
            assets.push(asset);
        }

        Self::from_assets(assets)
    }

    /// Read and parse a positions file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Number of assets (axes).
    #[inline]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if the book holds no assets.
    /// Note: a book built through the public constructors is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Assets in document order.
    #[inline]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Iterate over assets in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    /// Asset names in document order.
    pub fn names(&self) -> Vec<&str> {
        self.assets.iter().map(Asset::name).collect()
    }

    /// Maximum prices in document order.
    pub fn max_prices(&self) -> Vec<f64> {
        self.assets.iter().map(Asset::price).collect()
    }

    /// Price ladders for every asset, all with `n_tick` points.
    pub fn ladders(&self, n_tick: usize) -> Result<Vec<PriceLadder>, CoreError> {
        self.assets.iter().map(|a| a.ladder(n_tick)).collect()
    }
}

fn numeric_field(
    asset: &str,
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<f64, CoreError> {
    let value = fields.get(key).ok_or_else(|| CoreError::MissingField {
        asset: asset.to_string(),
        field: key,
    })?;
    value.as_f64().ok_or_else(|| {
        CoreError::invalid_asset(asset, format!("field '{}' must be numeric, got {}", key, value))
    })
}
