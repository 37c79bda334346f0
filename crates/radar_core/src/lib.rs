//! # radar_core: Positions and Collateral Scenarios
//!
//! Foundation layer of the collateral radar workspace. It has no plotting
//! dependency and provides:
//! - Asset positions loaded from a flat JSON mapping (`asset`)
//! - Evenly spaced price ladders (`ladder`)
//! - Scenario enumeration under an explicit policy and the collateral
//!   filter (`scenarios`)
//! - Error types: `CoreError` (`error`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               radar_core                │
//! ├─────────────────────────────────────────┤
//! │  asset/      - Asset, AssetBook         │
//! │  ladder/     - PriceLadder              │
//! │  scenarios/  - EnumerationPolicy,       │
//! │                ScenarioScan, Scenario   │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │               radar_plot                │
//! │  Radial multi-axis polygon renderer     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use radar_core::{AssetBook, EnumerationPolicy, ScenarioScan};
//!
//! let book = AssetBook::from_json_str(
//!     r#"{"A": {"factor": 1, "amount": 10, "price": 100},
//!         "B": {"factor": 1, "amount": 5, "price": 200}}"#,
//! ).unwrap();
//!
//! let outcome = ScenarioScan::new(2000.0, 5)
//!     .unwrap()
//!     .with_policy(EnumerationPolicy::Cartesian)
//!     .run(&book)
//!     .unwrap();
//!
//! assert_eq!(outcome.summary.enumerated, 25);
//! assert!(outcome.scenarios.iter().all(|s| s.weighted_sum <= 2000.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod asset;
pub mod error;
pub mod ladder;
pub mod scenarios;

// Re-export commonly used types
pub use asset::{Asset, AssetBook};
pub use error::CoreError;
pub use ladder::PriceLadder;
pub use scenarios::{
    weighted_sum, EnumerationPolicy, ScanOutcome, ScanSummary, Scenario, ScenarioScan, Verdict,
};
