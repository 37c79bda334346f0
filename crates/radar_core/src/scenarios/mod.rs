//! Scenario enumeration and collateral filtering.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Scenario Scan                  │
//! ├──────────────────────────────────────────────┤
//! │  EnumerationPolicy - Index tuple generation  │
//! │  ScenarioScan      - Pricing & filtering     │
//! │  ScanOutcome       - Accepted scenarios      │
//! └──────────────────────────────────────────────┘
//! ```

mod policy;
mod scan;

pub use policy::{EnumerationPolicy, IndexTuples};
pub use scan::{
    weighted_sum, ScanOutcome, ScanSummary, Scenario, ScenarioScan, Verdict, DEFAULT_ALPHA_SCALE,
    DEFAULT_MAX_SCENARIOS, DEFAULT_TICKS,
};
