//! Collateral scenario scan.
//!
//! Walks every ladder index tuple allowed by the [`EnumerationPolicy`],
//! prices it against the asset book and keeps the tuples whose weighted sum
//! stays within the collateral and that avoid the zero-price rung on every
//! axis.

use tracing::{debug, info};

use super::policy::EnumerationPolicy;
use crate::asset::AssetBook;
use crate::error::CoreError;
use crate::ladder::PriceLadder;

/// Default number of ladder points per asset.
pub const DEFAULT_TICKS: usize = 5;

/// Default factor applied to the squared utilisation when deriving alpha.
pub const DEFAULT_ALPHA_SCALE: f64 = 0.5;

/// Default bound on the enumerated tuple space.
pub const DEFAULT_MAX_SCENARIOS: usize = 1_000_000;

/// One accepted price scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Ladder index per axis
    pub indices: Vec<usize>,
    /// Ladder price per axis
    pub prices: Vec<f64>,
    /// Σ price × factor × amount
    pub weighted_sum: f64,
    /// weighted_sum / collateral
    pub utilisation: f64,
    /// Rendering opacity, `alpha_scale × utilisation²`
    pub alpha: f64,
}

/// Outcome of classifying one index tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Within collateral and off the zero rung
    Accepted,
    /// At least one axis sits on the zero-price rung
    ZeroIndex,
    /// Weighted sum exceeds the collateral
    OverCollateral,
}

/// Counters collected over a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Tuples produced by the enumeration policy
    pub enumerated: usize,
    /// Tuples kept for rendering
    pub accepted: usize,
    /// Tuples dropped for touching the zero rung
    pub zero_index: usize,
    /// Tuples dropped for exceeding the collateral
    pub over_collateral: usize,
}

/// Complete result of a scan.
#[derive(Clone, Debug)]
pub struct ScanOutcome {
    /// Accepted scenarios in enumeration order
    pub scenarios: Vec<Scenario>,
    /// Ladders used, one per asset
    pub ladders: Vec<PriceLadder>,
    /// Counters
    pub summary: ScanSummary,
}

/// Scan configuration.
///
/// # Example
///
/// ```
/// use radar_core::{AssetBook, ScenarioScan};
///
/// let book = AssetBook::from_json_str(
///     r#"{"A": {"factor": 1, "amount": 10, "price": 100},
///         "B": {"factor": 1, "amount": 5, "price": 200}}"#,
/// ).unwrap();
///
/// let outcome = ScenarioScan::new(2000.0, 5).unwrap().run(&book).unwrap();
/// assert!(outcome
///     .scenarios
///     .iter()
///     .any(|s| s.indices == vec![2, 1] && s.weighted_sum == 750.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioScan {
    collateral: f64,
    n_tick: usize,
    policy: EnumerationPolicy,
    alpha_scale: f64,
    max_scenarios: usize,
}

impl ScenarioScan {
    /// Create a scan with the default policy and alpha scale.
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidInput` - collateral not finite and positive, or `n_tick < 2`
    pub fn new(collateral: f64, n_tick: usize) -> Result<Self, CoreError> {
        if !collateral.is_finite() || collateral <= 0.0 {
            return Err(CoreError::invalid_input(format!(
                "collateral must be positive, got {}",
                collateral
            )));
        }
        if n_tick < 2 {
            return Err(CoreError::invalid_input(format!(
                "ticks must be at least 2, got {}",
                n_tick
            )));
        }
        Ok(Self {
            collateral,
            n_tick,
            policy: EnumerationPolicy::default(),
            alpha_scale: DEFAULT_ALPHA_SCALE,
            max_scenarios: DEFAULT_MAX_SCENARIOS,
        })
    }

    /// Set the enumeration policy.
    pub fn with_policy(mut self, policy: EnumerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the alpha scale, which must lie in `[0, 1]`.
    pub fn with_alpha_scale(mut self, alpha_scale: f64) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&alpha_scale) {
            return Err(CoreError::invalid_input(format!(
                "alpha scale must be in [0, 1], got {}",
                alpha_scale
            )));
        }
        self.alpha_scale = alpha_scale;
        Ok(self)
    }

    /// Bound the enumerated tuple space.
    pub fn with_max_scenarios(mut self, max_scenarios: usize) -> Self {
        self.max_scenarios = max_scenarios;
        self
    }

    /// Collateral ceiling.
    pub fn collateral(&self) -> f64 {
        self.collateral
    }

    /// Ladder points per asset.
    pub fn n_tick(&self) -> usize {
        self.n_tick
    }

    /// Enumeration policy.
    pub fn policy(&self) -> EnumerationPolicy {
        self.policy
    }

    /// Alpha scale.
    pub fn alpha_scale(&self) -> f64 {
        self.alpha_scale
    }

    /// Classify a tuple by its indices and weighted sum.
    pub fn classify(&self, indices: &[usize], weighted_sum: f64) -> Verdict {
        if indices.contains(&0) {
            Verdict::ZeroIndex
        } else if weighted_sum > self.collateral {
            Verdict::OverCollateral
        } else {
            Verdict::Accepted
        }
    }

    /// Rendering opacity for a weighted sum.
    pub fn alpha_for(&self, weighted_sum: f64) -> f64 {
        let utilisation = weighted_sum / self.collateral;
        self.alpha_scale * utilisation * utilisation
    }

    /// Run the scan over every tuple of the policy.
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidInput` - distinct policy with more assets than ladder points
    /// * `CoreError::TooManyScenarios` - tuple space larger than the configured bound
    pub fn run(&self, book: &AssetBook) -> Result<ScanOutcome, CoreError> {
        let ladders = book.ladders(self.n_tick)?;
        let sizes: Vec<usize> = ladders.iter().map(PriceLadder::len).collect();

        if self.policy == EnumerationPolicy::Distinct && book.len() > self.n_tick {
            return Err(CoreError::invalid_input(format!(
                "distinct policy needs at most {} assets for {} ticks, got {}",
                self.n_tick,
                self.n_tick,
                book.len()
            )));
        }

        let space = EnumerationPolicy::space_size(&sizes);
        if space > self.max_scenarios as u128 {
            return Err(CoreError::TooManyScenarios {
                count: space,
                limit: self.max_scenarios,
            });
        }

        info!(
            assets = book.len(),
            ticks = self.n_tick,
            policy = %self.policy,
            collateral = self.collateral,
            "Scanning scenario space of {} tuples",
            space
        );

        let mut summary = ScanSummary::default();
        let mut scenarios = Vec::new();

        for indices in self.policy.tuples(&sizes) {
            summary.enumerated += 1;
            let prices: Vec<f64> = indices
                .iter()
                .zip(&ladders)
                .map(|(&i, ladder)| ladder.points()[i])
                .collect();
            let total = weighted_sum(book, &prices);

            match self.classify(&indices, total) {
                Verdict::ZeroIndex => summary.zero_index += 1,
                Verdict::OverCollateral => summary.over_collateral += 1,
                Verdict::Accepted => {
                    summary.accepted += 1;
                    let utilisation = total / self.collateral;
                    debug!(?indices, weighted_sum = total, "Accepted scenario");
                    scenarios.push(Scenario {
                        alpha: self.alpha_for(total),
                        indices,
                        prices,
                        weighted_sum: total,
                        utilisation,
                    });
                }
            }
        }

        info!(
            enumerated = summary.enumerated,
            accepted = summary.accepted,
            zero_index = summary.zero_index,
            over_collateral = summary.over_collateral,
            "Scan complete"
        );

        Ok(ScanOutcome {
            scenarios,
            ladders,
            summary,
        })
    }
}

/// Σ price × factor × amount over the book, prices given in book order.
pub fn weighted_sum(book: &AssetBook, prices: &[f64]) -> f64 {
    book.iter()
        .zip(prices)
        .map(|(asset, &price)| asset.value_at(price))
        .sum()
}
