//! Enumeration policies over ladder index tuples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How ladder indices are assigned across axes.
///
/// Both policies enumerate tuples in lexicographic order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationPolicy {
    /// Every axis independently chooses any ladder index.
    #[default]
    Cartesian,
    /// Indices must be pairwise distinct across axes.
    Distinct,
}

impl EnumerationPolicy {
    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Distinct => "distinct",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cartesian => "Independent ladder index per axis (full Cartesian product)",
            Self::Distinct => "Pairwise distinct ladder indices across axes",
        }
    }

    /// Enumerate index tuples for ladders of the given sizes.
    pub fn tuples(&self, sizes: &[usize]) -> IndexTuples {
        IndexTuples::new(sizes.to_vec(), *self == Self::Distinct)
    }

    /// Number of tuples the odometer walks for the given ladder sizes.
    ///
    /// Saturates at `u128::MAX`.
    pub fn space_size(sizes: &[usize]) -> u128 {
        sizes
            .iter()
            .try_fold(1_u128, |acc, &n| acc.checked_mul(n as u128))
            .unwrap_or(u128::MAX)
    }
}

impl fmt::Display for EnumerationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnumerationPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cartesian" | "product" => Ok(Self::Cartesian),
            "distinct" | "permutations" => Ok(Self::Distinct),
            other => Err(CoreError::invalid_input(format!(
                "Unknown enumeration policy: {}. Supported: cartesian, distinct",
                other
            ))),
        }
    }
}

/// Odometer iterator over index tuples.
///
/// The last axis varies fastest. With `distinct` set, tuples that reuse an
/// index are skipped.
#[derive(Clone, Debug)]
pub struct IndexTuples {
    sizes: Vec<usize>,
    current: Vec<usize>,
    distinct: bool,
    exhausted: bool,
}

impl IndexTuples {
    fn new(sizes: Vec<usize>, distinct: bool) -> Self {
        let exhausted = sizes.is_empty() || sizes.contains(&0);
        let current = vec![0; sizes.len()];
        Self {
            sizes,
            current,
            distinct,
            exhausted,
        }
    }

    fn advance(&mut self) {
        for axis in (0..self.sizes.len()).rev() {
            self.current[axis] += 1;
            if self.current[axis] < self.sizes[axis] {
                return;
            }
            self.current[axis] = 0;
        }
        self.exhausted = true;
    }

    fn is_distinct(indices: &[usize]) -> bool {
        indices
            .iter()
            .enumerate()
            .all(|(i, idx)| !indices[..i].contains(idx))
    }
}

impl Iterator for IndexTuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let candidate = self.current.clone();
            self.advance();
            if !self.distinct || Self::is_distinct(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
