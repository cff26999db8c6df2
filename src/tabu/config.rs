//! Tabu Search configuration.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rule deciding which moves may be selected in an iteration.
///
/// Every variant picks the lowest-cost admissible move, keeping the first
/// one in enumeration order on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Admissibility {
    /// Only free moves.
    #[default]
    Plain,
    /// Free moves, plus tabu moves with a positive frequency count.
    Frequency,
    /// Best free move, unless the best tabu move beats the incumbent.
    AspirationGlobal,
    /// Free moves, plus tabu moves that improve on the current solution.
    AspirationLocal,
}

impl Admissibility {
    pub const ALL: [Admissibility; 4] = [
        Admissibility::Plain,
        Admissibility::Frequency,
        Admissibility::AspirationGlobal,
        Admissibility::AspirationLocal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Admissibility::Plain => "plain",
            Admissibility::Frequency => "frequency",
            Admissibility::AspirationGlobal => "aspiration-global",
            Admissibility::AspirationLocal => "aspiration-local",
        }
    }
}

impl fmt::Display for Admissibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Admissibility {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Admissibility::ALL
            .into_iter()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

/// What to do when no move is admissible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FallbackPolicy {
    /// The move whose tabu status expires soonest; ties by cost, then
    /// enumeration order.
    #[default]
    LeastTabu,
    /// The lowest-cost move, ignoring tabu status.
    BestOverall,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::LeastTabu => "least-tabu",
            FallbackPolicy::BestOverall => "best-overall",
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "least-tabu" => Ok(FallbackPolicy::LeastTabu),
            "best-overall" => Ok(FallbackPolicy::BestOverall),
            _ => Err(ConfigError::UnknownFallback(s.to_string())),
        }
    }
}

/// How long an applied move stays tabu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TenurePolicy {
    /// The same tenure for every move.
    Fixed(usize),
    /// A tenure drawn uniformly from `[min, max]`, resampled every
    /// `refresh_interval` iterations.
    Dynamic {
        min: usize,
        max: usize,
        refresh_interval: usize,
    },
}

impl TenurePolicy {
    /// Upper bound on any tenure this policy hands out.
    pub fn max_tenure(&self) -> usize {
        match *self {
            TenurePolicy::Fixed(t) => t,
            TenurePolicy::Dynamic { max, .. } => max,
        }
    }
}

impl Default for TenurePolicy {
    fn default() -> Self {
        TenurePolicy::Fixed(15)
    }
}

/// Shape of the short-term memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MemoryKind {
    /// Per-move tenure counters.
    #[default]
    Recency,
    /// The last `capacity` visited permutations.
    Visited { capacity: usize },
}

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_qap::tabu::{Admissibility, TabuConfig, TenurePolicy};
///
/// let config = TabuConfig::default()
///     .with_max_iterations(5000)
///     .with_tenure(TenurePolicy::Fixed(10))
///     .with_strategy(Admissibility::AspirationGlobal)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabuConfig {
    /// Number of iterations. The search always runs all of them.
    pub max_iterations: usize,
    /// Tenure assigned to applied moves.
    pub tenure: TenurePolicy,
    /// Admissibility rule for move selection.
    pub strategy: Admissibility,
    /// Short-term memory representation.
    pub memory: MemoryKind,
    /// Move choice when nothing is admissible.
    pub fallback: FallbackPolicy,
    /// Random seed (None for a fresh one per run).
    pub seed: Option<u64>,
    /// Evaluate the neighborhood with rayon (`parallel` feature).
    pub parallel: bool,
    /// Score candidates with the O(n) swap delta instead of a full
    /// recomputation. Both give identical results.
    pub incremental: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tenure: TenurePolicy::default(),
            strategy: Admissibility::default(),
            memory: MemoryKind::default(),
            fallback: FallbackPolicy::default(),
            seed: None,
            parallel: false,
            incremental: true,
        }
    }
}

impl TabuConfig {
    /// Sets the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tenure policy.
    pub fn with_tenure(mut self, tenure: TenurePolicy) -> Self {
        self.tenure = tenure;
        self
    }

    /// Shorthand for a fixed tenure.
    pub fn with_tabu_tenure(self, tenure: usize) -> Self {
        self.with_tenure(TenurePolicy::Fixed(tenure))
    }

    pub fn with_strategy(mut self, strategy: Admissibility) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_memory(mut self, memory: MemoryKind) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Validates the configuration.
    ///
    /// The instance size is checked separately when a search starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.tenure {
            TenurePolicy::Fixed(0) => return Err(ConfigError::ZeroTenure),
            TenurePolicy::Dynamic { min, max, .. } if min == 0 || min > max => {
                return Err(ConfigError::InvalidTenureRange { min, max });
            }
            TenurePolicy::Dynamic {
                refresh_interval: 0,
                ..
            } => return Err(ConfigError::ZeroRefreshInterval),
            _ => {}
        }
        if self.memory == (MemoryKind::Visited { capacity: 0 }) {
            return Err(ConfigError::ZeroVisitedCapacity);
        }
        Ok(())
    }

    /// Validates the configuration against an instance of size `n`.
    pub fn validate_for(&self, n: usize) -> Result<(), ConfigError> {
        if n < 2 {
            return Err(ConfigError::TooFewFacilities { n });
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.tenure, TenurePolicy::Fixed(15));
        assert_eq!(config.strategy, Admissibility::Plain);
        assert_eq!(config.memory, MemoryKind::Recency);
        assert_eq!(config.fallback, FallbackPolicy::LeastTabu);
        assert!(config.seed.is_none());
        assert!(config.incremental);
        assert!(!config.parallel);
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(5000)
            .with_tabu_tenure(7)
            .with_strategy(Admissibility::Frequency)
            .with_memory(MemoryKind::Visited { capacity: 20 })
            .with_fallback(FallbackPolicy::BestOverall)
            .with_incremental(false)
            .with_seed(123);

        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.tenure, TenurePolicy::Fixed(7));
        assert_eq!(config.strategy, Admissibility::Frequency);
        assert_eq!(config.memory, MemoryKind::Visited { capacity: 20 });
        assert_eq!(config.fallback, FallbackPolicy::BestOverall);
        assert!(!config.incremental);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_tenure_upper_bound() {
        assert_eq!(TenurePolicy::default().max_tenure(), 15);
        let dynamic = TenurePolicy::Dynamic {
            min: 5,
            max: 25,
            refresh_interval: 50,
        };
        assert_eq!(dynamic.max_tenure(), 25);
    }

    #[test]
    fn test_validate_ok() {
        assert!(TabuConfig::default().validate().is_ok());
        assert!(TabuConfig::default().with_max_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_tenure() {
        assert_eq!(
            TabuConfig::default().with_tabu_tenure(0).validate(),
            Err(ConfigError::ZeroTenure)
        );
        let inverted = TabuConfig::default().with_tenure(TenurePolicy::Dynamic {
            min: 25,
            max: 5,
            refresh_interval: 50,
        });
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvalidTenureRange { min: 25, max: 5 })
        );
        let no_refresh = TabuConfig::default().with_tenure(TenurePolicy::Dynamic {
            min: 5,
            max: 25,
            refresh_interval: 0,
        });
        assert_eq!(no_refresh.validate(), Err(ConfigError::ZeroRefreshInterval));
    }

    #[test]
    fn test_validate_rejects_empty_visited_set() {
        let config = TabuConfig::default().with_memory(MemoryKind::Visited { capacity: 0 });
        assert_eq!(config.validate(), Err(ConfigError::ZeroVisitedCapacity));
    }

    #[test]
    fn test_validate_for_size() {
        let config = TabuConfig::default();
        assert_eq!(
            config.validate_for(1),
            Err(ConfigError::TooFewFacilities { n: 1 })
        );
        assert!(config.validate_for(2).is_ok());
    }

    #[test]
    fn test_strategy_parsing() {
        for a in Admissibility::ALL {
            assert_eq!(a.as_str().parse::<Admissibility>(), Ok(a));
        }
        assert_eq!(
            "Aspiration_Global".parse::<Admissibility>(),
            Ok(Admissibility::AspirationGlobal)
        );
        assert_eq!(
            "".parse::<Admissibility>(),
            Err(ConfigError::UnknownStrategy(String::new()))
        );
        assert!("random".parse::<Admissibility>().is_err());
    }

    #[test]
    fn test_fallback_parsing() {
        assert_eq!(
            "best-overall".parse::<FallbackPolicy>(),
            Ok(FallbackPolicy::BestOverall)
        );
        assert_eq!(
            "least_tabu".parse::<FallbackPolicy>(),
            Ok(FallbackPolicy::LeastTabu)
        );
        assert!("none".parse::<FallbackPolicy>().is_err());
    }
}
