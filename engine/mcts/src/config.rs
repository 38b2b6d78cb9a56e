//! MCTS configuration.

use std::time::Duration;

use crate::search::SearchError;

/// Tunable parameters for a search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock budget per decision.
    pub time_budget: Duration,

    /// UCB1 exploration constant. sqrt(2) is the classic choice.
    pub exploration: f64,

    /// Answer forced positions (immediate wins, forced blocks, a single
    /// safe move) directly, without building a tree.
    pub tactical: bool,

    /// Probability that a rollout move is steered toward the center
    /// columns instead of drawn uniformly.
    pub center_bias: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(2),
            exploration: std::f64::consts::SQRT_2,
            tactical: true,
            center_bias: 0.75,
        }
    }
}

impl MctsConfig {
    /// Reject parameters that would make the search meaningless.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.time_budget.is_zero() {
            return Err(SearchError::ZeroBudget);
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidExploration(self.exploration));
        }
        if !(0.0..=1.0).contains(&self.center_bias) {
            return Err(SearchError::InvalidCenterBias(self.center_bias));
        }
        Ok(())
    }

    /// Small budget for fast unit tests.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_millis(50),
            ..Self::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_tactical(mut self, enabled: bool) -> Self {
        self.tactical = enabled;
        self
    }

    pub fn with_center_bias(mut self, bias: f64) -> Self {
        self.center_bias = bias;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(MctsConfig::default().validate().is_ok());
        assert!(MctsConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn rejects_zero_budget() {
        let config = MctsConfig::default().with_time_budget(Duration::ZERO);
        assert_eq!(config.validate(), Err(SearchError::ZeroBudget));
    }

    #[test]
    fn rejects_negative_exploration() {
        let config = MctsConfig::default().with_exploration(-1.0);
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidExploration(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_center_bias() {
        let config = MctsConfig::default().with_center_bias(1.5);
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidCenterBias(_))
        ));
    }
}
