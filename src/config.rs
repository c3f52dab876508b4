use std::fs;
use std::path::Path;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::{ShuffleError, ShuffleResult};
use crate::model::condition::Score;

pub const MIN_GROUP_SIZE: usize = 2;

/// Penalty weights. The repeat-pair weight sits well above the balance
/// terms so repeats are removed first.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    #[arg(long, default_value_t = 250.0)]
    pub forbid_pair: Score,
    #[arg(long, default_value_t = 6.0)]
    pub gender_imbalance: Score,
    #[arg(long, default_value_t = 4.0)]
    pub level_imbalance: Score,
    #[arg(long, default_value_t = 4.0)]
    pub exchange_imbalance: Score,
    #[arg(long, default_value_t = 1.0)]
    pub size_imbalance: Score,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            forbid_pair: 250.0,
            gender_imbalance: 6.0,
            level_imbalance: 4.0,
            exchange_imbalance: 4.0,
            size_imbalance: 1.0,
        }
    }
}

impl Weights {
    pub fn validate(&self) -> ShuffleResult<()> {
        let named = [
            ("forbid_pair", self.forbid_pair),
            ("gender_imbalance", self.gender_imbalance),
            ("level_imbalance", self.level_imbalance),
            ("exchange_imbalance", self.exchange_imbalance),
            ("size_imbalance", self.size_imbalance),
        ];
        for (name, value) in named {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ShuffleError::InvalidConfiguration(format!(
                    "weight {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Linear cooling from `start_temperature` to `end_temperature` over
/// `iterations` swap attempts.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealParams {
    #[arg(long, default_value_t = 10.0)]
    pub start_temperature: f64,
    #[arg(long, default_value_t = 0.05)]
    pub end_temperature: f64,
    #[arg(short, long, default_value_t = 20_000)]
    pub iterations: usize,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            start_temperature: 10.0,
            end_temperature: 0.05,
            iterations: 20_000,
        }
    }
}

impl AnnealParams {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_temperatures(mut self, start: f64, end: f64) -> Self {
        self.start_temperature = start;
        self.end_temperature = end;
        self
    }

    pub fn validate(&self) -> ShuffleResult<()> {
        if !(self.end_temperature.is_finite() && self.end_temperature > 0.0) {
            return Err(ShuffleError::InvalidConfiguration(format!(
                "end_temperature must be positive, got {}",
                self.end_temperature
            )));
        }
        if !(self.start_temperature.is_finite()
            && self.start_temperature >= self.end_temperature)
        {
            return Err(ShuffleError::InvalidConfiguration(format!(
                "start_temperature must be at least end_temperature, got {} < {}",
                self.start_temperature, self.end_temperature
            )));
        }
        Ok(())
    }

    /// Temperature for iteration `step`, never increasing with `step`.
    pub fn temperature_at(&self, step: usize) -> f64 {
        if self.iterations == 0 {
            return self.end_temperature;
        }
        let progress = step.min(self.iterations) as f64 / self.iterations as f64;
        self.start_temperature + (self.end_temperature - self.start_temperature) * progress
    }
}

/// Everything a run needs besides the roster and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub group_size: usize,
    pub anneal: AnnealParams,
    pub weights: Weights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_size: 4,
            anneal: AnnealParams::default(),
            weights: Weights::default(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ShuffleResult<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ShuffleResult<()> {
        validate_group_size(self.group_size)?;
        self.anneal.validate()?;
        self.weights.validate()
    }
}

pub fn validate_group_size(group_size: usize) -> ShuffleResult<()> {
    if group_size < MIN_GROUP_SIZE {
        return Err(ShuffleError::InvalidConfiguration(format!(
            "group size must be at least {MIN_GROUP_SIZE}, got {group_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = Weights::default();
        assert_eq!(weights.forbid_pair, 250.0);
        assert_eq!(weights.gender_imbalance, 6.0);
        assert_eq!(weights.level_imbalance, 4.0);
        assert_eq!(weights.exchange_imbalance, 4.0);
        assert_eq!(weights.size_imbalance, 1.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = Weights {
            level_imbalance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(ShuffleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_temperature_is_linear_and_non_increasing() {
        let params = AnnealParams::default()
            .with_temperatures(10.0, 1.0)
            .with_iterations(9);
        assert_eq!(params.temperature_at(0), 10.0);
        assert!((params.temperature_at(3) - 7.0).abs() < 1e-12);
        assert_eq!(params.temperature_at(9), 1.0);
        for step in 0..9 {
            assert!(params.temperature_at(step + 1) <= params.temperature_at(step));
        }
    }

    #[test]
    fn test_bad_temperatures_rejected() {
        assert!(AnnealParams::default()
            .with_temperatures(1.0, 0.0)
            .validate()
            .is_err());
        assert!(AnnealParams::default()
            .with_temperatures(0.5, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_group_size_minimum() {
        assert!(validate_group_size(1).is_err());
        assert!(validate_group_size(2).is_ok());
    }

    #[test]
    fn test_partial_config_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"group_size": 3, "weights": {"forbid_pair": 100.0}}"#)
                .unwrap();
        assert_eq!(config.group_size, 3);
        assert_eq!(config.weights.forbid_pair, 100.0);
        assert_eq!(config.weights.gender_imbalance, 6.0);
        assert_eq!(config.anneal, AnnealParams::default());
    }
}
