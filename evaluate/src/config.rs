use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::warn;

/// Weights of the four member metrics in the overall score
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeightConfig {
    pub task: f64,
    pub communication: f64,
    pub collaboration: f64,
    pub contribution: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            task: 0.40,
            communication: 0.25,
            collaboration: 0.20,
            contribution: 0.15,
        }
    }
}

impl WeightConfig {
    fn sum(&self) -> f64 {
        self.task + self.communication + self.collaboration + self.contribution
    }

    /// Rescales the weights so they sum to 1. Negative or all-zero weights fall
    /// back to the defaults, the overall score must stay a convex combination.
    pub fn normalized(&self) -> Self {
        let values = [
            self.task,
            self.communication,
            self.collaboration,
            self.contribution,
        ];
        let sum = self.sum();
        if values.iter().any(|w| !w.is_finite() || *w < 0.0) || sum <= 0.0 {
            warn!(weights = ?self, "invalid metric weights, using defaults");
            return Self::default();
        }
        if (sum - 1.0).abs() <= 1e-9 {
            return self.clone();
        }
        warn!(sum, "metric weights do not sum to 1, normalizing");
        Self {
            task: self.task / sum,
            communication: self.communication / sum,
            collaboration: self.collaboration / sum,
            contribution: self.contribution / sum,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrendConfig {
    /// Score delta against the previous evaluation below which the trend is stable.
    pub tolerance: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// Everything the calculator can be tuned with
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EvaluationContext {
    pub weights: WeightConfig,
    pub trend: TrendConfig,
    pub api: ApiConfig,
}

impl EvaluationContext {
    /// Loads `config_path` (TOML, optional) overlaid by `TEAMEVAL_*` variables,
    /// e.g. `TEAMEVAL_WEIGHTS__TASK=0.5` or `TEAMEVAL_API__BASE_URL=...`.
    pub fn load_config(config_path: &str) -> anyhow::Result<Self> {
        let ctx: Self = Config::builder()
            .add_source(
                File::with_name(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TEAMEVAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| anyhow::anyhow!("Failed to load config"))?
            .try_deserialize()
            .with_context(|| anyhow::anyhow!("Failed to deserialize config"))?;
        Ok(ctx.normalized())
    }

    pub fn normalized(mut self) -> Self {
        self.weights = self.weights.normalized();
        self
    }
}
