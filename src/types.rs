// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Bonus Offer Simulation Suite ("The Vault") - Type Definitions

use serde::{Serialize, Deserialize};

/// Default number of independent wagering trials per simulation run.
pub const DEFAULT_TRIALS: usize = 2000;

/// A trial balance below this is treated as fully busted and clamped to 0.
pub const BUST_EPSILON: f64 = 0.01;

// ─── Game Mode ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Casino,
    Sportsbook,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Casino
    }
}

// ─── Risk Metric Catalog ─────────────────────────────────────────────────────

/// Closed catalog of operator risk formulas. One variant per formula so the
/// scoring dispatch is exhaustive at compile time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormulaKind {
    HoldPercent,
    BonusCost,
    Cannibalization,
    NetContribution,
    ChurnProb,
    RoiPercent,
}

/// Operator-defined risk metric: formula selection, breach threshold,
/// weight in the composite score, and display hints for the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDef {
    pub id: String,
    pub name: String,
    #[serde(rename = "formulaType")]
    pub formula: FormulaKind,
    pub target: f64,
    pub weight: f64,
    #[serde(default)]
    pub is_currency: bool,
    #[serde(default)]
    pub is_percentage: bool,
}

/// The stock metric catalog shipped with the calculator.
pub fn default_metrics() -> Vec<MetricDef> {
    let pct = |id: &str, name: &str, formula, target| MetricDef {
        id: id.to_string(),
        name: name.to_string(),
        formula,
        target,
        weight: 1.0,
        is_currency: false,
        is_percentage: true,
    };
    vec![
        pct("m1", "Hold %", FormulaKind::HoldPercent, 0.065),
        pct("m2", "Bonus Cost", FormulaKind::BonusCost, 0.35),
        pct("m3", "Cannibalization", FormulaKind::Cannibalization, 0.15),
        MetricDef {
            id: "m4".to_string(),
            name: "VIP Net Contribution".to_string(),
            formula: FormulaKind::NetContribution,
            target: 0.0,
            weight: 1.0,
            is_currency: true,
            is_percentage: false,
        },
        pct("m5", "Churn risk", FormulaKind::ChurnProb, 0.08),
    ]
}

// ─── Bonus Configuration ─────────────────────────────────────────────────────

/// One deposit-match offer plus the player model wagering through it.
/// Immutable for the duration of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusConfig {
    #[serde(default)]
    pub mode: GameMode,
    pub deposit: f64,
    pub match_percent: f64,
    pub match_up_to: f64,
    pub wager_multiplier: f64,
    /// Theoretical return-to-player percentage, (0, 100] (casino mode).
    pub rtp: f64,
    /// Outcome variance control in [0, 1] (casino mode).
    pub volatility: f64,
    /// Player aggression in [1, 10]; drives bet sizing when manual is off.
    pub risk_score: f64,
    #[serde(default)]
    pub use_manual_bet: bool,
    #[serde(default)]
    pub manual_bet_size: f64,
    /// Fixed decimal odds per bet (sportsbook mode).
    #[serde(default = "default_min_odds")]
    pub min_odds: f64,
    /// House margin percentage removed from the implied win probability.
    #[serde(default)]
    pub bookie_margin: f64,
    /// First bet of each trial is a non-staked free bet.
    #[serde(default)]
    pub is_free_bet: bool,
    /// Hard cap on bet events per trial.
    pub loop_limit: u32,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricDef>,
}

fn default_min_odds() -> f64 {
    1.8
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Casino,
            deposit: 100.0,
            match_percent: 100.0,
            match_up_to: 500.0,
            wager_multiplier: 35.0,
            rtp: 96.5,
            volatility: 0.5,
            risk_score: 5.0,
            use_manual_bet: false,
            manual_bet_size: 2.0,
            min_odds: 1.8,
            bookie_margin: 5.0,
            is_free_bet: false,
            loop_limit: 1500,
            metrics: default_metrics(),
        }
    }
}

impl BonusConfig {
    /// Bonus credited on top of the deposit: match% of the deposit, capped.
    pub fn bonus_amount(&self) -> f64 {
        (self.deposit * (self.match_percent / 100.0)).min(self.match_up_to)
    }

    /// Deposit plus bonus, the balance a trial starts from.
    pub fn start_bankroll(&self) -> f64 {
        self.deposit + self.bonus_amount()
    }

    /// Total stake volume required before cashout. Deterministic.
    pub fn wagering_target(&self) -> f64 {
        self.start_bankroll() * self.wager_multiplier
    }

    /// Reject configurations outside the documented ranges before they
    /// reach the simulator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deposit <= 0.0 {
            return Err(ConfigError::NonPositiveDeposit(self.deposit));
        }
        if self.rtp <= 0.0 || self.rtp > 100.0 {
            return Err(ConfigError::RtpOutOfRange(self.rtp));
        }
        if !(0.0..=1.0).contains(&self.volatility) {
            return Err(ConfigError::VolatilityOutOfRange(self.volatility));
        }
        if !(1.0..=10.0).contains(&self.risk_score) {
            return Err(ConfigError::RiskScoreOutOfRange(self.risk_score));
        }
        if self.min_odds <= 1.0 {
            return Err(ConfigError::MinOddsOutOfRange(self.min_odds));
        }
        if self.loop_limit == 0 {
            return Err(ConfigError::ZeroLoopLimit);
        }
        Ok(())
    }
}

/// Errors from configuration validation at the boundary.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("deposit must be positive, got {0}")]
    NonPositiveDeposit(f64),
    #[error("rtp must be in (0, 100], got {0}")]
    RtpOutOfRange(f64),
    #[error("volatility must be in [0, 1], got {0}")]
    VolatilityOutOfRange(f64),
    #[error("risk score must be in [1, 10], got {0}")]
    RiskScoreOutOfRange(f64),
    #[error("minimum odds must exceed 1.0, got {0}")]
    MinOddsOutOfRange(f64),
    #[error("loop limit must be nonzero")]
    ZeroLoopLimit,
}

// ─── Simulation Summary ──────────────────────────────────────────────────────

/// Aggregate outcome of one simulation run: N terminal balances reduced to
/// the statistics the risk engine and the charts consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    /// Mean terminal balance minus the deposit.
    pub ev: f64,
    /// Percentage of trials that completed the wagering requirement.
    pub win_rate: f64,
    /// Percentage of trials that did not (busted or ran out of steps).
    pub bust_rate: f64,
    pub average_end_balance: f64,
    pub median_end_balance: f64,
    pub min_balance: f64,
    pub max_balance: f64,
    /// All terminal balances, sorted ascending. Length equals `trials`.
    pub results_distribution: Vec<f64>,
    /// Mean total amount wagered per trial.
    pub wager_completed_avg: f64,
    /// The single deterministic wagering target shared by all trials.
    pub total_wagering_required: f64,
    pub trials: usize,
}

// ─── Risk Report ─────────────────────────────────────────────────────────────

/// A metric definition evaluated against one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedMetric {
    pub id: String,
    pub name: String,
    #[serde(rename = "formulaType")]
    pub formula: FormulaKind,
    pub formula_string: String,
    pub actual: f64,
    pub target: f64,
    pub weight: f64,
    pub score: f64,
    #[serde(default)]
    pub is_currency: bool,
    #[serde(default)]
    pub is_percentage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Evaluated metrics in caller-supplied order.
    pub metrics: Vec<EvaluatedMetric>,
    /// Σ score × weight over all metrics.
    pub composite_score: f64,
}

/// Combined output of the simulate-then-score pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusReport {
    #[serde(flatten)]
    pub summary: SimulationSummary,
    pub risk_metrics: Vec<EvaluatedMetric>,
    pub composite_risk_score: f64,
}

// ─── Histogram ───────────────────────────────────────────────────────────────

/// One chart bin over the terminal-balance distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    /// Display label, e.g. "0-35".
    pub range: String,
    /// Bin midpoint, used as the x position.
    pub value: f64,
    pub count: usize,
}
