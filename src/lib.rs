// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Bonus Offer Simulation Suite ("The Vault")

pub mod types;
pub mod simulation;
pub mod risk;
pub mod histogram;

pub use types::*;
pub use simulation::{bet_size, simulate};
pub use risk::score;
pub use histogram::histogram;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// Simulate then score in one pass; the two are always invoked together.
pub fn run<R: Rng>(config: &BonusConfig, trials: usize, rng: &mut R) -> BonusReport {
    let summary = simulate(config, trials, rng);
    let report = score(config, &summary);
    BonusReport {
        summary,
        risk_metrics: report.metrics,
        composite_risk_score: report.composite_score,
    }
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Engine handle for the web UI: holds the active configuration, an
/// entropy-seeded PRNG, and the last run for histogram queries.
#[wasm_bindgen]
pub struct VaultSimulation {
    config: BonusConfig,
    rng: ChaCha8Rng,
    last: Option<BonusReport>,
}

#[wasm_bindgen]
impl VaultSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            config: BonusConfig::default(),
            rng: ChaCha8Rng::from_entropy(),
            last: None,
        }
    }

    /// Replace the active configuration. Rejects values outside the
    /// documented ranges before they reach the simulator.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: BonusConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.config = config;
        self.last = None;
        Ok(())
    }

    pub fn get_config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.config).unwrap_or(JsValue::NULL)
    }

    /// Run the full pipeline with the default trial count.
    pub fn run(&mut self) -> JsValue {
        self.run_trials(DEFAULT_TRIALS)
    }

    /// Run the full pipeline with an explicit trial count.
    pub fn run_trials(&mut self, trials: usize) -> JsValue {
        let report = run(&self.config, trials, &mut self.rng);
        let js = serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL);
        self.last = Some(report);
        js
    }

    /// Bin the last run's terminal-balance distribution for the chart.
    /// Empty sequence when nothing has run yet.
    pub fn histogram(&self, bins: usize) -> JsValue {
        let data = match &self.last {
            Some(report) => histogram::histogram(&report.summary.results_distribution, bins),
            None => Vec::new(),
        };
        serde_wasm_bindgen::to_value(&data).unwrap_or(JsValue::NULL)
    }

    /// Restore the stock configuration and drop the last run.
    pub fn reset(&mut self) {
        self.config = BonusConfig::default();
        self.last = None;
    }
}

impl Default for VaultSimulation {
    fn default() -> Self {
        Self::new()
    }
}
