// Scenario Definitions — stock offer presets exercised by the bench
// All scenario logic is in configuration values and pass criteria;
// zero engine changes.

use vault_engine::{BonusConfig, FormulaKind, GameMode, MetricDef};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub config: BonusConfig,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// EV must land inside this closed band.
    pub ev_band: Option<(f64, f64)>,
    pub min_win_rate: Option<f64>,
    pub max_win_rate: Option<f64>,
    pub min_bust_rate: Option<f64>,
    pub max_composite_score: Option<f64>,
    /// Terminal balances must all be ≥ 0 and the distribution length must
    /// equal the trial count. Always on; listed for report visibility.
    pub require_structural_invariants: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            ev_band: None,
            min_win_rate: None,
            max_win_rate: None,
            min_bust_rate: None,
            max_composite_score: None,
            require_structural_invariants: true,
        }
    }
}

// ─── Scenario Catalog ───────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "BASELINE_CASINO",
            label: "Baseline 100% match casino",
            category: "casino",
            config: BonusConfig::default(),
            criteria: PassCriteria {
                // Busts dominate, but capped losses plus the bonus leave
                // the mean terminal balance above the deposit.
                ev_band: Some((20.0, 200.0)),
                max_win_rate: Some(15.0),
                min_bust_rate: Some(85.0),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "HIGH_VOLATILITY_GRIND",
            label: "High volatility, aggressive player",
            category: "casino",
            config: BonusConfig {
                volatility: 1.0,
                risk_score: 9.0,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                ev_band: Some((80.0, 350.0)),
                min_bust_rate: Some(90.0),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "SOFT_WAGERING",
            label: "Soft 3x wagering, high RTP",
            category: "casino",
            config: BonusConfig {
                wager_multiplier: 3.0,
                rtp: 99.0,
                volatility: 0.1,
                use_manual_bet: true,
                manual_bet_size: 2.0,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                // A near-fair game with light wagering: most trials finish
                // and the bonus carries the EV.
                min_win_rate: Some(90.0),
                ev_band: Some((40.0, 140.0)),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "MANUAL_FLAT_STAKE",
            label: "Manual 2.00 flat stake",
            category: "casino",
            config: BonusConfig {
                use_manual_bet: true,
                manual_bet_size: 2.0,
                loop_limit: 5000,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                ev_band: Some((-20.0, 120.0)),
                min_bust_rate: Some(75.0),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "STEP_BUDGET_STALL",
            label: "Tiny stake hits the loop limit",
            category: "casino",
            config: BonusConfig {
                use_manual_bet: true,
                manual_bet_size: 0.10,
                loop_limit: 200,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                // 200 bets of 0.10 cannot reach 7000 of wagering: every
                // trial times out and counts as a non-win.
                max_win_rate: Some(0.0),
                min_bust_rate: Some(100.0),
                ev_band: Some((80.0, 110.0)),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "SPORTSBOOK_EVENS",
            label: "Sportsbook 1.8 odds, 5% margin",
            category: "sportsbook",
            config: BonusConfig {
                mode: GameMode::Sportsbook,
                min_odds: 1.8,
                bookie_margin: 5.0,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                ev_band: Some((-95.0, -40.0)),
                min_bust_rate: Some(80.0),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "SPORTSBOOK_FREE_BET",
            label: "Free-bet promo, longshot odds",
            category: "sportsbook",
            config: BonusConfig {
                mode: GameMode::Sportsbook,
                min_odds: 4.0,
                bookie_margin: 6.0,
                is_free_bet: true,
                wager_multiplier: 10.0,
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                ev_band: Some((-40.0, 80.0)),
                min_bust_rate: Some(40.0),
                ..PassCriteria::default()
            },
        },
        Scenario {
            name: "OPERATOR_RED_FLAGS",
            label: "Over-generous match, weighted metrics",
            category: "risk",
            config: BonusConfig {
                deposit: 50.0,
                match_percent: 200.0,
                match_up_to: 500.0,
                wager_multiplier: 10.0,
                metrics: vec![
                    MetricDef {
                        id: "m3".to_string(),
                        name: "Cannibalization".to_string(),
                        formula: FormulaKind::Cannibalization,
                        target: 0.15,
                        weight: 2.0,
                        is_currency: false,
                        is_percentage: true,
                    },
                    MetricDef {
                        id: "m2".to_string(),
                        name: "Bonus Cost".to_string(),
                        formula: FormulaKind::BonusCost,
                        target: 0.35,
                        weight: 1.0,
                        is_currency: false,
                        is_percentage: true,
                    },
                ],
                ..BonusConfig::default()
            },
            criteria: PassCriteria {
                // 200% match on a 50 deposit: cannibalization (2.0 vs 0.15
                // target, weight 2) must always fire.
                max_composite_score: Some(11.0),
                ev_band: Some((40.0, 180.0)),
                ..PassCriteria::default()
            },
        },
    ]
}
