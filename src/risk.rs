// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Bonus Offer Simulation Suite ("The Vault") - Risk Scoring Engine

use crate::types::{
    BonusConfig, EvaluatedMetric, FormulaKind, RiskReport, SimulationSummary,
};

// ─── Formula Catalog ─────────────────────────────────────────────────────────

/// Inputs shared by every formula in the catalog, extracted once per report.
struct MetricContext {
    deposit: f64,
    bonus: f64,
    avg_end: f64,
    avg_wagered: f64,
    ev: f64,
    /// Bust rate as a fraction, not a percentage.
    bust_prob: f64,
}

impl MetricContext {
    fn new(config: &BonusConfig, summary: &SimulationSummary) -> Self {
        Self {
            deposit: config.deposit,
            bonus: config.bonus_amount(),
            avg_end: summary.average_end_balance,
            avg_wagered: summary.wager_completed_avg,
            ev: summary.ev,
            bust_prob: summary.bust_rate / 100.0,
        }
    }
}

impl FormulaKind {
    /// Evaluate one formula: the actual value, its display string, and the
    /// penalty contributed when the target is breached.
    fn evaluate(self, ctx: &MetricContext, target: f64) -> (f64, &'static str, f64) {
        match self {
            FormulaKind::HoldPercent => {
                let actual = (ctx.deposit + ctx.bonus - ctx.avg_end) / guard(ctx.avg_wagered);
                (actual, "(D+B-E)/W", penalty(actual < target, 2.0))
            }
            FormulaKind::BonusCost => {
                let actual = ctx.bonus / guard(ctx.avg_wagered);
                (actual, "B/W", penalty(actual > target, 3.0))
            }
            FormulaKind::Cannibalization => {
                let actual = ctx.bonus / guard(ctx.deposit);
                (actual, "B/D", penalty(actual > target, 4.0))
            }
            FormulaKind::NetContribution => {
                // Positive player EV is the operator's loss.
                (-ctx.ev, "NGR-Cost", penalty(ctx.ev > target, 5.0))
            }
            FormulaKind::ChurnProb => {
                (ctx.bust_prob, "P(Bust)", penalty(ctx.bust_prob > target, 2.0))
            }
            FormulaKind::RoiPercent => {
                let actual = ctx.ev / guard(ctx.deposit);
                (actual, "EV/D", penalty(actual > target, 3.0))
            }
        }
    }
}

/// Denominator guard: divisions fall back to 1 unit when the natural
/// denominator is zero, so no NaN/Infinity reaches the report.
fn guard(denominator: f64) -> f64 {
    if denominator == 0.0 {
        1.0
    } else {
        denominator
    }
}

fn penalty(breached: bool, score: f64) -> f64 {
    if breached {
        score
    } else {
        0.0
    }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Evaluate the configuration's metric list against one simulation run.
/// Deterministic; preserves metric order; an empty list scores 0.
pub fn score(config: &BonusConfig, summary: &SimulationSummary) -> RiskReport {
    let ctx = MetricContext::new(config, summary);

    let metrics: Vec<EvaluatedMetric> = config
        .metrics
        .iter()
        .map(|def| {
            let (actual, formula_string, score) = def.formula.evaluate(&ctx, def.target);
            EvaluatedMetric {
                id: def.id.clone(),
                name: def.name.clone(),
                formula: def.formula,
                formula_string: formula_string.to_string(),
                actual,
                target: def.target,
                weight: def.weight,
                score,
                is_currency: def.is_currency,
                is_percentage: def.is_percentage,
            }
        })
        .collect();

    let composite_score = metrics.iter().map(|m| m.score * m.weight).sum();

    RiskReport {
        metrics,
        composite_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_metrics, BonusConfig, MetricDef};

    fn summary(avg_end: f64, avg_wagered: f64, bust_rate: f64) -> SimulationSummary {
        SimulationSummary {
            ev: avg_end - 100.0,
            win_rate: 100.0 - bust_rate,
            bust_rate,
            average_end_balance: avg_end,
            median_end_balance: avg_end,
            min_balance: 0.0,
            max_balance: avg_end * 2.0,
            results_distribution: vec![0.0, avg_end, avg_end * 2.0],
            wager_completed_avg: avg_wagered,
            total_wagering_required: 7000.0,
            trials: 3,
        }
    }

    fn metric(formula: FormulaKind, target: f64, weight: f64) -> MetricDef {
        MetricDef {
            id: "t".to_string(),
            name: "test".to_string(),
            formula,
            target,
            weight,
            is_currency: false,
            is_percentage: false,
        }
    }

    #[test]
    fn empty_metric_list_scores_zero() {
        let config = BonusConfig {
            metrics: Vec::new(),
            ..BonusConfig::default()
        };
        let report = score(&config, &summary(80.0, 3000.0, 90.0));
        assert!(report.metrics.is_empty());
        assert_eq!(report.composite_score, 0.0);
    }

    #[test]
    fn hold_percent_breaches_below_target() {
        // Hold = (100 + 100 - 190) / 1000 = 0.01, below target 0.065.
        let config = BonusConfig {
            metrics: vec![metric(FormulaKind::HoldPercent, 0.065, 1.0)],
            ..BonusConfig::default()
        };
        let report = score(&config, &summary(190.0, 1000.0, 50.0));
        assert!((report.metrics[0].actual - 0.01).abs() < 1e-12);
        assert_eq!(report.metrics[0].score, 2.0);
        assert_eq!(report.composite_score, 2.0);
    }

    #[test]
    fn hold_percent_passes_at_or_above_target() {
        // Hold = (200 - 135) / 1000 = 0.065, not below target.
        let config = BonusConfig {
            metrics: vec![metric(FormulaKind::HoldPercent, 0.065, 1.0)],
            ..BonusConfig::default()
        };
        let report = score(&config, &summary(135.0, 1000.0, 50.0));
        assert_eq!(report.metrics[0].score, 0.0);
    }

    #[test]
    fn bonus_cost_and_cannibalization_breach_above_target() {
        let config = BonusConfig {
            metrics: vec![
                metric(FormulaKind::BonusCost, 0.35, 1.0),
                metric(FormulaKind::Cannibalization, 0.15, 1.0),
            ],
            ..BonusConfig::default()
        };
        // Bonus 100 / wagered 200 = 0.5 > 0.35; bonus 100 / deposit 100 = 1.0 > 0.15.
        let report = score(&config, &summary(90.0, 200.0, 80.0));
        assert_eq!(report.metrics[0].score, 3.0);
        assert_eq!(report.metrics[1].score, 4.0);
        assert_eq!(report.composite_score, 7.0);
    }

    #[test]
    fn net_contribution_flags_positive_player_ev() {
        let config = BonusConfig {
            metrics: vec![metric(FormulaKind::NetContribution, 0.0, 1.0)],
            ..BonusConfig::default()
        };
        // avg_end 120 → ev +20 → operator pays; actual reports -ev.
        let report = score(&config, &summary(120.0, 5000.0, 10.0));
        assert_eq!(report.metrics[0].actual, -20.0);
        assert_eq!(report.metrics[0].score, 5.0);

        // avg_end 80 → ev -20 → no breach.
        let report = score(&config, &summary(80.0, 5000.0, 10.0));
        assert_eq!(report.metrics[0].score, 0.0);
    }

    #[test]
    fn churn_uses_bust_fraction() {
        let config = BonusConfig {
            metrics: vec![metric(FormulaKind::ChurnProb, 0.08, 1.0)],
            ..BonusConfig::default()
        };
        let report = score(&config, &summary(80.0, 5000.0, 11.0));
        assert!((report.metrics[0].actual - 0.11).abs() < 1e-12);
        assert_eq!(report.metrics[0].score, 2.0);
    }

    #[test]
    fn roi_breaches_above_target() {
        let config = BonusConfig {
            metrics: vec![metric(FormulaKind::RoiPercent, 0.05, 2.0)],
            ..BonusConfig::default()
        };
        // ev +20 over deposit 100 → 0.2 > 0.05, weight 2 doubles it.
        let report = score(&config, &summary(120.0, 5000.0, 10.0));
        assert_eq!(report.metrics[0].score, 3.0);
        assert_eq!(report.composite_score, 6.0);
    }

    #[test]
    fn zero_weight_metric_is_neutral() {
        let breached = metric(FormulaKind::ChurnProb, 0.0, 0.0);
        let config = BonusConfig {
            metrics: vec![breached],
            ..BonusConfig::default()
        };
        let report = score(&config, &summary(80.0, 5000.0, 50.0));
        assert_eq!(report.metrics[0].score, 2.0);
        assert_eq!(report.composite_score, 0.0);
    }

    #[test]
    fn zero_wagered_denominator_guarded() {
        let config = BonusConfig::default();
        let report = score(&config, &summary(200.0, 0.0, 100.0));
        assert!(report.metrics.iter().all(|m| m.actual.is_finite()));
        assert!(report.composite_score.is_finite());
    }

    #[test]
    fn metric_order_is_preserved() {
        let config = BonusConfig::default();
        let report = score(&config, &summary(90.0, 3000.0, 60.0));
        let ids: Vec<&str> = report.metrics.iter().map(|m| m.id.as_str()).collect();
        let expected: Vec<String> = default_metrics().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
