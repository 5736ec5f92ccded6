// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N-1, computing mean ± 95% CI

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vault_engine::{run, BUST_EPSILON};

use crate::report::*;
use crate::scenarios::Scenario;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(scenario: &Scenario, seed: u64, trials: usize) -> BenchResult {
    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let report = run(&scenario.config, trials, &mut rng);
    let summary = &report.summary;

    let elapsed = start.elapsed();
    let elapsed_ms = elapsed.as_millis();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let breached_metrics = report
        .risk_metrics
        .iter()
        .filter(|m| m.score > 0.0)
        .count();

    // Evaluate pass/fail
    let c = &scenario.criteria;
    let mut pass = true;
    if c.require_structural_invariants {
        pass &= summary.results_distribution.len() == trials
            && summary
                .results_distribution
                .iter()
                .all(|&b| b == 0.0 || b >= BUST_EPSILON)
            && (summary.win_rate + summary.bust_rate - 100.0).abs() < 1e-9;
    }
    if let Some((lo, hi)) = c.ev_band {
        pass &= summary.ev >= lo && summary.ev <= hi;
    }
    if let Some(min_win) = c.min_win_rate {
        pass &= summary.win_rate >= min_win;
    }
    if let Some(max_win) = c.max_win_rate {
        pass &= summary.win_rate <= max_win;
    }
    if let Some(min_bust) = c.min_bust_rate {
        pass &= summary.bust_rate >= min_bust;
    }
    if let Some(max_score) = c.max_composite_score {
        pass &= report.composite_risk_score <= max_score;
    }

    BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        trials,
        ev: summary.ev,
        win_rate: summary.win_rate,
        bust_rate: summary.bust_rate,
        average_end_balance: summary.average_end_balance,
        median_end_balance: summary.median_end_balance,
        max_balance: summary.max_balance,
        wager_completed_avg: summary.wager_completed_avg,
        total_wagering_required: summary.total_wagering_required,
        composite_risk_score: report.composite_risk_score,
        breached_metrics,
        elapsed_ms,
        trials_per_sec: trials as f64 / elapsed_secs,
    }
}

/// Run Monte Carlo: N seeded runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    trials: usize,
) -> MonteCarloReport {
    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, seed, trials));
    }

    aggregate(scenario, results)
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = passed as f64 / n.max(1) as f64;

    let ev = Stats::from_samples(&results.iter().map(|r| r.ev).collect::<Vec<_>>());
    let win_rate = Stats::from_samples(&results.iter().map(|r| r.win_rate).collect::<Vec<_>>());
    let bust_rate = Stats::from_samples(&results.iter().map(|r| r.bust_rate).collect::<Vec<_>>());
    let average_end_balance = Stats::from_samples(
        &results.iter().map(|r| r.average_end_balance).collect::<Vec<_>>(),
    );
    let wager_completed_avg = Stats::from_samples(
        &results.iter().map(|r| r.wager_completed_avg).collect::<Vec<_>>(),
    );
    let composite_risk_score = Stats::from_samples(
        &results.iter().map(|r| r.composite_risk_score).collect::<Vec<_>>(),
    );
    let elapsed_ms =
        Stats::from_samples(&results.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>());
    let trials_per_sec =
        Stats::from_samples(&results.iter().map(|r| r.trials_per_sec).collect::<Vec<_>>());

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        ev,
        win_rate,
        bust_rate,
        average_end_balance,
        wager_completed_avg,
        composite_risk_score,
        elapsed_ms,
        trials_per_sec,
        individual_runs: results,
    }
}
