// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Bonus Offer Simulation Suite ("The Vault") - Wager Path Simulator

use rand::Rng;

use crate::types::{BonusConfig, GameMode, SimulationSummary, BUST_EPSILON};

/// Minimum absolute stake. Stops derived bet sizes from underflowing to
/// zero and wagering in place forever.
const MIN_STAKE: f64 = 0.10;

/// Bet fraction of the starting bankroll at risk score 1.
const BET_FRACTION_FLOOR: f64 = 0.005;

/// Additional bet fraction gained across the full risk score range 1..10.
const BET_FRACTION_SPAN: f64 = 0.095;

/// Per-unit standard deviation at volatility 1.0 is 1 + VOLATILITY_SPAN.
const VOLATILITY_SPAN: f64 = 14.0;

// ─── Public API ──────────────────────────────────────────────────────────────

/// Run `trials` independent wagering trials of `config` and aggregate the
/// terminal balances. Pure apart from draws on the supplied generator;
/// callers wanting reproducible output pass a seeded RNG.
pub fn simulate<R: Rng>(config: &BonusConfig, trials: usize, rng: &mut R) -> SimulationSummary {
    let target = config.wagering_target();
    let stake = bet_size(config);

    let mut balances: Vec<f64> = Vec::with_capacity(trials);
    let mut total_end_balance = 0.0;
    let mut total_wagered = 0.0;
    let mut wins: usize = 0;

    for _ in 0..trials {
        let trial = run_trial(config, target, stake, rng);
        total_end_balance += trial.balance;
        total_wagered += trial.wagered;
        if trial.is_win(target) {
            wins += 1;
        }
        balances.push(trial.balance);
    }

    balances.sort_by(f64::total_cmp);

    let n = trials.max(1) as f64;
    let busts = trials - wins;
    let average_end_balance = total_end_balance / n;

    SimulationSummary {
        ev: average_end_balance - config.deposit,
        win_rate: wins as f64 / n * 100.0,
        bust_rate: busts as f64 / n * 100.0,
        average_end_balance,
        // Single indexed element, no interpolation for even counts.
        median_end_balance: balances.get(trials / 2).copied().unwrap_or(0.0),
        min_balance: balances.first().copied().unwrap_or(0.0),
        max_balance: balances.last().copied().unwrap_or(0.0),
        results_distribution: balances,
        wager_completed_avg: total_wagered / n,
        total_wagering_required: target,
        trials,
    }
}

/// Per-bet stake: the manual override, or a linear map of the player's
/// aggression onto a fraction of the starting bankroll, floored.
pub fn bet_size(config: &BonusConfig) -> f64 {
    if config.use_manual_bet {
        return config.manual_bet_size.max(MIN_STAKE);
    }
    let fraction = BET_FRACTION_FLOOR + ((config.risk_score - 1.0) / 9.0) * BET_FRACTION_SPAN;
    (config.start_bankroll() * fraction).max(MIN_STAKE)
}

// ─── Single Trial ────────────────────────────────────────────────────────────

struct TrialOutcome {
    balance: f64,
    wagered: f64,
}

impl TrialOutcome {
    /// A win completed the requirement with money left; everything else is
    /// a bust, including trials that ran out of steps with a positive
    /// balance.
    fn is_win(&self, target: f64) -> bool {
        self.balance >= BUST_EPSILON && self.wagered >= target
    }
}

fn run_trial<R: Rng>(
    config: &BonusConfig,
    target: f64,
    stake: f64,
    rng: &mut R,
) -> TrialOutcome {
    let mut balance = config.start_bankroll();
    let mut wagered = 0.0;
    let mut steps: u32 = 0;
    let mut free_bet_pending = config.is_free_bet && config.mode == GameMode::Sportsbook;

    while wagered < target && balance > 0.0 && steps < config.loop_limit {
        let bet = stake.min(balance);

        match config.mode {
            GameMode::Casino => {
                let z = standard_normal(rng);
                let std_dev = 1.0 + config.volatility * VOLATILITY_SPAN;
                let net_change = bet * (config.rtp / 100.0 - 1.0) + bet * std_dev * z;
                balance += net_change;
            }
            GameMode::Sportsbook => {
                let win_prob = (1.0 / config.min_odds) * (1.0 - config.bookie_margin / 100.0);
                let won = rng.gen::<f64>() < win_prob;
                if won {
                    balance += bet * (config.min_odds - 1.0);
                } else if !free_bet_pending {
                    balance -= bet;
                }
                // The free-bet stake was never at risk; the exemption is
                // consumed by the first bet, win or lose.
                free_bet_pending = false;
            }
        }

        wagered += bet;
        steps += 1;

        if balance < BUST_EPSILON {
            balance = 0.0;
        }
    }

    TrialOutcome { balance, wagered }
}

/// One standard-normal sample via the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen();
    let u2: f64 = rng.gen();
    // gen() is in [0, 1); shift away from 0 so the log stays finite.
    (-2.0 * (1.0 - u1).ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BonusConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn standard_normal_has_unit_moments() {
        let mut r = rng(7);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut r)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.02, "mean {mean} far from 0");
        assert!((var - 1.0).abs() < 0.05, "variance {var} far from 1");
    }

    #[test]
    fn bet_size_maps_aggression_range() {
        let mut config = BonusConfig::default(); // start bankroll 200
        config.risk_score = 1.0;
        assert!((bet_size(&config) - 200.0 * 0.005).abs() < 1e-12);
        config.risk_score = 10.0;
        assert!((bet_size(&config) - 200.0 * 0.10).abs() < 1e-12);
    }

    #[test]
    fn bet_size_floors_tiny_stakes() {
        let config = BonusConfig {
            deposit: 1.0,
            match_percent: 0.0,
            risk_score: 1.0,
            ..BonusConfig::default()
        };
        assert_eq!(bet_size(&config), MIN_STAKE);
    }

    #[test]
    fn bet_size_manual_override() {
        let config = BonusConfig {
            use_manual_bet: true,
            manual_bet_size: 2.5,
            ..BonusConfig::default()
        };
        assert_eq!(bet_size(&config), 2.5);
    }

    #[test]
    fn distribution_length_matches_trials() {
        let config = BonusConfig::default();
        let summary = simulate(&config, 250, &mut rng(1));
        assert_eq!(summary.results_distribution.len(), 250);
        assert_eq!(summary.trials, 250);
        assert!(summary.results_distribution.iter().all(|&b| b >= 0.0));
    }

    #[test]
    fn distribution_is_sorted_ascending() {
        let config = BonusConfig::default();
        let summary = simulate(&config, 300, &mut rng(2));
        let d = &summary.results_distribution;
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(summary.min_balance, d[0]);
        assert_eq!(summary.max_balance, d[d.len() - 1]);
    }

    #[test]
    fn ev_equals_average_minus_deposit() {
        let config = BonusConfig::default();
        let summary = simulate(&config, 500, &mut rng(3));
        assert_eq!(summary.ev, summary.average_end_balance - config.deposit);
    }

    #[test]
    fn win_and_bust_rates_partition() {
        let config = BonusConfig::default();
        let summary = simulate(&config, 400, &mut rng(4));
        assert!((summary.win_rate + summary.bust_rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn loop_limit_bounds_trial_length() {
        // One-step trials: the requirement is unreachable, so every trial
        // wagers exactly one stake and stops.
        let config = BonusConfig {
            loop_limit: 1,
            use_manual_bet: true,
            manual_bet_size: 5.0,
            ..BonusConfig::default()
        };
        let summary = simulate(&config, 200, &mut rng(5));
        assert_eq!(summary.win_rate, 0.0);
        assert!((summary.wager_completed_avg - 5.0).abs() < 1e-9);
    }

    #[test]
    fn seeded_runs_reproduce() {
        let config = BonusConfig::default();
        let a = simulate(&config, 100, &mut rng(42));
        let b = simulate(&config, 100, &mut rng(42));
        assert_eq!(a.results_distribution, b.results_distribution);
        assert_eq!(a.ev, b.ev);
    }

    #[test]
    fn sportsbook_free_bet_loss_keeps_balance() {
        // Odds high enough that the de-vigged win probability is ~0; a
        // single free bet that loses must not touch the balance.
        let config = BonusConfig {
            mode: GameMode::Sportsbook,
            is_free_bet: true,
            min_odds: 1_000_000.0,
            bookie_margin: 99.0,
            loop_limit: 1,
            use_manual_bet: true,
            manual_bet_size: 50.0,
            ..BonusConfig::default()
        };
        let summary = simulate(&config, 50, &mut rng(6));
        let start = config.start_bankroll();
        assert!(summary
            .results_distribution
            .iter()
            .all(|&b| (b - start).abs() < 1e-9));
    }

    #[test]
    fn sportsbook_second_loss_is_staked() {
        // Two bets, both losing: the first is free, the second costs the
        // full stake.
        let config = BonusConfig {
            mode: GameMode::Sportsbook,
            is_free_bet: true,
            min_odds: 1_000_000.0,
            bookie_margin: 99.0,
            loop_limit: 2,
            use_manual_bet: true,
            manual_bet_size: 50.0,
            ..BonusConfig::default()
        };
        let summary = simulate(&config, 50, &mut rng(7));
        let expected = config.start_bankroll() - 50.0;
        assert!(summary
            .results_distribution
            .iter()
            .all(|&b| (b - expected).abs() < 1e-9));
    }

    #[test]
    fn sportsbook_guaranteed_win_pays_net_odds() {
        // Margin 0 and odds ~1 make every bet a winner paying bet × (odds-1).
        let config = BonusConfig {
            mode: GameMode::Sportsbook,
            min_odds: 1.000001,
            bookie_margin: 0.0,
            loop_limit: 1,
            use_manual_bet: true,
            manual_bet_size: 10.0,
            ..BonusConfig::default()
        };
        let summary = simulate(&config, 20, &mut rng(8));
        let start = config.start_bankroll();
        assert!(summary
            .results_distribution
            .iter()
            .all(|&b| b > start && b < start + 0.01));
    }

    #[test]
    fn busted_balances_clamp_to_exactly_zero() {
        // High volatility, deep requirement: plenty of busts. Every
        // terminal balance is either exactly 0 or clear of the epsilon.
        let config = BonusConfig {
            volatility: 1.0,
            risk_score: 10.0,
            ..BonusConfig::default()
        };
        let summary = simulate(&config, 500, &mut rng(9));
        assert!(summary
            .results_distribution
            .iter()
            .all(|&b| b == 0.0 || b >= BUST_EPSILON));
        assert!(summary.bust_rate > 0.0);
    }
}
