// Vault Benchmark Runner — offer-book scenario validation
// Monte Carlo (N=30 runs per scenario), seedable PRNG, JSON report output
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- SPORTSBOOK       # Filter by name
//   cargo run --release --bin bench -- --trials 5000    # Trials per run
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

mod report;
mod scenarios;
mod monte_carlo;

use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    trials: usize,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        trials: vault_engine::DEFAULT_TRIALS,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--trials" => {
                i += 1;
                if i < args.len() {
                    cli.trials = args[i].parse().unwrap_or(vault_engine::DEFAULT_TRIALS);
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Vault Benchmark Runner v0.2.0");
    println!(
        "  PRNG: ChaCha8Rng | Runs/scenario: {} | Trials/run: {} | Base seed: {}",
        cli.runs, cli.trials, cli.seed
    );
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<36} {:>5} {:>12} {:>10} {:>10} {:>7} {:>7}",
        "Scenario", "Pass%", "EV", "Win%", "Bust%", "Risk", "Time");
    println!("  {}", "-".repeat(94));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(scenario, cli.runs, cli.seed, cli.trials);

        let pass_pct = report.pass_rate * 100.0;
        let ev_mean = report.ev.mean;
        let ev_ci = (report.ev.ci_upper - report.ev.ci_lower) / 2.0;
        let win_mean = report.win_rate.mean;
        let bust_mean = report.bust_rate.mean;
        let risk_mean = report.composite_risk_score.mean;
        let time_mean = report.elapsed_ms.mean;

        let status = if pass_pct >= 93.3 { "PASS" } else { "FAIL" };

        println!("  {:<36} {:>4}% {:>7.1}±{:<4.1} {:>9.1}% {:>9.1}% {:>7.1} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            ev_mean, ev_ci,
            win_mean,
            bust_mean,
            risk_mean,
            time_mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 0.933).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(94));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        trials_per_run: cli.trials,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total.max(1) as f64,
        },
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
}
