//! twin-runner: headless what-if runner for the TrialPulse digital twin.
//!
//! Usage:
//!   twin-runner --scenario reassign --capacity 80
//!   twin-runner --compare --capacity 120 --json
//!   twin-runner --scenario baseline --sweep 10
//!   twin-runner --ipc-mode --data-dir ./data

use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use trialpulse_core::{
    analysis::{capacity_sweep, compare_scenarios},
    capacity::CapacityFactor,
    command::TwinCommand,
    config::TwinConfig,
    projection::{project_scenario, Projection},
    scenario::Scenario,
    session::TwinSession,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: TwinCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let json = has_flag(&args, "--json");
    let compare = has_flag(&args, "--compare");
    let sweep_step = parse_arg::<u16>(&args, "--sweep")?;
    let capacity_pct = parse_arg::<i64>(&args, "--capacity")?.unwrap_or(CapacityFactor::NOMINAL as i64);
    let scenario: Scenario = match arg_value(&args, "--scenario") {
        Some(name) => name.parse()?,
        None => Scenario::default(),
    };

    let config = match arg_value(&args, "--data-dir") {
        Some(dir) => TwinConfig::load(dir)?,
        None => TwinConfig::builtin(),
    };

    if ipc_mode {
        let mut session = TwinSession::new(config)?;
        return run_ipc_loop(&mut session);
    }

    let capacity = CapacityFactor::new(capacity_pct)?;

    if compare {
        let comparison = compare_scenarios(&config, capacity)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else {
            println!("=== SCENARIO COMPARISON @ {capacity} capacity ===");
            for projection in &comparison.projections {
                print_projection(&config, projection)?;
            }
            println!("  best (lowest +90d backlog): {}", comparison.best);
        }
        return Ok(());
    }

    if let Some(step) = sweep_step {
        let sweep = capacity_sweep(&config, scenario, step)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&sweep)?);
        } else {
            print_sweep(scenario, &sweep);
        }
        return Ok(());
    }

    let projection = project_scenario(&config, scenario, capacity)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        println!("TrialPulse Digital Twin - twin-runner");
        println!("  scenario:  {scenario}");
        println!("  capacity:  {capacity}");
        println!();
        print_projection(&config, &projection)?;
    }
    Ok(())
}

fn run_ipc_loop(session: &mut TwinSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    writeln!(stdout, "{}", snapshot_reply(session))?;
    stdout.flush()?;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_line(session, &buffer) {
            Some(reply) => writeln!(stdout, "{reply}")?,
            None => break,
        }
        stdout.flush()?;
    }

    log::info!(
        "Session {} closed after {} events",
        session.session_id,
        session.log().len()
    );
    Ok(())
}

/// One IPC request in, one reply out. `None` means the client asked to quit.
fn handle_line(session: &mut TwinSession, line: &str) -> Option<serde_json::Value> {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return Some(error_reply(&e.to_string())),
    };

    match cmd {
        IpcCommand::Quit => None,
        IpcCommand::GetState => Some(snapshot_reply(session)),
        IpcCommand::Command { command } => match session.apply(command) {
            Ok(_) => Some(snapshot_reply(session)),
            Err(e) => Some(error_reply(&e.to_string())),
        },
    }
}

fn snapshot_reply(session: &TwinSession) -> serde_json::Value {
    serde_json::to_value(session.snapshot()).unwrap_or_else(|e| error_reply(&e.to_string()))
}

fn error_reply(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

fn print_projection(config: &TwinConfig, p: &Projection) -> Result<()> {
    let profile = config
        .profile(p.scenario)
        .with_context(|| format!("no profile for {}", p.scenario))?;

    println!("=== {} ===", profile.label);
    println!("  {}", profile.description);
    println!("  {:<6} {:>9} {:>8}", "day", "workload", "backlog");
    for point in &p.points {
        println!("  {:<6} {:>9} {:>8}", point.label, point.workload, point.backlog);
    }
    println!("  recovery metrics (current -> projected 90d):");
    for row in &p.metrics {
        println!("    {:<11} {:>3} -> {:>3}", row.label, row.current, row.projected);
    }
    println!("  projected DB lock:  {}", p.db_lock);
    println!("  financial impact:   {}", p.financial_impact_label());
    println!();
    Ok(())
}

fn print_sweep(scenario: Scenario, sweep: &[Projection]) {
    println!("=== CAPACITY SWEEP: {scenario} ===");
    println!("  {:>8}  {:>20}  {:>12}", "capacity", "backlog", "metrics");
    for p in sweep {
        let backlog = p
            .backlog_series()
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join("/");
        let m = &p.projected_metrics;
        println!(
            "  {:>8}  {:>20}  {:>3}/{:>3}/{:>3}",
            p.capacity.to_string(),
            backlog,
            m.visit_completion,
            m.query_resolution,
            m.data_conformance
        );
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// `Ok(None)` when the flag is absent; an error when its value does not parse.
fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    arg_value(args, flag)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| anyhow::anyhow!("invalid value '{v}' for {flag}"))
        })
        .transpose()
}
