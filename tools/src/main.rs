//! life-runner: headless driver for the life engine.
//!
//! Reads commands from stdin, one per line, either JSON
//! (`{"cmd":"toggle_cell","x":1,"y":2}`) or text (`toggle 1 2`), plus the
//! runner-only lines `state` and `quit`. Writes a snapshot after every
//! command and every scheduled generation.
//!
//! Usage:
//!   life-runner --width 40 --height 20 --interval 200 --seed 7 --density 0.3
//!   life-runner --config life.json --paused --text

use anyhow::Result;
use life_core::{
    command::Command,
    config::EngineConfig,
    engine::SimEngine,
    snapshot::SimSnapshot,
    types::Millis,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

enum Output {
    Json,
    Text,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match arg_value(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.width = parse_arg(&args, "--width", config.width);
    config.height = parse_arg(&args, "--height", config.height);
    config.interval_ms = parse_arg(&args, "--interval", config.interval_ms);
    config.density = parse_arg(&args, "--density", config.density);
    if let Some(seed) = arg_value(&args, "--seed").and_then(|s| s.parse().ok()) {
        config.seed = Some(seed);
    }
    if args.iter().any(|a| a == "--paused") {
        config.start_paused = true;
    }
    let max_steps = parse_arg(&args, "--max-steps", 0u64);
    let output = if args.iter().any(|a| a == "--text") { Output::Text } else { Output::Json };

    let mut engine = SimEngine::new(&config);
    let commands = spawn_stdin_reader();
    run_loop(&mut engine, &commands, max_steps, &output)
}

/// Forward stdin lines to the engine thread. The engine itself is never
/// shared; this thread only moves strings.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_loop(
    engine: &mut SimEngine,
    commands: &Receiver<String>,
    max_steps: u64,
    output: &Output,
) -> Result<()> {
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as Millis;
    let mut stdout = io::stdout();
    let mut stdin_open = true;
    let mut scheduled_steps = 0u64;

    emit(&mut stdout, output, &engine.snapshot())?;

    loop {
        let pending = engine.pending_tick();
        let wait = pending.map(|tick| Duration::from_millis(tick.due_ms.saturating_sub(now_ms())));

        let received = match (stdin_open, wait) {
            (true, Some(wait)) => commands.recv_timeout(wait),
            (true, None) => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
            (false, Some(wait)) => {
                thread::sleep(wait);
                Err(RecvTimeoutError::Timeout)
            }
            // Paused with no more input: nothing can ever happen again.
            (false, None) => break,
        };

        match received {
            Ok(line) => {
                engine.set_now(now_ms());
                if !handle_line(engine, &line, &mut stdout, output)? {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::debug!("stdin closed");
                stdin_open = false;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let Some(tick) = engine.pending_tick() {
            if engine.fire(tick, now_ms()) {
                scheduled_steps += 1;
                emit(&mut stdout, output, &engine.snapshot())?;
                if max_steps > 0 && scheduled_steps >= max_steps {
                    log::info!("reached {max_steps} scheduled steps");
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Apply one input line. Returns false when the runner should stop.
fn handle_line(
    engine: &mut SimEngine,
    line: &str,
    stdout: &mut io::Stdout,
    output: &Output,
) -> Result<bool> {
    match line.trim() {
        "" => return Ok(true),
        "quit" => return Ok(false),
        "state" => {
            emit(stdout, output, &engine.snapshot())?;
            return Ok(true);
        }
        _ => {}
    }

    match Command::parse_line(line).and_then(|cmd| engine.apply(cmd)) {
        Ok(snapshot) => emit(stdout, output, &snapshot)?,
        Err(e) => {
            log::warn!("command '{}' failed: {e}", line.trim());
            let err_json = serde_json::json!({ "error": e.to_string() });
            writeln!(stdout, "{err_json}")?;
            stdout.flush()?;
        }
    }
    Ok(true)
}

fn emit(stdout: &mut io::Stdout, output: &Output, snapshot: &SimSnapshot) -> Result<()> {
    match output {
        Output::Json => writeln!(stdout, "{}", serde_json::to_string(snapshot)?)?,
        Output::Text => {
            write!(stdout, "{}", snapshot.render_text())?;
            writeln!(
                stdout,
                "gen {} | alive {} | dead {} | step {}ms | runtime {:.1}s | {}",
                snapshot.generation,
                snapshot.total_alive,
                snapshot.dead_count,
                snapshot.last_step_duration_ms,
                snapshot.total_simulated_ms as f64 / 1000.0,
                if snapshot.paused { "paused" } else { "running" }
            )?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
