//! ringbake entry point
//!
//! Thin CLI around the baking engine: parse a handful of overrides, run one
//! bake, write the JSON artifact. No simulation logic lives here.

use std::path::PathBuf;
use std::process::ExitCode;

use ringbake::{BakeConfig, Baker};

const USAGE: &str = "usage: ringbake [--seed N] [--fps N] [--duration SECONDS] [--out PATH]";

struct CliArgs {
    config: BakeConfig,
    out: PathBuf,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config = BakeConfig::default();
    let mut out = PathBuf::from("trace.json");

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{name} requires a value\n{USAGE}"))
        };
        match flag.as_str() {
            "--seed" => {
                config.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("--seed: {e}"))?;
            }
            "--fps" => {
                config.fps = value("--fps")?
                    .parse()
                    .map_err(|e| format!("--fps: {e}"))?;
            }
            "--duration" => {
                config.duration_seconds = value("--duration")?
                    .parse()
                    .map_err(|e| format!("--duration: {e}"))?;
            }
            "--out" => {
                out = PathBuf::from(value("--out")?);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}\n{USAGE}")),
        }
    }
    Ok(CliArgs { config, out })
}

fn run() -> Result<(), String> {
    let CliArgs { config, out } = parse_args()?;

    let baker = Baker::new(config).map_err(|e| e.to_string())?;
    let trace = baker.run(chrono::Utc::now()).map_err(|e| e.to_string())?;

    let json = trace.to_json().map_err(|e| e.to_string())?;
    std::fs::write(&out, json).map_err(|e| format!("writing {}: {e}", out.display()))?;
    log::info!("wrote {} frames to {}", trace.len(), out.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
