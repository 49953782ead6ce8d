//! One-shot screening driver.
//!
//! Evaluates a single form submission from a JSON record file and prints the
//! assessment (and the model's importance vector) as JSON on stdout.
//!
//! Usage:
//!   `dysrisk-screen <model-dir> <variant> <record.json>`
//!
//! Variants: `linear`, `ensemble`, `linear-legacy`.
//! Diagnostics go to stderr; set `RUST_LOG=debug` for cache/load detail.

use std::fs;
use std::process::ExitCode;

use serde_json::json;

use dysrisk::{session, ModelStore, ModelVariant, RawRecord, StoreConfig};

struct Args {
    model_dir: String,
    variant: ModelVariant,
    record_path: String,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        return Err("usage: dysrisk-screen <model-dir> <variant> <record.json>".to_string());
    }
    let variant = ModelVariant::from_identifier(&args[1]).map_err(|e| e.to_string())?;
    Ok(Args {
        model_dir: args[0].clone(),
        variant,
        record_path: args[2].clone(),
    })
}

fn run(args: &Args) -> Result<(), String> {
    let raw = fs::read_to_string(&args.record_path)
        .map_err(|e| format!("cannot read {}: {e}", args.record_path))?;
    let record: RawRecord =
        serde_json::from_str(&raw).map_err(|e| format!("malformed record: {e}"))?;

    let store = ModelStore::new(StoreConfig::new(&args.model_dir));
    let assessment = session::evaluate(&store, args.variant, &record).map_err(|e| e.to_string())?;
    let importance = session::explain(&store, args.variant).map_err(|e| e.to_string())?;

    let output = json!({
        "assessment": assessment,
        "importance": importance,
        "feature_names": args.variant.schema().feature_names(),
    });
    println!("{}", serde_json::to_string_pretty(&output).expect("serializable output"));
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
