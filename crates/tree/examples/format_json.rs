//! Reads a JSON array of flat records and prints the rebuilt forest
//!
//! Usage:
//!   cargo run --example format_json -- records.json [id-key] [parent-key] [children-key]
//!
//! Set `RUST_LOG=debug` to see the build summary.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use flat_tree::json::{format_with_report, forest_to_values};
use flat_tree::PartialKeyConfig;
use serde_json::Value;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: format_json <records.json> [id-key] [parent-key] [children-key]");
        std::process::exit(2);
    };

    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let Value::Array(records) =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path))?
    else {
        anyhow::bail!("{} must contain a JSON array", path);
    };

    let mut keys = PartialKeyConfig::new();
    if let Some(id_key) = args.get(1) {
        keys = keys.id_key(id_key);
    }
    if let Some(parent_key) = args.get(2) {
        keys = keys.parent_id_key(parent_key);
    }
    if let Some(children_key) = args.get(3) {
        keys = keys.children_key(children_key);
    }

    let (keys, report) = format_with_report(records, Some(keys))?;

    for orphan in &report.orphans {
        eprintln!(
            "dropped subtree of {} record(s): parent {} never appeared",
            orphan.node.size(),
            orphan.missing_parent
        );
    }
    if report.detached > 0 {
        eprintln!("dropped {} record(s) caught in parent cycles", report.detached);
    }

    let forest = forest_to_values(report.forest, &keys.children_key);
    println!("{}", serde_json::to_string_pretty(&forest)?);

    Ok(())
}
