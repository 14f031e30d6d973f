//! Example: Decode and normalize raw model output into a table spec.
//!
//! Usage:
//!   cargo run --example decode -- '<raw model output>' ['<prompt>']
//!
//! Example:
//!   cargo run --example decode -- 'Here you go: {"label":"Order","columns":[{"name":"user_id"}]}' 'create orders table'

use std::env;

use smelter::Smelter;

fn main() -> smelter::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example decode -- '<raw model output>' ['<prompt>']");
        std::process::exit(1);
    }

    let raw = &args[1];
    let prompt = args.get(2).map(String::as_str).unwrap_or("");

    let smelter = Smelter::new();
    let spec = smelter.decode_and_normalize(raw, prompt, "");

    if let Some(ref error) = spec.error {
        eprintln!("warning: decode degraded: {error}");
    }

    println!("{}", spec.to_pretty_json()?);
    Ok(())
}
