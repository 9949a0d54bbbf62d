
#[macro_use] extern crate somatic;

use std::env;
use env_logger::Env;
use somatic::{batch, process, summary};

const USAGE: &str = "
Somatic builds per-cancer-type gene to patient mutation reports from
TCGA somatic mutation (MAF) files.

Usage:
  somatic <subcommand>

Available subcommands:
  process     Build the mutation report for a single MAF file.
  batch       Build mutation reports for all cancer types in a data directory.
  histogram   Summarize mutated gene counts per patient from a report.
";

fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let args: Vec<String> = env::args().collect();
	match args.get(1).map(|s| s.as_str()) {
		Some("process") => process::main(),
		Some("batch") => batch::main(),
		Some("histogram") => summary::main(),
		None => eprintln!("{}", USAGE),
		Some(_) => error!("Invalid subcommand.\n\n{}", USAGE)
	}
}
