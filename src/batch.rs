
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::{info, warn};
use rayon::prelude::*;
use crate::common::parse_args;
use crate::errors::{Result, SomaticError};
use crate::maf::ExtractOptions;
use crate::process::process_file;
use crate::report::{ReportStats, SortOrder};

const USAGE: &str = "
Usage:
  somatic batch [options] <data_dir>

Options:
  --out-dir=PATH  Root directory for the per-cancer reports [default: ../data]
  --types=LIST    Comma-separated cancer types to process [default: all]
  --sort=ORDER    Sort each column on its own (columns) or whole rows (rows) [default: columns]
  --fail-fast     Stop at the first cancer type that fails
";

const MAF_FILE_NAME: &str = "som.maf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CancerType { BLCA, COAD, GBM, HNSC, LAML, LUAD, LUSC, OV, READ, UCEC }

impl CancerType {
	pub const ALL: [CancerType; 10] = [CancerType::BLCA, CancerType::COAD,
		CancerType::GBM, CancerType::HNSC, CancerType::LAML, CancerType::LUAD,
		CancerType::LUSC, CancerType::OV, CancerType::READ, CancerType::UCEC];

	pub fn code(&self) -> &'static str {
		match self {
			CancerType::BLCA => "BLCA", CancerType::COAD => "COAD",
			CancerType::GBM => "GBM", CancerType::HNSC => "HNSC",
			CancerType::LAML => "LAML", CancerType::LUAD => "LUAD",
			CancerType::LUSC => "LUSC", CancerType::OV => "OV",
			CancerType::READ => "READ", CancerType::UCEC => "UCEC"
		}
	}

	pub fn lower(&self) -> String { self.code().to_ascii_lowercase() }
}

impl fmt::Display for CancerType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for CancerType {
	type Err = SomaticError;
	fn from_str(text: &str) -> Result<CancerType> {
		CancerType::ALL.iter().copied()
			.find(|ct| ct.code().eq_ignore_ascii_case(text.trim()))
			.ok_or_else(|| SomaticError::InvalidOption(
				format!("unknown cancer type '{}'", text)))
	}
}

pub fn parse_cancer_types(list: &str) -> Result<Vec<CancerType>> {
	if list.eq_ignore_ascii_case("all") { return Ok(CancerType::ALL.to_vec()); }
	let mut types: Vec<CancerType> = Vec::new();
	for code in list.split(',').filter(|c| !c.trim().is_empty()) {
		let ct: CancerType = code.parse()?;
		if !types.contains(&ct) { types.push(ct); }
	}
	if types.is_empty() {
		return Err(SomaticError::InvalidOption("no cancer types given".into()));
	}
	Ok(types)
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
	pub data_dir: PathBuf,
	pub out_dir: PathBuf,
	pub cancer_types: Vec<CancerType>,
	pub extract: ExtractOptions,
	pub order: SortOrder,
	pub fail_fast: bool
}

impl Default for BatchConfig {
	fn default() -> BatchConfig {
		BatchConfig {
			data_dir: PathBuf::from("."),
			out_dir: PathBuf::from("../data"),
			cancer_types: CancerType::ALL.to_vec(),
			extract: ExtractOptions::default(),
			order: SortOrder::default(),
			fail_fast: false
		}
	}
}

impl BatchConfig {
	pub fn input_path(&self, ct: CancerType) -> PathBuf {
		self.data_dir.join(ct.code()).join(MAF_FILE_NAME)
	}

	pub fn output_path(&self, ct: CancerType) -> PathBuf {
		let lower = ct.lower();
		self.out_dir.join(format!("{}_data", lower))
			.join(format!("{}_somatic_mutation_data.csv", lower))
	}
}

#[derive(Debug, Default)]
pub struct BatchSummary {
	pub completed: Vec<(CancerType, ReportStats)>,
	pub failed: Vec<(CancerType, SomaticError)>
}

pub fn process_cancer(config: &BatchConfig, ct: CancerType) -> Result<ReportStats> {
	let output = config.output_path(ct);
	let stats = process_file(&config.input_path(ct), &output,
		&config.extract, config.order)?;
	info!("{}: {} rows, {} unique genes, {} unique patients -> {}", ct,
		stats.rows, stats.unique_genes, stats.unique_patients, output.display());
	Ok(stats)
}

// With fail_fast the cancer types run one at a time and the first error
// ends the batch. Otherwise they run in parallel and failures are collected.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
	let mut summary = BatchSummary::default();
	if config.fail_fast {
		for &ct in &config.cancer_types {
			let stats = process_cancer(config, ct)?;
			summary.completed.push((ct, stats));
		}
		return Ok(summary);
	}

	let results: Vec<(CancerType, Result<ReportStats>)> = config.cancer_types
		.par_iter().map(|&ct| (ct, process_cancer(config, ct))).collect();
	for (ct, result) in results {
		match result {
			Ok(stats) => summary.completed.push((ct, stats)),
			Err(e) => {
				warn!("{}: skipped, {}", ct, e);
				summary.failed.push((ct, e));
			}
		}
	}
	Ok(summary)
}

pub fn main() {
	let args = parse_args(USAGE);
	let config = BatchConfig {
		data_dir: PathBuf::from(args.get_str("<data_dir>")),
		out_dir: PathBuf::from(args.get_str("--out-dir")),
		cancer_types: parse_cancer_types(args.get_str("--types"))
			.unwrap_or_else(|e| error!("{}", e)),
		extract: ExtractOptions::default(),
		order: args.get_str("--sort").parse::<SortOrder>()
			.unwrap_or_else(|e| error!("{}", e)),
		fail_fast: args.get_bool("--fail-fast")
	};
	if !Path::new(&config.data_dir).is_dir() {
		error!("Data directory {} does not exist.", config.data_dir.display());
	}

	let summary = run_batch(&config).unwrap_or_else(|e| error!("{}", e));
	println!("CANCER TYPE\tROWS\tUNIQUE GENES\tUNIQUE PATIENTS");
	for (ct, stats) in &summary.completed {
		println!("{}\t{}\t{}\t{}", ct, stats.rows, stats.unique_genes,
			stats.unique_patients);
	}
	if !summary.failed.is_empty() {
		let failed: Vec<String> =
			summary.failed.iter().map(|(ct, _)| ct.to_string()).collect();
		error!("{} of {} cancer types failed: {}", failed.len(),
			config.cancer_types.len(), failed.join(", "));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paths_follow_the_data_layout() {
		let config = BatchConfig { data_dir: PathBuf::from("/data/tcga"),
			..BatchConfig::default() };
		assert_eq!(config.input_path(CancerType::LUAD),
			PathBuf::from("/data/tcga/LUAD/som.maf"));
		assert_eq!(config.output_path(CancerType::LUAD),
			PathBuf::from("../data/luad_data/luad_somatic_mutation_data.csv"));
	}

	#[test]
	fn cancer_type_lists() {
		assert_eq!(parse_cancer_types("all").unwrap().len(), 10);
		assert_eq!(parse_cancer_types("ov, gbm,OV").unwrap(),
			vec![CancerType::OV, CancerType::GBM]);
		assert!(parse_cancer_types("BRCA").is_err());
		assert!(parse_cancer_types(",").is_err());
	}

	#[test]
	fn cancer_type_display_round_trips() {
		for ct in CancerType::ALL.iter() {
			assert_eq!(ct.to_string().parse::<CancerType>().unwrap(), *ct);
		}
		assert_eq!(CancerType::UCEC.lower(), "ucec");
	}
}
