
use std::path::Path;
use log::info;
use crate::common::parse_args;
use crate::errors::Result;
use crate::maf::{extract_records, parse_delimiter, ExtractOptions};
use crate::report::{build_report, write_report, ReportStats, SortOrder};

const USAGE: &str = "
Usage:
  somatic process [options] <maf_file> <output_csv>

Options:
  --delimiter=CHAR  Field delimiter of the MAF file, or 'tab' [default: tab]
  --header-rows=N   Number of leading rows to skip [default: 1]
  --sort=ORDER      Sort each column on its own (columns) or whole rows (rows) [default: columns]
";

// Builds the mutation report for one MAF file and writes it as CSV.
pub fn process_file(input: &Path, output: &Path, options: &ExtractOptions,
	order: SortOrder) -> Result<ReportStats> {
	let records = extract_records(input, options)?;
	let table = build_report(&records, order)?;
	write_report(&table, output)?;
	let stats = table.stats();
	info!("{}: {} primary tumor mutations out of {} records.",
		input.display(), stats.rows, records.len());
	Ok(stats)
}

pub fn main() {
	let args = parse_args(USAGE);
	let maf_path = Path::new(args.get_str("<maf_file>"));
	let out_path = Path::new(args.get_str("<output_csv>"));
	let delimiter = parse_delimiter(args.get_str("--delimiter"))
		.unwrap_or_else(|e| error!("{}", e));
	let start_row: usize = args.get_str("--header-rows").parse()
		.unwrap_or_else(|_| error!("--header-rows must be a non-negative integer."));
	let order: SortOrder = args.get_str("--sort").parse()
		.unwrap_or_else(|e| error!("{}", e));

	let options = ExtractOptions { delimiter, start_row };
	let stats = process_file(maf_path, out_path, &options, order)
		.unwrap_or_else(|e| error!("{}", e));
	println!("ROWS\tUNIQUE GENES\tUNIQUE PATIENTS");
	println!("{}\t{}\t{}", stats.rows, stats.unique_genes, stats.unique_patients);
}
