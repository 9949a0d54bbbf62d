
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use csv::ReaderBuilder;
use log::info;
use crate::common::{ensure_parent_dir, open_input, parse_args};
use crate::errors::{Result, SomaticError};
use crate::report::HEADER;

const USAGE: &str = "
Usage:
  somatic histogram [options]

Options:
  -r PATH, --somatic-data=PATH  Processed somatic mutation report [default: ../data/kirc_data/kirc_somatic_mutation_data.csv]
  --counts=PATH                 Output file for sorted per-patient counts [default: mutated_genes.txt]
";

const BAR_WIDTH: usize = 60;

pub type PatientGenes = BTreeMap<String, BTreeSet<String>>;

// Reads a report written by `somatic process` into a map from patient to
// the distinct genes mutated in that patient.
pub fn read_patient_genes(path: &Path) -> Result<PatientGenes> {
	let mut reader = ReaderBuilder::new().quote(b'|').flexible(true)
		.from_reader(open_input(path)?);
	let headers = reader.headers()?.clone();
	let column = |name: &str| headers.iter().position(|h| h == name)
		.ok_or_else(|| SomaticError::MissingColumn {
			path: path.to_path_buf(), column: name.to_string() });
	let gene_col = column(HEADER[1])?;
	let patient_col = column(HEADER[2])?;

	let mut patients = PatientGenes::new();
	for r in reader.records() {
		let row = r?;
		let (gene, patient) = match (row.get(gene_col), row.get(patient_col)) {
			(Some(g), Some(p)) => (g, p),
			_ => continue    // Row too short to name a patient
		};
		patients.entry(patient.to_string()).or_default().insert(gene.to_string());
	}
	Ok(patients)
}

pub fn mutation_counts(patients: &PatientGenes) -> Vec<usize> {
	let mut counts: Vec<usize> = patients.values().map(|g| g.len()).collect();
	counts.sort_unstable();
	counts
}

// Formats like printf("%.18e"), e.g. 3 -> 3.000000000000000000e+00.
fn scientific(value: f64) -> String {
	let text = format!("{:.18e}", value);
	match text.split_once('e') {
		Some((mantissa, exp)) => {
			let exp: i32 = exp.parse().unwrap_or(0);
			format!("{}e{}{:02}", mantissa, if exp < 0 { '-' } else { '+' }, exp.abs())
		},
		None => text
	}
}

pub fn write_counts_to<W: Write>(counts: &[usize], out: W) -> Result<()> {
	let mut out = BufWriter::new(out);
	for &count in counts { writeln!(out, "{}", scientific(count as f64))?; }
	out.flush()?;
	Ok(())
}

pub fn write_counts(counts: &[usize], path: &Path) -> Result<()> {
	ensure_parent_dir(path)?;
	write_counts_to(counts, File::create(path)?)
}

// One bin per mutated gene count between the smallest and largest count.
pub fn render_histogram(counts: &[usize], source: &Path) -> Result<String> {
	let (min, max) = match (counts.iter().min(), counts.iter().max()) {
		(Some(&min), Some(&max)) => (min, max),
		_ => return Err(SomaticError::EmptyDataset { path: source.to_path_buf() })
	};
	let mut bins = vec![0usize; max - min + 1];
	for &count in counts { bins[count - min] += 1; }
	let tallest = bins.iter().copied().max().unwrap_or(1).max(1);

	let mut text = String::from("MUTATED GENES\tPATIENTS\n");
	for (k, &patients) in bins.iter().enumerate() {
		let bar = (patients * BAR_WIDTH + tallest - 1) / tallest;
		// Writing to a String cannot fail.
		let _ = writeln!(text, "{}\t{}\t{}", min + k, patients, "#".repeat(bar));
	}
	Ok(text)
}

pub fn main() {
	let args = parse_args(USAGE);
	let report_path = Path::new(args.get_str("--somatic-data"));
	let counts_path = Path::new(args.get_str("--counts"));

	let patients = read_patient_genes(report_path).unwrap_or_else(
		|e| error!("Could not read {}: {}", report_path.display(), e));
	let counts = mutation_counts(&patients);
	let histogram = render_histogram(&counts, report_path)
		.unwrap_or_else(|e| error!("{}", e));
	write_counts(&counts, counts_path).unwrap_or_else(
		|e| error!("Could not write {}: {}", counts_path.display(), e));
	info!("Wrote mutated gene counts for {} patients to {}.",
		counts.len(), counts_path.display());
	print!("{}", histogram);
}
