
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use crate::barcode::{classify, NormalizedRecord};
use crate::common::ensure_parent_dir;
use crate::errors::{Result, SomaticError};
use crate::maf::MutationRecord;

pub const HEADER: [&str; 3] = ["Gene Name", "Entrez Gene ID", "Patient ID"];

/// How a report table is ordered before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
	// Every column is sorted on its own, so a written row does not
	// necessarily correspond to any input row. This is the historical
	// output format of these reports.
	Columns,
	// Whole rows ordered by gene name, gene id and patient id.
	Rows
}

impl Default for SortOrder {
	fn default() -> SortOrder { SortOrder::Columns }
}

impl FromStr for SortOrder {
	type Err = SomaticError;
	fn from_str(text: &str) -> Result<SortOrder> {
		match text {
			"columns" => Ok(SortOrder::Columns),
			"rows" => Ok(SortOrder::Rows),
			_ => Err(SomaticError::InvalidOption(
				format!("sort order must be 'columns' or 'rows', got '{}'", text)))
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
	pub rows: usize,
	pub unique_genes: usize,
	pub unique_patients: usize
}

/// Mutations of a single cancer type, one row per primary tumor mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
	rows: Vec<NormalizedRecord>
}

impl ReportTable {
	pub fn new(rows: Vec<NormalizedRecord>) -> ReportTable {
		ReportTable { rows }
	}

	pub fn rows(&self) -> &[NormalizedRecord] { &self.rows }
	pub fn len(&self) -> usize { self.rows.len() }
	pub fn is_empty(&self) -> bool { self.rows.is_empty() }

	pub fn sort(&mut self, order: SortOrder) {
		match order {
			SortOrder::Rows => self.rows.sort(),
			SortOrder::Columns => self.sort_columns()
		}
	}

	fn sort_columns(&mut self) {
		let mut gene_names = Vec::with_capacity(self.rows.len());
		let mut gene_ids = Vec::with_capacity(self.rows.len());
		let mut patient_ids = Vec::with_capacity(self.rows.len());
		for row in self.rows.drain(..) {
			gene_names.push(row.gene_name);
			gene_ids.push(row.gene_id);
			patient_ids.push(row.patient_id);
		}
		gene_names.sort_unstable();
		gene_ids.sort_unstable();
		patient_ids.sort_unstable();
		self.rows = gene_names.into_iter().zip(gene_ids).zip(patient_ids)
			.map(|((gene_name, gene_id), patient_id)|
				NormalizedRecord { gene_name, gene_id, patient_id })
			.collect();
	}

	pub fn stats(&self) -> ReportStats {
		let genes: HashSet<&str> =
			self.rows.iter().map(|r| r.gene_name.as_str()).collect();
		let patients: HashSet<&str> =
			self.rows.iter().map(|r| r.patient_id.as_str()).collect();
		ReportStats { rows: self.rows.len(), unique_genes: genes.len(),
			unique_patients: patients.len() }
	}
}

// Drops non-primary-tumor records. Survivors keep their input order.
pub fn prune(records: &[MutationRecord]) -> Result<Vec<NormalizedRecord>> {
	let mut kept = Vec::with_capacity(records.len());
	for record in records {
		if let Some(normalized) = classify(record)? { kept.push(normalized); }
	}
	Ok(kept)
}

pub fn build_report(records: &[MutationRecord], order: SortOrder)
	-> Result<ReportTable> {
	let mut table = ReportTable::new(prune(records)?);
	table.sort(order);
	Ok(table)
}

pub fn write_report_to<W: Write>(table: &ReportTable, out: W) -> Result<()> {
	let mut writer = WriterBuilder::new()
		.delimiter(b',')
		.quote(b'|')
		.quote_style(QuoteStyle::Necessary)
		.terminator(Terminator::CRLF)
		.from_writer(out);
	writer.write_record(&HEADER)?;
	for row in table.rows() {
		writer.write_record(&[&row.gene_name, &row.gene_id, &row.patient_id])?;
	}
	writer.flush()?;
	Ok(())
}

pub fn write_report(table: &ReportTable, path: &Path) -> Result<()> {
	ensure_parent_dir(path)?;
	write_report_to(table, File::create(path)?)
}
