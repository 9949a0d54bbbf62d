
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use csv::{ByteRecord, ReaderBuilder};
use log::debug;
use crate::common::open_input;
use crate::errors::{Result, SomaticError};

// Column offsets in a MAF data row.
pub const GENE_NAME_FIELD: usize = 0;
pub const GENE_ID_FIELD: usize = 1;
pub const SAMPLE_BARCODE_FIELD: usize = 15;
pub const MIN_FIELDS: usize = SAMPLE_BARCODE_FIELD + 1;

/// One mutation as it appears in the annotation file, before the sample
/// barcode is collapsed to a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
	pub gene_name: String,
	pub gene_id: String,
	pub sample_barcode: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
	pub delimiter: u8,
	pub start_row: usize    // Leading rows skipped without inspection
}

impl Default for ExtractOptions {
	fn default() -> ExtractOptions {
		ExtractOptions { delimiter: b'\t', start_row: 1 }
	}
}

pub fn parse_delimiter(text: &str) -> Result<u8> {
	match text {
		"tab" | "\\t" | "\t" => Ok(b'\t'),
		_ if text.len() == 1 => Ok(text.as_bytes()[0]),
		_ => Err(SomaticError::InvalidOption(
			format!("delimiter must be a single character or 'tab', got '{}'", text)))
	}
}

fn field(record: &ByteRecord, idx: usize) -> String {
	String::from_utf8_lossy(&record[idx]).into_owned()
}

pub fn extract_records(path: &Path, options: &ExtractOptions)
	-> Result<Vec<MutationRecord>> {
	let input = open_input(path)?;
	let records = extract_from_reader(input, path, options)?;
	debug!("Extracted {} mutation records from {}.",
		records.len(), path.display());
	Ok(records)
}

// The path is only used for error messages. The first `start_row` lines are
// dropped before CSV parsing, so a blank line counts as a header row.
pub fn extract_from_reader<R: Read>(input: R, path: &Path,
	options: &ExtractOptions) -> Result<Vec<MutationRecord>> {
	let mut input = BufReader::new(input);
	let mut skipped = 0;
	let mut line = Vec::new();
	while skipped < options.start_row {
		line.clear();
		if input.read_until(b'\n', &mut line)? == 0 { break; }
		skipped += 1;
	}

	let mut reader = ReaderBuilder::new()
		.delimiter(options.delimiter)
		.has_headers(false)
		.flexible(true)
		.from_reader(input);

	let mut records = Vec::new();
	let mut row = ByteRecord::new();
	let mut row_num = skipped;
	while reader.read_byte_record(&mut row)? {
		row_num += 1;
		if row.len() <= 1 { continue; }
		if row.len() < MIN_FIELDS {
			let line = row.position()
				.map_or(row_num, |p| skipped + p.line() as usize);
			return Err(SomaticError::MalformedRow {
				path: path.to_path_buf(), row: line, fields: row.len() });
		}
		records.push(MutationRecord {
			gene_name: field(&row, GENE_NAME_FIELD),
			gene_id: field(&row, GENE_ID_FIELD),
			sample_barcode: field(&row, SAMPLE_BARCODE_FIELD)
		});
	}
	Ok(records)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn maf_row(gene: &str, id: &str, barcode: &str) -> String {
		let mut cols = vec![gene.to_string(), id.to_string()];
		for k in 2..15 { cols.push(format!("c{}", k)); }
		cols.push(barcode.to_string());
		cols.push("trailing".to_string());
		cols.join("\t")
	}

	fn extract(text: &[u8]) -> Result<Vec<MutationRecord>> {
		extract_from_reader(text, Path::new("test.maf"), &ExtractOptions::default())
	}

	#[test]
	fn selects_gene_and_barcode_fields() {
		let text = format!("header\n{}\n", maf_row("TP53", "7157",
			"TCGA-AB-1234-01A-11D-A123-08"));
		let records = extract(text.as_bytes()).unwrap();
		assert_eq!(records, vec![MutationRecord {
			gene_name: "TP53".into(), gene_id: "7157".into(),
			sample_barcode: "TCGA-AB-1234-01A-11D-A123-08".into() }]);
	}

	#[test]
	fn header_rows_are_skipped_unchecked() {
		let row = maf_row("KRAS", "3845", "TCGA-AA-0001-01A");
		let text = format!("{}\n{}\n", row, row);
		let options = ExtractOptions { delimiter: b'\t', start_row: 1 };
		let records = extract_from_reader(text.as_bytes(),
			Path::new("x"), &options).unwrap();
		assert_eq!(records.len(), 1);

		let options = ExtractOptions { delimiter: b'\t', start_row: 0 };
		let records = extract_from_reader(text.as_bytes(),
			Path::new("x"), &options).unwrap();
		assert_eq!(records.len(), 2);
	}

	#[test]
	fn blank_line_uses_up_the_header_rows() {
		let text = format!("\n{}\n{}\n",
			maf_row("Hugo_Symbol", "Entrez_Gene_Id", "Tumor_Sample_Barcode"),
			maf_row("TP53", "7157", "TCGA-AB-1234-01A"));
		let records = extract(text.as_bytes()).unwrap();
		let barcodes: Vec<&str> =
			records.iter().map(|r| r.sample_barcode.as_str()).collect();
		assert_eq!(barcodes, vec!["Tumor_Sample_Barcode", "TCGA-AB-1234-01A"]);
	}

	#[test]
	fn malformed_row_number_counts_skipped_lines() {
		let options = ExtractOptions { delimiter: b'\t', start_row: 3 };
		match extract_from_reader(&b"#v2.4\n\nheader\nTP53\t7157\n"[..],
			Path::new("x"), &options) {
			Err(SomaticError::MalformedRow { row, .. }) => assert_eq!(row, 4),
			other => panic!("expected MalformedRow, got {:?}", other)
		}
	}

	#[test]
	fn single_field_rows_are_skipped() {
		let text = format!("header\n#comment\n{}\n",
			maf_row("TP53", "7157", "TCGA-AB-1234-01A"));
		assert_eq!(extract(text.as_bytes()).unwrap().len(), 1);
	}

	#[test]
	fn two_field_row_is_malformed() {
		match extract(b"header\nTP53\t7157\n") {
			Err(SomaticError::MalformedRow { row, fields, .. }) => {
				assert_eq!(row, 2);
				assert_eq!(fields, 2);
			},
			other => panic!("expected MalformedRow, got {:?}", other)
		}
	}

	#[test]
	fn header_only_input_yields_nothing() {
		assert!(extract(b"Hugo_Symbol\tEntrez_Gene_Id\n").unwrap().is_empty());
		assert!(extract(b"").unwrap().is_empty());
	}

	#[test]
	fn invalid_utf8_is_replaced() {
		let mut text = b"header\n".to_vec();
		text.extend_from_slice(b"AB\xffC\t1");
		for _ in 2..15 { text.extend_from_slice(b"\tx"); }
		text.extend_from_slice(b"\tTCGA-AB-1234-01A\n");
		let records = extract(&text).unwrap();
		assert_eq!(records[0].gene_name, "AB\u{FFFD}C");
		assert_eq!(records[0].sample_barcode, "TCGA-AB-1234-01A");
	}

	#[test]
	fn delimiter_names() {
		assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
		assert_eq!(parse_delimiter(",").unwrap(), b',');
		assert!(parse_delimiter("::").is_err());
	}
}
