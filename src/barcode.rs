
use crate::errors::{Result, SomaticError};
use crate::maf::MutationRecord;

// Segment layout of a TCGA sample barcode, e.g. TCGA-AB-1234-01A-11D-A123-08.
// The first three segments identify the patient, the fourth the sample type.
const PATIENT_SEGMENTS: usize = 3;
const SAMPLE_TYPE_SEGMENT: usize = 3;
const MIN_SEGMENTS: usize = SAMPLE_TYPE_SEGMENT + 1;
const PRIMARY_TUMOR_CODE: &str = "01";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode<'a> {
	segments: Vec<&'a str>
}

impl<'a> Barcode<'a> {
	pub fn parse(text: &'a str) -> Result<Barcode<'a>> {
		let segments: Vec<&str> = text.split('-').collect();
		if segments.len() < MIN_SEGMENTS {
			return Err(SomaticError::BarcodeFormat {
				barcode: text.to_string(), segments: segments.len() });
		}
		Ok(Barcode { segments })
	}

	pub fn sample_type_code(&self) -> &'a str {
		self.segments[SAMPLE_TYPE_SEGMENT]
	}

	// Substring match, so "01A" and "01B" both count as primary tumor.
	pub fn is_primary_tumor(&self) -> bool {
		self.sample_type_code().contains(PRIMARY_TUMOR_CODE)
	}

	pub fn patient_id(&self) -> String {
		self.segments[..PATIENT_SEGMENTS].join("-")
	}
}

/// A mutation attributed to a patient rather than to a sample.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NormalizedRecord {
	pub gene_name: String,
	pub gene_id: String,
	pub patient_id: String
}

// Returns None for records from anything but a primary tumor sample.
pub fn classify(record: &MutationRecord) -> Result<Option<NormalizedRecord>> {
	let barcode = Barcode::parse(&record.sample_barcode)?;
	if !barcode.is_primary_tumor() { return Ok(None); }
	Ok(Some(NormalizedRecord {
		gene_name: record.gene_name.clone(),
		gene_id: record.gene_id.clone(),
		patient_id: barcode.patient_id()
	}))
}
