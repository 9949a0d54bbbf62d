use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building or summarizing a mutation report.
#[derive(Debug, Error)]
pub enum SomaticError {
	#[error("input file '{}' does not exist", path.display())]
	FileNotFound { path: PathBuf },
	#[error("row {row} of '{}' has {fields} fields, at least 16 are required", path.display())]
	MalformedRow { path: PathBuf, row: usize, fields: usize },
	#[error("sample barcode '{barcode}' has {segments} segments, at least 4 are required")]
	BarcodeFormat { barcode: String, segments: usize },
	#[error("no mutation data in '{}'", path.display())]
	EmptyDataset { path: PathBuf },
	#[error("column '{column}' not found in '{}'", path.display())]
	MissingColumn { path: PathBuf, column: String },
	#[error("invalid option: {0}")]
	InvalidOption(String),
	#[error(transparent)]
	Io(#[from] io::Error),
	#[error(transparent)]
	Csv(csv::Error),
}

// Read failures underneath the CSV layer (e.g. a corrupt .gz) are I/O errors.
impl From<csv::Error> for SomaticError {
	fn from(e: csv::Error) -> SomaticError {
		let io = match e.kind() {
			csv::ErrorKind::Io(io) => Some(io::Error::new(io.kind(), io.to_string())),
			_ => None
		};
		match io {
			Some(io) => SomaticError::Io(io),
			None => SomaticError::Csv(e)
		}
	}
}

pub type Result<T> = std::result::Result<T, SomaticError>;
