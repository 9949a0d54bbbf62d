
use docopt::{Docopt, ArgvMap};
use std::io::{self, stdin, Read, BufReader};
use std::fs::{self, File};
use std::path::Path;
use flate2::read::MultiGzDecoder;
use crate::errors::{Result, SomaticError};

#[macro_export]
macro_rules! error {
	($($arg:tt)+) => ({
		use std::process::exit;
		eprint!("ERROR: "); eprintln!($($arg)+); exit(-1);
	})
}

pub fn parse_args(usage: &str) -> ArgvMap {
	Docopt::new(usage).and_then(|d| d.parse()).unwrap_or_else(|e| e.exit())
}

// Opens a path for reading. "-" reads from standard input and paths ending
// in .gz are decompressed on the fly. A corrupt or truncated .gz surfaces as
// an I/O error on read.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
	if path == Path::new("-") {
		return Ok(Box::new(BufReader::new(stdin())));
	}
	let file = File::open(path).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound =>
			SomaticError::FileNotFound { path: path.to_path_buf() },
		_ => SomaticError::Io(e)
	})?;
	if path.extension().map_or(false, |ext| ext == "gz") {
		Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
	} else {
		Ok(Box::new(BufReader::new(file)))
	}
}

// Creates the parent directory of an output file if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
	if let Some(dir) = path.parent() {
		if !dir.as_os_str().is_empty() && !dir.exists() {
			fs::create_dir_all(dir)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn missing_input_is_file_not_found() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("absent.maf");
		match open_input(&path) {
			Err(SomaticError::FileNotFound { path: p }) => assert_eq!(p, path),
			Err(other) => panic!("unexpected error {:?}", other),
			Ok(_) => panic!("opened a missing file")
		}
	}

	#[test]
	fn gzip_input_is_decompressed() {
		use flate2::{write::GzEncoder, Compression};
		use std::io::Write;
		let dir = tempdir().unwrap();
		let path = dir.path().join("som.maf.gz");
		let mut gz = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
		gz.write_all(b"Hugo_Symbol\tEntrez_Gene_Id\n").unwrap();
		gz.finish().unwrap();

		let mut text = String::new();
		open_input(&path).unwrap().read_to_string(&mut text).unwrap();
		assert_eq!(text, "Hugo_Symbol\tEntrez_Gene_Id\n");
	}

	#[test]
	fn plain_text_with_gz_suffix_fails_to_read() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("som.maf.gz");
		fs::write(&path, "header\nnot compressed\n").unwrap();
		let mut text = String::new();
		assert!(open_input(&path).unwrap().read_to_string(&mut text).is_err());
	}

	#[test]
	fn parent_dirs_are_created() {
		let dir = tempdir().unwrap();
		let out = dir.path().join("blca_data").join("report.csv");
		ensure_parent_dir(&out).unwrap();
		assert!(dir.path().join("blca_data").is_dir());
		// Calling again on an existing directory is fine.
		ensure_parent_dir(&out).unwrap();
	}
}
