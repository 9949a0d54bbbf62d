
#[macro_use] pub mod common;
pub mod errors;
pub mod maf;
pub mod barcode;
pub mod report;
pub mod process;
pub mod batch;
pub mod summary;

pub use errors::{Result, SomaticError};
pub use maf::{extract_records, ExtractOptions, MutationRecord};
pub use barcode::{classify, Barcode, NormalizedRecord};
pub use report::{build_report, prune, write_report, ReportStats, ReportTable, SortOrder};
pub use batch::{run_batch, BatchConfig, BatchSummary, CancerType};
