pub mod batch;
pub mod error;
pub mod extract;
pub mod table;

pub use batch::{BatchConfig, FileError, Tally};
pub use error::ExtractError;
pub use extract::{Extracted, ExtractorConfig, TableExtractor};
pub use table::{ContentHash, RawTable, Table};
