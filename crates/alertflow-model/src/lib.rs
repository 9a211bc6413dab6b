//! Alertflow model - workflow alert records and hierarchy levels
//!
//! Defines the strict record type consumed by the aggregation core, the
//! six hierarchy levels with their placeholder labels, and the import
//! boundary that coerces loosely-typed spreadsheet rows into records.

pub mod error;
pub mod field;
pub mod import;
pub mod level;
pub mod record;
pub mod sample;

pub use error::*;
pub use field::RecordField;
pub use import::{import_rows, RawImportedRow};
pub use level::{Level, LevelOrder};
pub use record::{Owner, Priority, WorkflowRecord};
pub use sample::sample_records;
