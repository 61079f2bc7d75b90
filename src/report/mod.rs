//! Result-table writers.
//!
//! Every store and analyzer row type derives `Serialize`; these writers turn
//! a slice of rows into text:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter, header row from
//!   field names - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty-printed JSON array - requires
//!   `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstat::Result<()> {
//! use chatstat::report::{to_csv, write_json};
//! use chatstat::store::ChatStore;
//! use std::path::Path;
//!
//! # let records: Vec<chatstat::Record> = Vec::new();
//! let mut store = ChatStore::in_memory()?;
//! store.load(&records)?;
//!
//! let shares = store.user_contribution()?;
//! write_json(&shares, Path::new("users.json"))?;
//! let csv = to_csv(&shares)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
