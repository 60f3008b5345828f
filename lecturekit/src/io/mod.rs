//! Loading and saving PDF documents.
//!
//! # Examples
//!
//! ```no_run
//! use lecturekit::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("Ch1 - intro.pdf")).await?;
//! PdfWriter::new()
//!     .save(loaded.document, Path::new("copy.pdf"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
