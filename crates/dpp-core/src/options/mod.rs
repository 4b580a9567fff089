//! Snowflake connection options.
//!
//! Two shapes carry the same information:
//! - [`ConnectorOptions`]: keys understood by the native connector
//! - [`ReaderOptions`]: keys understood by the Spark Snowflake reader

mod connector;
mod pem;
mod reader;

pub use connector::ConnectorOptions;
pub use pem::{decode_pem, strip_pem_armor};
pub use reader::ReaderOptions;

/// Region suffix of every Snowflake account.
pub const REGION: &str = "eu-west-1";

/// Warehouse used for every connection.
pub const WAREHOUSE: &str = "PUBLIC";
