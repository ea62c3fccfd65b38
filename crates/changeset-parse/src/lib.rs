//! Markdown changeset records.
//!
//! A record is YAML front matter mapping package names to bump types, followed
//! by the release summary:
//!
//! ```text
//! ---
//! "auth": patch
//! ---
//!
//! correct token expiry
//! ```

mod error;
mod parse;
mod serialize;

pub use error::{FormatError, FrontMatterError, ValidationError};
pub use parse::parse_changeset;
pub use serialize::serialize_changeset;
