//! # plotdoc-core - Value model and encoding primitives
//!
//! Foundation types for the plotdoc chart document protocol:
//! - Typed values and their JSON emission rules
//! - Lazy data sources, the arena that owns them, and serial handles
//! - The JSON fragment writer used by every encodable part
//! - The validation and update error taxonomies
//!
//! The component graph and the serialization driver live in the
//! `plotdoc` crate; nothing here depends on them.

mod data;
mod error;
mod value;
mod writer;

pub use data::{DataSource, DataType, GeneratorFn, SourceArena, SourceData, SourceId};
pub use error::{UpdateError, ValidateError};
pub use value::{emit_number, emit_string, Value};
pub use writer::JsonWriter;
