//! Mapping resolution: raw user associations in either orientation become a
//! canonical `property → header` table.

pub mod error;
pub mod file;
pub mod infer;
pub mod resolver;

pub use error::{MappingError, Result};
pub use file::MappingFile;
pub use infer::{HEADER_ALIASES, alias_for, infer_mapping};
pub use resolver::{MappingResolver, Orientation, RawMapping};
