//! Character data: definitions, runtime instances, and the data table.
//!
//! - `CharacterDefinition` / `ActionDefinition` / `MapDefinition`: static
//!   data loaded once
//! - `Character`: per-match runtime state built from a definition
//! - `DataTable`: validated lookup of definitions by key

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{ActionDefinition, CharacterDefinition, MapDefinition};
pub use instance::{Character, StatusEffect};
pub use registry::DataTable;
