//! Interface metadata extraction for HDL entity documentation.
//!
//! Takes the parse tree of an external HDL front end (hdlConvertor) and
//! normalizes every generic and port into a typed model:
//!
//! - [`raw`] checks node shapes and produces tagged declaration variants
//! - [`normalize`] classifies types, resolves ranges and default values
//! - [`aggregate`] assembles entities into a [`System`] and reports failures
//! - [`tables`] holds the configurable type classification lists

pub mod aggregate;
pub mod error;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod tables;

pub use aggregate::{aggregate, aggregate_json, Aggregation, Issue, IssueKind, NormalizationReport};
pub use error::{ConfigError, ModelError, NormalizeError};
pub use model::{
    Bound, Declaration, DefaultValue, Direction, Entity, Generic, InterfaceObject, ObjectType,
    Port, Range, RangeUnit, System,
};
pub use normalize::{normalize, normalize_json};
pub use tables::{TypeClass, TypeTables};
