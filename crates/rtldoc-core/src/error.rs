//! Error types for model construction, normalization and type tables.

use std::fmt;

use thiserror::Error;

/// Which bound of a range a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    High,
    Low,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::High => write!(f, "high"),
            BoundSide::Low => write!(f, "low"),
        }
    }
}

/// Errors raised by the validated constructors of the data model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },
}

/// Errors that prevent a single declaration from being normalized.
///
/// An unrecognised type name is deliberately absent: it produces
/// [`ObjectType::Unknown`](crate::model::ObjectType::Unknown) instead of an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The parse tree does not have the node shape the front end promises.
    #[error("structural mismatch: {detail}")]
    StructuralMismatch { detail: String },

    /// A constrained vector type whose constraint is not a `high <op> low` pair.
    #[error("cannot extract range of '{name}': expected a binary operator, found {found}")]
    RangeExtraction { name: String, found: String },

    /// One side of a vector range is an expression rather than a literal.
    #[error("cannot resolve {side} bound of '{name}': {found} is not a literal")]
    UnresolvedBound {
        name: String,
        side: BoundSide,
        found: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl NormalizeError {
    pub(crate) fn structural(detail: impl Into<String>) -> Self {
        NormalizeError::StructuralMismatch {
            detail: detail.into(),
        }
    }
}

/// Errors loading or validating the type classification tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("type '{name}' is listed as both {first} and {second}")]
    OverlappingType {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("empty type name in the {table} table")]
    EmptyTypeName { table: &'static str },
}

/// Result type for normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;
