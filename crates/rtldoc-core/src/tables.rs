//! Type classification tables.
//!
//! Which declared type names count as single bits, bit vectors or
//! integer-like values is configuration, not code: supporting another
//! package's types means adding names to these lists.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The closed set of type categories the normalizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeClass {
    /// Single-bit scalars such as `std_logic`.
    Bit,
    /// Indexed bit arrays such as `std_logic_vector` or `unsigned`.
    Vector,
    /// Numeric scalars such as `integer` and `real`.
    IntegerLike,
}

impl TypeClass {
    /// All classes in matching order.
    pub const ALL: [TypeClass; 3] = [TypeClass::Bit, TypeClass::Vector, TypeClass::IntegerLike];

    /// Name of the table holding this class.
    pub fn table_name(&self) -> &'static str {
        match self {
            TypeClass::Bit => "bit",
            TypeClass::Vector => "vector",
            TypeClass::IntegerLike => "integer_like",
        }
    }
}

/// Three disjoint lists of type names, one per [`TypeClass`].
///
/// Missing keys in a TOML table fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeTables {
    pub bit: Vec<String>,
    pub vector: Vec<String>,
    pub integer_like: Vec<String>,
}

impl Default for TypeTables {
    fn default() -> Self {
        Self::vhdl()
    }
}

impl TypeTables {
    /// The IEEE `std_logic_1164` / `numeric_std` types plus the VHDL
    /// predefined scalars.
    pub fn vhdl() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }
        Self {
            bit: owned(&["std_logic", "std_ulogic", "boolean"]),
            vector: owned(&["std_logic_vector", "std_ulogic_vector", "signed", "unsigned"]),
            integer_like: owned(&["integer", "real"]),
        }
    }

    /// Parse tables from a TOML document with `bit`, `vector` and
    /// `integer_like` arrays, then validate them.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let tables: TypeTables = toml::from_str(s)?;
        tables.validate()?;
        Ok(tables)
    }

    /// The names belonging to one class.
    pub fn names(&self, class: TypeClass) -> &[String] {
        match class {
            TypeClass::Bit => &self.bit,
            TypeClass::Vector => &self.vector,
            TypeClass::IntegerLike => &self.integer_like,
        }
    }

    /// Look a type name up in every table.
    ///
    /// Returns the class and the table's own spelling of the name. VHDL
    /// identifiers are case-insensitive, so `STD_LOGIC` matches `std_logic`.
    pub fn classify(&self, name: &str) -> Option<(TypeClass, &str)> {
        self.classify_among(name, &TypeClass::ALL)
    }

    /// Look a type name up in the given classes only, first match wins.
    pub fn classify_among(&self, name: &str, classes: &[TypeClass]) -> Option<(TypeClass, &str)> {
        classes.iter().find_map(|&class| {
            self.names(class)
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(name))
                .map(|candidate| (class, candidate.as_str()))
        })
    }

    /// Check that no table contains an empty name and no name appears in
    /// more than one table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in TypeClass::ALL {
            if self.names(class).iter().any(|n| n.trim().is_empty()) {
                return Err(ConfigError::EmptyTypeName {
                    table: class.table_name(),
                });
            }
        }

        for (i, first) in TypeClass::ALL.iter().enumerate() {
            for second in &TypeClass::ALL[i + 1..] {
                for name in self.names(*first) {
                    if self
                        .names(*second)
                        .iter()
                        .any(|other| other.eq_ignore_ascii_case(name))
                    {
                        return Err(ConfigError::OverlappingType {
                            name: name.clone(),
                            first: first.table_name(),
                            second: second.table_name(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_disjoint() {
        assert!(TypeTables::default().validate().is_ok());
    }

    #[test]
    fn classify_each_class() {
        let tables = TypeTables::vhdl();
        assert_eq!(tables.classify("std_logic"), Some((TypeClass::Bit, "std_logic")));
        assert_eq!(tables.classify("unsigned"), Some((TypeClass::Vector, "unsigned")));
        assert_eq!(tables.classify("real"), Some((TypeClass::IntegerLike, "real")));
        assert_eq!(tables.classify("my_custom_type"), None);
    }

    #[test]
    fn classify_ignores_case() {
        let tables = TypeTables::vhdl();
        assert_eq!(
            tables.classify("STD_LOGIC_VECTOR"),
            Some((TypeClass::Vector, "std_logic_vector"))
        );
    }

    #[test]
    fn classify_among_restricts_classes() {
        let tables = TypeTables::vhdl();
        assert_eq!(tables.classify_among("std_logic", &[TypeClass::Vector]), None);
        assert_eq!(
            tables.classify_among("integer", &[TypeClass::Vector, TypeClass::IntegerLike]),
            Some((TypeClass::IntegerLike, "integer"))
        );
    }

    #[test]
    fn toml_partial_table_keeps_defaults() {
        let tables = TypeTables::from_toml_str(
            r#"integer_like = ["integer", "real", "natural", "positive"]"#,
        )
        .unwrap();
        assert_eq!(tables.bit, TypeTables::vhdl().bit);
        assert_eq!(
            tables.classify("natural"),
            Some((TypeClass::IntegerLike, "natural"))
        );
    }

    #[test]
    fn toml_overlap_rejected() {
        let err = TypeTables::from_toml_str(r#"bit = ["std_logic", "Signed"]"#).unwrap_err();
        match err {
            ConfigError::OverlappingType {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "Signed");
                assert_eq!(first, "bit");
                assert_eq!(second, "vector");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn toml_empty_name_rejected() {
        let err = TypeTables::from_toml_str(r#"vector = ["", "unsigned"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTypeName { table: "vector" }));
    }

    #[test]
    fn toml_syntax_error() {
        assert!(matches!(
            TypeTables::from_toml_str("bit = [").unwrap_err(),
            ConfigError::Toml(_)
        ));
    }
}
