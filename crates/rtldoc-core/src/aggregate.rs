//! Entity aggregator: walks a parse result and builds the [`System`].
//!
//! Failures are per declaration. A declaration that cannot be normalized is
//! reported and left out; everything else in its entity, and every other
//! entity, is still processed.

use std::fmt;

use serde_json::Value;

use crate::error::{ModelError, NormalizeError};
use crate::model::{Declaration, Entity, System};
use crate::normalize::normalize;
use crate::raw::{DeclNode, RawDesign, RawEntity};
use crate::tables::TypeTables;

/// Which list of an entity a declaration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclList {
    Generics,
    Ports,
}

impl fmt::Display for DeclList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclList::Generics => write!(f, "generic"),
            DeclList::Ports => write!(f, "port"),
        }
    }
}

/// Where in the parse result an issue was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Entity name, or `#<index>` when the entity itself could not be read.
    pub entity: String,
    /// The declaration, if the issue is narrower than the entity.
    pub declaration: Option<DeclarationRef>,
}

/// A declaration's position within its entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationRef {
    pub list: DeclList,
    pub index: usize,
    pub name: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.entity)?;
        if let Some(decl) = &self.declaration {
            match &decl.name {
                Some(name) => write!(f, ", {} '{}'", decl.list, name)?,
                None => write!(f, ", {} #{}", decl.list, decl.index)?,
            }
        }
        Ok(())
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The object was kept with an `UNKNOWN` type.
    UnknownType { declared: String },
    /// The declaration or entity was left out.
    Failed(NormalizeError),
}

/// One entry of a [`NormalizationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub location: Location,
    pub kind: IssueKind,
}

impl Issue {
    pub fn is_failure(&self) -> bool {
        matches!(self.kind, IssueKind::Failed(_))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::UnknownType { declared } => {
                write!(f, "warning: {}: unknown type '{declared}'", self.location)
            }
            IssueKind::Failed(err) => write!(f, "error: {}: {err}", self.location),
        }
    }
}

/// Everything noteworthy that happened during one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    issues: Vec<Issue>,
    normalized: usize,
}

impl NormalizationReport {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn failures(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_failure())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.issues.iter().any(Issue::is_failure)
    }

    /// Number of declarations that made it into the system.
    pub fn normalized(&self) -> usize {
        self.normalized
    }

    /// One-line summary, e.g. `12 declarations normalized, 1 failed, 2 unknown types`.
    pub fn summary(&self) -> String {
        let failed = self.failures().count();
        let unknown = self.warnings().count();
        format!(
            "{} declaration{} normalized, {} failed, {} unknown type{}",
            self.normalized,
            if self.normalized == 1 { "" } else { "s" },
            failed,
            unknown,
            if unknown == 1 { "" } else { "s" },
        )
    }

    fn push(&mut self, location: Location, kind: IssueKind) {
        if let IssueKind::Failed(err) = &kind {
            log::warn!("{location}: {err}");
        }
        self.issues.push(Issue { location, kind });
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub system: System,
    pub report: NormalizationReport,
}

/// Build a [`System`] named `system_name` from a decoded parse result.
///
/// Only an invalid system name fails the whole pass.
pub fn aggregate(
    system_name: &str,
    design: &RawDesign,
    tables: &TypeTables,
) -> Result<Aggregation, ModelError> {
    let mut system = System::new(system_name)?;
    let mut report = NormalizationReport::default();

    for (index, node) in design.entities.iter().enumerate() {
        let raw = match RawEntity::from_json(node) {
            Ok(raw) => raw,
            Err(err) => {
                report.push(
                    Location {
                        entity: format!("#{index}"),
                        declaration: None,
                    },
                    IssueKind::Failed(err),
                );
                continue;
            }
        };

        let mut entity = match Entity::new(raw.name.as_str()) {
            Ok(entity) => entity,
            Err(err) => {
                report.push(
                    Location {
                        entity: format!("#{index}"),
                        declaration: None,
                    },
                    IssueKind::Failed(err.into()),
                );
                continue;
            }
        };

        for (list, nodes) in [(DeclList::Generics, &raw.generics), (DeclList::Ports, &raw.ports)] {
            for (position, node) in nodes.iter().enumerate() {
                let location = |name: Option<&str>| Location {
                    entity: raw.name.clone(),
                    declaration: Some(DeclarationRef {
                        list,
                        index: position,
                        name: name.map(str::to_string),
                    }),
                };

                let decoded = match DeclNode::from_json(node) {
                    Ok(decoded) => decoded,
                    Err(err) => {
                        let name = node.get("name").or_else(|| {
                            node.get("variable").and_then(|v| v.get("name"))
                        });
                        report.push(
                            location(name.and_then(Value::as_str)),
                            IssueKind::Failed(err),
                        );
                        continue;
                    }
                };
                let name = Some(decoded.decl().name.as_str());

                if decoded.is_port() != (list == DeclList::Ports) {
                    let found = if decoded.is_port() { "port" } else { "generic" };
                    report.push(
                        location(name),
                        IssueKind::Failed(NormalizeError::structural(format!(
                            "{found} node in the {list} list"
                        ))),
                    );
                    continue;
                }

                match normalize(&decoded, tables) {
                    Ok(declaration) => {
                        if declaration.object().ty().is_unknown() {
                            report.push(
                                location(name),
                                IssueKind::UnknownType {
                                    declared: declaration.object().ty().name().to_string(),
                                },
                            );
                        }
                        report.normalized += 1;
                        match declaration {
                            Declaration::Generic(g) => entity.push_generic(g),
                            Declaration::Port(p) => entity.push_port(p),
                        }
                    }
                    Err(err) => report.push(location(name), IssueKind::Failed(err)),
                }
            }
        }

        log::debug!(
            "entity {}: {} generics, {} ports",
            entity.name(),
            entity.generics().len(),
            entity.ports().len()
        );
        system.push_entity(entity);
    }

    Ok(Aggregation { system, report })
}

/// Decode a parse dump and aggregate it.
///
/// A dump without an `entities` list is reported as a single failure with an
/// empty system.
pub fn aggregate_json(
    system_name: &str,
    dump: &Value,
    tables: &TypeTables,
) -> Result<Aggregation, ModelError> {
    match RawDesign::from_json(dump) {
        Ok(design) => aggregate(system_name, &design, tables),
        Err(err) => {
            let mut report = NormalizationReport::default();
            report.push(
                Location {
                    entity: "*".into(),
                    declaration: None,
                },
                IssueKind::Failed(err),
            );
            Ok(Aggregation {
                system: System::new(system_name)?,
                report,
            })
        }
    }
}
