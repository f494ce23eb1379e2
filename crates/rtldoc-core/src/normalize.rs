//! Declaration normalizer: one parse-tree node in, one canonical object out.
//!
//! The pass is a pure function of the node and the type tables. Unknown type
//! names degrade to [`ObjectType::Unknown`]; shapes that cannot be read are
//! errors, since an empty range would be indistinguishable from an unranged
//! declaration.

use serde_json::Value;

use crate::error::{BoundSide, NormalizeError, Result};
use crate::model::{
    Bound, Declaration, DefaultValue, Direction, Generic, InterfaceObject, ObjectType, Port, Range,
};
use crate::raw::{DeclNode, Operand, RangeExpr, RawDecl, RawLiteral, TypeExpr};
use crate::tables::{TypeClass, TypeTables};

/// Normalize a decoded declaration node.
pub fn normalize(node: &DeclNode, tables: &TypeTables) -> Result<Declaration> {
    let declaration = match node {
        DeclNode::Generic(decl) => Declaration::Generic(Generic::new(normalize_decl(decl, tables)?)),
        DeclNode::Port { direction, decl } => {
            let direction = Direction::parse(direction).ok_or_else(|| {
                NormalizeError::structural(format!(
                    "port '{}' has unknown direction '{direction}'",
                    decl.name
                ))
            })?;
            Declaration::Port(Port::new(normalize_decl(decl, tables)?, direction))
        }
    };

    if declaration.object().ty().is_unknown() {
        log::warn!(
            "'{}' has unrecognised type '{}'",
            declaration.name(),
            declaration.object().ty().name()
        );
    }
    log::debug!("{declaration}");
    Ok(declaration)
}

/// Decode and normalize a raw hdlConvertor node.
pub fn normalize_json(node: &Value, tables: &TypeTables) -> Result<Declaration> {
    normalize(&DeclNode::from_json(node)?, tables)
}

fn normalize_decl(decl: &RawDecl, tables: &TypeTables) -> Result<InterfaceObject> {
    let (ty, range) = classify(decl, tables)?;
    let mut object = InterfaceObject::new(decl.name.as_str(), ty)?;

    let Some(literal) = &decl.value else {
        if let Some(range) = range {
            object = object.with_range(range);
        }
        return Ok(object);
    };

    let is_vector = object.ty().is_vector();
    let range = match range {
        Some(range) => range,
        None if is_vector => Range::from_width(literal_width(&decl.name, literal)?),
        None => return Ok(object.with_value(default_value(literal, false))),
    };

    Ok(object
        .with_range(range)
        .with_value(default_value(literal, is_vector)))
}

/// Resolve the type and, for constrained types, the declared range.
fn classify(decl: &RawDecl, tables: &TypeTables) -> Result<(ObjectType, Option<Range>)> {
    match &decl.ty {
        TypeExpr::Named(name) => Ok(match tables.classify(name) {
            Some((class, canonical)) => (ObjectType::classified(class, canonical), None),
            None => (ObjectType::Unknown(name.clone()), None),
        }),

        TypeExpr::Constrained { base, constraint } => {
            match tables.classify_among(base, &[TypeClass::Vector, TypeClass::IntegerLike]) {
                Some((TypeClass::Vector, canonical)) => {
                    let range = index_range(&decl.name, constraint)?;
                    Ok((ObjectType::Vector(canonical.to_string()), Some(range)))
                }
                Some((class, canonical)) => Ok((
                    ObjectType::classified(class, canonical),
                    Some(Range::not_available()),
                )),
                None => Ok((ObjectType::Unknown(base.clone()), None)),
            }
        }

        TypeExpr::Malformed { found } => Err(NormalizeError::structural(format!(
            "type of '{}' is {found}",
            decl.name
        ))),
    }
}

fn index_range(name: &str, constraint: &RangeExpr) -> Result<Range> {
    match constraint {
        RangeExpr::Bounds { high, low } => Ok(Range::index(
            bound(name, BoundSide::High, high)?,
            bound(name, BoundSide::Low, low)?,
        )),
        RangeExpr::Other { found } => Err(NormalizeError::RangeExtraction {
            name: name.to_string(),
            found: found.clone(),
        }),
    }
}

fn bound(name: &str, side: BoundSide, operand: &Operand) -> Result<Bound> {
    match operand {
        Operand::Literal(RawLiteral::Int { value, .. }) => i64::try_from(*value)
            .map(Bound::Int)
            .map_err(|_| NormalizeError::UnresolvedBound {
                name: name.to_string(),
                side,
                found: format!("the out-of-range index {value}"),
            }),
        Operand::Literal(RawLiteral::Wide { digits, .. }) => Err(NormalizeError::UnresolvedBound {
            name: name.to_string(),
            side,
            found: format!("the out-of-range index {digits}"),
        }),
        Operand::Literal(RawLiteral::Text(text)) => Ok(Bound::Name(text.clone())),
        Operand::Expression { found } => Err(NormalizeError::UnresolvedBound {
            name: name.to_string(),
            side,
            found: found.clone(),
        }),
    }
}

/// Declared width of a vector literal; required to infer a missing range.
fn literal_width(name: &str, literal: &RawLiteral) -> Result<u32> {
    match literal.bits() {
        Some(bits) if bits > 0 => Ok(bits),
        _ => Err(NormalizeError::structural(format!(
            "vector '{name}' has no range and its default '{}' carries no bit width",
            literal.text()
        ))),
    }
}

fn default_value(literal: &RawLiteral, is_vector: bool) -> DefaultValue {
    match literal {
        RawLiteral::Int { value, .. } if is_vector => match u128::try_from(*value) {
            Ok(magnitude) => DefaultValue::Magnitude(magnitude),
            Err(_) => DefaultValue::Raw(literal.text()),
        },
        other => DefaultValue::Raw(other.text()),
    }
}
