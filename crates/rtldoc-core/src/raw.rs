//! Typed view of the hdlConvertor parse tree.
//!
//! The front end emits nested JSON mappings. This module checks their shape
//! once and turns each declaration into a tagged variant, so the normalizer
//! can match exhaustively instead of probing keys.
//!
//! Shapes consumed:
//!
//! ```text
//! generic  {"name": .., "type": TYPE, "value": LITERAL | null}
//! port     {"direction": "IN", "variable": <generic shape>}
//! TYPE     {"literal": {"value": "std_logic"}}
//!        | {"binOperator": {"op0": TYPE-NAME, "op1": {"binOperator": {"op0": HIGH, "op1": LOW}}}}
//! LITERAL  {"literal": {"type": "INT", "value": 15, "bits": 8}}
//! ```

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::{NormalizeError, Result};

/// A literal as carried by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLiteral {
    /// Numeric literal; vector literals also carry their declared width.
    Int { value: i128, bits: Option<u32> },
    /// Integer literal too large for `i128`, kept as its decimal digits.
    Wide { digits: String, bits: Option<u32> },
    /// Identifiers, strings, characters, reals: kept as text.
    Text(String),
}

impl RawLiteral {
    /// Decode a `{"literal": {...}}` node.
    pub fn from_json(node: &Value) -> Result<Self> {
        let literal = node
            .get("literal")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                NormalizeError::structural(format!("expected a literal, found {}", describe(node)))
            })?;
        let value = literal
            .get("value")
            .ok_or_else(|| NormalizeError::structural("literal without a 'value' field"))?;

        let bits = match literal.get("bits") {
            None | Some(Value::Null) => None,
            Some(b) => Some(
                b.as_u64()
                    .and_then(|b| u32::try_from(b).ok())
                    .ok_or_else(|| {
                        NormalizeError::structural(format!("literal bit width {b} is not a count"))
                    })?,
            ),
        };

        Ok(match value {
            Value::Number(n) => Self::from_number(n, bits),
            Value::String(s) => RawLiteral::Text(s.clone()),
            Value::Bool(b) => RawLiteral::Text(b.to_string()),
            other => {
                return Err(NormalizeError::structural(format!(
                    "literal value must be a number or string, found {}",
                    describe(other)
                )))
            }
        })
    }

    fn from_number(n: &Number, bits: Option<u32>) -> Self {
        let digits = n.to_string();
        if !is_integer_text(&digits) {
            return RawLiteral::Text(digits);
        }
        match digits.parse::<i128>() {
            Ok(value) => RawLiteral::Int { value, bits },
            Err(_) => RawLiteral::Wide { digits, bits },
        }
    }

    /// Declared bit width, whatever the size of the value.
    pub fn bits(&self) -> Option<u32> {
        match self {
            RawLiteral::Int { bits, .. } | RawLiteral::Wide { bits, .. } => *bits,
            RawLiteral::Text(_) => None,
        }
    }

    /// The literal as source-like text.
    pub fn text(&self) -> String {
        match self {
            RawLiteral::Int { value, .. } => value.to_string(),
            RawLiteral::Wide { digits, .. } => digits.clone(),
            RawLiteral::Text(s) => s.clone(),
        }
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// One operand of a range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(RawLiteral),
    /// Anything else, such as `WIDTH - 1`.
    Expression { found: String },
}

impl Operand {
    fn from_json(node: &Value) -> Result<Self> {
        if node.get("literal").is_some() {
            Ok(Operand::Literal(RawLiteral::from_json(node)?))
        } else {
            Ok(Operand::Expression {
                found: describe(node),
            })
        }
    }
}

/// The right-hand side of a constrained type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeExpr {
    /// A binary operator whose operands are the high and low bounds.
    Bounds { high: Operand, low: Operand },
    /// Some other node in the constraint position.
    Other { found: String },
}

/// The `type` field of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain type reference such as `std_logic`.
    Named(String),
    /// `<base> constrained-by <range>`, such as `std_logic_vector(7 downto 0)`.
    Constrained { base: String, constraint: RangeExpr },
    /// A type node of any other shape.
    Malformed { found: String },
}

impl TypeExpr {
    pub fn from_json(node: &Value) -> Result<Self> {
        if let Some(literal) = node.get("literal") {
            return Ok(match literal.get("value").and_then(Value::as_str) {
                Some(name) => TypeExpr::Named(name.to_string()),
                None => TypeExpr::Malformed {
                    found: "a non-identifier type literal".into(),
                },
            });
        }

        if let Some(bin) = node.get("binOperator") {
            let base = bin
                .get("op0")
                .and_then(|op| op.get("literal"))
                .and_then(|lit| lit.get("value"))
                .and_then(Value::as_str);
            let Some(base) = base else {
                return Ok(TypeExpr::Malformed {
                    found: "a binary operator without a type name operand".into(),
                });
            };

            let constraint = match bin.get("op1") {
                Some(op1) => match op1.get("binOperator") {
                    Some(range) => {
                        let (Some(high), Some(low)) = (range.get("op0"), range.get("op1")) else {
                            return Err(NormalizeError::structural(format!(
                                "range of type '{base}' is missing an operand"
                            )));
                        };
                        RangeExpr::Bounds {
                            high: Operand::from_json(high)?,
                            low: Operand::from_json(low)?,
                        }
                    }
                    None => RangeExpr::Other {
                        found: describe(op1),
                    },
                },
                None => RangeExpr::Other {
                    found: "nothing".into(),
                },
            };

            return Ok(TypeExpr::Constrained {
                base: base.to_string(),
                constraint,
            });
        }

        Ok(TypeExpr::Malformed {
            found: describe(node),
        })
    }
}

/// A declaration with its direction tag already separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub value: Option<RawLiteral>,
}

impl RawDecl {
    pub fn from_json(node: &Value) -> Result<Self> {
        let obj = as_mapping(node, "declaration")?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| NormalizeError::structural("declaration without a 'name' string"))?
            .to_string();
        let ty = obj.get("type").ok_or_else(|| {
            NormalizeError::structural(format!("declaration '{name}' has no 'type' field"))
        })?;
        let ty = TypeExpr::from_json(ty)?;
        let value = match obj.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => Some(RawLiteral::from_json(v).map_err(|e| match e {
                NormalizeError::StructuralMismatch { detail } => NormalizeError::structural(
                    format!("default value of '{name}': {detail}"),
                ),
                other => other,
            })?),
        };
        Ok(Self { name, ty, value })
    }
}

/// One generic or port node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclNode {
    Generic(RawDecl),
    Port { direction: String, decl: RawDecl },
}

impl DeclNode {
    /// Decode a node; a `direction` key marks a port.
    pub fn from_json(node: &Value) -> Result<Self> {
        let obj = as_mapping(node, "declaration")?;
        match obj.get("direction") {
            Some(direction) => {
                let direction = direction.as_str().ok_or_else(|| {
                    NormalizeError::structural(format!(
                        "port direction must be a string, found {}",
                        describe(direction)
                    ))
                })?;
                let variable = obj.get("variable").ok_or_else(|| {
                    NormalizeError::structural("port node without a 'variable' declaration")
                })?;
                Ok(DeclNode::Port {
                    direction: direction.to_string(),
                    decl: RawDecl::from_json(variable)?,
                })
            }
            None => Ok(DeclNode::Generic(RawDecl::from_json(node)?)),
        }
    }

    pub fn decl(&self) -> &RawDecl {
        match self {
            DeclNode::Generic(decl) | DeclNode::Port { decl, .. } => decl,
        }
    }

    pub fn is_port(&self) -> bool {
        matches!(self, DeclNode::Port { .. })
    }
}

/// One entity of the parse result, its declarations still undecoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    pub name: String,
    #[serde(default)]
    pub generics: Vec<Value>,
    #[serde(default)]
    pub ports: Vec<Value>,
}

impl RawEntity {
    pub fn from_json(node: &Value) -> Result<Self> {
        RawEntity::deserialize(node)
            .map_err(|e| NormalizeError::structural(format!("malformed entity: {e}")))
    }
}

/// The top level of a parse dump: `{"entities": [...]}`.
///
/// Entities are decoded one at a time by the aggregator so a malformed entry
/// does not hide the others.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDesign {
    pub entities: Vec<Value>,
}

impl RawDesign {
    pub fn from_json(node: &Value) -> Result<Self> {
        RawDesign::deserialize(node)
            .map_err(|e| NormalizeError::structural(format!("malformed parse result: {e}")))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| NormalizeError::structural(format!("invalid JSON: {e}")))?;
        Self::from_json(&value)
    }
}

fn as_mapping<'a>(node: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    node.as_object().ok_or_else(|| {
        NormalizeError::structural(format!("{what} must be a mapping, found {}", describe(node)))
    })
}

/// Short description of a node for diagnostics: its first key, or its JSON kind.
fn describe(node: &Value) -> String {
    match node {
        Value::Object(map) => match map.keys().next() {
            Some(key) => format!("a '{key}' node"),
            None => "an empty mapping".into(),
        },
        Value::Array(_) => "a list".into(),
        Value::String(s) => format!("the string \"{s}\""),
        Value::Number(n) => format!("the number {n}"),
        Value::Bool(b) => format!("the boolean {b}"),
        Value::Null => "null".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_with_named_type() {
        let node = json!({
            "name": "EN",
            "type": {"literal": {"type": "ID", "value": "boolean"}},
            "value": null,
        });
        let decoded = DeclNode::from_json(&node).unwrap();
        assert!(!decoded.is_port());
        assert_eq!(decoded.decl().name, "EN");
        assert_eq!(decoded.decl().ty, TypeExpr::Named("boolean".into()));
        assert_eq!(decoded.decl().value, None);
    }

    #[test]
    fn port_with_vector_range() {
        let node = json!({
            "direction": "OUT",
            "variable": {
                "name": "q",
                "type": {"binOperator": {
                    "op0": {"literal": {"type": "ID", "value": "std_logic_vector"}},
                    "operator": "CALL",
                    "op1": {"binOperator": {
                        "op0": {"literal": {"type": "INT", "value": 7}},
                        "operator": "DOWNTO",
                        "op1": {"literal": {"type": "INT", "value": 0}},
                    }},
                }},
                "value": {"literal": {"type": "INT", "value": 15, "bits": 8}},
            },
        });
        let decoded = DeclNode::from_json(&node).unwrap();
        let DeclNode::Port { direction, decl } = decoded else {
            panic!("expected a port");
        };
        assert_eq!(direction, "OUT");
        assert_eq!(
            decl.ty,
            TypeExpr::Constrained {
                base: "std_logic_vector".into(),
                constraint: RangeExpr::Bounds {
                    high: Operand::Literal(RawLiteral::Int { value: 7, bits: None }),
                    low: Operand::Literal(RawLiteral::Int { value: 0, bits: None }),
                },
            }
        );
        assert_eq!(
            decl.value,
            Some(RawLiteral::Int {
                value: 15,
                bits: Some(8)
            })
        );
    }

    #[test]
    fn expression_bound_is_not_a_literal() {
        let ty = TypeExpr::from_json(&json!({"binOperator": {
            "op0": {"literal": {"value": "unsigned"}},
            "op1": {"binOperator": {
                "op0": {"binOperator": {
                    "op0": {"literal": {"value": "WIDTH"}},
                    "op1": {"literal": {"value": 1}},
                }},
                "op1": {"literal": {"value": 0}},
            }},
        }}))
        .unwrap();
        let TypeExpr::Constrained {
            constraint: RangeExpr::Bounds { high, .. },
            ..
        } = ty
        else {
            panic!("expected bounds");
        };
        assert!(matches!(high, Operand::Expression { .. }));
    }

    #[test]
    fn non_operator_constraint_is_other() {
        let ty = TypeExpr::from_json(&json!({"binOperator": {
            "op0": {"literal": {"value": "std_logic_vector"}},
            "op1": {"literal": {"value": "byte_range"}},
        }}))
        .unwrap();
        assert!(matches!(
            ty,
            TypeExpr::Constrained {
                constraint: RangeExpr::Other { .. },
                ..
            }
        ));
    }

    #[test]
    fn unexpected_type_node_is_malformed() {
        let ty = TypeExpr::from_json(&json!({"call": {"fn": "resize"}})).unwrap();
        assert_eq!(
            ty,
            TypeExpr::Malformed {
                found: "a 'call' node".into()
            }
        );
    }

    #[test]
    fn missing_fields_are_structural() {
        let no_type = json!({"name": "x", "value": null});
        assert!(matches!(
            DeclNode::from_json(&no_type),
            Err(NormalizeError::StructuralMismatch { .. })
        ));

        let port_without_variable = json!({"direction": "IN", "name": "clk"});
        assert!(matches!(
            DeclNode::from_json(&port_without_variable),
            Err(NormalizeError::StructuralMismatch { .. })
        ));

        assert!(DeclNode::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn non_literal_default_is_structural() {
        let node = json!({
            "name": "INIT",
            "type": {"literal": {"value": "integer"}},
            "value": {"binOperator": {"op0": {}, "op1": {}}},
        });
        let err = DeclNode::from_json(&node).unwrap_err();
        assert!(err.to_string().contains("default value of 'INIT'"));
    }

    #[test]
    fn literal_kinds() {
        assert_eq!(
            RawLiteral::from_json(&json!({"literal": {"value": "'1'"}})).unwrap(),
            RawLiteral::Text("'1'".into())
        );
        assert_eq!(
            RawLiteral::from_json(&json!({"literal": {"value": 2.5}})).unwrap(),
            RawLiteral::Text("2.5".into())
        );
        assert_eq!(
            RawLiteral::from_json(&json!({"literal": {"value": -3}}))
                .unwrap()
                .text(),
            "-3"
        );
        assert!(RawLiteral::from_json(&json!({"literal": {"value": 1, "bits": -1}})).is_err());
    }

    #[test]
    fn wide_literals_keep_exact_digits() {
        let node: Value = serde_json::from_str(
            r#"{"literal": {"type": "INT", "value": 4722366482869645213695, "bits": 72}}"#,
        )
        .unwrap();
        let literal = RawLiteral::from_json(&node).unwrap();
        assert_eq!(
            literal,
            RawLiteral::Int {
                value: 4_722_366_482_869_645_213_695,
                bits: Some(72)
            }
        );

        let node: Value = serde_json::from_str(
            r#"{"literal": {"value": 340282366920938463463374607431768211456, "bits": 129}}"#,
        )
        .unwrap();
        let literal = RawLiteral::from_json(&node).unwrap();
        assert_eq!(literal.text(), "340282366920938463463374607431768211456");
        assert_eq!(literal.bits(), Some(129));
        assert!(matches!(literal, RawLiteral::Wide { .. }));
    }

    #[test]
    fn design_and_entity_decoding() {
        let design = RawDesign::from_json_str(
            r#"{"entities": [{"name": "top", "ports": []}, {"generics": []}]}"#,
        )
        .unwrap();
        assert_eq!(design.entities.len(), 2);

        let top = RawEntity::from_json(&design.entities[0]).unwrap();
        assert_eq!(top.name, "top");
        assert!(top.generics.is_empty());

        assert!(RawEntity::from_json(&design.entities[1]).is_err());
        assert!(RawDesign::from_json_str(r#"{"modules": []}"#).is_err());
        assert!(RawDesign::from_json_str("not json").is_err());
    }
}
