//! Canonical interface model: systems, entities, generics and ports.
//!
//! Everything the renderer needs is resolved here, so a row can be produced
//! for each object without looking back at the parse tree.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;
use crate::tables::TypeClass;

/// The classified type of an interface object.
///
/// Classified variants hold the type table's spelling of the name;
/// `Unknown` keeps the name as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", content = "name", rename_all = "kebab-case")]
pub enum ObjectType {
    Bit(String),
    Vector(String),
    IntegerLike(String),
    Unknown(String),
}

impl ObjectType {
    /// Build a classified type from a table match.
    pub fn classified(class: TypeClass, name: impl Into<String>) -> Self {
        let name = name.into();
        match class {
            TypeClass::Bit => ObjectType::Bit(name),
            TypeClass::Vector => ObjectType::Vector(name),
            TypeClass::IntegerLike => ObjectType::IntegerLike(name),
        }
    }

    /// The class, or `None` for unknown types.
    pub fn class(&self) -> Option<TypeClass> {
        match self {
            ObjectType::Bit(_) => Some(TypeClass::Bit),
            ObjectType::Vector(_) => Some(TypeClass::Vector),
            ObjectType::IntegerLike(_) => Some(TypeClass::IntegerLike),
            ObjectType::Unknown(_) => None,
        }
    }

    /// The matched type name, or the declared name for unknown types.
    pub fn name(&self) -> &str {
        match self {
            ObjectType::Bit(n)
            | ObjectType::Vector(n)
            | ObjectType::IntegerLike(n)
            | ObjectType::Unknown(n) => n,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ObjectType::Vector(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ObjectType::Unknown(_))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Unknown(_) => write!(f, "UNKNOWN"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// What the two bounds of a range measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeUnit {
    /// Bit positions of a vector.
    Index,
    /// Declared value bounds of an integer-like type.
    Value,
}

/// One end of a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bound {
    Int(i64),
    /// An identifier bound such as a generic name.
    Name(String),
    /// Declared in source but not recoverable from the parse tree.
    NotAvailable,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(n) => write!(f, "{n}"),
            Bound::Name(n) => write!(f, "{n}"),
            Bound::NotAvailable => write!(f, "NA"),
        }
    }
}

/// A `(high, low)` pair of bounds sharing one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range {
    unit: RangeUnit,
    high: Bound,
    low: Bound,
}

impl Range {
    /// A vector index range such as `7 downto 0`.
    pub fn index(high: Bound, low: Bound) -> Self {
        Self {
            unit: RangeUnit::Index,
            high,
            low,
        }
    }

    /// A value range such as `range 0 to 15`.
    pub fn values(low: Bound, high: Bound) -> Self {
        Self {
            unit: RangeUnit::Value,
            high,
            low,
        }
    }

    /// The sentinel for an integer-like range the front end does not expose.
    ///
    /// hdlConvertor drops the bounds of `integer range a to b`, so such
    /// declarations are recorded as `(NA, NA)` rather than left unranged.
    pub fn not_available() -> Self {
        Self::values(Bound::NotAvailable, Bound::NotAvailable)
    }

    /// The index range implied by a vector literal of `bits` bits.
    pub fn from_width(bits: u32) -> Self {
        Self::index(Bound::Int(i64::from(bits) - 1), Bound::Int(0))
    }

    pub fn unit(&self) -> RangeUnit {
        self.unit
    }

    pub fn high(&self) -> &Bound {
        &self.high
    }

    pub fn low(&self) -> &Bound {
        &self.low
    }

    pub fn is_available(&self) -> bool {
        self.high != Bound::NotAvailable && self.low != Bound::NotAvailable
    }

    /// Number of bits covered by a numeric index range, if it fits in a `u64`.
    pub fn width(&self) -> Option<u64> {
        match (self.unit, &self.high, &self.low) {
            (RangeUnit::Index, Bound::Int(high), Bound::Int(low)) => {
                high.abs_diff(*low).checked_add(1)
            }
            _ => None,
        }
    }
}

/// A declared default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultValue {
    /// Literal text, for scalars and integer-like types.
    Raw(String),
    /// Unsigned magnitude of a vector literal, kept numeric so the renderer
    /// can choose the base.
    Magnitude(u128),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Raw(s) => write!(f, "{s}"),
            DefaultValue::Magnitude(n) => write!(f, "{n}"),
        }
    }
}

/// Port mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    Inout,
    Buffer,
    Linkage,
}

impl Direction {
    /// Parse a direction tag in any letter case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            "inout" => Some(Direction::Inout),
            "buffer" => Some(Direction::Buffer),
            "linkage" => Some(Direction::Linkage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Inout => "inout",
            Direction::Buffer => "buffer",
            Direction::Linkage => "linkage",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by generics and ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceObject {
    name: String,
    #[serde(rename = "type")]
    ty: ObjectType,
    range: Option<Range>,
    value: Option<DefaultValue>,
}

impl InterfaceObject {
    /// Create an unranged object without a default value.
    pub fn new(name: impl Into<String>, ty: ObjectType) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName {
                kind: "interface object",
            });
        }
        Ok(Self {
            name,
            ty,
            range: None,
            value: None,
        })
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_value(mut self, value: DefaultValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ObjectType {
        &self.ty
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    pub fn value(&self) -> Option<&DefaultValue> {
        self.value.as_ref()
    }
}

impl fmt::Display for InterfaceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.ty)?;
        if let Some(range) = &self.range {
            write!(f, " ({}, {})", range.high, range.low)?;
        }
        if let Some(value) = &self.value {
            write!(f, " := {value}")?;
        }
        Ok(())
    }
}

/// A compile-time parameter of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generic {
    #[serde(flatten)]
    object: InterfaceObject,
}

impl Generic {
    pub fn new(object: InterfaceObject) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &InterfaceObject {
        &self.object
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }
}

/// A signal of an entity with its mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    #[serde(flatten)]
    object: InterfaceObject,
    direction: Direction,
}

impl Port {
    pub fn new(object: InterfaceObject, direction: Direction) -> Self {
        Self { object, direction }
    }

    pub fn object(&self) -> &InterfaceObject {
        &self.object
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// The normalized form of one declaration node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Generic(Generic),
    Port(Port),
}

impl Declaration {
    pub fn object(&self) -> &InterfaceObject {
        match self {
            Declaration::Generic(g) => g.object(),
            Declaration::Port(p) => p.object(),
        }
    }

    pub fn name(&self) -> &str {
        self.object().name()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Generic(g) => write!(f, "generic {}", g.object()),
            Declaration::Port(p) => write!(f, "port {} {}", p.object(), p.direction()),
        }
    }
}

/// A hardware module's declared interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    name: String,
    generics: Vec<Generic>,
    ports: Vec<Port>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName { kind: "entity" });
        }
        Ok(Self {
            name,
            generics: Vec::new(),
            ports: Vec::new(),
        })
    }

    pub fn push_generic(&mut self, generic: Generic) {
        self.generics.push(generic);
    }

    pub fn push_port(&mut self, port: Port) {
        self.ports.push(port);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generics in declaration order.
    pub fn generics(&self) -> &[Generic] {
        &self.generics
    }

    /// Ports in declaration order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }
}

/// All entities of one documented design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct System {
    name: String,
    entities: Vec<Entity>,
}

impl System {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName { kind: "system" });
        }
        Ok(Self {
            name,
            entities: Vec::new(),
        })
    }

    pub fn push_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Find an entity by name.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Total number of generics and ports across all entities.
    pub fn object_count(&self) -> usize {
        self.entities
            .iter()
            .map(|e| e.generics.len() + e.ports.len())
            .sum()
    }
}
