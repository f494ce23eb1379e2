//! Cell formatting shared by all table renderers.

use rtldoc_core::{DefaultValue, Generic, InterfaceObject, ObjectType, Port, Range, RangeUnit};

/// Column headers of the generic table.
pub const GENERIC_COLUMNS: [&str; 4] = ["name", "type", "range", "default value"];

/// Column headers of the port table.
pub const PORT_COLUMNS: [&str; 5] = ["name", "direction", "type", "range", "default value"];

/// Type cell. Unknown types keep their declared name next to the marker.
pub fn format_type(ty: &ObjectType) -> String {
    match ty {
        ObjectType::Unknown(declared) => format!("UNKNOWN ({declared})"),
        other => other.to_string(),
    }
}

/// Range cell: `high:low` for vector indices, `low-high` for value bounds.
pub fn format_range(range: Option<&Range>) -> String {
    match range {
        None => String::new(),
        Some(r) => match r.unit() {
            RangeUnit::Index => format!("{}:{}", r.high(), r.low()),
            RangeUnit::Value => format!("{}-{}", r.low(), r.high()),
        },
    }
}

/// Most hex digits a vector magnitude can occupy.
const MAX_HEX_DIGITS: u64 = (u128::BITS / 4) as u64;

/// Hexadecimal literal, zero-padded to the digits needed for `width_bits`.
/// Padding stops at [`MAX_HEX_DIGITS`]; wider ranges only add leading zeros.
///
/// Example: `format_hex(15, Some(8))` is `0x0F`.
pub fn format_hex(value: u128, width_bits: Option<u64>) -> String {
    let hex = format!("{value:X}");
    let digits = width_bits.map_or(1, |w| w.div_ceil(4).clamp(1, MAX_HEX_DIGITS));
    let pad = usize::try_from(digits)
        .unwrap_or(usize::MAX)
        .saturating_sub(hex.len());
    format!("0x{}{hex}", "0".repeat(pad))
}

/// Default value cell. Vector magnitudes are shown in hex, everything else
/// as the literal text from the source.
pub fn format_default(object: &InterfaceObject) -> String {
    match object.value() {
        None => String::new(),
        Some(DefaultValue::Magnitude(n)) => format_hex(*n, object.range().and_then(Range::width)),
        Some(DefaultValue::Raw(text)) => text.clone(),
    }
}

/// Cells of one generic row, in [`GENERIC_COLUMNS`] order.
pub fn generic_row(generic: &Generic) -> [String; 4] {
    let obj = generic.object();
    [
        obj.name().to_string(),
        format_type(obj.ty()),
        format_range(obj.range()),
        format_default(obj),
    ]
}

/// Cells of one port row, in [`PORT_COLUMNS`] order.
pub fn port_row(port: &Port) -> [String; 5] {
    let obj = port.object();
    [
        obj.name().to_string(),
        port.direction().to_string(),
        format_type(obj.ty()),
        format_range(obj.range()),
        format_default(obj),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtldoc_core::{Bound, Direction};

    fn vector(name: &str) -> InterfaceObject {
        InterfaceObject::new(name, ObjectType::Vector("std_logic_vector".into())).unwrap()
    }

    #[test]
    fn index_range_high_colon_low() {
        let range = Range::index(Bound::Int(7), Bound::Int(0));
        assert_eq!(format_range(Some(&range)), "7:0");
        let named = Range::index(Bound::Name("N".into()), Bound::Int(0));
        assert_eq!(format_range(Some(&named)), "N:0");
    }

    #[test]
    fn value_range_low_dash_high() {
        let range = Range::values(Bound::Int(0), Bound::Int(15));
        assert_eq!(format_range(Some(&range)), "0-15");
        assert_eq!(format_range(Some(&Range::not_available())), "NA-NA");
        assert_eq!(format_range(None), "");
    }

    #[test]
    fn hex_padding() {
        assert_eq!(format_hex(15, Some(8)), "0x0F");
        assert_eq!(format_hex(15, Some(12)), "0x00F");
        assert_eq!(format_hex(1, Some(1)), "0x1");
        assert_eq!(format_hex(0xABC, None), "0xABC");
        assert_eq!(format_hex(0x1FF, Some(4)), "0x1FF");
        assert_eq!(format_hex(u128::MAX, Some(128)), format!("0x{}", "F".repeat(32)));
    }

    #[test]
    fn wide_vector_rows_render() {
        // std_logic_vector(262143 downto 0) := x"FF"
        let generic = Generic::new(
            vector("FILL")
                .with_range(Range::index(Bound::Int(262_143), Bound::Int(0)))
                .with_value(DefaultValue::Magnitude(0xFF)),
        );
        let row = generic_row(&generic);
        assert_eq!(row[2], "262143:0");
        assert_eq!(row[3], format!("0x{}FF", "0".repeat(30)));

        let extreme = vector("X")
            .with_range(Range::index(Bound::Int(i64::MAX), Bound::Int(i64::MIN)))
            .with_value(DefaultValue::Magnitude(1));
        assert_eq!(format_default(&extreme), "0x1");
    }

    #[test]
    fn vector_default_rendered_as_hex() {
        let obj = vector("MASK")
            .with_range(Range::index(Bound::Int(7), Bound::Int(0)))
            .with_value(DefaultValue::Magnitude(15));
        assert_eq!(format_default(&obj), "0x0F");
    }

    #[test]
    fn raw_default_rendered_verbatim() {
        let obj = InterfaceObject::new("DEPTH", ObjectType::IntegerLike("integer".into()))
            .unwrap()
            .with_value(DefaultValue::Raw("16".into()));
        assert_eq!(format_default(&obj), "16");
        assert_eq!(format_default(&vector("V")), "");
    }

    #[test]
    fn unknown_type_cell() {
        assert_eq!(
            format_type(&ObjectType::Unknown("my_custom_type".into())),
            "UNKNOWN (my_custom_type)"
        );
        assert_eq!(format_type(&ObjectType::Bit("std_logic".into())), "std_logic");
    }

    #[test]
    fn rows_follow_column_order() {
        let port = Port::new(
            vector("data").with_range(Range::index(Bound::Int(3), Bound::Int(0))),
            Direction::Inout,
        );
        assert_eq!(port_row(&port), ["data", "inout", "std_logic_vector", "3:0", ""]);

        let generic = Generic::new(
            InterfaceObject::new("EN", ObjectType::Bit("boolean".into()))
                .unwrap()
                .with_value(DefaultValue::Raw("true".into())),
        );
        assert_eq!(generic_row(&generic), ["EN", "boolean", "", "true"]);
    }
}
