//! Tagged values for the reflection path.

use strut_core::{FieldDescriptor, FieldType, Label};

use crate::array::Array;
use crate::string::RawString;

/// A field value paired with its type tag.
///
/// This is how the safe [`crate::Message`] views move data: the tag is
/// carried in the value (and checked against the descriptor), never stored
/// in the instance buffer. Pointer-valued variants hold raw pointers —
/// producing one is safe, dereferencing it is the integrator's `unsafe`
/// contract, exactly as on the unchecked path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// 64-bit float.
    Double(f64),
    /// 32-bit float.
    Float(f32),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Unsigned 32-bit integer.
    UInt32(u32),
    /// Unsigned 64-bit integer.
    UInt64(u64),
    /// Boolean.
    Bool(bool),
    /// Length-delimited bytes record pointer.
    Bytes(*mut RawString),
    /// Length-delimited UTF-8 record pointer.
    String(*mut RawString),
    /// Sub-message instance-buffer pointer.
    Message(*mut u8),
    /// Array-record pointer for a repeated field. Untyped: every `Array<T>`
    /// shares this layout, and the element type is the descriptor's
    /// `field_type`.
    Repeated(*mut Array<u8>),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Double(_) => "double",
            Self::Float(_) => "float",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::UInt32(_) => "uint32",
            Self::UInt64(_) => "uint64",
            Self::Bool(_) => "bool",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Message(_) => "message",
            Self::Repeated(_) => "repeated",
        }
    }

    /// Whether this value may be stored in `field`'s slot.
    ///
    /// Repeated fields accept only [`Value::Repeated`]; singular fields
    /// accept the variant matching their type tag.
    pub fn matches(&self, field: &FieldDescriptor) -> bool {
        if field.label == Label::Repeated {
            return matches!(self, Self::Repeated(_));
        }
        matches!(
            (self, field.field_type),
            (Self::Double(_), FieldType::Double)
                | (Self::Float(_), FieldType::Float)
                | (Self::Int32(_), FieldType::Int32)
                | (Self::Int64(_), FieldType::Int64)
                | (Self::UInt32(_), FieldType::UInt32)
                | (Self::UInt64(_), FieldType::UInt64)
                | (Self::Bool(_), FieldType::Bool)
                | (Self::Bytes(_), FieldType::Bytes)
                | (Self::String(_), FieldType::String)
                | (Self::Message(_), FieldType::Message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_core::FieldNumber;

    fn field(field_type: FieldType, label: Label) -> FieldDescriptor {
        FieldDescriptor {
            name: "f".into(),
            number: FieldNumber(1),
            field_type,
            label,
            byte_offset: 8,
            isset_byte_offset: 0,
            isset_byte_mask: 0x01,
        }
    }

    #[test]
    fn singular_match_is_by_type_tag() {
        assert!(Value::Int32(5).matches(&field(FieldType::Int32, Label::Optional)));
        assert!(!Value::Int32(5).matches(&field(FieldType::UInt32, Label::Optional)));
        assert!(!Value::Double(1.0).matches(&field(FieldType::Float, Label::Required)));
    }

    #[test]
    fn repeated_accepts_only_array_records() {
        let f = field(FieldType::Int32, Label::Repeated);
        assert!(Value::Repeated(std::ptr::null_mut()).matches(&f));
        assert!(!Value::Int32(5).matches(&f));
        assert!(!Value::Repeated(std::ptr::null_mut()).matches(&field(
            FieldType::Int32,
            Label::Optional
        )));
    }
}
