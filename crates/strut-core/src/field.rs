//! Field descriptors, types, and labels.

use std::fmt;
use std::mem;

use crate::id::FieldNumber;

/// Classification of a field's value type.
///
/// The tag lives in the descriptor, not in the instance buffer: the stored
/// bytes carry no type information at rest, exactly as a compiler-generated
/// struct would. Pointer-valued kinds (`Bytes`, `String`, `Message`) occupy
/// one pointer-sized slot whose pointee is owned by the integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 64-bit IEEE float.
    Double,
    /// 32-bit IEEE float.
    Float,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Boolean, stored as one byte.
    Bool,
    /// Length-delimited bytes; the slot holds a `*mut RawString`.
    Bytes,
    /// Length-delimited UTF-8 text; the slot holds a `*mut RawString`.
    String,
    /// Embedded sub-message; the slot holds a pointer to the sub-message's
    /// instance buffer.
    Message,
}

impl FieldType {
    /// Number of bytes one value of this type occupies in an instance buffer.
    pub fn slot_size(&self) -> usize {
        match self {
            Self::Double | Self::Int64 | Self::UInt64 => 8,
            Self::Float | Self::Int32 | Self::UInt32 => 4,
            Self::Bool => 1,
            Self::Bytes | Self::String | Self::Message => mem::size_of::<*const u8>(),
        }
    }

    /// Required alignment of this type's value slot.
    ///
    /// Matches the host machine's natural alignment for the corresponding
    /// Rust type, so the layout is interchangeable with a compiler-generated
    /// struct on the same machine.
    pub fn slot_align(&self) -> usize {
        match self {
            Self::Double => mem::align_of::<f64>(),
            Self::Float => mem::align_of::<f32>(),
            Self::Int32 => mem::align_of::<i32>(),
            Self::UInt32 => mem::align_of::<u32>(),
            Self::Int64 => mem::align_of::<i64>(),
            Self::UInt64 => mem::align_of::<u64>(),
            Self::Bool => 1,
            Self::Bytes | Self::String | Self::Message => mem::align_of::<*const u8>(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Double => "double",
            Self::Float => "float",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// Cardinality of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// May or may not be present; presence is tracked by the field's bit.
    Optional,
    /// Must be present for the message to validate. Required fields occupy
    /// the lowest presence-bit positions of the definition.
    Required,
    /// Repeated field; the slot holds a pointer to an `Array` record.
    Repeated,
}

/// Metadata locating one field within an instance buffer.
///
/// A descriptor records where the field's value lives (`byte_offset`) and
/// where its presence bit lives (`isset_byte_offset` + `isset_byte_mask`).
/// Descriptors are plain data; all invariants between them (slot ranges,
/// bit uniqueness, required-field packing) are enforced when they are
/// assembled into a [`crate::StructDefinition`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    /// Schema name, used by reflection lookups.
    pub name: String,
    /// Protobuf field number, used by reflection lookups.
    pub number: FieldNumber,
    /// Value type tag.
    pub field_type: FieldType,
    /// Cardinality.
    pub label: Label,
    /// Offset from the start of an instance to the value slot.
    pub byte_offset: usize,
    /// Offset of the byte holding this field's presence bit.
    pub isset_byte_offset: usize,
    /// Single-bit mask selecting the presence bit within that byte.
    pub isset_byte_mask: u8,
}

impl FieldDescriptor {
    /// Size in bytes of this field's value slot.
    ///
    /// Repeated fields store an `Array` record pointer regardless of their
    /// element type.
    pub fn slot_size(&self) -> usize {
        match self.label {
            Label::Repeated => mem::size_of::<*const u8>(),
            _ => self.field_type.slot_size(),
        }
    }

    /// Required alignment of this field's value slot.
    pub fn slot_align(&self) -> usize {
        match self.label {
            Label::Repeated => mem::align_of::<*const u8>(),
            _ => self.field_type.slot_align(),
        }
    }

    /// Absolute presence-bit position: `isset_byte_offset * 8 + bit index`.
    ///
    /// Only meaningful when `isset_byte_mask` has exactly one bit set, which
    /// [`crate::StructDefinition`] validates at construction.
    pub fn presence_bit(&self) -> usize {
        self.isset_byte_offset * 8 + self.isset_byte_mask.trailing_zeros() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_slot_sizes() {
        assert_eq!(FieldType::Double.slot_size(), 8);
        assert_eq!(FieldType::Float.slot_size(), 4);
        assert_eq!(FieldType::Int32.slot_size(), 4);
        assert_eq!(FieldType::Int64.slot_size(), 8);
        assert_eq!(FieldType::UInt32.slot_size(), 4);
        assert_eq!(FieldType::UInt64.slot_size(), 8);
        assert_eq!(FieldType::Bool.slot_size(), 1);
    }

    #[test]
    fn pointer_kinds_are_pointer_sized() {
        let ptr = std::mem::size_of::<*const u8>();
        assert_eq!(FieldType::Bytes.slot_size(), ptr);
        assert_eq!(FieldType::String.slot_size(), ptr);
        assert_eq!(FieldType::Message.slot_size(), ptr);
    }

    #[test]
    fn repeated_slot_is_pointer_sized() {
        let f = FieldDescriptor {
            name: "xs".into(),
            number: FieldNumber(1),
            field_type: FieldType::Int32,
            label: Label::Repeated,
            byte_offset: 8,
            isset_byte_offset: 0,
            isset_byte_mask: 0x01,
        };
        assert_eq!(f.slot_size(), std::mem::size_of::<*const u8>());
        assert_eq!(f.slot_align(), std::mem::align_of::<*const u8>());
    }

    #[test]
    fn presence_bit_combines_byte_and_bit() {
        let f = FieldDescriptor {
            name: "x".into(),
            number: FieldNumber(1),
            field_type: FieldType::Bool,
            label: Label::Optional,
            byte_offset: 2,
            isset_byte_offset: 1,
            isset_byte_mask: 0x04,
        };
        assert_eq!(f.presence_bit(), 10);
    }

    #[test]
    fn display_uses_proto_names() {
        assert_eq!(FieldType::UInt64.to_string(), "uint64");
        assert_eq!(FieldType::Bytes.to_string(), "bytes");
    }
}
