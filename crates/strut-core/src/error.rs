//! Definition-construction error types.

use std::error::Error;
use std::fmt;

use crate::id::FieldNumber;

/// Errors rejected by [`crate::StructDefinition`] construction.
///
/// Every variant is a violated layout invariant. The accessor layer in
/// `strut-access` performs no per-access validation, so these checks run
/// once, when the definition is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefinitionError {
    /// The presence-flag region does not fit in the instance size.
    FlagRegionTooLarge {
        /// Declared presence-flag region size in bytes.
        set_flags_bytes: usize,
        /// Declared total instance size in bytes.
        size: usize,
    },
    /// A field's presence byte lies outside `[0, set_flags_bytes)`.
    PresenceOutOfRange {
        /// Name of the offending field.
        field: String,
        /// The field's `isset_byte_offset`.
        isset_byte_offset: usize,
        /// The definition's presence-flag region size.
        set_flags_bytes: usize,
    },
    /// A field's `isset_byte_mask` does not have exactly one bit set.
    InvalidMask {
        /// Name of the offending field.
        field: String,
        /// The rejected mask.
        mask: u8,
    },
    /// A field's value slot lies outside `[set_flags_bytes, size)`.
    SlotOutOfRange {
        /// Name of the offending field.
        field: String,
        /// The field's `byte_offset`.
        byte_offset: usize,
        /// Declared total instance size in bytes.
        size: usize,
    },
    /// A field's value slot is not naturally aligned for its type.
    MisalignedSlot {
        /// Name of the offending field.
        field: String,
        /// The field's `byte_offset`.
        byte_offset: usize,
        /// The alignment the slot requires.
        align: usize,
    },
    /// Two fields' value slots overlap.
    OverlappingSlots {
        /// First field in the overlapping pair.
        first: String,
        /// Second field in the overlapping pair.
        second: String,
    },
    /// Two fields share the same presence bit.
    DuplicatePresenceBit {
        /// First field in the colliding pair.
        first: String,
        /// Second field in the colliding pair.
        second: String,
    },
    /// Two fields share a name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// Two fields share a field number.
    DuplicateNumber {
        /// The repeated number.
        number: FieldNumber,
    },
    /// Required fields do not occupy presence bits `0..num_required`.
    ///
    /// The O(required-bytes) validation scan depends on this packing; it is
    /// a hard precondition, checked here rather than assumed.
    RequiredBitsNotPacked {
        /// Name of the required field at an out-of-prefix bit position.
        field: String,
        /// The presence bit the field actually occupies.
        bit: usize,
        /// Number of required fields in the definition.
        num_required: usize,
    },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlagRegionTooLarge {
                set_flags_bytes,
                size,
            } => write!(
                f,
                "presence-flag region ({set_flags_bytes} bytes) exceeds instance size ({size} bytes)"
            ),
            Self::PresenceOutOfRange {
                field,
                isset_byte_offset,
                set_flags_bytes,
            } => write!(
                f,
                "field '{field}': presence byte {isset_byte_offset} outside flag region of {set_flags_bytes} bytes"
            ),
            Self::InvalidMask { field, mask } => {
                write!(f, "field '{field}': mask {mask:#04x} is not a single bit")
            }
            Self::SlotOutOfRange {
                field,
                byte_offset,
                size,
            } => write!(
                f,
                "field '{field}': value slot at offset {byte_offset} outside instance of {size} bytes"
            ),
            Self::MisalignedSlot {
                field,
                byte_offset,
                align,
            } => write!(
                f,
                "field '{field}': offset {byte_offset} is not {align}-byte aligned"
            ),
            Self::OverlappingSlots { first, second } => {
                write!(f, "fields '{first}' and '{second}' have overlapping value slots")
            }
            Self::DuplicatePresenceBit { first, second } => {
                write!(f, "fields '{first}' and '{second}' share a presence bit")
            }
            Self::DuplicateName { name } => write!(f, "duplicate field name '{name}'"),
            Self::DuplicateNumber { number } => write!(f, "duplicate field number {number}"),
            Self::RequiredBitsNotPacked {
                field,
                bit,
                num_required,
            } => write!(
                f,
                "required field '{field}' at presence bit {bit}, outside the packed prefix 0..{num_required}"
            ),
        }
    }
}

impl Error for DefinitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_descriptive() {
        let e = DefinitionError::DuplicateName { name: "id".into() };
        assert_eq!(e.to_string(), "duplicate field name 'id'");

        let e = DefinitionError::InvalidMask {
            field: "x".into(),
            mask: 0x03,
        };
        assert!(e.to_string().contains("0x03"));
    }
}
