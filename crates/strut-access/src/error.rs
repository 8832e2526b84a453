//! Access-layer error types.

use std::error::Error;
use std::fmt;

use strut_core::{FieldType, Label};

/// Errors from the safe [`crate::Message`]/[`crate::MessageMut`] views.
///
/// The unchecked path in [`crate::raw`] has no error taxonomy by design;
/// these exist only so the reflection path can reject misuse instead of
/// exhibiting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The buffer's length does not match the definition's instance size.
    BufferSize {
        /// `definition.size()`.
        expected: usize,
        /// The supplied buffer's length.
        actual: usize,
    },
    /// The descriptor's value slot falls outside this buffer — it belongs
    /// to a different definition.
    SlotOutOfRange {
        /// Name of the offending field.
        field: String,
    },
    /// The descriptor's presence byte falls outside the flag region — it
    /// belongs to a different definition.
    PresenceOutOfRange {
        /// Name of the offending field.
        field: String,
    },
    /// The supplied value's tag does not match the descriptor.
    TypeMismatch {
        /// Name of the field.
        field: String,
        /// The field's declared type.
        expected: FieldType,
        /// The field's cardinality.
        label: Label,
        /// Variant name of the rejected value.
        got: &'static str,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferSize { expected, actual } => {
                write!(f, "buffer is {actual} bytes, definition needs {expected}")
            }
            Self::SlotOutOfRange { field } => {
                write!(f, "field '{field}': value slot outside this buffer")
            }
            Self::PresenceOutOfRange { field } => {
                write!(f, "field '{field}': presence byte outside the flag region")
            }
            Self::TypeMismatch {
                field,
                expected,
                label,
                got,
            } => {
                if *label == Label::Repeated {
                    write!(f, "field '{field}' is repeated {expected}, got {got}")
                } else {
                    write!(f, "field '{field}' is {expected}, got {got}")
                }
            }
        }
    }
}

impl Error for AccessError {}
