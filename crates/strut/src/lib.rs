//! Strut: a runtime-introspectable binary struct format for
//! protocol-buffer-like messages.
//!
//! Message fields are laid out in memory exactly as a compiler-generated
//! struct would be, and a generic reflection-based accessor can reach any
//! field given only its descriptor. Generated typed accessors (through
//! [`access::raw`]) and the reflection path (through [`access::Message`])
//! operate on the *same bytes* with no translation step.
//!
//! Like a native struct, the layout depends on the host machine's
//! endianness and alignment, so it is not suitable for exchange across
//! machines — wire serialization is a separate concern this library does
//! not implement. What the format buys is the fastest possible random
//! access to individual fields. No memory management is defined either:
//! instance buffers and all pointed-to data (strings, arrays, sub-messages)
//! are owned by the integrator, so any allocation scheme can sit on top.
//!
//! # Quick start
//!
//! ```rust
//! use strut::prelude::*;
//!
//! // A schema loader (or generated code) builds one definition per type.
//! let def = StructDefinition::layout(&[
//!     FieldSpec::new("id", FieldNumber(1), FieldType::UInt32, Label::Required),
//!     FieldSpec::new("score", FieldNumber(2), FieldType::Double, Label::Optional),
//! ])
//! .unwrap();
//!
//! // The integrator owns the instance buffer.
//! let mut buf = vec![0u8; def.size()];
//!
//! // Resolve descriptors once, access many times.
//! let id = def.find_field_by_name("id").unwrap();
//! let score = def.find_field_by_number(FieldNumber(2)).unwrap();
//!
//! let mut msg = MessageMut::new(&mut buf, &def).unwrap();
//! msg.set(id, Value::UInt32(7)).unwrap();
//! msg.set_present(id).unwrap();
//! msg.set(score, Value::Double(0.25)).unwrap();
//!
//! assert_eq!(msg.get(id).unwrap(), Value::UInt32(7));
//! assert!(!msg.is_set(score).unwrap());
//! assert!(msg.all_required_fields_set());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strut-core` | Field numbers, descriptors, definitions, layout builder |
//! | [`access`] | `strut-access` | Unchecked triads, presence bits, arrays, safe views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Definitions and descriptors (`strut-core`).
pub use strut_core as types;

/// Buffer accessors, presence bits, and array records (`strut-access`).
pub use strut_access as access;

/// Common imports for typical strut usage.
///
/// ```rust
/// use strut::prelude::*;
/// ```
pub mod prelude {
    pub use strut_access::{
        AccessError, Array, Message, MessageArray, MessageMut, RawString, StringArray, Value,
    };
    pub use strut_core::{
        DefinitionError, FieldDescriptor, FieldNumber, FieldSpec, FieldType, Label,
        StructDefinition,
    };
}
