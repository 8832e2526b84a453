//! Core definition types for the strut binary struct format.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! schema side of the format: field numbers, field descriptors, struct
//! definitions, and the layout builder that assigns presence bits and
//! value-slot offsets.
//!
//! A [`StructDefinition`] describes the shape of one message type — total
//! byte size, presence-flag region, and an ordered collection of
//! [`FieldDescriptor`]s. It is constructed once (by generated code or a
//! schema loader), validated at construction, and then shared read-only
//! across arbitrarily many instance buffers. The accessors that operate on
//! those buffers live in `strut-access`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod definition;
pub mod error;
pub mod field;
pub mod id;
pub mod layout;

pub use definition::StructDefinition;
pub use error::DefinitionError;
pub use field::{FieldDescriptor, FieldType, Label};
pub use id::FieldNumber;
pub use layout::FieldSpec;
