//! Accessors over instance buffers for the strut binary struct format.
//!
//! An instance buffer is an opaque, caller-owned byte region laid out by a
//! [`strut_core::StructDefinition`]: presence-flag bytes up front, value
//! slots behind them. This crate provides the two access paths that operate
//! on those bytes:
//!
//! ```text
//! instance buffer (caller-owned, def.size() bytes)
//! ├── raw       — unchecked pointer triads, as fast as direct struct
//! │               access; misuse is UB by contract (generated code path)
//! ├── presence  — set/unset/test bits, bulk clear, required-field scan
//! ├── array     — Array<T> / RawString records for repeated and
//! │               length-delimited values
//! └── message   — safe Message/MessageMut views dispatching on the
//!                 descriptor's type tag (reflection path)
//! ```
//!
//! Both paths read and write the *same bytes*; the safe views add bounds
//! and tag checks, never a translation step.
//!
//! # Unsafe policy
//!
//! This is the single crate in the workspace permitted to contain `unsafe`
//! code. Every `unsafe fn` documents its `# Safety` contract and every
//! `unsafe` block carries a `// SAFETY:` comment. The core contract is
//! always the same: the descriptor must come from the definition that sized
//! the buffer, and pointed-to data (strings, arrays, sub-messages) is owned
//! and kept alive by the integrator.
//!
//! # Concurrency
//!
//! Nothing here locks, allocates, blocks, or suspends. Presence updates are
//! non-atomic read-modify-write byte operations; concurrent writers need
//! external synchronization. Definitions are shared read-only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
pub mod error;
pub mod message;
pub mod presence;
pub mod raw;
pub mod string;
pub mod value;

pub use array::{Array, MessageArray, StringArray};
pub use error::AccessError;
pub use message::{Message, MessageMut};
pub use string::RawString;
pub use value::Value;
