//! Strongly-typed field number identifier.

use std::fmt;

/// A protobuf-style field number.
///
/// Field numbers are assigned by the schema and are unique within a
/// [`crate::StructDefinition`]. They identify a field on the wire and in
/// reflection lookups; they are unrelated to the field's position in the
/// definition's descriptor list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldNumber(pub u32);

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldNumber {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        assert_eq!(FieldNumber(7).to_string(), "7");
    }

    #[test]
    fn from_u32() {
        assert_eq!(FieldNumber::from(3), FieldNumber(3));
    }
}
