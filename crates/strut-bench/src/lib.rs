//! Benchmark profiles for the strut binary struct format.
//!
//! Provides pre-built definitions shared by the criterion benches:
//!
//! - [`scalar_profile`]: a handful of mixed scalar fields — the typical
//!   generated-message shape
//! - [`wide_profile`]: many fields, configurable required count — stresses
//!   the presence region and the required-field scan

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strut_core::{FieldNumber, FieldSpec, FieldType, Label, StructDefinition};

/// A small mixed-scalar message: u64 id, i32 rank, double score, bool flag.
pub fn scalar_profile() -> StructDefinition {
    StructDefinition::layout(&[
        FieldSpec::new("id", FieldNumber(1), FieldType::UInt64, Label::Required),
        FieldSpec::new("rank", FieldNumber(2), FieldType::Int32, Label::Optional),
        FieldSpec::new("score", FieldNumber(3), FieldType::Double, Label::Optional),
        FieldSpec::new("active", FieldNumber(4), FieldType::Bool, Label::Optional),
    ])
    .unwrap()
}

/// A wide message: `total` int64 fields, the first `required` of them
/// required.
pub fn wide_profile(total: usize, required: usize) -> StructDefinition {
    assert!(required <= total);
    let specs: Vec<FieldSpec> = (0..total)
        .map(|i| {
            FieldSpec::new(
                format!("f{i}"),
                FieldNumber(i as u32 + 1),
                FieldType::Int64,
                if i < required {
                    Label::Required
                } else {
                    Label::Optional
                },
            )
        })
        .collect();
    StructDefinition::layout(&specs).unwrap()
}
