//! Layout computation: from field specs to a validated definition.
//!
//! This is the library-side equivalent of what a message compiler does when
//! it emits a mirrored native struct: assign presence bits (required fields
//! first, so they form the packed prefix), then place value slots at
//! naturally-aligned offsets. Hand-written integrations that already know
//! their offsets can use [`StructDefinition::new`] directly instead.

use std::cmp::Reverse;
use std::mem;

use crate::definition::StructDefinition;
use crate::error::DefinitionError;
use crate::field::{FieldDescriptor, FieldType, Label};
use crate::id::FieldNumber;

/// Input to the layout builder: a field with no offsets assigned yet.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    /// Schema name.
    pub name: String,
    /// Protobuf field number.
    pub number: FieldNumber,
    /// Value type tag.
    pub field_type: FieldType,
    /// Cardinality.
    pub label: Label,
}

impl FieldSpec {
    /// Convenience constructor.
    pub fn new(
        name: impl Into<String>,
        number: FieldNumber,
        field_type: FieldType,
        label: Label,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            field_type,
            label,
        }
    }

    fn slot_size(&self) -> usize {
        match self.label {
            Label::Repeated => mem::size_of::<*const u8>(),
            _ => self.field_type.slot_size(),
        }
    }

    fn slot_align(&self) -> usize {
        match self.label {
            Label::Repeated => mem::align_of::<*const u8>(),
            _ => self.field_type.slot_align(),
        }
    }
}

fn round_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

impl StructDefinition {
    /// Compute a layout for `specs` and build the validated definition.
    ///
    /// Presence bits are assigned required-first in declaration order, so
    /// required fields occupy bits `0..num_required` as the validation scan
    /// demands. Value slots are placed in descending alignment order
    /// (stable, so equal-alignment fields keep declaration order), which
    /// packs without interior padding; total size is rounded up to the
    /// widest slot alignment so instances can be stored contiguously.
    ///
    /// The returned definition's descriptor order is the declaration order
    /// of `specs`, independent of where each slot landed.
    pub fn layout(specs: &[FieldSpec]) -> Result<StructDefinition, DefinitionError> {
        let num_fields = specs.len();
        let set_flags_bytes = num_fields.div_ceil(8);

        let mut bit_of = vec![0usize; num_fields];
        let mut next_bit = 0;
        for (i, spec) in specs.iter().enumerate() {
            if spec.label == Label::Required {
                bit_of[i] = next_bit;
                next_bit += 1;
            }
        }
        for (i, spec) in specs.iter().enumerate() {
            if spec.label != Label::Required {
                bit_of[i] = next_bit;
                next_bit += 1;
            }
        }

        let mut order: Vec<usize> = (0..num_fields).collect();
        order.sort_by_key(|&i| Reverse(specs[i].slot_align()));

        let mut offset_of = vec![0usize; num_fields];
        let mut cursor = set_flags_bytes;
        for &i in &order {
            cursor = round_up(cursor, specs[i].slot_align());
            offset_of[i] = cursor;
            cursor += specs[i].slot_size();
        }

        let max_align = specs.iter().map(FieldSpec::slot_align).max().unwrap_or(1);
        let size = round_up(cursor, max_align);

        let fields: Vec<FieldDescriptor> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| FieldDescriptor {
                name: spec.name.clone(),
                number: spec.number,
                field_type: spec.field_type,
                label: spec.label,
                byte_offset: offset_of[i],
                isset_byte_offset: bit_of[i] / 8,
                isset_byte_mask: 1 << (bit_of[i] % 8),
            })
            .collect();

        StructDefinition::new(size, set_flags_bytes, fields)
    }
}
