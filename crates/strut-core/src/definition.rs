//! Struct definitions: validated, immutable message-shape schemas.
//!
//! A [`StructDefinition`] is built once — by generated code or a schema
//! loader — then shared read-only across every instance buffer of its
//! message type. Construction is the single validation point of the whole
//! format: the unchecked accessors in `strut-access` rely on the invariants
//! established here and never re-check them.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::error::DefinitionError;
use crate::field::{FieldDescriptor, Label};
use crate::id::FieldNumber;

/// Immutable schema describing the in-memory shape of one message type.
///
/// An instance buffer of this type is `size` bytes: bytes
/// `[0, set_flags_bytes)` hold presence bits, the rest holds value slots at
/// each field's `byte_offset`.
///
/// # Invariants (enforced at construction)
///
/// - every presence byte lies in `[0, set_flags_bytes)` and every value slot
///   in `[set_flags_bytes, size)`, naturally aligned, with no two slots
///   overlapping;
/// - no two fields share a presence bit, a name, or a field number;
/// - required fields occupy presence bits `0..num_required_fields` — the
///   packed prefix that lets `all_required_fields_set` scan whole bytes
///   instead of individual fields.
///
/// # Sharing
///
/// `StructDefinition` is `Send + Sync` and contains no interior mutability;
/// the intended pattern is one long-lived definition per message type,
/// referenced by arbitrarily many buffers and threads.
#[derive(Clone, Debug)]
pub struct StructDefinition {
    size: usize,
    set_flags_bytes: usize,
    num_required_fields: usize,
    fields: Vec<FieldDescriptor>,
    by_number: IndexMap<FieldNumber, usize>,
}

impl StructDefinition {
    /// Build a definition from explicit offsets, validating every layout
    /// invariant.
    ///
    /// `fields` keeps its order; it becomes the definition's descriptor
    /// order. Use [`StructDefinition::layout`] instead when offsets should
    /// be computed rather than supplied.
    pub fn new(
        size: usize,
        set_flags_bytes: usize,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, DefinitionError> {
        if set_flags_bytes > size {
            return Err(DefinitionError::FlagRegionTooLarge {
                set_flags_bytes,
                size,
            });
        }

        let mut by_number = IndexMap::with_capacity(fields.len());
        let mut names: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
        let mut bits: HashMap<usize, usize> = HashMap::with_capacity(fields.len());

        for (i, f) in fields.iter().enumerate() {
            if f.isset_byte_mask.count_ones() != 1 {
                return Err(DefinitionError::InvalidMask {
                    field: f.name.clone(),
                    mask: f.isset_byte_mask,
                });
            }
            if f.isset_byte_offset >= set_flags_bytes {
                return Err(DefinitionError::PresenceOutOfRange {
                    field: f.name.clone(),
                    isset_byte_offset: f.isset_byte_offset,
                    set_flags_bytes,
                });
            }
            let end = f.byte_offset.checked_add(f.slot_size());
            if f.byte_offset < set_flags_bytes || end.is_none_or(|e| e > size) {
                return Err(DefinitionError::SlotOutOfRange {
                    field: f.name.clone(),
                    byte_offset: f.byte_offset,
                    size,
                });
            }
            if f.byte_offset % f.slot_align() != 0 {
                return Err(DefinitionError::MisalignedSlot {
                    field: f.name.clone(),
                    byte_offset: f.byte_offset,
                    align: f.slot_align(),
                });
            }
            if names.insert(f.name.as_str(), i).is_some() {
                return Err(DefinitionError::DuplicateName {
                    name: f.name.clone(),
                });
            }
            if by_number.insert(f.number, i).is_some() {
                return Err(DefinitionError::DuplicateNumber { number: f.number });
            }
            if let Some(&prev) = bits.get(&f.presence_bit()) {
                return Err(DefinitionError::DuplicatePresenceBit {
                    first: fields[prev].name.clone(),
                    second: f.name.clone(),
                });
            }
            bits.insert(f.presence_bit(), i);
        }
        // End the `&str` borrows before `fields` moves into Self.
        drop(names);
        drop(bits);

        // Pairwise slot overlap: sort by offset, then each slot must end
        // before the next begins.
        let mut spans: Vec<(usize, usize, usize)> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.byte_offset, f.byte_offset + f.slot_size(), i))
            .collect();
        spans.sort_unstable();
        for pair in spans.windows(2) {
            let (_, end, first) = pair[0];
            let (start, _, second) = pair[1];
            if end > start {
                return Err(DefinitionError::OverlappingSlots {
                    first: fields[first].name.clone(),
                    second: fields[second].name.clone(),
                });
            }
        }

        // Required fields must form the packed bit prefix. Their bits are
        // already unique, so `bit < num_required` for each one means the
        // prefix is exactly 0..num_required.
        let num_required_fields = fields
            .iter()
            .filter(|f| f.label == Label::Required)
            .count();
        for f in &fields {
            if f.label == Label::Required && f.presence_bit() >= num_required_fields {
                return Err(DefinitionError::RequiredBitsNotPacked {
                    field: f.name.clone(),
                    bit: f.presence_bit(),
                    num_required: num_required_fields,
                });
            }
        }

        Ok(Self {
            size,
            set_flags_bytes,
            num_required_fields,
            fields,
            by_number,
        })
    }

    /// Total byte length of one instance buffer.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bytes at the front of an instance reserved for presence bits.
    pub fn set_flags_bytes(&self) -> usize {
        self.set_flags_bytes
    }

    /// Number of field descriptors.
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Number of required fields; they occupy presence bits
    /// `0..num_required_fields`.
    pub fn num_required_fields(&self) -> usize {
        self.num_required_fields
    }

    /// The ordered field descriptors.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by schema name. Linear scan; returns `None` on miss.
    ///
    /// Written to be as fast as possible, but callers that perform repeated
    /// lookups should still cache the resolved descriptor — the intended
    /// hot path resolves once and accesses many times.
    pub fn find_field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field by field number. Returns `None` on miss.
    ///
    /// Goes through the number index built at construction; the caching
    /// advice for [`Self::find_field_by_name`] applies here too.
    pub fn find_field_by_number(&self, number: FieldNumber) -> Option<&FieldDescriptor> {
        self.by_number.get(&number).map(|&i| &self.fields[i])
    }
}
