//! The presence-bit protocol and required-field validation scan.
//!
//! Each field owns one bit in the flag region at the front of the instance
//! buffer. The bit is purely a presence marker: setting or clearing it never
//! frees, clears, or otherwise manages any dynamically-referenced data the
//! field's value slot may still point to — that cleanup belongs to the
//! integrator.
//!
//! Required fields occupy the lowest contiguous bit positions (bit 0 of
//! byte 0 upward, validated at definition construction), so
//! [`all_required_fields_set`] can scan whole bytes plus one masked partial
//! byte instead of testing fields one by one.

use strut_core::{FieldDescriptor, StructDefinition};

/// Set the field's presence bit. Idempotent.
///
/// # Safety
///
/// `msg` must point to a writable instance buffer laid out by the
/// definition this `field` belongs to.
#[inline]
pub unsafe fn set_flag(msg: *mut u8, field: &FieldDescriptor) {
    let byte = msg.add(field.isset_byte_offset);
    // SAFETY: presence byte is in bounds per the caller's contract.
    byte.write(byte.read() | field.isset_byte_mask);
}

/// Clear the field's presence bit. Idempotent.
///
/// Leaves the value slot and any pointed-to data untouched.
///
/// # Safety
///
/// Same contract as [`set_flag`].
#[inline]
pub unsafe fn unset_flag(msg: *mut u8, field: &FieldDescriptor) {
    let byte = msg.add(field.isset_byte_offset);
    // SAFETY: presence byte is in bounds per the caller's contract.
    byte.write(byte.read() & !field.isset_byte_mask);
}

/// Test the field's presence bit.
///
/// # Safety
///
/// `msg` must point to an instance buffer laid out by the definition this
/// `field` belongs to.
#[inline]
pub unsafe fn is_set(msg: *const u8, field: &FieldDescriptor) -> bool {
    // SAFETY: presence byte is in bounds per the caller's contract.
    msg.add(field.isset_byte_offset).read() & field.isset_byte_mask != 0
}

/// Zero the entire presence-flag region in one bulk write.
///
/// Resets every field to "not present" (e.g. before buffer reuse) without
/// touching value slots or pointed-to data.
///
/// # Safety
///
/// `msg` must point to a writable instance buffer of at least
/// `def.set_flags_bytes()` bytes laid out by `def`.
#[inline]
pub unsafe fn clear_presence(msg: *mut u8, def: &StructDefinition) {
    // SAFETY: the flag region is the buffer's first set_flags_bytes bytes.
    msg.write_bytes(0, def.set_flags_bytes());
}

/// Check that every required field's presence bit is set.
///
/// Walks whole flag bytes while at least 8 required bits remain (each must
/// be `0xFF` — such bytes contain only required bits, by the packing
/// invariant), then tests the final partial byte under a mask of the
/// remaining low-order bits, so non-required bits sharing that byte never
/// affect the verdict. Zero required fields returns `true` without reading
/// the buffer. O(required bytes), not O(num_fields).
///
/// # Safety
///
/// `msg` must point to an instance buffer laid out by `def`.
#[inline]
pub unsafe fn all_required_fields_set(msg: *const u8, def: &StructDefinition) -> bool {
    let mut remaining = def.num_required_fields();
    let mut byte = 0usize;
    while remaining >= 8 {
        // SAFETY: required bits fit in the flag region, so `byte` stays
        // within set_flags_bytes.
        if msg.add(byte).read() != 0xFF {
            return false;
        }
        byte += 1;
        remaining -= 8;
    }
    if remaining == 0 {
        return true;
    }
    let mask = (1u8 << remaining) - 1;
    // SAFETY: as above.
    msg.add(byte).read() & mask == mask
}
