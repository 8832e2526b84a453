//! Unchecked offset-based value accessors.
//!
//! The fast path: each function reinterprets `msg + field.byte_offset` as a
//! value of the caller-chosen type, with **no existence check, no bounds
//! check, no type check**. This is exactly as fast as access through a
//! compiler-generated struct, which is the whole point — generated code is
//! correct by construction, and the reflection layer in
//! [`crate::message`] validates before calling.
//!
//! `get` and `set` use unaligned loads/stores, so they require only that
//! the slot's bytes are in bounds; a buffer obtained from an ordinary
//! allocation with a [`strut_core::StructDefinition`]-computed layout makes
//! the accesses effectively aligned anyway. [`value_ptr`] hands back a raw
//! pointer and leaves alignment to the caller's deref.

use strut_core::FieldDescriptor;

/// Pointer to the field's value slot, typed as `*const T`.
///
/// # Safety
///
/// `msg` must point to an instance buffer laid out by the definition this
/// `field` belongs to. Dereferencing the result additionally requires the
/// slot to be properly aligned for `T` and, for reads, initialized.
#[inline]
pub unsafe fn value_ptr<T>(msg: *const u8, field: &FieldDescriptor) -> *const T {
    msg.add(field.byte_offset).cast::<T>()
}

/// Mutable pointer to the field's value slot, typed as `*mut T`.
///
/// # Safety
///
/// Same contract as [`value_ptr`], plus `msg` must be valid for writes.
#[inline]
pub unsafe fn value_ptr_mut<T>(msg: *mut u8, field: &FieldDescriptor) -> *mut T {
    msg.add(field.byte_offset).cast::<T>()
}

/// Read the field's value as a `T`.
///
/// # Safety
///
/// `msg` must point to an instance buffer laid out by the definition this
/// `field` belongs to, the slot bytes must be initialized, and `T` must be
/// the type the field was written with (`size_of::<T>()` bytes are read).
#[inline]
pub unsafe fn get<T: Copy>(msg: *const u8, field: &FieldDescriptor) -> T {
    // SAFETY: caller guarantees the slot is in bounds and initialized;
    // unaligned read needs nothing more.
    value_ptr::<T>(msg, field).read_unaligned()
}

/// Write `value` into the field's value slot.
///
/// Writes the bytes only; the presence bit is separate state, managed
/// through [`crate::presence`].
///
/// # Safety
///
/// `msg` must point to a writable instance buffer laid out by the
/// definition this `field` belongs to (`size_of::<T>()` bytes are written).
#[inline]
pub unsafe fn set<T: Copy>(msg: *mut u8, field: &FieldDescriptor, value: T) {
    // SAFETY: caller guarantees the slot is in bounds and writable.
    value_ptr_mut::<T>(msg, field).write_unaligned(value);
}
