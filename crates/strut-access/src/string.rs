//! String records for length-delimited fields.

use std::str::Utf8Error;

/// Byte-length + data-pointer record for a `bytes` or `string` value.
///
/// Length-delimited only; the data is **not** NUL-terminated by contract.
/// The record never owns its bytes — allocation and reclamation belong to
/// the integrator.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawString {
    /// Number of bytes at `data`.
    pub byte_len: usize,
    /// The raw bytes, owned by the integrator.
    pub data: *mut u8,
}

impl RawString {
    /// View the record's bytes as a slice.
    ///
    /// # Safety
    ///
    /// `self.data` must point to `self.byte_len` initialized bytes that
    /// stay valid and unaliased-for-writes for the returned lifetime.
    #[inline]
    pub unsafe fn as_bytes(&self) -> &[u8] {
        std::slice::from_raw_parts(self.data, self.byte_len)
    }

    /// View the record's bytes as UTF-8 text.
    ///
    /// `string` fields are UTF-8 by schema contract, but the record itself
    /// never validates, so the check happens here.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawString::as_bytes`].
    #[inline]
    pub unsafe fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }
}
