//! Array records for repeated fields.
//!
//! A repeated field's value slot holds a pointer to an [`Array<T>`] record:
//! an element count plus a pointer to contiguous element storage. The record
//! carries no type tag — every `Array<T>` has the same `#[repr(C)]` layout
//! (`usize` + pointer), and which `T` the storage is read as is decided
//! entirely by the accessor the caller chooses. Type safety is the generated
//! code's (or reflection layer's) responsibility, not the record's.
//!
//! Arrays of arrays do not exist; protobuf has no such construct.
//!
//! The record never owns its storage. Allocating, growing, and freeing the
//! element memory is the integrator's contract, same as for every other
//! pointed-to value in the format.

use crate::string::RawString;

/// Length + data-pointer record describing a repeated field's storage.
///
/// `len` is measured in elements; element size is `size_of::<T>()`.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Array<T> {
    /// Number of elements in the storage.
    pub len: usize,
    /// Contiguous element storage, owned by the integrator.
    pub elements: *mut T,
}

/// Repeated sub-messages: each element is a pointer to an instance buffer.
pub type MessageArray = Array<*mut u8>;

/// Repeated strings: each element is a pointer to a [`RawString`] record.
pub type StringArray = Array<*mut RawString>;

impl<T> Array<T> {
    /// Pointer to the element at `index`, stride `size_of::<T>()`.
    ///
    /// # Safety
    ///
    /// `self.elements` must point to storage of at least `index + 1`
    /// elements of `T`. No bounds check is performed.
    #[inline]
    pub unsafe fn elem_ptr(&self, index: usize) -> *mut T {
        self.elements.add(index)
    }

    /// Read the element at `index`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Array::elem_ptr`], and the element must be
    /// initialized. No bounds check is performed.
    #[inline]
    pub unsafe fn get(&self, index: usize) -> T
    where
        T: Copy,
    {
        // SAFETY: element is in bounds and initialized per caller contract.
        self.elem_ptr(index).read()
    }

    /// Write the element at `index`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Array::elem_ptr`], with the storage writable.
    #[inline]
    pub unsafe fn set(&self, index: usize, value: T)
    where
        T: Copy,
    {
        // SAFETY: element is in bounds and writable per caller contract.
        self.elem_ptr(index).write(value);
    }

    /// View the whole storage as a slice.
    ///
    /// # Safety
    ///
    /// `self.elements` must point to `self.len` initialized elements of `T`
    /// that stay valid and unaliased-for-writes for the returned lifetime.
    #[inline]
    pub unsafe fn as_slice(&self) -> &[T] {
        std::slice::from_raw_parts(self.elements, self.len)
    }

    /// View the whole storage as a mutable slice.
    ///
    /// # Safety
    ///
    /// Same contract as [`Array::as_slice`], with exclusive access to the
    /// storage for the returned lifetime.
    #[inline]
    pub unsafe fn as_mut_slice(&mut self) -> &mut [T] {
        std::slice::from_raw_parts_mut(self.elements, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_round_trip_leaves_neighbors_alone() {
        let mut storage: Vec<i32> = vec![10, 20, 30];
        let arr = Array {
            len: storage.len(),
            elements: storage.as_mut_ptr(),
        };
        unsafe {
            arr.set(1, -5);
            assert_eq!(arr.get(1), -5);
            assert_eq!(arr.get(0), 10);
            assert_eq!(arr.get(2), 30);
        }
    }

    #[test]
    fn elem_ptr_uses_element_stride() {
        let mut storage: Vec<u64> = vec![0; 4];
        let arr = Array {
            len: storage.len(),
            elements: storage.as_mut_ptr(),
        };
        unsafe {
            let base = arr.elem_ptr(0) as usize;
            let third = arr.elem_ptr(2) as usize;
            assert_eq!(third - base, 2 * std::mem::size_of::<u64>());
        }
    }

    #[test]
    fn slice_views_cover_len_elements() {
        let mut storage: Vec<f32> = vec![1.0, 2.0];
        let mut arr = Array {
            len: storage.len(),
            elements: storage.as_mut_ptr(),
        };
        unsafe {
            assert_eq!(arr.as_slice(), &[1.0, 2.0]);
            arr.as_mut_slice()[0] = 9.0;
        }
        assert_eq!(storage[0], 9.0);
    }

    #[test]
    fn record_layout_is_len_then_pointer() {
        // All Array<T> monomorphizations share this layout; the safe layer
        // relies on it when it hands out untyped Array<u8> pointers.
        assert_eq!(
            std::mem::size_of::<Array<i32>>(),
            std::mem::size_of::<usize>() + std::mem::size_of::<*mut u8>()
        );
        assert_eq!(
            std::mem::size_of::<Array<i32>>(),
            std::mem::size_of::<MessageArray>()
        );
    }
}
