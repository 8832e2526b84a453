//! Safe tagged views over instance buffers: the reflection path.
//!
//! [`Message`] and [`MessageMut`] pair a borrowed byte buffer with the
//! definition that laid it out. Accesses dispatch on the descriptor's type
//! tag and bounds-check the slot against the buffer, so a descriptor from a
//! foreign definition yields an error instead of undefined behavior. The
//! bytes they touch are exactly the bytes the unchecked [`crate::raw`] path
//! touches — the two paths interoperate freely on the same instance.
//!
//! Presence remains explicit, as on the unchecked path: writing a value
//! does not set the field's bit.

use strut_core::{FieldDescriptor, FieldType, Label, StructDefinition};

use crate::array::Array;
use crate::error::AccessError;
use crate::presence;
use crate::raw;
use crate::string::RawString;
use crate::value::Value;

fn check_slot(
    def: &StructDefinition,
    buf_len: usize,
    field: &FieldDescriptor,
) -> Result<(), AccessError> {
    let end = field.byte_offset.checked_add(field.slot_size());
    if field.byte_offset < def.set_flags_bytes() || end.is_none_or(|e| e > buf_len) {
        return Err(AccessError::SlotOutOfRange {
            field: field.name.clone(),
        });
    }
    Ok(())
}

fn check_presence(def: &StructDefinition, field: &FieldDescriptor) -> Result<(), AccessError> {
    if field.isset_byte_offset >= def.set_flags_bytes() {
        return Err(AccessError::PresenceOutOfRange {
            field: field.name.clone(),
        });
    }
    Ok(())
}

/// Read `field` from `buf`. Caller must have bounds-checked the slot.
fn read_value(buf: &[u8], field: &FieldDescriptor) -> Value {
    let msg = buf.as_ptr();
    // SAFETY: check_slot confirmed the slot lies within `buf`; raw::get
    // reads unaligned, so in-bounds initialized bytes are all it needs.
    unsafe {
        if field.label == Label::Repeated {
            return Value::Repeated(raw::get::<*mut Array<u8>>(msg, field));
        }
        match field.field_type {
            FieldType::Double => Value::Double(raw::get(msg, field)),
            FieldType::Float => Value::Float(raw::get(msg, field)),
            FieldType::Int32 => Value::Int32(raw::get(msg, field)),
            FieldType::Int64 => Value::Int64(raw::get(msg, field)),
            FieldType::UInt32 => Value::UInt32(raw::get(msg, field)),
            FieldType::UInt64 => Value::UInt64(raw::get(msg, field)),
            FieldType::Bool => Value::Bool(raw::get(msg, field)),
            FieldType::Bytes => Value::Bytes(raw::get::<*mut RawString>(msg, field)),
            FieldType::String => Value::String(raw::get::<*mut RawString>(msg, field)),
            FieldType::Message => Value::Message(raw::get::<*mut u8>(msg, field)),
        }
    }
}

/// Read-only view of one message instance.
#[derive(Clone, Copy, Debug)]
pub struct Message<'a> {
    buf: &'a [u8],
    def: &'a StructDefinition,
}

impl<'a> Message<'a> {
    /// Wrap a buffer. The length must equal `def.size()`.
    pub fn new(buf: &'a [u8], def: &'a StructDefinition) -> Result<Self, AccessError> {
        if buf.len() != def.size() {
            return Err(AccessError::BufferSize {
                expected: def.size(),
                actual: buf.len(),
            });
        }
        Ok(Self { buf, def })
    }

    /// The definition this view was created with.
    pub fn definition(&self) -> &'a StructDefinition {
        self.def
    }

    /// Read a field's value, dispatching on the descriptor's type tag.
    ///
    /// Returns the stored bytes regardless of the field's presence bit;
    /// check [`Message::is_set`] first when presence matters.
    pub fn get(&self, field: &FieldDescriptor) -> Result<Value, AccessError> {
        check_slot(self.def, self.buf.len(), field)?;
        Ok(read_value(self.buf, field))
    }

    /// Test a field's presence bit.
    pub fn is_set(&self, field: &FieldDescriptor) -> Result<bool, AccessError> {
        check_presence(self.def, field)?;
        Ok(self.buf[field.isset_byte_offset] & field.isset_byte_mask != 0)
    }

    /// Check that every required field's presence bit is set.
    ///
    /// Validation verdict, not an error signal. See
    /// [`presence::all_required_fields_set`] for the byte-run scan.
    pub fn all_required_fields_set(&self) -> bool {
        // SAFETY: buffer length equals def.size() (checked at construction)
        // and the definition's invariants keep the scan inside the flag
        // region.
        unsafe { presence::all_required_fields_set(self.buf.as_ptr(), self.def) }
    }
}

/// Mutable view of one message instance.
pub struct MessageMut<'a> {
    buf: &'a mut [u8],
    def: &'a StructDefinition,
}

impl<'a> MessageMut<'a> {
    /// Wrap a buffer. The length must equal `def.size()`.
    pub fn new(buf: &'a mut [u8], def: &'a StructDefinition) -> Result<Self, AccessError> {
        if buf.len() != def.size() {
            return Err(AccessError::BufferSize {
                expected: def.size(),
                actual: buf.len(),
            });
        }
        Ok(Self { buf, def })
    }

    /// The definition this view was created with.
    pub fn definition(&self) -> &'a StructDefinition {
        self.def
    }

    /// Reborrow as a read-only [`Message`].
    pub fn as_message(&self) -> Message<'_> {
        Message {
            buf: &*self.buf,
            def: self.def,
        }
    }

    /// Read a field's value. See [`Message::get`].
    pub fn get(&self, field: &FieldDescriptor) -> Result<Value, AccessError> {
        check_slot(self.def, self.buf.len(), field)?;
        Ok(read_value(&*self.buf, field))
    }

    /// Write a field's value.
    ///
    /// The value's tag must match the descriptor. Writes the slot bytes
    /// only — the presence bit is untouched; call
    /// [`MessageMut::set_present`] separately.
    pub fn set(&mut self, field: &FieldDescriptor, value: Value) -> Result<(), AccessError> {
        check_slot(self.def, self.buf.len(), field)?;
        if !value.matches(field) {
            return Err(AccessError::TypeMismatch {
                field: field.name.clone(),
                expected: field.field_type,
                label: field.label,
                got: value.kind(),
            });
        }
        let msg = self.buf.as_mut_ptr();
        // SAFETY: check_slot confirmed the slot lies within the buffer;
        // raw::set writes unaligned.
        unsafe {
            match value {
                Value::Double(v) => raw::set(msg, field, v),
                Value::Float(v) => raw::set(msg, field, v),
                Value::Int32(v) => raw::set(msg, field, v),
                Value::Int64(v) => raw::set(msg, field, v),
                Value::UInt32(v) => raw::set(msg, field, v),
                Value::UInt64(v) => raw::set(msg, field, v),
                Value::Bool(v) => raw::set(msg, field, v),
                Value::Bytes(v) => raw::set(msg, field, v),
                Value::String(v) => raw::set(msg, field, v),
                Value::Message(v) => raw::set(msg, field, v),
                Value::Repeated(v) => raw::set(msg, field, v),
            }
        }
        Ok(())
    }

    /// Set a field's presence bit. Idempotent.
    pub fn set_present(&mut self, field: &FieldDescriptor) -> Result<(), AccessError> {
        check_presence(self.def, field)?;
        self.buf[field.isset_byte_offset] |= field.isset_byte_mask;
        Ok(())
    }

    /// Clear a field's presence bit. Idempotent; pointed-to data is not
    /// touched.
    pub fn clear_present(&mut self, field: &FieldDescriptor) -> Result<(), AccessError> {
        check_presence(self.def, field)?;
        self.buf[field.isset_byte_offset] &= !field.isset_byte_mask;
        Ok(())
    }

    /// Test a field's presence bit.
    pub fn is_set(&self, field: &FieldDescriptor) -> Result<bool, AccessError> {
        check_presence(self.def, field)?;
        Ok(self.buf[field.isset_byte_offset] & field.isset_byte_mask != 0)
    }

    /// Zero the whole presence-flag region in one bulk write.
    pub fn clear_all(&mut self) {
        let flags = self.def.set_flags_bytes();
        self.buf[..flags].fill(0);
    }

    /// Check that every required field's presence bit is set.
    pub fn all_required_fields_set(&self) -> bool {
        self.as_message().all_required_fields_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strut_core::{FieldNumber, FieldSpec};

    fn def() -> StructDefinition {
        StructDefinition::layout(&[
            FieldSpec::new("id", FieldNumber(1), FieldType::UInt32, Label::Required),
            FieldSpec::new("score", FieldNumber(2), FieldType::Double, Label::Optional),
            FieldSpec::new("name", FieldNumber(3), FieldType::String, Label::Optional),
            FieldSpec::new("xs", FieldNumber(4), FieldType::Int32, Label::Repeated),
        ])
        .unwrap()
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let def = def();
        let buf = vec![0u8; def.size() + 1];
        let err = Message::new(&buf, &def).unwrap_err();
        assert!(matches!(err, AccessError::BufferSize { .. }));
    }

    #[test]
    fn tagged_round_trip() {
        let def = def();
        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        let id = def.find_field_by_name("id").unwrap();
        let score = def.find_field_by_name("score").unwrap();

        msg.set(id, Value::UInt32(41)).unwrap();
        msg.set(score, Value::Double(0.5)).unwrap();
        assert_eq!(msg.get(id).unwrap(), Value::UInt32(41));
        assert_eq!(msg.get(score).unwrap(), Value::Double(0.5));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let def = def();
        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        let id = def.find_field_by_name("id").unwrap();
        let err = msg.set(id, Value::Double(1.0)).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn repeated_field_takes_array_record_only() {
        let def = def();
        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        let xs = def.find_field_by_name("xs").unwrap();

        let mut storage: Vec<i32> = vec![1, 2, 3];
        let mut record = Array::<i32> {
            len: storage.len(),
            elements: storage.as_mut_ptr(),
        };
        let untyped = &mut record as *mut Array<i32> as *mut Array<u8>;
        msg.set(xs, Value::Repeated(untyped)).unwrap();
        assert_eq!(msg.get(xs).unwrap(), Value::Repeated(untyped));

        let err = msg.set(xs, Value::Int32(1)).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn set_does_not_touch_presence() {
        let def = def();
        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        let id = def.find_field_by_name("id").unwrap();
        msg.set(id, Value::UInt32(1)).unwrap();
        assert!(!msg.is_set(id).unwrap());
        msg.set_present(id).unwrap();
        assert!(msg.is_set(id).unwrap());
    }

    #[test]
    fn clear_all_then_required_scan() {
        let def = def();
        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        let id = def.find_field_by_name("id").unwrap();

        assert!(!msg.all_required_fields_set());
        msg.set_present(id).unwrap();
        assert!(msg.all_required_fields_set());
        msg.clear_all();
        assert!(!msg.all_required_fields_set());
        assert!(!msg.is_set(id).unwrap());
    }

    #[test]
    fn foreign_descriptor_is_an_error_not_ub() {
        let def = def();
        let big = StructDefinition::layout(
            &(0..40)
                .map(|i| {
                    FieldSpec::new(
                        format!("f{i}"),
                        FieldNumber(i + 1),
                        FieldType::UInt64,
                        Label::Optional,
                    )
                })
                .collect::<Vec<_>>(),
        )
        .unwrap();
        // A descriptor from the larger definition points past our buffer.
        let far = big.find_field_by_name("f39").unwrap();
        assert!(far.byte_offset + far.slot_size() > def.size());

        let mut buf = vec![0u8; def.size()];
        let mut msg = MessageMut::new(&mut buf, &def).unwrap();
        assert!(matches!(
            msg.get(far),
            Err(AccessError::SlotOutOfRange { .. })
        ));
        assert!(matches!(
            msg.set(far, Value::UInt64(1)),
            Err(AccessError::TypeMismatch { .. }) | Err(AccessError::SlotOutOfRange { .. })
        ));
        // Presence byte 4 of the big definition is outside our 1-byte flag
        // region.
        let far_flag = big.find_field_by_name("f39").unwrap();
        assert!(matches!(
            msg.is_set(far_flag),
            Err(AccessError::PresenceOutOfRange { .. })
        ));
    }
}
