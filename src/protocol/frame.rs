//! Command frame encoding.
//!
//! A command frame is one self-contained instruction sent to the device in a
//! single logical write:
//!
//! ```text
//! ┌────────────┬────────────┬──────────────┬─────────┐
//! │ Total len  │ Command ID │ Fixed fields │ Payload │
//! │ 2 bytes LE │ 1 byte     │ 0..n bytes   │ 0..n B  │
//! └────────────┴────────────┴──────────────┴─────────┘
//! ```
//!
//! `total_length` counts the whole frame, including the length field itself.
//! The codec computes it; callers never pass lengths in. Malformed frames
//! are silently ignored by the device (there is no protocol-level NACK), so
//! getting this field right is the difference between "works" and "nothing
//! happens".
//!
//! Domain-range validation of the field values is the command layer's job
//! and happens before this codec is called; the codec only rejects frames
//! whose computed length cannot fit the 16-bit field.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{DotmatrixError, Result};

/// Size of the length prefix in bytes.
pub const FRAME_LENGTH_PREFIX_SIZE: usize = 2;

/// Encode a command frame.
///
/// `fixed` holds the feature's fixed header fields (mode/selector bytes that
/// follow the command id), `payload` the feature-specific parameter bytes.
///
/// # Errors
///
/// Returns [`DotmatrixError::Encoding`] if the computed total length does
/// not fit in the frame's `u16` length field.
///
/// # Example
///
/// ```
/// use dotmatrix_client::protocol::encode_frame;
///
/// // Brightness 80%: `05 00 04 80 50`
/// let frame = encode_frame(4, &[0x80], &[80]).unwrap();
/// assert_eq!(&frame[..], &[0x05, 0x00, 0x04, 0x80, 0x50]);
/// ```
pub fn encode_frame(command_id: u8, fixed: &[u8], payload: &[u8]) -> Result<Bytes> {
    let total = FRAME_LENGTH_PREFIX_SIZE + 1 + fixed.len() + payload.len();
    let total_length = u16::try_from(total).map_err(|_| {
        DotmatrixError::Encoding(format!(
            "frame length {} exceeds the 16-bit length field",
            total
        ))
    })?;

    let mut buf = BytesMut::with_capacity(total);
    buf.put_u16_le(total_length);
    buf.put_u8(command_id);
    buf.put_slice(fixed);
    buf.put_slice(payload);
    Ok(buf.freeze())
}
