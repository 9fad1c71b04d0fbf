//! Chunk header encoding and decoding.
//!
//! Implements the 16-byte header prepended to every chunk of a large-asset
//! transfer:
//!
//! ```text
//! ┌───────────┬────────┬──────┬────────────┬──────────┬─────────┐
//! │ Chunk len │ Marker │ Flag │ Asset len  │ CRC32    │ Trailer │
//! │ 2 bytes   │ 2 bytes│ 1 B  │ 4 bytes    │ 4 bytes  │ 3 bytes │
//! │ uint16 LE │        │      │ uint32 LE  │ uint32 LE│         │
//! └───────────┴────────┴──────┴────────────┴──────────┴─────────┘
//! ```
//!
//! All multi-byte integers are Little Endian. The marker and trailer are
//! constant per asset kind and must be reproduced byte-exactly for device
//! compatibility; the asset length and CRC are computed once over the whole
//! asset and repeated unchanged in every chunk. Only the chunk length and
//! the continuation flag vary between chunks of one transfer.

/// Chunk header size in bytes (fixed, exactly 16).
pub const CHUNK_HEADER_SIZE: usize = 16;

/// Default chunk payload size used for asset uploads.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Per-chunk continuation flag.
///
/// The device uses this only to distinguish "start a new asset" from
/// "append to the current one"; it never resequences chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Continuation {
    /// First chunk of a transfer. Resets device-side reassembly.
    Start = 0,
    /// Any subsequent chunk.
    Continue = 2,
}

impl Continuation {
    /// Flag for the chunk at `index` within a transfer.
    #[inline]
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            Continuation::Start
        } else {
            Continuation::Continue
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Continuation::Start),
            2 => Some(Continuation::Continue),
            _ => None,
        }
    }
}

/// The kind of asset a transfer carries.
///
/// Selects the constant marker and trailer bytes of the chunk header. The
/// values for [`Animation`](AssetKind::Animation) and
/// [`Text`](AssetKind::Text) are taken from captured device traffic.
/// [`StillImage`](AssetKind::StillImage) reuses the animation constants:
/// the only known still-image capture has an internally inconsistent header
/// and needs re-verification against real hardware before it can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Animated image container bytes (GIF).
    Animation,
    /// Still image container bytes (PNG).
    StillImage,
    /// Rendered text: metadata followed by a glyph bitmap stream.
    Text,
}

impl AssetKind {
    /// Constant marker bytes at offsets 2..4.
    #[inline]
    pub fn marker(self) -> [u8; 2] {
        match self {
            AssetKind::Animation | AssetKind::StillImage => [0x01, 0x00],
            AssetKind::Text => [0x03, 0x00],
        }
    }

    /// Constant trailer bytes at offsets 13..16.
    #[inline]
    pub fn trailer(self) -> [u8; 3] {
        match self {
            AssetKind::Animation | AssetKind::StillImage => [0x05, 0x00, 0x0D],
            AssetKind::Text => [0x00, 0x00, 0x0C],
        }
    }

    fn from_wire(marker: [u8; 2], trailer: [u8; 3]) -> Option<Self> {
        match (marker, trailer) {
            ([0x01, 0x00], [0x05, 0x00, 0x0D]) => Some(AssetKind::Animation),
            ([0x03, 0x00], [0x00, 0x00, 0x0C]) => Some(AssetKind::Text),
            _ => None,
        }
    }
}

/// Decoded chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Asset kind (selects marker/trailer constants).
    pub kind: AssetKind,
    /// This chunk's byte count, including the header itself.
    pub chunk_total_length: u16,
    /// Start or continuation.
    pub continuation: Continuation,
    /// Whole-asset byte count, identical across all chunks of a transfer.
    pub asset_total_length: u32,
    /// CRC-32/ISO-HDLC over the whole asset (header bytes excluded),
    /// identical across all chunks of a transfer.
    pub crc32: u32,
}

impl ChunkHeader {
    /// Create a new chunk header.
    pub fn new(
        kind: AssetKind,
        chunk_total_length: u16,
        continuation: Continuation,
        asset_total_length: u32,
        crc32: u32,
    ) -> Self {
        Self {
            kind,
            chunk_total_length,
            continuation,
            asset_total_length,
            crc32,
        }
    }

    /// Encode the header to bytes (Little Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use dotmatrix_client::protocol::{AssetKind, ChunkHeader, Continuation};
    ///
    /// let header = ChunkHeader::new(AssetKind::Animation, 4112, Continuation::Start, 5000, 0);
    /// assert_eq!(header.encode().len(), 16);
    /// ```
    pub fn encode(&self) -> [u8; CHUNK_HEADER_SIZE] {
        let mut buf = [0u8; CHUNK_HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode the header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than `CHUNK_HEADER_SIZE` (16 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= CHUNK_HEADER_SIZE);
        buf[0..2].copy_from_slice(&self.chunk_total_length.to_le_bytes());
        buf[2..4].copy_from_slice(&self.kind.marker());
        buf[4] = self.continuation as u8;
        buf[5..9].copy_from_slice(&self.asset_total_length.to_le_bytes());
        buf[9..13].copy_from_slice(&self.crc32.to_le_bytes());
        buf[13..16].copy_from_slice(&self.kind.trailer());
    }

    /// Decode a header from bytes (Little Endian).
    ///
    /// Returns `None` if the buffer is too short, the constant bytes do not
    /// match a known asset kind, or the continuation flag is unknown.
    /// Decoding exists for tests and traffic diagnostics; the device itself
    /// is the only real consumer of encoded headers.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < CHUNK_HEADER_SIZE {
            return None;
        }
        let kind = AssetKind::from_wire(
            [buf[2], buf[3]],
            [buf[13], buf[14], buf[15]],
        )?;
        Some(Self {
            kind,
            chunk_total_length: u16::from_le_bytes([buf[0], buf[1]]),
            continuation: Continuation::from_byte(buf[4])?,
            asset_total_length: u32::from_le_bytes([buf[5], buf[6], buf[7], buf[8]]),
            crc32: u32::from_le_bytes([buf[9], buf[10], buf[11], buf[12]]),
        })
    }

    /// Check if this is the first chunk of a transfer.
    #[inline]
    pub fn is_start(&self) -> bool {
        self.continuation == Continuation::Start
    }
}
