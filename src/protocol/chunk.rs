//! Asset chunking.
//!
//! Turns one asset buffer into the ordered sequence of header-prefixed
//! chunks the device expects for large transfers. The device reassembles by
//! concatenating chunk payloads in the exact order received; the
//! continuation flag only distinguishes "start new asset" from "append",
//! it cannot resequence. Chunk order is therefore a hard invariant that
//! the [session](crate::session) preserves all the way to the radio.
//!
//! The asset length and CRC-32 are computed once over the complete buffer
//! and replicated into every chunk's header; a receiver can checksum the
//! reassembled asset against any chunk it kept.

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{AssetKind, ChunkHeader, Continuation, CHUNK_HEADER_SIZE};
use crate::error::{DotmatrixError, Result};

/// Split an asset into an ordered sequence of ready-to-send chunks.
///
/// Each returned buffer is a 16-byte [`ChunkHeader`] followed by at most
/// `chunk_size` bytes of asset payload; the last chunk may be shorter. A
/// zero-length asset yields a single empty-payload chunk (content
/// preconditions such as "an animation needs at least one frame" belong to
/// the asset producer, not here).
///
/// Length fields truncate to their declared width: an asset of 4 GiB or
/// more silently wraps the 32-bit asset length. Known limitation; real
/// assets for these displays are kilobytes.
///
/// # Errors
///
/// Returns [`DotmatrixError::Validation`] if `chunk_size` is zero, and
/// [`DotmatrixError::Encoding`] if `chunk_size` is too large for the chunk
/// length field (header + payload must fit in a `u16`).
///
/// # Example
///
/// ```
/// use dotmatrix_client::protocol::{chunk_asset, AssetKind};
///
/// let asset = vec![0u8; 5000];
/// let chunks = chunk_asset(AssetKind::Animation, &asset, 4096).unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].len(), 4096 + 16);
/// assert_eq!(chunks[1].len(), 904 + 16);
/// ```
pub fn chunk_asset(kind: AssetKind, asset: &[u8], chunk_size: usize) -> Result<Vec<Bytes>> {
    if chunk_size == 0 {
        return Err(DotmatrixError::Validation(
            "chunk size must be non-zero".to_string(),
        ));
    }
    if CHUNK_HEADER_SIZE + chunk_size > usize::from(u16::MAX) {
        return Err(DotmatrixError::Encoding(format!(
            "chunk size {} overflows the 16-bit chunk length field",
            chunk_size
        )));
    }

    let asset_total_length = asset.len() as u32;
    let crc32 = crc32fast::hash(asset);

    let slices: Vec<&[u8]> = if asset.is_empty() {
        // A zero-length asset still produces one (empty) start chunk.
        vec![&[]]
    } else {
        asset.chunks(chunk_size).collect()
    };

    let mut chunks = Vec::with_capacity(slices.len());
    for (i, slice) in slices.into_iter().enumerate() {
        let header = ChunkHeader::new(
            kind,
            (CHUNK_HEADER_SIZE + slice.len()) as u16,
            Continuation::for_index(i),
            asset_total_length,
            crc32,
        );
        let mut chunk = BytesMut::with_capacity(CHUNK_HEADER_SIZE + slice.len());
        chunk.put_slice(&header.encode());
        chunk.put_slice(slice);
        chunks.push(chunk.freeze());
    }
    Ok(chunks)
}
