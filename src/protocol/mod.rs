//! Protocol module - wire format, command framing, and asset chunking.
//!
//! This module implements the binary protocol spoken to the display:
//! - 16-byte chunk header encoding/decoding
//! - Command frame encoding (u16 LE length prefix counting itself)
//! - Splitting an asset buffer into an ordered chunk sequence

mod chunk;
mod frame;
mod wire_format;

pub use chunk::chunk_asset;
pub use frame::{encode_frame, FRAME_LENGTH_PREFIX_SIZE};
pub use wire_format::{
    AssetKind, ChunkHeader, Continuation, CHUNK_HEADER_SIZE, DEFAULT_CHUNK_SIZE,
};
