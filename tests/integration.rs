//! Integration tests for dotmatrix-client.
//!
//! These tests verify the integration between different modules: command
//! building through the session, full asset transfers on the wire, and the
//! serialization requirement for concurrent transfers.

use dotmatrix_client::commands::{Command, Rgb};
use dotmatrix_client::protocol::{
    chunk_asset, AssetKind, ChunkHeader, Continuation, CHUNK_HEADER_SIZE,
};
use dotmatrix_client::session::TransferSession;
use dotmatrix_client::text::{
    build_text_asset, count_glyphs, encode_glyph_stream, GlyphBitmap, GlyphRasterizer,
    TextOptions,
};
use dotmatrix_client::transport::MockTransport;
use dotmatrix_client::{DisplayClient, DotmatrixError};

/// Rasterizer that paints a diagonal, enough to make glyphs distinct.
struct DiagonalRasterizer;

impl GlyphRasterizer for DiagonalRasterizer {
    fn rasterize(&self, ch: char, width: u16, height: u16) -> dotmatrix_client::Result<GlyphBitmap> {
        let mut cell = GlyphBitmap::new(width, height);
        let seed = ch as u16;
        for y in 0..height {
            cell.set((y + seed) % width, y, true);
        }
        Ok(cell)
    }
}

/// Split a raw wire capture back into protocol chunks using the length
/// fields, the way the device firmware does.
fn split_wire_chunks(bytes: &[u8]) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let len = usize::from(u16::from_le_bytes([bytes[offset], bytes[offset + 1]]));
        chunks.push(&bytes[offset..offset + len]);
        offset += len;
    }
    chunks
}

/// Full animation upload through the client: frame, send, reassemble,
/// checksum.
#[tokio::test]
async fn test_animation_upload_end_to_end() {
    let asset: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 256) as u8).collect();

    let transport = MockTransport::connected(4096);
    let inspect = transport.share();
    let client = DisplayClient::new(transport).with_chunk_size(4096);
    client.upload_animation(&asset).await.unwrap();

    let wire = inspect.written_bytes();
    let chunks = split_wire_chunks(&wire);
    assert_eq!(chunks.len(), 3); // ceil(10000 / 4096)

    // Reassemble the way the device does: concatenate payloads in order.
    let mut reassembled = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let header = ChunkHeader::decode(chunk).unwrap();
        assert_eq!(header.kind, AssetKind::Animation);
        assert_eq!(header.continuation, Continuation::for_index(i));
        assert_eq!(header.asset_total_length, 10_000);
        assert_eq!(header.crc32, crc32fast::hash(&asset));
        reassembled.extend_from_slice(&chunk[CHUNK_HEADER_SIZE..]);
    }
    assert_eq!(reassembled, asset);
}

/// Text pipeline: glyphs → metadata → chunks, all fields consistent.
#[tokio::test]
async fn test_text_upload_end_to_end() {
    let options = TextOptions::default();
    let glyphs = encode_glyph_stream("HELLO", options.profile, &DiagonalRasterizer).unwrap();
    assert_eq!(glyphs.len(), 5 * 68);
    assert_eq!(count_glyphs(&glyphs, options.profile), 5);

    let asset = build_text_asset(&glyphs, &options);
    assert_eq!(asset.len(), 14 + 5 * 68);

    let chunks = chunk_asset(AssetKind::Text, &asset, 4096).unwrap();
    assert_eq!(chunks.len(), 1);

    let header = ChunkHeader::decode(&chunks[0]).unwrap();
    assert_eq!(header.kind, AssetKind::Text);
    assert!(header.is_start());
    assert_eq!(header.asset_total_length as usize, asset.len());
    assert_eq!(header.crc32, crc32fast::hash(&asset));

    // The CRC covers the metadata too, not just the glyph stream.
    assert_ne!(header.crc32, crc32fast::hash(&glyphs));
}

/// A command frame larger than the MTU is transport-sliced without gaining
/// any chunk headers.
#[tokio::test]
async fn test_command_frames_slice_without_chunk_headers() {
    let frame = Command::Effect {
        style: 0,
        palette: vec![Rgb::new(1, 2, 3); 7],
    }
    .frame()
    .unwrap();

    let mut session = TransferSession::new(MockTransport::connected(8));
    session.send_frame(&frame).await.unwrap();

    let writes = session.transport().writes();
    assert!(writes.len() > 1);
    assert_eq!(session.transport().written_bytes(), frame.to_vec());
}

/// Without external serialization, chunks of two transfers interleave on
/// the wire, which is the corruption mode the session docs warn about.
/// The core does not (and cannot) prevent this; callers must hold a lock.
#[tokio::test]
async fn test_unserialized_sessions_interleave_chunks() {
    let transport_a = MockTransport::connected(4096);
    let transport_b = transport_a.share();

    let asset_a = vec![0xAAu8; 300];
    let asset_b = vec![0xBBu8; 300];
    let chunks_a = chunk_asset(AssetKind::Animation, &asset_a, 100).unwrap();
    let chunks_b = chunk_asset(AssetKind::Animation, &asset_b, 100).unwrap();

    let mut session_a = TransferSession::new(transport_a);
    let mut session_b = TransferSession::new(transport_b);

    // Drive both transfers by hand, alternating chunk by chunk, the
    // schedule an unsynchronized pair of tasks is free to produce.
    for i in 0..3 {
        session_a.send_asset(&chunks_a[i..=i]).await.unwrap();
        session_b.send_asset(&chunks_b[i..=i]).await.unwrap();
    }

    let writes = session_a.transport().writes();
    assert_eq!(writes.len(), 6);

    // The wire now alternates between the two transfers: every chunk of B
    // lands between chunks of A. A device reassembling by concatenation
    // sees a corrupted stream for both assets.
    let mut sources = Vec::new();
    for write in &writes {
        sources.push(write[CHUNK_HEADER_SIZE]);
    }
    assert_eq!(sources, vec![0xAA, 0xBB, 0xAA, 0xBB, 0xAA, 0xBB]);

    // And B's first chunk carries the Start flag, resetting the device's
    // reassembly of A mid-transfer.
    let b_first = ChunkHeader::decode(&writes[1]).unwrap();
    assert!(b_first.is_start());
}

/// The client's internal lock serializes whole transfers even when callers
/// race.
#[tokio::test]
async fn test_client_serializes_concurrent_uploads() {
    use std::sync::Arc;

    let transport = MockTransport::connected(4096);
    let inspect = transport.share();
    let client = Arc::new(DisplayClient::new(transport).with_chunk_size(100));

    let a = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.upload_animation(&[0xAA; 300]).await })
    };
    let b = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.upload_animation(&[0xBB; 300]).await })
    };
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Six chunks, grouped three-and-three: no transfer starts until the
    // other finished.
    let writes = inspect.writes();
    assert_eq!(writes.len(), 6);
    let sources: Vec<u8> = writes.iter().map(|w| w[CHUNK_HEADER_SIZE]).collect();
    assert!(
        sources == vec![0xAA, 0xAA, 0xAA, 0xBB, 0xBB, 0xBB]
            || sources == vec![0xBB, 0xBB, 0xBB, 0xAA, 0xAA, 0xAA],
        "transfers interleaved: {:02X?}",
        sources
    );
}

/// Transport failure mid-transfer surfaces as a Transport error and stops
/// the chunk stream; validation failures never touch the transport.
#[tokio::test]
async fn test_error_taxonomy_end_to_end() {
    // Validation: bad brightness, transport untouched.
    let client = DisplayClient::new(MockTransport::connected(509));
    assert!(matches!(
        client.set_brightness(200).await.unwrap_err(),
        DotmatrixError::Validation(_)
    ));

    // NotConnected: reported before any write.
    let mut session = TransferSession::new(MockTransport::new(509));
    let chunks = chunk_asset(AssetKind::Animation, &[1, 2, 3], 100).unwrap();
    assert!(matches!(
        session.send_asset(&chunks).await.unwrap_err(),
        DotmatrixError::NotConnected
    ));

    // Transport: failure mid-stream aborts the rest of the transfer.
    let chunks = chunk_asset(AssetKind::Animation, &[0u8; 300], 100).unwrap();
    let mut session = TransferSession::new(MockTransport::connected(509).fail_at(1));
    assert!(matches!(
        session.send_asset(&chunks).await.unwrap_err(),
        DotmatrixError::Transport(_)
    ));
    assert_eq!(session.transport().writes().len(), 1);
}

/// Aborting between chunks and starting over resets device-side
/// reassembly: the fresh transfer begins with a Start flag.
#[tokio::test]
async fn test_abort_and_restart_sends_fresh_start_chunk() {
    let asset = vec![9u8; 250];
    let chunks = chunk_asset(AssetKind::Animation, &asset, 100).unwrap();

    let mut session = TransferSession::new(MockTransport::connected(4096));
    // Send only the first two chunks, then abandon the transfer.
    session.send_asset(&chunks[..2]).await.unwrap();

    // Restart from scratch: re-frame and resend everything.
    let restarted = chunk_asset(AssetKind::Animation, &asset, 100).unwrap();
    session.send_asset(&restarted).await.unwrap();

    let writes = session.transport().writes();
    assert_eq!(writes.len(), 5);
    let restart_header = ChunkHeader::decode(&writes[2]).unwrap();
    assert!(restart_header.is_start());
}
