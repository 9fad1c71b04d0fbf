//! Upload demo - chunked asset transfer and rendered text.
//!
//! This example demonstrates:
//! - Uploading an animation buffer as a chunked transfer
//! - Rendering text through a `GlyphRasterizer` implementation
//! - How chunk headers and MTU slicing show up on the wire
//!
//! The "animation" here is just a synthetic byte buffer; with a real
//! device you would pass GIF container bytes produced by your image
//! pipeline.

use dotmatrix_client::text::{FontProfile, GlyphBitmap, GlyphRasterizer, TextOptions};
use dotmatrix_client::transport::{MockTransport, DEFAULT_MTU};
use dotmatrix_client::DisplayClient;

/// A toy rasterizer that draws a filled border box for every character.
struct BoxRasterizer;

impl GlyphRasterizer for BoxRasterizer {
    fn rasterize(&self, _ch: char, width: u16, height: u16) -> dotmatrix_client::Result<GlyphBitmap> {
        let mut cell = GlyphBitmap::new(width, height);
        for x in 0..width {
            cell.set(x, 0, true);
            cell.set(x, height - 1, true);
        }
        for y in 0..height {
            cell.set(0, y, true);
            cell.set(width - 1, y, true);
        }
        Ok(cell)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new(DEFAULT_MTU);
    let wire = transport.share();
    let client = DisplayClient::new(transport);

    client.connect().await?;

    // A 10 KiB synthetic asset: 3 chunks at the default 4096-byte payload.
    let animation: Vec<u8> = (0..10_240u32).map(|i| (i % 256) as u8).collect();
    client.upload_animation(&animation).await?;

    let options = TextOptions {
        profile: FontProfile::Tall16x32,
        ..TextOptions::default()
    };
    client.show_text("HI", &options, &BoxRasterizer).await?;

    client.disconnect().await?;

    let writes = wire.writes();
    println!("{} physical writes", writes.len());
    for (i, write) in writes.iter().enumerate() {
        println!("write {:2}: {:4} bytes, head {:02X?}", i, write.len(), &write[..8.min(write.len())]);
    }

    Ok(())
}
