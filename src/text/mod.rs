//! Text rendering for the display: glyph bitmaps, packing, and the text
//! mode packet.
//!
//! The pipeline is: rasterize each character through a [`GlyphRasterizer`]
//! (external collaborator; any font backend works), pack the cells into
//! the device's bit format, join them with separator markers, prepend the
//! mode metadata, and feed the whole buffer to the chunk framer as a
//! [`Text`](crate::protocol::AssetKind::Text) asset.
//!
//! # Example
//!
//! ```
//! use dotmatrix_client::text::{
//!     build_text_asset, encode_glyph_stream, FontProfile, GlyphBitmap, GlyphRasterizer,
//!     TextOptions,
//! };
//!
//! struct Dot;
//!
//! impl GlyphRasterizer for Dot {
//!     fn rasterize(&self, _ch: char, w: u16, h: u16) -> dotmatrix_client::Result<GlyphBitmap> {
//!         let mut cell = GlyphBitmap::new(w, h);
//!         cell.set(w / 2, h / 2, true);
//!         Ok(cell)
//!     }
//! }
//!
//! let glyphs = encode_glyph_stream("HI", FontProfile::Tall16x32, &Dot).unwrap();
//! assert_eq!(glyphs.len(), 136);
//!
//! let asset = build_text_asset(&glyphs, &TextOptions::default());
//! assert_eq!(asset.len(), 14 + 136);
//! ```

mod glyph;
mod packet;

pub use glyph::{
    encode_glyph_stream, FontProfile, GlyphBitmap, GlyphRasterizer, SEPARATOR_SIZE,
};
pub use packet::{
    build_text_asset, count_glyphs, TextBackground, TextColorMode, TextMode, TextOptions,
    TEXT_METADATA_SIZE,
};
