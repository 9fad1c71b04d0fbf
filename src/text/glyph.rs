//! Glyph bitmaps and the rasterizer seam.
//!
//! Font rendering itself is an external collaborator: anything that can
//! paint a character into a monochrome cell (a TTF rasterizer, a fixed
//! bitmap font table, test fixtures) implements [`GlyphRasterizer`]. This
//! module owns what the protocol cares about: the cell geometry per device
//! profile and the bit-exact packing of a cell into the wire format.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{DotmatrixError, Result};

/// Length of the separator marker preceding every glyph record.
pub const SEPARATOR_SIZE: usize = 4;

/// Glyph cell geometry per device profile.
///
/// The separator's leading byte encodes the cell format, so geometry and
/// separator travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontProfile {
    /// 16x32 cells, the 32x32 panel profile.
    Tall16x32,
    /// 8x16 cells, the 16x16 panel profile.
    Compact8x16,
}

impl FontProfile {
    /// Cell width in pixels.
    #[inline]
    pub fn width(self) -> u16 {
        match self {
            FontProfile::Tall16x32 => 16,
            FontProfile::Compact8x16 => 8,
        }
    }

    /// Cell height in pixels.
    #[inline]
    pub fn height(self) -> u16 {
        match self {
            FontProfile::Tall16x32 => 32,
            FontProfile::Compact8x16 => 16,
        }
    }

    /// The 4-byte marker that precedes every glyph record. The device uses
    /// it to demarcate glyph boundaries; the text packet builder counts its
    /// occurrences to derive the character count.
    #[inline]
    pub fn separator(self) -> [u8; SEPARATOR_SIZE] {
        match self {
            FontProfile::Tall16x32 => [0x05, 0xFF, 0xFF, 0xFF],
            FontProfile::Compact8x16 => [0x02, 0xFF, 0xFF, 0xFF],
        }
    }

    /// Packed bitmap size of one glyph cell in bytes.
    #[inline]
    pub fn packed_len(self) -> usize {
        usize::from(self.width()).div_ceil(8) * usize::from(self.height())
    }

    /// Total size of one glyph record (separator + packed bitmap).
    #[inline]
    pub fn record_len(self) -> usize {
        SEPARATOR_SIZE + self.packed_len()
    }
}

/// A monochrome bitmap, row-major, one entry per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u16,
    height: u16,
    pixels: Vec<bool>,
}

impl GlyphBitmap {
    /// Create an all-off bitmap.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; usize::from(width) * usize::from(height)],
        }
    }

    /// Bitmap width in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Bitmap height in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Turn a pixel on or off. Out-of-bounds coordinates are ignored so
    /// rasterizers can paint overhanging strokes without clipping logic.
    pub fn set(&mut self, x: u16, y: u16, on: bool) {
        if x < self.width && y < self.height {
            self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)] = on;
        }
    }

    /// Read a pixel. Out-of-bounds coordinates read as off.
    pub fn get(&self, x: u16, y: u16) -> bool {
        if x < self.width && y < self.height {
            self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
        } else {
            false
        }
    }

    /// Pack the bitmap row-major, 8 pixels per byte, pixel `x` in bit
    /// `x % 8` (least significant bit first). Each row is padded to a whole
    /// byte; unused high bits are zero.
    pub fn pack(&self) -> Vec<u8> {
        let bytes_per_row = usize::from(self.width).div_ceil(8);
        let mut packed = Vec::with_capacity(bytes_per_row * usize::from(self.height));
        for y in 0..self.height {
            let mut byte = 0u8;
            for x in 0..self.width {
                if self.get(x, y) {
                    byte |= 1 << (x % 8);
                }
                if x % 8 == 7 || x == self.width - 1 {
                    packed.push(byte);
                    byte = 0;
                }
            }
        }
        packed
    }
}

/// External collaborator seam: render one character into a monochrome cell.
///
/// Implementations must return a bitmap of exactly the requested
/// dimensions; [`encode_glyph_stream`] treats any other size as a defect.
pub trait GlyphRasterizer {
    /// Rasterize `ch` into a `width` x `height` cell.
    fn rasterize(&self, ch: char, width: u16, height: u16) -> Result<GlyphBitmap>;
}

/// Render a string into the device's glyph stream: `separator || bitmap`
/// per character, in input order.
///
/// For a string of N characters the stream contains exactly N separator
/// occurrences, each followed by `profile.packed_len()` bitmap bytes.
///
/// # Errors
///
/// Propagates rasterizer errors, and returns [`DotmatrixError::Encoding`]
/// if the rasterizer hands back a bitmap of the wrong size.
pub fn encode_glyph_stream(
    text: &str,
    profile: FontProfile,
    rasterizer: &impl GlyphRasterizer,
) -> Result<Bytes> {
    let (width, height) = (profile.width(), profile.height());
    let mut stream = BytesMut::with_capacity(text.chars().count() * profile.record_len());

    for ch in text.chars() {
        let bitmap = rasterizer.rasterize(ch, width, height)?;
        if bitmap.width() != width || bitmap.height() != height {
            return Err(DotmatrixError::Encoding(format!(
                "rasterizer returned a {}x{} bitmap for {:?}, expected {}x{}",
                bitmap.width(),
                bitmap.height(),
                ch,
                width,
                height
            )));
        }
        stream.put_slice(&profile.separator());
        stream.put_slice(&bitmap.pack());
    }
    Ok(stream.freeze())
}
