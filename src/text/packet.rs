//! Text mode packet construction.
//!
//! A text upload is not the glyph stream alone: the device expects a fixed
//! 14-byte metadata block (character count, animation mode, speed, colors)
//! prepended to the glyphs. The concatenation `metadata || glyph_stream` is
//! the asset buffer that goes through the chunk framer, so the framer's
//! length and CRC fields cover the metadata too.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use super::glyph::FontProfile;
use crate::commands::Rgb;

/// Size of the metadata block preceding the glyph stream.
pub const TEXT_METADATA_SIZE: usize = 14;

/// How the text moves across the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextMode {
    /// Show the text statically, replacing the current content.
    Replace = 0,
    /// Scroll right-to-left.
    Marquee = 1,
    /// Scroll left-to-right.
    ReverseMarquee = 2,
    /// Scroll bottom-to-top.
    RiseUp = 3,
    /// Scroll top-to-bottom.
    RiseDown = 4,
    Blink = 5,
    Fade = 6,
    Tetris = 7,
    Fill = 8,
}

/// Foreground coloring of the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextColorMode {
    White = 0,
    /// Use the color given in [`TextOptions::color`].
    Fixed = 1,
    RainbowA = 2,
    RainbowB = 3,
    RainbowC = 4,
    RainbowD = 5,
}

/// Background behind the glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextBackground {
    Black = 0,
    /// Use the color given in [`TextOptions::bg_color`].
    Fixed = 1,
}

/// Options for a text upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOptions {
    /// Glyph cell geometry (must match what the rasterizer was asked for).
    pub profile: FontProfile,
    pub mode: TextMode,
    /// Animation speed byte; higher is faster.
    pub speed: u8,
    pub color_mode: TextColorMode,
    pub color: Rgb,
    pub background: TextBackground,
    pub bg_color: Rgb,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            profile: FontProfile::Tall16x32,
            mode: TextMode::Marquee,
            speed: 95,
            color_mode: TextColorMode::Fixed,
            color: Rgb::new(255, 0, 0),
            background: TextBackground::Black,
            bg_color: Rgb::new(0, 255, 0),
        }
    }
}

/// Count separator occurrences in a glyph stream.
///
/// The packet builder derives the character count this way rather than
/// taking it as a parameter, so the count can never disagree with the
/// stream contents.
pub fn count_glyphs(glyph_stream: &[u8], profile: FontProfile) -> usize {
    let separator = profile.separator();
    if glyph_stream.len() < separator.len() {
        return 0;
    }
    glyph_stream
        .windows(separator.len())
        .filter(|window| *window == separator)
        .count()
}

/// Build the text asset buffer: 14-byte metadata followed by the glyph
/// stream. Hand the result to the chunk framer with
/// [`AssetKind::Text`](crate::protocol::AssetKind::Text).
///
/// Metadata layout (multi-byte fields little-endian):
///
/// ```text
/// [num_chars:u16le][00 01][mode][speed][color_mode][r g b][bg][r g b]
/// ```
pub fn build_text_asset(glyph_stream: &[u8], options: &TextOptions) -> Bytes {
    let num_chars = count_glyphs(glyph_stream, options.profile) as u16;

    let mut asset = BytesMut::with_capacity(TEXT_METADATA_SIZE + glyph_stream.len());
    asset.put_u16_le(num_chars);
    asset.put_slice(&[0x00, 0x01]);
    asset.put_u8(options.mode as u8);
    asset.put_u8(options.speed);
    asset.put_u8(options.color_mode as u8);
    asset.put_slice(&[options.color.r, options.color.g, options.color.b]);
    asset.put_u8(options.background as u8);
    asset.put_slice(&[options.bg_color.r, options.bg_color.g, options.bg_color.b]);
    asset.put_slice(glyph_stream);
    asset.freeze()
}
