//! High-level device client.
//!
//! [`DisplayClient`] is the coordinating component: it owns the
//! [`TransferSession`] behind a `tokio::sync::Mutex` and holds that lock
//! for the duration of one full command or one full asset transfer. That is
//! the single-owner discipline the wire protocol requires: the transport
//! is one serial pipe, and chunks from two concurrent transfers would
//! interleave and corrupt both assets without the device noticing.
//!
//! # Example
//!
//! ```ignore
//! use dotmatrix_client::{commands::Rgb, DisplayClient};
//!
//! #[tokio::main]
//! async fn main() -> dotmatrix_client::Result<()> {
//!     let transport = my_ble_transport().await?;
//!     let client = DisplayClient::new(transport);
//!
//!     client.connect().await?;
//!     client.set_brightness(80).await?;
//!     client.set_fullscreen_color(Rgb::new(0, 64, 255)).await?;
//!     client.upload_animation(&std::fs::read("boot.gif")?).await?;
//!     client.disconnect().await
//! }
//! ```

use bytes::Bytes;
use tokio::sync::Mutex;

use crate::commands::{reset_frames, ChronographAction, Command, CountdownAction, Rgb};
use crate::error::{DotmatrixError, Result};
use crate::protocol::{chunk_asset, AssetKind, DEFAULT_CHUNK_SIZE};
use crate::session::TransferSession;
use crate::text::{build_text_asset, encode_glyph_stream, GlyphRasterizer, TextOptions};
use crate::transport::Transport;

/// A pixel-matrix display client.
///
/// Cheap to share by reference across tasks; every method serializes on the
/// internal session lock.
pub struct DisplayClient<T: Transport> {
    session: Mutex<TransferSession<T>>,
    chunk_size: usize,
}

impl<T: Transport> DisplayClient<T> {
    /// Create a client over `transport` with the default chunk payload
    /// size.
    pub fn new(transport: T) -> Self {
        Self {
            session: Mutex::new(TransferSession::new(transport)),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the asset chunk payload size.
    ///
    /// Useful for devices whose firmware rejects the 4 KiB default.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Connect the underlying transport.
    pub async fn connect(&self) -> Result<()> {
        self.session.lock().await.connect().await
    }

    /// Disconnect the underlying transport.
    pub async fn disconnect(&self) -> Result<()> {
        self.session.lock().await.disconnect().await
    }

    /// Whether the transport is currently connected.
    pub async fn is_connected(&self) -> bool {
        self.session.lock().await.is_connected()
    }

    /// Encode and send one command, holding the session for the whole
    /// frame.
    pub async fn send(&self, command: &Command) -> Result<()> {
        let frame = command.frame()?;
        tracing::debug!(?command, len = frame.len(), "sending command frame");
        self.session.lock().await.send_frame(&frame).await
    }

    // ------------------------------------------------------------------
    // Single-frame features
    // ------------------------------------------------------------------

    /// Freeze or unfreeze the current screen content.
    pub async fn freeze_screen(&self) -> Result<()> {
        self.send(&Command::FreezeScreen).await
    }

    /// Turn the panel on.
    pub async fn screen_on(&self) -> Result<()> {
        self.send(&Command::Screen { on: true }).await
    }

    /// Turn the panel off.
    pub async fn screen_off(&self) -> Result<()> {
        self.send(&Command::Screen { on: false }).await
    }

    /// Rotate the panel content by 180 degrees.
    pub async fn flip_screen(&self, flipped: bool) -> Result<()> {
        self.send(&Command::FlipScreen { flipped }).await
    }

    /// Set panel brightness, 5-100 percent.
    pub async fn set_brightness(&self, percent: u8) -> Result<()> {
        self.send(&Command::Brightness { percent }).await
    }

    /// Set the global scroll speed.
    pub async fn set_scroll_speed(&self, speed: u8) -> Result<()> {
        self.send(&Command::ScrollSpeed { speed }).await
    }

    /// Set the device clock; the weekday is derived from the date.
    pub async fn set_time(
        &self,
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<()> {
        self.send(&Command::SetTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
        .await
    }

    /// Set the multi-panel joint mode.
    pub async fn set_joint(&self, mode: u8) -> Result<()> {
        self.send(&Command::Joint { mode }).await
    }

    /// Set the six-digit pairing password (000000-999999).
    pub async fn set_password(&self, pin: u32) -> Result<()> {
        self.send(&Command::Password { pin }).await
    }

    /// Switch to a clock face.
    pub async fn set_clock(
        &self,
        style: u8,
        show_date: bool,
        hour24: bool,
        color: Rgb,
    ) -> Result<()> {
        self.send(&Command::Clock {
            style,
            show_date,
            hour24,
            color,
        })
        .await
    }

    /// Show or hide the clock's time indicator.
    pub async fn set_clock_time_indicator(&self, enabled: bool) -> Result<()> {
        self.send(&Command::ClockTimeIndicator { enabled }).await
    }

    /// Control the countdown timer.
    pub async fn set_countdown(
        &self,
        action: CountdownAction,
        minutes: u8,
        seconds: u8,
    ) -> Result<()> {
        self.send(&Command::Countdown {
            action,
            minutes,
            seconds,
        })
        .await
    }

    /// Control the stopwatch.
    pub async fn set_chronograph(&self, action: ChronographAction) -> Result<()> {
        self.send(&Command::Chronograph { action }).await
    }

    /// Fill the whole panel with one color.
    pub async fn set_fullscreen_color(&self, color: Rgb) -> Result<()> {
        self.send(&Command::FullscreenColor { color }).await
    }

    /// Set the two scoreboard counters (clamped to 0-999).
    pub async fn set_scoreboard(&self, left: u16, right: u16) -> Result<()> {
        self.send(&Command::Scoreboard { left, right }).await
    }

    /// Paint one pixel in graffiti mode.
    pub async fn set_graffiti_pixel(&self, color: Rgb, x: u8, y: u8) -> Result<()> {
        self.send(&Command::GraffitiPixel { color, x, y }).await
    }

    /// Start a built-in color effect over a palette of 2-7 colors.
    pub async fn set_effect(&self, style: u8, palette: Vec<Rgb>) -> Result<()> {
        self.send(&Command::Effect { style, palette }).await
    }

    /// Configure the eco on/off schedule.
    pub async fn set_eco(
        &self,
        enabled: bool,
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
        brightness: u8,
    ) -> Result<()> {
        self.send(&Command::Eco {
            enabled,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            brightness,
        })
        .await
    }

    /// Enter or leave the DIY draw mode.
    pub async fn set_diy_mode(&self, mode: u8) -> Result<()> {
        self.send(&Command::DiyMode { mode }).await
    }

    /// Set the microphone type used for music sync.
    pub async fn set_mic_type(&self, kind: u8) -> Result<()> {
        self.send(&Command::MicType { kind }).await
    }

    /// Drive the music-sync stick-figure rhythm.
    pub async fn set_image_rhythm(&self, value: u8) -> Result<()> {
        self.send(&Command::ImageRhythm { value }).await
    }

    /// Stop the music-sync rhythm display.
    pub async fn stop_rhythm(&self) -> Result<()> {
        self.send(&Command::StopRhythm).await
    }

    /// Factory-delete stored device data.
    pub async fn delete_device_data(&self) -> Result<()> {
        self.send(&Command::DeleteDeviceData).await
    }

    /// Send the two-frame reset sequence, holding the session across both
    /// frames.
    pub async fn reset(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        for frame in reset_frames() {
            session.send_frame(&frame).await?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Asset transfers
    // ------------------------------------------------------------------

    /// Upload animated-image container bytes (GIF).
    ///
    /// The bytes are sent as-is; decode/resize happens upstream.
    pub async fn upload_animation(&self, data: &[u8]) -> Result<()> {
        self.upload_asset(AssetKind::Animation, data, "animation").await
    }

    /// Upload still-image container bytes (PNG).
    pub async fn upload_image(&self, data: &[u8]) -> Result<()> {
        self.upload_asset(AssetKind::StillImage, data, "image").await
    }

    /// Render and upload text.
    ///
    /// Rasterizes each character through `rasterizer` at the profile in
    /// `options`, wraps the glyph stream in the text mode packet, and
    /// transfers it as a chunked asset.
    pub async fn show_text(
        &self,
        text: &str,
        options: &TextOptions,
        rasterizer: &impl GlyphRasterizer,
    ) -> Result<()> {
        if text.is_empty() {
            return Err(DotmatrixError::Validation(
                "text must not be empty".to_string(),
            ));
        }
        let glyphs = encode_glyph_stream(text, options.profile, rasterizer)?;
        let asset = build_text_asset(&glyphs, options);
        let chunks = chunk_asset(AssetKind::Text, &asset, self.chunk_size)?;
        tracing::info!(
            chars = text.chars().count(),
            bytes = asset.len(),
            chunks = chunks.len(),
            "uploading text"
        );
        self.send_chunks(&chunks).await
    }

    async fn upload_asset(&self, kind: AssetKind, data: &[u8], what: &str) -> Result<()> {
        if data.is_empty() {
            return Err(DotmatrixError::Validation(format!(
                "{} data must not be empty",
                what
            )));
        }
        let chunks = chunk_asset(kind, data, self.chunk_size)?;
        tracing::info!(bytes = data.len(), chunks = chunks.len(), "uploading {}", what);
        self.send_chunks(&chunks).await
    }

    async fn send_chunks(&self, chunks: &[Bytes]) -> Result<()> {
        // One lock acquisition for the whole transfer keeps chunks from
        // different callers from interleaving on the wire.
        self.session.lock().await.send_asset(chunks).await
    }
}
