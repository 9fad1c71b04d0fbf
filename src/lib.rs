//! # dotmatrix-client
//!
//! Client SDK for BLE pixel-matrix displays speaking the vendor's binary
//! protocol: short fixed-layout command frames for settings (clock,
//! brightness, effects, ...) and a chunked multi-packet stream for large
//! assets (animations, images, rendered text).
//!
//! ## Architecture
//!
//! - **Command path**: [`commands`] → [`protocol`] frame codec →
//!   [`session`] → transport
//! - **Asset path**: raw asset bytes → [`protocol`] chunk framer →
//!   [`session`] → transport, with [`text`] feeding the framer for
//!   rendered strings
//!
//! The radio itself is an external collaborator behind the
//! [`transport::Transport`] trait; the crate never scans or pairs.
//!
//! Malformed frames are silently dropped by the device (there is no
//! protocol-level NACK), so the codecs here are strict about the things
//! the device cannot report: length fields, checksums, chunk order, and
//! continuation flags.
//!
//! ## Example
//!
//! ```ignore
//! use dotmatrix_client::{commands::Rgb, DisplayClient};
//!
//! #[tokio::main]
//! async fn main() -> dotmatrix_client::Result<()> {
//!     let client = DisplayClient::new(my_ble_transport());
//!     client.connect().await?;
//!     client.set_clock(1, true, true, Rgb::new(255, 255, 255)).await?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod error;
pub mod protocol;
pub mod session;
pub mod text;
pub mod transport;

mod client;

pub use client::DisplayClient;
pub use error::{DotmatrixError, Result};
