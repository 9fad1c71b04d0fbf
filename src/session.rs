//! Transfer session - MTU-bounded writes over an owned transport.
//!
//! The session is the single funnel between encoded bytes and the radio.
//! It slices anything larger than the transport's write ceiling into
//! physical fragments, and it writes the chunks of an asset strictly in
//! order, one chunk completely before the next.
//!
//! Transport-level slicing here is orthogonal to protocol-level chunking:
//! a command frame is sliced for the link without gaining chunk headers,
//! and a 4 KiB asset chunk (header included) is itself sliced into ~0.5 KiB
//! BLE writes. The device reassembles physical writes transparently; it
//! only interprets the protocol-level chunk headers.
//!
//! # Exclusivity
//!
//! All send methods take `&mut self`: one session, one in-flight write,
//! enforced by the borrow checker. To share a session between tasks, put it
//! behind a single-owner lock held for a whole command or a whole asset
//! transfer; interleaving chunks from two transfers corrupts both, and the
//! device cannot tell (see [`DisplayClient`](crate::DisplayClient), which
//! does exactly this).

use bytes::Bytes;

use crate::error::{DotmatrixError, Result};
use crate::transport::Transport;

/// A connected device session performing MTU-bounded writes.
pub struct TransferSession<T: Transport> {
    transport: T,
}

impl<T: Transport> TransferSession<T> {
    /// Create a session owning `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the session and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Whether the transport is currently connected.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Connect the transport.
    pub async fn connect(&mut self) -> Result<()> {
        self.transport.connect().await
    }

    /// Disconnect the transport.
    pub async fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect().await
    }

    /// Send one command frame, slicing it into MTU-sized physical writes
    /// if needed.
    ///
    /// # Errors
    ///
    /// [`DotmatrixError::NotConnected`] if the transport is down (nothing
    /// is written; the session never auto-reconnects), or a transport error
    /// from the underlying write.
    pub async fn send_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_connected()?;
        self.write_sliced(frame).await
    }

    /// Send the chunks of one asset transfer, in order.
    ///
    /// Each chunk is fully written (including its transport-level slices)
    /// before the next begins; chunks are never reordered, batched, or
    /// parallelized.
    ///
    /// # Errors
    ///
    /// [`DotmatrixError::NotConnected`] if the transport is down before the
    /// transfer starts. A [`DotmatrixError::Transport`] mid-transfer aborts
    /// immediately: remaining chunks are not sent, and the device keeps what
    /// it already received, so restart with a fresh first chunk rather than
    /// resuming.
    pub async fn send_asset(&mut self, chunks: &[Bytes]) -> Result<()> {
        self.ensure_connected()?;
        tracing::debug!(chunks = chunks.len(), "sending asset transfer");
        for chunk in chunks {
            self.write_sliced(chunk).await?;
        }
        Ok(())
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.transport.is_connected() {
            Ok(())
        } else {
            Err(DotmatrixError::NotConnected)
        }
    }

    async fn write_sliced(&mut self, data: &[u8]) -> Result<()> {
        let mtu = self.transport.max_chunk_size();
        if mtu == 0 {
            return Err(DotmatrixError::Encoding(
                "transport reports a zero maximum write size".to_string(),
            ));
        }
        for fragment in data.chunks(mtu) {
            self.transport.write(fragment).await?;
        }
        Ok(())
    }
}
