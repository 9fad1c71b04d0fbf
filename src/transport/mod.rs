//! Transport module - the wireless link seam.
//!
//! The radio itself (scanning, pairing, GATT plumbing) is an external
//! collaborator; this crate only needs a connected, ordered byte sink with
//! a known maximum write size. Anything that can satisfy [`Transport`] can
//! carry the protocol: a BLE central, a serial bridge, or the in-memory
//! [`MockTransport`] used by the test suite.

mod mock;

pub use mock::MockTransport;

use crate::error::Result;

/// Assumed BLE write size when nothing better has been negotiated.
pub const DEFAULT_MTU: usize = 509;

/// A reliable, ordered byte sink with a bounded write size.
///
/// Implementations must deliver each `write` whole and in call order; the
/// protocol has no sequence numbers and silently corrupts on reordering.
/// Timeouts are the implementation's concern and surface as
/// [`Transport`](crate::DotmatrixError::Transport) errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Whether the link is currently usable.
    fn is_connected(&self) -> bool;

    /// Maximum number of bytes accepted by a single [`write`](Self::write).
    fn max_chunk_size(&self) -> usize;

    /// Establish the link. A no-op when already connected.
    async fn connect(&mut self) -> Result<()>;

    /// Tear the link down. A no-op when already disconnected.
    async fn disconnect(&mut self) -> Result<()>;

    /// Perform one physical write of at most
    /// [`max_chunk_size`](Self::max_chunk_size) bytes.
    async fn write(&mut self, data: &[u8]) -> Result<()>;
}
