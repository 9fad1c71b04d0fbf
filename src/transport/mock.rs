//! In-memory transport for tests and demos.
//!
//! Records every physical write, enforces the MTU contract, and can inject
//! failures at a chosen write index. `share()` produces a second handle
//! over the same write log, which is how the test suite demonstrates what
//! interleaved, unserialized sessions do to a transfer.

use std::io;
use std::sync::{Arc, Mutex};

use crate::error::{DotmatrixError, Result};

use super::Transport;

/// A recording transport backed by a shared in-memory write log.
#[derive(Debug)]
pub struct MockTransport {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
    mtu: usize,
    connected: bool,
    /// Fail the write with this 0-based index (per handle).
    fail_at: Option<usize>,
    writes_attempted: usize,
}

impl MockTransport {
    /// Create a disconnected mock with the given MTU.
    pub fn new(mtu: usize) -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            mtu,
            connected: false,
            fail_at: None,
            writes_attempted: 0,
        }
    }

    /// Create an already-connected mock with the given MTU.
    pub fn connected(mtu: usize) -> Self {
        let mut transport = Self::new(mtu);
        transport.connected = true;
        transport
    }

    /// Make the write with 0-based index `index` fail with `BrokenPipe`.
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// A second connected handle over the same write log.
    pub fn share(&self) -> Self {
        Self {
            writes: Arc::clone(&self.writes),
            mtu: self.mtu,
            connected: true,
            fail_at: None,
            writes_attempted: 0,
        }
    }

    /// Snapshot of every physical write so far, in wire order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.lock().unwrap().clone()
    }

    /// All written bytes concatenated, in wire order.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.writes.lock().unwrap().concat()
    }
}

impl Transport for MockTransport {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn max_chunk_size(&self) -> usize {
        self.mtu
    }

    async fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(DotmatrixError::NotConnected);
        }
        if data.len() > self.mtu {
            return Err(DotmatrixError::Transport(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("write of {} bytes exceeds mtu {}", data.len(), self.mtu),
            )));
        }

        let index = self.writes_attempted;
        self.writes_attempted += 1;
        if self.fail_at == Some(index) {
            return Err(DotmatrixError::Transport(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "injected write failure",
            )));
        }

        self.writes.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_writes_in_order() {
        let mut transport = MockTransport::connected(512);
        transport.write(b"one").await.unwrap();
        transport.write(b"two").await.unwrap();
        assert_eq!(transport.writes(), vec![b"one".to_vec(), b"two".to_vec()]);
        assert_eq!(transport.written_bytes(), b"onetwo");
    }

    #[tokio::test]
    async fn test_rejects_when_disconnected() {
        let mut transport = MockTransport::new(512);
        let err = transport.write(b"data").await.unwrap_err();
        assert!(matches!(err, DotmatrixError::NotConnected));

        transport.connect().await.unwrap();
        assert!(transport.write(b"data").await.is_ok());
    }

    #[tokio::test]
    async fn test_enforces_mtu() {
        let mut transport = MockTransport::connected(4);
        let err = transport.write(b"12345").await.unwrap_err();
        assert!(matches!(err, DotmatrixError::Transport(_)));
        assert!(transport.writes().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let mut transport = MockTransport::connected(512).fail_at(1);
        transport.write(b"first").await.unwrap();
        let err = transport.write(b"second").await.unwrap_err();
        assert!(matches!(err, DotmatrixError::Transport(_)));
        // The failed write is not recorded.
        assert_eq!(transport.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_shared_handles_interleave_in_one_log() {
        let mut a = MockTransport::connected(512);
        let mut b = a.share();

        a.write(b"a1").await.unwrap();
        b.write(b"b1").await.unwrap();
        a.write(b"a2").await.unwrap();

        assert_eq!(
            a.writes(),
            vec![b"a1".to_vec(), b"b1".to_vec(), b"a2".to_vec()]
        );
    }
}
