// Scripted in-memory transport for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::Transport;
use crate::error::{OiError, Result};

/// Mock transport: queue reply bytes with [`push_read`](Self::push_read),
/// inspect everything the driver wrote with [`written`](Self::written).
///
/// Clones share the same buffers, so a test can keep a handle while the
/// driver owns the other.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    read_queue: VecDeque<u8>,
    written: Vec<u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to be returned by subsequent reads
    pub fn push_read(&self, data: &[u8]) {
        self.inner.lock().unwrap().read_queue.extend(data);
    }

    /// All bytes written so far, in order
    pub fn written(&self) -> Vec<u8> {
        self.inner.lock().unwrap().written.clone()
    }

    /// Discard recorded writes
    pub fn clear_written(&self) {
        self.inner.lock().unwrap().written.clear();
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.lock().unwrap().written.extend_from_slice(data);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        self.inner
            .lock()
            .unwrap()
            .read_queue
            .pop_front()
            .ok_or_else(|| {
                OiError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "mock read queue empty",
                ))
            })
    }
}
