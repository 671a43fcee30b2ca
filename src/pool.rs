use std::str::from_utf8;
use std::sync::Mutex;

use crate::err::{Error, Result};

/// Shareable pool of byte buffers backing the string-returning render
/// wrappers.
///
/// An acquired buffer is exclusively owned by its caller until released.
/// Released buffers are cleared but keep their capacity, so steady-state
/// rendering does not allocate.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        BufferPool::default()
    }

    /// Pop a cleared buffer, or allocate a fresh one if the pool is empty.
    pub fn acquire(&self) -> Vec<u8> {
        self.free
            .lock()
            .expect("lock poisoned")
            .pop()
            .unwrap_or_default()
    }

    /// Clear `buf` and return it to the pool.
    pub fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        self.free.lock().expect("lock poisoned").push(buf);
    }
}

/// Run `render` against a pooled buffer and copy the result out as a
/// `String`, returning the buffer to the pool in both the success and the
/// error case.
pub(crate) fn render_to_string<F>(pool: &BufferPool, render: F) -> Result<String>
where
    F: FnOnce(&mut Vec<u8>) -> Result<u64>,
{
    let mut buf = pool.acquire();
    let outcome = render(&mut buf).and_then(|_| match from_utf8(&buf) {
        Ok(text) => Ok(text.to_owned()),
        Err(source) => Err(Error::OutputNotUtf8 { source }),
    });
    pool.release(buf);
    outcome
}
