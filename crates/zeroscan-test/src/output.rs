//! In-memory output sink.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A cloneable `Write` sink whose clones share one buffer.
///
/// Hand one clone to the code under test and keep another to inspect what
/// was written.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }

    /// Return the contents and empty the buffer.
    #[must_use]
    pub fn take(&self) -> String {
        self.buffer
            .lock()
            .map(|mut b| String::from_utf8_lossy(&std::mem::take(&mut *b)).into_owned())
            .unwrap_or_default()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().map(|b| b.is_empty()).unwrap_or(true)
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("captured output poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let out = CapturedOutput::new();
        let mut writer = out.clone();
        write!(writer, "hello {}", 42).unwrap();
        assert_eq!(out.contents(), "hello 42");
        assert_eq!(out.take(), "hello 42");
        assert!(out.is_empty());
    }
}
