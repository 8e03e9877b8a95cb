//! In-memory stream backings

use crate::{Capability, RCell, Result, StreamBacking, StreamRead, StreamWrite, ValueString};

/// A read-only stream backing over a fixed byte sequence
///
/// The source owns a private copy of its contents, independent of whatever the
/// bytes were created from.
pub struct MemorySource {
    bytes: Vec<u8>,
    position: RCell<usize>,
}

impl MemorySource {
    /// Creates a source over a copy of the given bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            position: RCell::new(0),
        }
    }
}

impl StreamRead for MemorySource {
    fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        let mut position = self.position.borrow_mut();
        let remaining = &self.bytes[*position..];
        let count = remaining.len().min(buffer.len());
        buffer[..count].copy_from_slice(&remaining[..count]);
        *position += count;
        Ok(count)
    }
}

impl StreamWrite for MemorySource {}

impl StreamBacking for MemorySource {
    fn id(&self) -> ValueString {
        "memory-source".into()
    }

    fn capability(&self) -> Capability {
        Capability::Read
    }
}

#[derive(Default)]
struct Buffer {
    bytes: Vec<u8>,
    position: usize,
}

/// A growable in-memory buffer usable as both source and sink
///
/// Writes append to the buffer, reads consume from the front, so the stream can
/// act as a simple single-threaded pipe.
#[derive(Default)]
pub struct MemoryStream {
    buffer: RCell<Buffer>,
}

impl MemoryStream {
    /// Creates an empty stream
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamRead for MemoryStream {
    fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        let mut contents = self.buffer.borrow_mut();
        let remaining = &contents.bytes[contents.position..];
        let count = remaining.len().min(buffer.len());
        buffer[..count].copy_from_slice(&remaining[..count]);
        contents.position += count;
        Ok(count)
    }
}

impl StreamWrite for MemoryStream {
    fn write(&self, bytes: &[u8]) -> Result<usize> {
        self.buffer.borrow_mut().bytes.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl StreamBacking for MemoryStream {
    fn id(&self) -> ValueString {
        "memory-stream".into()
    }

    fn capability(&self) -> Capability {
        Capability::Duplex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_reads_until_exhausted() {
        let source = MemorySource::new(b"hello".as_slice());
        let mut buffer = [0; 3];
        assert!(matches!(source.read(&mut buffer), Ok(3)));
        assert_eq!(&buffer, b"hel");
        assert!(matches!(source.read(&mut buffer), Ok(2)));
        assert_eq!(&buffer[..2], b"lo");
        assert!(matches!(source.read(&mut buffer), Ok(0)));
    }

    #[test]
    fn memory_stream_reads_consume_written_bytes() {
        let stream = MemoryStream::new();
        assert!(matches!(stream.write(b"ab"), Ok(2)));
        assert!(matches!(stream.write(b"cd"), Ok(2)));

        let mut buffer = [0; 8];
        assert!(matches!(stream.read(&mut buffer), Ok(4)));
        assert_eq!(&buffer[..4], b"abcd");
        assert!(matches!(stream.read(&mut buffer), Ok(0)));

        assert!(matches!(stream.write(b"ef"), Ok(2)));
        assert!(matches!(stream.read(&mut buffer), Ok(2)));
        assert_eq!(&buffer[..2], b"ef");
    }
}
