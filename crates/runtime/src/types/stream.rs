use crate::{Capability, Error, Ptr, Result, StreamBacking, ValueString};
use std::{fmt, io};

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// The stream value type used in the Rill runtime
///
/// A stream is a cloneable handle to a [StreamBacking] that acts as a byte
/// source, a byte sink, or both. The backing's capability is fixed at
/// construction; using a role the backing doesn't support fails with
/// [Error::Capability].
///
/// Backings that buffer output need an explicit [finish](Self::finish) before
/// their output is complete; that call is the stream user's responsibility.
#[derive(Clone)]
pub struct Stream(Ptr<dyn StreamBacking>);

impl Stream {
    /// Creates a stream from the given backing
    pub fn new(backing: impl StreamBacking + 'static) -> Self {
        Self(Ptr::new(backing))
    }

    /// An identifier for the stream, used when displaying the stream in strings
    pub fn id(&self) -> ValueString {
        self.0.id()
    }

    /// The capability supported by the stream's backing
    pub fn capability(&self) -> Capability {
        self.0.capability()
    }

    /// Returns true if the stream can be used as a byte source
    pub fn is_readable(&self) -> bool {
        self.capability().is_readable()
    }

    /// Returns true if the stream can be used as a byte sink
    pub fn is_writable(&self) -> bool {
        self.capability().is_writable()
    }

    /// Reads bytes into the buffer, returning the number of bytes read
    ///
    /// A return value of 0 indicates that the source has been exhausted.
    pub fn read(&self, buffer: &mut [u8]) -> Result<usize> {
        self.0.read(buffer)
    }

    /// Reads the rest of the stream's bytes into the buffer
    ///
    /// Returns the number of bytes that were appended.
    pub fn read_to_end(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let mut chunk = [0; READ_BUFFER_SIZE];
        let mut total = 0;
        loop {
            match self.0.read(&mut chunk)? {
                0 => return Ok(total),
                count => {
                    buffer.extend_from_slice(&chunk[..count]);
                    total += count;
                }
            }
        }
    }

    /// Writes bytes to the stream, returning the number of bytes written
    pub fn write(&self, bytes: &[u8]) -> Result<usize> {
        self.0.write(bytes)
    }

    /// Writes all of the given bytes to the stream
    pub fn write_all(&self, mut bytes: &[u8]) -> Result<()> {
        while !bytes.is_empty() {
            match self.0.write(bytes)? {
                0 => return Err(Error::Io(io::ErrorKind::WriteZero.into())),
                count => bytes = &bytes[count..],
            }
        }
        Ok(())
    }

    /// Flushes any buffered output to the underlying sink
    pub fn flush(&self) -> Result<()> {
        self.0.flush()
    }

    /// Finalizes the stream, writing any trailing data that the backing requires
    pub fn finish(&self) -> Result<()> {
        self.0.finish()
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stream({})", self.id())
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
