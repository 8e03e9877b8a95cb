use crate::{Result, ValueString, error::capability_error};
use std::fmt;

/// The roles that a stream backing can support
///
/// A backing's capability is fixed at construction and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// The stream can be used as a byte source
    Read,
    /// The stream can be used as a byte sink
    Write,
    /// The stream supports both roles
    Duplex,
}

impl Capability {
    /// Returns true if the capability includes reading
    pub fn is_readable(self) -> bool {
        matches!(self, Self::Read | Self::Duplex)
    }

    /// Returns true if the capability includes writing
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Write | Self::Duplex)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Duplex => "duplex",
        };
        f.write_str(result)
    }
}

/// A trait that defines the read operations of a [StreamBacking]
///
/// The default implementation fails with a capability error, so a backing only
/// overrides the operations it actually supports.
pub trait StreamRead {
    /// Reads bytes into the buffer, returning the number of bytes read
    ///
    /// A return value of 0 indicates that the source has been exhausted.
    fn read(&self, _buffer: &mut [u8]) -> Result<usize> {
        capability_error(Capability::Read)
    }
}

/// A trait that defines the write operations of a [StreamBacking]
///
/// As with [StreamRead], the defaults fail with a capability error.
pub trait StreamWrite {
    /// Writes bytes to the stream, returning the number of bytes written
    fn write(&self, _bytes: &[u8]) -> Result<usize> {
        capability_error(Capability::Write)
    }

    /// Flushes any buffered output to the underlying sink
    fn flush(&self) -> Result<()> {
        capability_error(Capability::Write)
    }

    /// Finalizes the stream, writing any trailing data that the backing requires
    ///
    /// Backings that buffer output (compression sinks in particular) only
    /// guarantee complete output once `finish` has been called. Writing to a
    /// finished stream is an error.
    fn finish(&self) -> Result<()> {
        self.flush()
    }
}

/// The trait implemented by [Stream](crate::Stream) backings
///
/// The reported capability must agree with the overridden operations; a backing
/// never claims a role it doesn't implement, and using an unsupported role fails
/// with [Error::Capability](crate::Error::Capability) rather than degrading
/// silently.
pub trait StreamBacking: StreamRead + StreamWrite {
    /// An identifier for the stream, used when displaying the stream in strings
    fn id(&self) -> ValueString;

    /// The capability supported by the backing
    fn capability(&self) -> Capability;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct ReadOnly;

    impl StreamRead for ReadOnly {
        fn read(&self, _buffer: &mut [u8]) -> Result<usize> {
            Ok(0)
        }
    }

    impl StreamWrite for ReadOnly {}

    impl StreamBacking for ReadOnly {
        fn id(&self) -> ValueString {
            "read-only".into()
        }

        fn capability(&self) -> Capability {
            Capability::Read
        }
    }

    #[test]
    fn unsupported_operations_fail_with_capability_errors() {
        let backing = ReadOnly;
        assert!(matches!(
            backing.write(b"x"),
            Err(Error::Capability {
                needed: Capability::Write
            })
        ));
        assert!(matches!(
            backing.flush(),
            Err(Error::Capability {
                needed: Capability::Write
            })
        ));
        assert!(matches!(
            backing.finish(),
            Err(Error::Capability {
                needed: Capability::Write
            })
        ));
        assert!(matches!(backing.read(&mut [0; 8]), Ok(0)));
    }

    #[test]
    fn capability_roles() {
        assert!(Capability::Read.is_readable());
        assert!(!Capability::Read.is_writable());
        assert!(Capability::Write.is_writable());
        assert!(!Capability::Write.is_readable());
        assert!(Capability::Duplex.is_readable());
        assert!(Capability::Duplex.is_writable());
    }
}
