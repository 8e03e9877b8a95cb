use crate::{Capability, Nature};
use std::io;
use thiserror::Error;

/// The errors that can be returned by the Rill runtime
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing from a function call
    #[error("missing required argument '{name}'")]
    MissingArgument {
        /// The name of the unbound parameter
        name: String,
    },

    /// An argument was bound to a name that isn't declared by the function's signature
    #[error("unexpected argument '{name}'")]
    UnexpectedArgument {
        /// The name of the unexpected argument
        name: String,
    },

    /// A bound argument's nature doesn't match the parameter's declared nature
    #[error("argument '{name}': expected {expected}, found {found}")]
    UnexpectedNature {
        /// The name of the mismatched argument
        name: String,
        /// The nature declared by the signature
        expected: Nature,
        /// The nature of the bound value
        found: Nature,
    },

    /// No function is registered under the requested package and name
    #[error("'{package}.{name}' isn't a registered function")]
    MissingFunction {
        /// The requested package name
        package: String,
        /// The requested function name
        name: String,
    },

    /// A stream was used in a role that its backing doesn't support
    #[error("the stream doesn't support {needed} access")]
    Capability {
        /// The capability that the operation needed
        needed: Capability,
    },

    /// An error from an underlying byte source or sink
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A compression or decompression wrapper couldn't be constructed
    #[error("unable to construct the stream wrapper: {reason}")]
    Construction {
        /// Why construction failed
        reason: String,
    },
}

impl Error {
    /// Returns true if the error was detected by the signature checker or registry lookup
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. }
                | Self::UnexpectedArgument { .. }
                | Self::UnexpectedNature { .. }
                | Self::MissingFunction { .. }
        )
    }
}

/// The Result type used by the Rill runtime
pub type Result<T> = std::result::Result<T, Error>;

/// Creates an error for a missing required argument, wrapped in `Err`
pub fn missing_argument<T>(name: &str) -> Result<T> {
    Err(Error::MissingArgument { name: name.into() })
}

/// Creates an error that describes a nature mismatch, wrapped in `Err`
pub fn unexpected_nature<T>(name: &str, expected: Nature, found: Nature) -> Result<T> {
    Err(Error::UnexpectedNature {
        name: name.into(),
        expected,
        found,
    })
}

/// Creates an error for a stream used in an unsupported role, wrapped in `Err`
pub fn capability_error<T>(needed: Capability) -> Result<T> {
    Err(Error::Capability { needed })
}

/// Creates an error for a failed wrapper construction, wrapped in `Err`
pub fn construction_error<T>(reason: impl Into<String>) -> Result<T> {
    Err(Error::Construction {
        reason: reason.into(),
    })
}

/// Converts an [io::Error] into a runtime [Error]
///
/// Runtime errors that were carried through an io adapter are unwrapped rather
/// than nested.
pub fn map_io_err(error: io::Error) -> Error {
    match error.downcast::<Error>() {
        Ok(inner) => inner,
        Err(error) => Error::Io(error),
    }
}
