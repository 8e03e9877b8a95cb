//! Stream values and the core library for the Rill language
//!
//! The runtime provides a dynamically typed [Value] tagged with a [Nature], a
//! capability-checked [Stream] abstraction, and a [Registry] of named functions
//! with declared signatures. The `streams` core library module is registered via
//! [core_lib::register_core_lib].

#![warn(missing_docs)]

mod error;
mod io;
mod registry;
mod types;

pub mod core_lib;
pub mod prelude;

pub use crate::{
    error::{
        Error, Result, capability_error, construction_error, map_io_err, missing_argument,
        unexpected_nature,
    },
    io::{Capability, MemorySource, MemoryStream, StreamBacking, StreamRead, StreamWrite},
    registry::Registry,
    types::{
        Arguments, FunctionDescriptor, FunctionSignature, Nature, NativeFunction, RillHasher,
        Stream, Value, ValueString, ValueVec,
    },
};

/// The shared pointer type used for runtime values
pub type Ptr<T> = std::rc::Rc<T>;

/// The interior-mutability cell used by stream backings
///
/// Stream values hand out shared references, so backings keep their mutable
/// state behind an `RCell`. A single stream isn't safe for concurrent use.
pub type RCell<T> = std::cell::RefCell<T>;
