//! A collection of useful items to make it easier to work with `rill_runtime`

#[doc(inline)]
pub use crate::{
    Arguments, Capability, Error, FunctionDescriptor, FunctionSignature, MemorySource,
    MemoryStream, Nature, NativeFunction, Ptr, RCell, Registry, Result, Stream, StreamBacking,
    StreamRead, StreamWrite, Value, ValueString, ValueVec,
};
