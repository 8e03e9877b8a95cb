//! The core types used in the Rill runtime

mod function;
mod stream;
pub mod value;

pub use self::{
    function::{Arguments, FunctionDescriptor, FunctionSignature, NativeFunction, RillHasher},
    stream::Stream,
    value::{Nature, Value, ValueString, ValueVec},
};
