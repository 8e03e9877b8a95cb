//! The core value type used in the Rill runtime

use crate::{Ptr, Stream};
use smallvec::SmallVec;
use std::fmt;

/// The string type used in runtime values
pub type ValueString = Ptr<str>;

/// The vector type used to back list values
pub type ValueVec = SmallVec<[Value; 4]>;

/// The core value type for Rill
///
/// Every value carries a [Nature] tag that's checked against declared function
/// signatures before a call executes.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The default type representing the absence of a value
    #[default]
    Null,

    /// A boolean, can be either true or false
    Bool(bool),

    /// The string type used in Rill
    Str(ValueString),

    /// An ordered sequence of values
    List(Ptr<ValueVec>),

    /// A byte stream, acting as a source, a sink, or both
    Stream(Stream),
}

impl Value {
    /// Returns the value's nature
    pub fn nature(&self) -> Nature {
        match self {
            Self::Null => Nature::Null,
            Self::Bool(_) => Nature::Bool,
            Self::Str(_) => Nature::String,
            Self::List(_) => Nature::List,
            Self::Stream(_) => Nature::Stream,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<ValueString> for Value {
    fn from(value: ValueString) -> Self {
        Self::Str(value)
    }
}

impl From<Stream> for Value {
    fn from(stream: Stream) -> Self {
        Self::Stream(stream)
    }
}

impl From<ValueVec> for Value {
    fn from(list: ValueVec) -> Self {
        Self::List(list.into())
    }
}

/// The dynamic kind tag of a [Value], checked against declared signatures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nature {
    /// The nature of [Value::Null]
    Null,
    /// The nature of [Value::Bool]
    Bool,
    /// The nature of [Value::Str]
    String,
    /// The nature of [Value::List]
    List,
    /// The nature of [Value::Stream]
    Stream,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::String => "String",
            Self::List => "List",
            Self::Stream => "Stream",
        };
        f.write_str(result)
    }
}
