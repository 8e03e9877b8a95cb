use crate::{
    Nature, Ptr, Result, Value, ValueString,
    error::{Error, missing_argument, unexpected_nature},
};
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::{fmt, hash::BuildHasherDefault};

/// The hasher used by the runtime's maps
pub type RillHasher = BuildHasherDefault<FxHasher>;

/// The argument object bound to a native function call
///
/// Arguments are an order-irrelevant mapping from parameter name to value,
/// produced by the host's call-binding machinery. The runtime only reads from
/// the bindings.
#[derive(Clone, Default)]
pub struct Arguments {
    entries: IndexMap<ValueString, Value, RillHasher>,
}

impl Arguments {
    /// Creates an empty argument object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to the given name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Returns true if a value is bound to the given name
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The number of bound arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no arguments are bound
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the bound names and values
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_ref(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<ValueString>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// The polymorphic signature declared for a registered function
///
/// Signatures are visible to the host's type-checking and optimization passes,
/// and are checked against call arguments before a function's implementation
/// runs.
#[derive(Clone, Debug)]
pub struct FunctionSignature {
    parameters: IndexMap<&'static str, Nature, RillHasher>,
    required: &'static [&'static str],
    return_nature: Nature,
    pipe_argument: Option<&'static str>,
}

impl FunctionSignature {
    /// Creates a signature from parameter/nature pairs
    pub fn new(
        parameters: &[(&'static str, Nature)],
        required: &'static [&'static str],
        return_nature: Nature,
    ) -> Self {
        Self {
            parameters: parameters.iter().copied().collect(),
            required,
            return_nature,
            pipe_argument: None,
        }
    }

    /// Declares the parameter that's implicitly bound in chained calls
    #[must_use]
    pub fn with_pipe_argument(mut self, name: &'static str) -> Self {
        self.pipe_argument = Some(name);
        self
    }

    /// The declared nature of the named parameter
    pub fn parameter(&self, name: &str) -> Option<Nature> {
        self.parameters.get(name).copied()
    }

    /// Iterates over the declared parameter names and natures
    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, Nature)> {
        self.parameters.iter().map(|(name, nature)| (*name, *nature))
    }

    /// The names of the parameters that must be bound in every call
    pub fn required(&self) -> &[&'static str] {
        self.required
    }

    /// The nature of the function's result
    pub fn return_nature(&self) -> Nature {
        self.return_nature
    }

    /// The name of the pipe argument, if one is declared
    pub fn pipe_argument(&self) -> Option<&'static str> {
        self.pipe_argument
    }

    /// Checks that the given arguments satisfy the signature
    ///
    /// The check runs strictly before a function's implementation, so a call
    /// that fails validation performs no I/O. The first violation aborts the
    /// check.
    pub fn check(&self, args: &Arguments) -> Result<()> {
        for name in self.required {
            if !args.contains(name) {
                return missing_argument(name);
            }
        }

        for (name, value) in args.iter() {
            let Some(expected) = self.parameter(name) else {
                return Err(Error::UnexpectedArgument { name: name.into() });
            };
            let found = value.nature();
            if found != expected {
                return unexpected_nature(name, expected, found);
            }
        }

        Ok(())
    }
}

/// A trait for native functions that implement registered operations
pub trait NativeFunction: Fn(&Arguments) -> Result<Value> + 'static {}

impl<T> NativeFunction for T where T: Fn(&Arguments) -> Result<Value> + 'static {}

/// A named function registered with the runtime
///
/// A descriptor pairs a [FunctionSignature] with the function's implementation
/// and a side-effecting flag. Side-effecting calls must not be elided or
/// reordered relative to other side-effecting calls by the host.
#[derive(Clone)]
pub struct FunctionDescriptor {
    name: &'static str,
    signature: FunctionSignature,
    side_effecting: bool,
    implementation: Ptr<dyn NativeFunction>,
}

impl FunctionDescriptor {
    /// Creates a descriptor for a native function
    pub fn new(
        name: &'static str,
        signature: FunctionSignature,
        side_effecting: bool,
        implementation: impl NativeFunction,
    ) -> Self {
        Self {
            name,
            signature,
            side_effecting,
            implementation: Ptr::new(implementation),
        }
    }

    /// The function's name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function's declared signature
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    /// Returns true if calling the function has observable side effects
    pub fn is_side_effecting(&self) -> bool {
        self.side_effecting
    }

    /// Checks the arguments against the signature, then runs the implementation
    pub fn call(&self, args: &Arguments) -> Result<Value> {
        self.signature.check(args)?;
        (self.implementation)(args)
    }
}

impl fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native function: {}", self.name)
    }
}
