//! The table of functions registered with the runtime

use crate::{
    Arguments, Error, FunctionDescriptor, Result, RillHasher, Value, ValueString, core_lib,
};
use indexmap::IndexMap;

type PackageMap = IndexMap<ValueString, FunctionDescriptor, RillHasher>;

/// The table of registered functions, keyed by package and function name
///
/// A registry is populated once during startup and only read afterwards, so a
/// completed registry can be shared freely between readers. Registering two
/// functions under the same `(package, name)` pair is a programming error and
/// panics rather than being reported as a runtime condition.
#[derive(Clone, Default)]
pub struct Registry {
    packages: IndexMap<ValueString, PackageMap, RillHasher>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the core library's packages registered
    pub fn with_core_lib() -> Self {
        let mut result = Self::new();
        core_lib::register_core_lib(&mut result);
        result
    }

    /// Registers a function under the given package name
    ///
    /// # Panics
    ///
    /// Panics if a function has already been registered under the same package
    /// and name.
    pub fn register(&mut self, package: &str, descriptor: FunctionDescriptor) {
        let name = descriptor.name();
        let functions = self.packages.entry(package.into()).or_default();
        if functions.insert(name.into(), descriptor).is_some() {
            panic!("duplicate registration of '{package}.{name}'");
        }
    }

    /// Returns the function registered under the given package and name
    pub fn get(&self, package: &str, name: &str) -> Option<&FunctionDescriptor> {
        self.packages.get(package)?.get(name)
    }

    /// Looks up a registered function and calls it with the given arguments
    pub fn call(&self, package: &str, name: &str, args: &Arguments) -> Result<Value> {
        match self.get(package, name) {
            Some(descriptor) => descriptor.call(args),
            None => Err(Error::MissingFunction {
                package: package.into(),
                name: name.into(),
            }),
        }
    }

    /// Iterates over the registered package names and function descriptors
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionDescriptor)> {
        self.packages.iter().flat_map(|(package, functions)| {
            functions
                .values()
                .map(move |descriptor| (package.as_ref(), descriptor))
        })
    }

    /// The number of registered functions
    pub fn len(&self) -> usize {
        self.packages.values().map(PackageMap::len).sum()
    }

    /// Returns true if no functions have been registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunctionSignature, Nature};

    fn descriptor(name: &'static str) -> FunctionDescriptor {
        FunctionDescriptor::new(
            name,
            FunctionSignature::new(&[], &[], Nature::Null),
            false,
            |_: &Arguments| Ok(Value::Null),
        )
    }

    #[test]
    fn lookup_finds_registered_functions() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.register("pkg", descriptor("a"));
        assert!(!registry.is_empty());
        registry.register("pkg", descriptor("b"));
        registry.register("other", descriptor("a"));

        assert_eq!(registry.len(), 3);
        assert!(registry.get("pkg", "a").is_some());
        assert!(registry.get("pkg", "missing").is_none());
        assert!(registry.get("missing", "a").is_none());
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    #[should_panic(expected = "duplicate registration of 'pkg.a'")]
    fn duplicate_registration_panics() {
        let mut registry = Registry::new();
        registry.register("pkg", descriptor("a"));
        registry.register("pkg", descriptor("a"));
    }

    #[test]
    fn calling_an_unregistered_function_is_an_invalid_argument_error() {
        let registry = Registry::new();
        let error = registry
            .call("pkg", "missing", &Arguments::new())
            .unwrap_err();
        assert!(matches!(&error, Error::MissingFunction { .. }));
        assert!(error.is_invalid_argument());
    }
}
