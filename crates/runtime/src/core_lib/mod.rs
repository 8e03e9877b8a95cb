//! The core library for the Rill language

pub mod streams;

use crate::Registry;

/// Registers the core library's packages with the given registry
pub fn register_core_lib(registry: &mut Registry) {
    streams::register(registry);
}
