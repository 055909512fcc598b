//! In-process media host for embedding and exercising player factories.
//!
//! [`MediaModule`] is the factory registry; [`HostModules`] resolves the
//! well-known module names a factory looks up.

pub mod modules;
pub mod registry;

pub use modules::HostModules;
pub use registry::MediaModule;
