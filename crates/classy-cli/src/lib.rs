//! The `classy` command-line driver: [`compile()`](compile::compile) ties
//! the generator, an external solver, and the elaborator into one run; the
//! rest of this crate is the binary's own concerns (args, a stand-in JSON
//! source format, a debug printer) that spec §6 keeps out of the core.

pub mod args;
pub mod compile;
pub mod config;
pub mod printer;
pub mod source;

pub use compile::compile;
pub use config::ClassyConfig;
pub use printer::print_debug;
