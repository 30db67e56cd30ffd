//! A debug aid, not the "concrete pretty-printer" the core spec declares
//! out of scope: `{:#?}`-based, just enough for the `classy` binary to
//! show a compiled program.

use classy_ast::{Explicit, Program};

#[must_use]
pub fn print_debug(program: &Program<Explicit>) -> String {
    format!("{program:#?}")
}
