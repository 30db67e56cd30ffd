//! Dictionary-passing elaboration: compiling an `Explicit` program's
//! classes and instances into ordinary records and record-construction
//! (spec §4.5, §4.6).

mod class;
mod elaborator;
mod expr;
mod instance;
mod ledger;
mod naming;
mod program;
mod resolve;

pub use elaborator::Elaborator;
pub use ledger::NamespaceLedger;
pub use resolve::AmbientCtx;
