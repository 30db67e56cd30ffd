//! The `classy` constraint generator (spec §4.4): turns an `Implicit`
//! program into a `Constraint` tree for an external [`classy_constraints::Solver`],
//! and (once solved) materializes the program into its `Explicit` form for
//! the elaborator.

pub mod expr;
pub mod fragment;
pub mod generator;
pub mod materialize;
pub mod pattern;
pub mod program;

pub use fragment::Fragment;
pub use generator::Generator;
pub use materialize::materialize_program;
