//! The `classy` constraint language (spec §4.3) and external solver
//! contract. No solving logic lives here.

pub mod constraint;
pub mod solver;

pub use constraint::{Constraint, LetScheme};
pub use solver::{Solution, SolveError, Solver};
