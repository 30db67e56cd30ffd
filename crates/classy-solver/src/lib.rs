//! Reference implementation of the `classy` solver contract (spec §4.3,
//! §6): plain Robinson unification over an `ena` union-find table, with
//! `Let`-generalization and deferred instance-of resolution.

pub mod solver;
pub mod table;
pub mod unify;

pub use solver::RobinsonSolver;
