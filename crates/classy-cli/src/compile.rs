//! `compile()`: the single entry point tying the generator, an external
//! solver, and the elaborator into one pipeline (spec §2's control flow,
//! minus the parser and printer, which live outside the core).

use classy_ast::{Explicit, Implicit, Program};
use classy_common::{ClassyError, Interner, WellKnownNames};
use classy_constraints::{SolveError, Solver};
use classy_elaborate::Elaborator;
use classy_env::Environment;
use classy_infer::{Generator, materialize_program};

use crate::config::ClassyConfig;

/// Run the whole pipeline over an `Implicit` program: generate its
/// constraint, hand it to `solver`, materialize the solution into an
/// `Explicit` program, then elaborate classes and instances away.
///
/// Generic over `S: Solver` so a caller (or a test) can swap in a
/// different solver without this function changing, matching the
/// generator's own "relies only on the `Solver` contract" design.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile<S: Solver>(
    interner: &mut Interner,
    well_known: WellKnownNames,
    env: &Environment,
    program: &Program<Implicit>,
    solver: &mut S,
    _config: &ClassyConfig,
) -> Result<Program<Explicit>, ClassyError> {
    let mut generator = Generator::new(&mut *interner, well_known);
    let constraint = generator.generate_program(env, program)?;

    let solution = solver.solve(constraint).map_err(solve_error_to_classy)?;
    tracing::debug!("constraint solved");

    let explicit = materialize_program(program, &solution, generator.lambda_param_vars());
    drop(generator);

    let mut elaborator = Elaborator::new(interner, well_known);
    elaborator.elaborate_program(env, &explicit)
}

/// Maps the external solver's own error type onto `ClassyError` so the
/// CLI has one diagnostic type to render, even though the solver contract
/// (spec §6) deliberately keeps `SolveError` a separate type from the
/// core pipeline's `ClassyError`.
fn solve_error_to_classy(err: SolveError) -> ClassyError {
    let at = err.span();
    match err {
        SolveError::UnsatisfiableEquation { .. } => {
            ClassyError::IncompatibleTypes { expected: "<solver constraint>".into(), found: "<solver constraint>".into(), at }
        }
        SolveError::CannotGeneralize { .. } => ClassyError::ValueRestriction { at },
        SolveError::UnresolvedOverloading { name, .. } => ClassyError::UnboundIdentifier { name, at },
    }
}
