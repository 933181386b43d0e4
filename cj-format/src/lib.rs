//! This crate contains abstractions for dealing with the CSP-JSON format, a
//! textual interchange format for constraint satisfaction problem instances
//! (variables, explicit domains, and no-good constraint definitions).
//!
//! To parse an instance see [`parse_instance`], to check its referential
//! integrity see [`validate`], and to write it back in the canonical form
//! see [`writer::write_instance`]. Solver backends consume the parsed
//! [`Instance`] directly: `domains[vars[j]]` is the domain of variable `j`,
//! and each constraint applies `constraint_defs[constraint.id]` to the
//! variables in `constraint.vars`.

pub mod ast;
pub mod json;
pub mod writer;

mod error;
mod from_ast;
mod instance;
mod validate;

pub use error::*;
pub use instance::*;
pub use validate::*;

/// Parse a CSP-JSON instance from source text.
///
/// The source must be fully materialized in memory; there is no streaming.
/// Parsing either fully succeeds or fails with exactly one categorized
/// error, never a partial result. Referential integrity is not checked here;
/// run [`validate`] on the result.
pub fn parse_instance(source: &str) -> Result<Instance, ParseError<'_>> {
    let tree = json::parse(source)?;
    let instance = from_ast::instance(source, &tree)?;
    Ok(instance)
}

/// Parse a standalone [`IntTuples`] from source text.
///
/// `default_arity` is the arity given to an empty array: -1 when the
/// construct is a 1-D list, 0 or more when it is a list of tuples.
///
/// # Panics
/// Panics if `default_arity < -1`.
pub fn parse_int_tuples(default_arity: i32, source: &str) -> Result<IntTuples, ParseError<'_>> {
    assert!(
        default_arity >= -1,
        "default_arity must be -1 (1-D) or non-negative (2-D)"
    );

    let tree = json::parse(source)?;
    let tuples = from_ast::int_tuples(default_arity, &tree)?;
    Ok(tuples)
}
