//! Referential integrity checking of a parsed [`Instance`].
//!
//! A syntactically well-formed instance can still reference domains,
//! definitions, or variables that do not exist; this pass catches that.

use crate::instance::Instance;

/// The referential and range violations that [`validate`] can find.
#[derive(Clone, Copy, Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("vars must be a 1-D list, got arity {arity}")]
    VarsArity { arity: i32 },

    #[error("vars[{index}] references domain {domain}, but there are {count} domains")]
    VarDomainRange {
        index: usize,
        domain: i64,
        count: usize,
    },

    #[error(
        "constraints[{index}] references definition {id}, but there are {count} definitions"
    )]
    ConstraintIdRange { index: usize, id: i64, count: usize },

    #[error("constraints[{index}].vars must be a 1-D list, got arity {arity}")]
    ConstraintVarsArity { index: usize, arity: i32 },

    #[error("constraints[{index}] references variable {var}, but there are {count} variables")]
    ConstraintVarRange { index: usize, var: i64, count: usize },
}

/// Check the referential integrity of an instance.
///
/// This is a single fail-fast pass in a fixed order: vars, then constraints.
/// The first violation found is returned. Validation is independent of
/// parsing; [`crate::parse_instance`] does not call it.
///
/// Note that the original format also requires every domain and constraint
/// definition to carry a recognized tag; the closed [`crate::Domain`] and
/// [`crate::ConstraintDef`] enums make an unrecognized tag unrepresentable,
/// so there is nothing to check for them here.
pub fn validate(instance: &Instance) -> Result<(), ValidationError> {
    if instance.vars.arity() != -1 {
        return Err(ValidationError::VarsArity {
            arity: instance.vars.arity(),
        });
    }

    let domain_count = instance.domains.len();
    for (index, &domain) in instance.vars.data().iter().enumerate() {
        if domain < 0 || domain >= domain_count as i64 {
            return Err(ValidationError::VarDomainRange {
                index,
                domain,
                count: domain_count,
            });
        }
    }

    let def_count = instance.constraint_defs.len();
    let var_count = instance.vars.size();

    for (index, constraint) in instance.constraints.iter().enumerate() {
        if constraint.id < 0 || constraint.id >= def_count as i64 {
            return Err(ValidationError::ConstraintIdRange {
                index,
                id: constraint.id,
                count: def_count,
            });
        }

        if constraint.vars.arity() != -1 {
            return Err(ValidationError::ConstraintVarsArity {
                index,
                arity: constraint.vars.arity(),
            });
        }

        for &var in constraint.vars.data() {
            if var < 0 || var >= var_count as i64 {
                return Err(ValidationError::ConstraintVarRange {
                    index,
                    var,
                    count: var_count,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Constraint;
    use crate::instance::ConstraintDef;
    use crate::instance::Domain;
    use crate::instance::IntTuples;
    use crate::instance::Meta;

    fn small_instance() -> Instance {
        Instance {
            meta: Meta {
                id: "test".to_owned(),
                algo: "gen".to_owned(),
                params_json: "{}".to_owned(),
            },
            domains: vec![
                Domain::Values(IntTuples::list(vec![1, 2, 3])),
                Domain::Values(IntTuples::list(vec![0, 1])),
            ],
            vars: IntTuples::list(vec![0, 1, 1]),
            constraint_defs: vec![ConstraintDef::NoGoods(IntTuples::tuples(
                1,
                2,
                vec![1, 1],
            ))],
            constraints: vec![Constraint {
                id: 0,
                vars: IntTuples::list(vec![0, 2]),
            }],
        }
    }

    #[test]
    fn valid_instance_passes() {
        assert!(validate(&small_instance()).is_ok());
    }

    #[test]
    fn empty_instance_passes() {
        let instance = Instance {
            vars: IntTuples::empty(-1),
            ..Instance::default()
        };

        assert!(validate(&instance).is_ok());
    }

    #[test]
    fn default_vars_arity_is_rejected() {
        // The all-zero initial state has arity 0, which is not a 1-D list.
        assert!(matches!(
            validate(&Instance::default()),
            Err(ValidationError::VarsArity { arity: 0 })
        ));
    }

    #[test]
    fn var_referencing_missing_domain_is_rejected() {
        let mut instance = small_instance();
        instance.vars = IntTuples::list(vec![0, 2, 1]);

        assert!(matches!(
            validate(&instance),
            Err(ValidationError::VarDomainRange {
                index: 1,
                domain: 2,
                count: 2,
            })
        ));
    }

    #[test]
    fn negative_domain_reference_is_rejected() {
        let mut instance = small_instance();
        instance.vars = IntTuples::list(vec![-1]);

        assert!(matches!(
            validate(&instance),
            Err(ValidationError::VarDomainRange { domain: -1, .. })
        ));
    }

    #[test]
    fn constraint_id_out_of_range_is_rejected() {
        let mut instance = small_instance();
        instance.constraints[0].id = 1;

        assert!(matches!(
            validate(&instance),
            Err(ValidationError::ConstraintIdRange { id: 1, count: 1, .. })
        ));
    }

    #[test]
    fn constraint_var_out_of_range_is_rejected() {
        let mut instance = small_instance();
        instance.constraints[0].vars = IntTuples::list(vec![0, 3]);

        assert!(matches!(
            validate(&instance),
            Err(ValidationError::ConstraintVarRange { var: 3, count: 3, .. })
        ));
    }

    #[test]
    fn constraint_vars_must_be_a_list() {
        let mut instance = small_instance();
        instance.constraints[0].vars = IntTuples::tuples(1, 2, vec![0, 1]);

        assert!(matches!(
            validate(&instance),
            Err(ValidationError::ConstraintVarsArity { arity: 2, .. })
        ));
    }
}
