//! Extracts a typed [`Instance`] from the JSON value tree.
//!
//! The grammar is strict: every object construct has a fixed, exhaustive key
//! set, and unknown, missing, or repeated keys are errors rather than being
//! ignored. Relaxing this would silently change which inputs are accepted,
//! so the rigidity is deliberate.

use std::rc::Rc;

use crate::ast;
use crate::error::SchemaError;
use crate::instance::Constraint;
use crate::instance::ConstraintDef;
use crate::instance::Domain;
use crate::instance::Instance;
use crate::instance::IntTuples;
use crate::instance::Meta;

pub(crate) fn instance(
    source: &str,
    root: &ast::Node<ast::Value>,
) -> Result<Instance, SchemaError> {
    let members = expect_object(root)?;

    let mut meta = None;
    let mut domains = None;
    let mut vars = None;
    let mut constraint_defs = None;
    let mut constraints = None;

    for (key, value) in members {
        match key.node.as_ref() {
            "meta" => set_once(&mut meta, self::meta(source, value)?, key)?,
            "domains" => set_once(&mut domains, self::domains(value)?, key)?,
            "vars" => set_once(&mut vars, int_tuples(-1, value)?, key)?,
            "constraintDefs" => {
                set_once(&mut constraint_defs, self::constraint_defs(value)?, key)?
            }
            "constraints" => set_once(&mut constraints, self::constraints(value)?, key)?,
            _ => {
                return Err(SchemaError::UnknownField {
                    construct: "csp-json",
                    field: key.node.as_ref().into(),
                    span: key.span,
                })
            }
        }
    }

    Ok(Instance {
        meta: required(meta, "csp-json", "meta", root.span)?,
        domains: required(domains, "csp-json", "domains", root.span)?,
        vars: required(vars, "csp-json", "vars", root.span)?,
        constraint_defs: required(constraint_defs, "csp-json", "constraintDefs", root.span)?,
        constraints: required(constraints, "csp-json", "constraints", root.span)?,
    })
}

fn meta(source: &str, node: &ast::Node<ast::Value>) -> Result<Meta, SchemaError> {
    let members = expect_object(node)?;

    let mut id = None;
    let mut algo = None;
    let mut params_json = None;

    for (key, value) in members {
        match key.node.as_ref() {
            "id" => set_once(&mut id, expect_string(value)?, key)?,
            "algo" => set_once(&mut algo, expect_string(value)?, key)?,
            "params" => {
                // Captured verbatim, delimiters included; the parameters are
                // generator dependent and not interpreted here.
                let raw = source[value.span.start..value.span.end].trim();
                set_once(&mut params_json, raw.to_owned(), key)?;
            }
            _ => {
                return Err(SchemaError::UnknownField {
                    construct: "meta",
                    field: key.node.as_ref().into(),
                    span: key.span,
                })
            }
        }
    }

    Ok(Meta {
        id: required(id, "meta", "id", node.span)?,
        algo: required(algo, "meta", "algo", node.span)?,
        params_json: required(params_json, "meta", "params", node.span)?,
    })
}

fn domains(node: &ast::Node<ast::Value>) -> Result<Vec<Domain>, SchemaError> {
    expect_array(node)?
        .iter()
        .map(|item| {
            let values = singleton_field(item, "domain", "values")?;
            Ok(Domain::Values(int_tuples(-1, values)?))
        })
        .collect()
}

fn constraint_defs(node: &ast::Node<ast::Value>) -> Result<Vec<ConstraintDef>, SchemaError> {
    expect_array(node)?
        .iter()
        .map(|item| {
            let no_goods = singleton_field(item, "constraint definition", "noGoods")?;
            Ok(ConstraintDef::NoGoods(int_tuples(0, no_goods)?))
        })
        .collect()
}

fn constraints(node: &ast::Node<ast::Value>) -> Result<Vec<Constraint>, SchemaError> {
    expect_array(node)?.iter().map(constraint).collect()
}

fn constraint(node: &ast::Node<ast::Value>) -> Result<Constraint, SchemaError> {
    let members = expect_object(node)?;

    let mut id = None;
    let mut vars = None;

    for (key, value) in members {
        match key.node.as_ref() {
            "id" => set_once(&mut id, expect_int(value)?, key)?,
            "vars" => set_once(&mut vars, int_tuples(-1, value)?, key)?,
            _ => {
                return Err(SchemaError::UnknownField {
                    construct: "constraint",
                    field: key.node.as_ref().into(),
                    span: key.span,
                })
            }
        }
    }

    Ok(Constraint {
        id: required(id, "constraint", "id", node.span)?,
        vars: required(vars, "constraint", "vars", node.span)?,
    })
}

/// Parse an [`IntTuples`] from a JSON array.
///
/// An empty array produces an empty container with the given default arity.
/// Otherwise the first element decides the case: an array fixes the tuple
/// arity for all its siblings (2-D), an integer makes this a flat list of
/// integers (1-D), and anything else is rejected. On error the partially
/// built container is dropped; no partial result escapes.
pub(crate) fn int_tuples(
    default_arity: i32,
    node: &ast::Node<ast::Value>,
) -> Result<IntTuples, SchemaError> {
    let items = expect_array(node)?;

    let Some(first) = items.first() else {
        return Ok(IntTuples::empty(default_arity));
    };

    match &first.node {
        ast::Value::Array(tuple) => {
            let arity = tuple.len();
            let mut data = Vec::with_capacity(items.len() * arity);

            for item in items {
                let ast::Value::Array(tuple) = &item.node else {
                    return Err(SchemaError::MixedElements { span: item.span });
                };

                if tuple.len() != arity {
                    return Err(SchemaError::TupleWidthMismatch {
                        expected: arity,
                        actual: tuple.len(),
                        span: item.span,
                    });
                }

                for element in tuple {
                    data.push(expect_int(element)?);
                }
            }

            Ok(IntTuples::tuples(items.len(), arity, data))
        }

        ast::Value::Int(_) => {
            let data = items
                .iter()
                .map(expect_int)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(IntTuples::list(data))
        }

        ast::Value::Float(raw) if is_integer_literal(raw) => {
            Err(SchemaError::IntegerOutOfRange { span: first.span })
        }

        value => Err(SchemaError::InvalidElement {
            actual: value.kind(),
            span: first.span,
        }),
    }
}

/// Expect an object with exactly one member of the given name, and return
/// the member's value.
fn singleton_field<'tree>(
    node: &'tree ast::Node<ast::Value>,
    construct: &'static str,
    field: &'static str,
) -> Result<&'tree ast::Node<ast::Value>, SchemaError> {
    let members = expect_object(node)?;

    let mut value = None;

    for (key, member_value) in members {
        if key.node.as_ref() == field {
            set_once(&mut value, member_value, key)?;
        } else {
            return Err(SchemaError::UnknownField {
                construct,
                field: key.node.as_ref().into(),
                span: key.span,
            });
        }
    }

    required(value, construct, field, node.span)
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    key: &ast::Node<Rc<str>>,
) -> Result<(), SchemaError> {
    if slot.is_some() {
        return Err(SchemaError::DuplicateField {
            field: key.node.as_ref().into(),
            span: key.span,
        });
    }

    *slot = Some(value);
    Ok(())
}

fn required<T>(
    slot: Option<T>,
    construct: &'static str,
    field: &'static str,
    span: ast::Span,
) -> Result<T, SchemaError> {
    slot.ok_or(SchemaError::MissingField {
        construct,
        field,
        span,
    })
}

fn expect_object(
    node: &ast::Node<ast::Value>,
) -> Result<&Vec<(ast::Node<Rc<str>>, ast::Node<ast::Value>)>, SchemaError> {
    match &node.node {
        ast::Value::Object(members) => Ok(members),
        value => Err(SchemaError::UnexpectedKind {
            expected: ast::Kind::Object,
            actual: value.kind(),
            span: node.span,
        }),
    }
}

fn expect_array(node: &ast::Node<ast::Value>) -> Result<&Vec<ast::Node<ast::Value>>, SchemaError> {
    match &node.node {
        ast::Value::Array(items) => Ok(items),
        value => Err(SchemaError::UnexpectedKind {
            expected: ast::Kind::Array,
            actual: value.kind(),
            span: node.span,
        }),
    }
}

fn expect_string(node: &ast::Node<ast::Value>) -> Result<String, SchemaError> {
    match &node.node {
        ast::Value::String(string) => Ok(string.as_ref().into()),
        value => Err(SchemaError::UnexpectedKind {
            expected: ast::Kind::String,
            actual: value.kind(),
            span: node.span,
        }),
    }
}

fn expect_int(node: &ast::Node<ast::Value>) -> Result<i64, SchemaError> {
    match &node.node {
        ast::Value::Int(value) => Ok(*value),
        // Integer syntax that overflowed the 64-bit conversion; distinguish
        // it from numbers that are not integer literals at all.
        ast::Value::Float(raw) if is_integer_literal(raw) => {
            Err(SchemaError::IntegerOutOfRange { span: node.span })
        }
        value => Err(SchemaError::NonIntegerElement {
            actual: value.kind(),
            span: node.span,
        }),
    }
}

/// `true` if `raw` is an optional minus sign followed only by decimal digits.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}
