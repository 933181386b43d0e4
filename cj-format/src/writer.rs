//! Writes an [`Instance`] back out in the canonical CSP-JSON form.
//!
//! The canonical form reproduces every field of the grammar with a fixed
//! layout; whitespace and key order of the original input are not preserved,
//! only value equivalence under re-parse. `meta.params` is emitted verbatim
//! from the raw text captured at parse time.

use std::io::Write;

use crate::instance::Constraint;
use crate::instance::ConstraintDef;
use crate::instance::Domain;
use crate::instance::Instance;
use crate::instance::IntTuples;

/// Write the canonical bracketed form of an [`IntTuples`]: nested for a 2-D
/// container, flat for a 1-D list.
pub fn write_int_tuples(sink: &mut impl Write, tuples: &IntTuples) -> std::io::Result<()> {
    write!(sink, "[")?;

    let arity = tuples.arity();
    for index in 0..tuples.size() {
        if index > 0 {
            write!(sink, ", ")?;
        }

        if arity >= 0 {
            write!(sink, "[")?;
        }

        let width = arity.unsigned_abs() as usize;
        for (offset, value) in tuples.data()[index * width..(index + 1) * width]
            .iter()
            .enumerate()
        {
            if offset > 0 {
                write!(sink, ", ")?;
            }
            write!(sink, "{value}")?;
        }

        if arity >= 0 {
            write!(sink, "]")?;
        }
    }

    write!(sink, "]")
}

/// Write an [`Instance`] in the canonical CSP-JSON form.
///
/// Re-parsing the output reconstructs a structurally equal instance.
pub fn write_instance(sink: &mut impl Write, instance: &Instance) -> std::io::Result<()> {
    writeln!(sink, "{{")?;

    writeln!(sink, "  \"meta\": {{")?;
    writeln!(sink, "    \"id\": \"{}\",", instance.meta.id)?;
    writeln!(sink, "    \"algo\": \"{}\",", instance.meta.algo)?;
    writeln!(sink, "    \"params\": {}", instance.meta.params_json)?;
    writeln!(sink, "  }},")?;

    if instance.domains.is_empty() {
        writeln!(sink, "  \"domains\": [],")?;
    } else {
        writeln!(sink, "  \"domains\": [")?;
        for (index, domain) in instance.domains.iter().enumerate() {
            let Domain::Values(values) = domain;
            write!(sink, "    {{\"values\": ")?;
            write_int_tuples(sink, values)?;
            write!(sink, "}}")?;
            writeln!(sink, "{}", separator(index, instance.domains.len()))?;
        }
        writeln!(sink, "  ],")?;
    }

    write!(sink, "  \"vars\": ")?;
    write_int_tuples(sink, &instance.vars)?;
    writeln!(sink, ",")?;

    if instance.constraint_defs.is_empty() {
        writeln!(sink, "  \"constraintDefs\": [],")?;
    } else {
        writeln!(sink, "  \"constraintDefs\": [")?;
        for (index, def) in instance.constraint_defs.iter().enumerate() {
            let ConstraintDef::NoGoods(no_goods) = def;
            write!(sink, "    {{\"noGoods\": ")?;
            write_int_tuples(sink, no_goods)?;
            write!(sink, "}}")?;
            writeln!(sink, "{}", separator(index, instance.constraint_defs.len()))?;
        }
        writeln!(sink, "  ],")?;
    }

    if instance.constraints.is_empty() {
        writeln!(sink, "  \"constraints\": []")?;
    } else {
        writeln!(sink, "  \"constraints\": [")?;
        for (index, constraint) in instance.constraints.iter().enumerate() {
            let Constraint { id, vars } = constraint;
            write!(sink, "    {{\"id\": {id}, \"vars\": ")?;
            write_int_tuples(sink, vars)?;
            write!(sink, "}}")?;
            writeln!(sink, "{}", separator(index, instance.constraints.len()))?;
        }
        writeln!(sink, "  ]")?;
    }

    writeln!(sink, "}}")
}

/// Render an [`IntTuples`] to a string.
pub fn print_int_tuples(tuples: &IntTuples) -> String {
    let mut buffer = Vec::new();
    write_int_tuples(&mut buffer, tuples).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("the canonical form is ASCII")
}

/// Render an [`Instance`] to a string in the canonical CSP-JSON form.
pub fn print_instance(instance: &Instance) -> String {
    let mut buffer = Vec::new();
    write_instance(&mut buffer, instance).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("id, algo and params come from valid UTF-8 source")
}

fn separator(index: usize, len: usize) -> &'static str {
    if index + 1 < len {
        ","
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Meta;

    #[test]
    fn print_flat_list() {
        assert_eq!("[1, 2, 3]", print_int_tuples(&IntTuples::list(vec![1, 2, 3])));
    }

    #[test]
    fn print_tuple_array() {
        assert_eq!(
            "[[1, 2], [3, 4]]",
            print_int_tuples(&IntTuples::tuples(2, 2, vec![1, 2, 3, 4]))
        );
    }

    #[test]
    fn print_empty_containers() {
        assert_eq!("[]", print_int_tuples(&IntTuples::empty(-1)));
        assert_eq!("[]", print_int_tuples(&IntTuples::empty(4)));
        assert_eq!("[[], []]", print_int_tuples(&IntTuples::tuples(2, 0, vec![])));
    }

    #[test]
    fn print_small_instance() {
        let instance = Instance {
            meta: Meta {
                id: "small".to_owned(),
                algo: "gen".to_owned(),
                params_json: "{\"seed\": 7}".to_owned(),
            },
            domains: vec![Domain::Values(IntTuples::list(vec![0, 1]))],
            vars: IntTuples::list(vec![0, 0]),
            constraint_defs: vec![ConstraintDef::NoGoods(IntTuples::tuples(
                1,
                2,
                vec![1, 1],
            ))],
            constraints: vec![Constraint {
                id: 0,
                vars: IntTuples::list(vec![0, 1]),
            }],
        };

        let expected = r#"{
  "meta": {
    "id": "small",
    "algo": "gen",
    "params": {"seed": 7}
  },
  "domains": [
    {"values": [0, 1]}
  ],
  "vars": [0, 0],
  "constraintDefs": [
    {"noGoods": [[1, 1]]}
  ],
  "constraints": [
    {"id": 0, "vars": [0, 1]}
  ]
}
"#;

        assert_eq!(expected, print_instance(&instance));
    }

    #[test]
    fn print_empty_sections_inline() {
        let instance = Instance {
            meta: Meta {
                id: "empty".to_owned(),
                algo: "gen".to_owned(),
                params_json: "{}".to_owned(),
            },
            vars: IntTuples::empty(-1),
            ..Instance::default()
        };

        let expected = r#"{
  "meta": {
    "id": "empty",
    "algo": "gen",
    "params": {}
  },
  "domains": [],
  "vars": [],
  "constraintDefs": [],
  "constraints": []
}
"#;

        assert_eq!(expected, print_instance(&instance));
    }
}
