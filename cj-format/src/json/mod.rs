//! Parses JSON source text into the value tree of [`crate::ast`].
//!
//! This is the tokenizer collaborator of the format: it knows nothing about
//! the CSP-JSON schema. Lexing and tree building are both chumsky parsers;
//! the schema layer runs over the resulting tree.
use std::collections::BTreeSet;
use std::rc::Rc;

use chumsky::error::Rich;
use chumsky::extra;
use chumsky::input::Input;
use chumsky::input::MapExtra;
use chumsky::input::ValueInput;
use chumsky::prelude::choice;
use chumsky::prelude::just;
use chumsky::prelude::recursive;
use chumsky::select;
use chumsky::span::SimpleSpan;
use chumsky::IterParser;
use chumsky::Parser;

use crate::ast;

mod tokens;

pub use tokens::Token;
use tokens::Token::*;

#[derive(Clone, Debug, Default)]
struct ParseState {
    /// The strings encountered so far, to re-use their allocations.
    strings: BTreeSet<Rc<str>>,
}

impl ParseState {
    fn get_interned(&mut self, string: &str) -> Rc<str> {
        if !self.strings.contains(string) {
            let _ = self.strings.insert(Rc::from(string));
        }

        Rc::clone(self.strings.get(string).unwrap())
    }
}

/// Failures of the JSON layer: the source text is not well-formed JSON.
#[derive(Debug, thiserror::Error)]
pub enum JsonError<'src> {
    #[error("failed to lex JSON")]
    Lex {
        reasons: Vec<Rich<'src, char, SimpleSpan>>,
    },

    #[error("failed to parse JSON")]
    Parse {
        reasons: Vec<Rich<'src, Token<'src>, ast::Span>>,
    },
}

/// Parse a single JSON value spanning the entire source.
pub fn parse(source: &str) -> Result<ast::Node<ast::Value>, JsonError<'_>> {
    let mut state = extra::SimpleState(ParseState::default());

    let tokens = tokens::lex()
        .parse(source)
        .into_result()
        .map_err(|reasons| JsonError::Lex { reasons })?;

    let parser_input = tokens.map(
        ast::Span {
            start: source.len(),
            end: source.len(),
        },
        |node| (&node.node, &node.span),
    );

    let tree = value()
        .parse_with_state(parser_input, &mut state)
        .into_result()
        .map_err(|reasons: Vec<Rich<'_, Token<'_>, _>>| JsonError::Parse {
            reasons: reasons
                .into_iter()
                .map(|error| error.into_owned())
                .collect(),
        })?;

    Ok(tree)
}

/// The extra data attached to the chumsky parsers.
///
/// We specify a rich error type, as well as an instance of [`ParseState`] for
/// string interning.
type JsonExtra<'tokens, 'src> =
    extra::Full<Rich<'tokens, Token<'src>, ast::Span>, extra::SimpleState<ParseState>, ()>;

fn value<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, ast::Node<ast::Value>, JsonExtra<'tokens, 'src>>
where
    I: ValueInput<'tokens, Span = ast::Span, Token = Token<'src>>,
{
    recursive(|value| {
        let member = string()
            .map_with(to_node)
            .then_ignore(just(Colon))
            .then(value.clone());

        let object = member
            .separated_by(just(Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(OpenBrace), just(CloseBrace))
            .map(ast::Value::Object);

        let array = value
            .separated_by(just(Comma))
            .collect::<Vec<_>>()
            .delimited_by(just(OpenBracket), just(CloseBracket))
            .map(ast::Value::Array);

        choice((object, array, primitive())).map_with(to_node)
    })
}

fn primitive<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, ast::Value, JsonExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Span = ast::Span, Token = Token<'src>>,
{
    choice((
        string().map(ast::Value::String),
        select! { Float(raw) => raw }.map(|raw| ast::Value::Float(Rc::from(raw))),
        select! {
            Int(value) => ast::Value::Int(value),
            Bool(boolean) => ast::Value::Bool(boolean),
            Null => ast::Value::Null,
        },
    ))
}

fn string<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, Rc<str>, JsonExtra<'tokens, 'src>> + Clone
where
    I: ValueInput<'tokens, Span = ast::Span, Token = Token<'src>>,
{
    select! {
        String(string) => string,
    }
    .map_with(|string, extra| {
        let state: &mut extra::SimpleState<ParseState> = extra.state();
        state.get_interned(string)
    })
}

fn to_node<'tokens, 'src: 'tokens, I, T>(
    node: T,
    extra: &mut MapExtra<'tokens, '_, I, JsonExtra<'tokens, 'src>>,
) -> ast::Node<T>
where
    I: Input<'tokens, Span = ast::Span, Token = Token<'src>>,
{
    ast::Node {
        node,
        span: extra.span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node<T>(start: usize, end: usize, node: T) -> ast::Node<T> {
        ast::Node {
            node,
            span: ast::Span { start, end },
        }
    }

    #[test]
    fn integer_array() {
        let source = "[1, -2, 3]";

        let tree = parse(source).expect("valid json");

        assert_eq!(
            tree,
            node(
                0,
                10,
                ast::Value::Array(vec![
                    node(1, 2, ast::Value::Int(1)),
                    node(4, 6, ast::Value::Int(-2)),
                    node(8, 9, ast::Value::Int(3)),
                ])
            )
        );
    }

    #[test]
    fn nested_object() {
        let source = r#"{"xs": [[1, 2]]}"#;

        let tree = parse(source).expect("valid json");

        assert_eq!(
            tree,
            node(
                0,
                16,
                ast::Value::Object(vec![(
                    node(1, 5, Rc::from("xs")),
                    node(
                        7,
                        15,
                        ast::Value::Array(vec![node(
                            8,
                            14,
                            ast::Value::Array(vec![
                                node(9, 10, ast::Value::Int(1)),
                                node(12, 13, ast::Value::Int(2)),
                            ])
                        )])
                    ),
                )])
            )
        );
    }

    #[test]
    fn numbers_with_fraction_or_exponent_are_not_integers() {
        let tree = parse("[1.5, 1e3, -2]").expect("valid json");

        let ast::Value::Array(items) = tree.node else {
            panic!("expected array");
        };

        assert_eq!(ast::Value::Float(Rc::from("1.5")), items[0].node);
        assert_eq!(ast::Value::Float(Rc::from("1e3")), items[1].node);
        assert_eq!(ast::Value::Int(-2), items[2].node);
    }

    #[test]
    fn primitives() {
        let tree = parse(r#"[true, false, null, "hi"]"#).expect("valid json");

        let ast::Value::Array(items) = tree.node else {
            panic!("expected array");
        };

        assert_eq!(ast::Value::Bool(true), items[0].node);
        assert_eq!(ast::Value::Bool(false), items[1].node);
        assert_eq!(ast::Value::Null, items[2].node);
        assert_eq!(ast::Value::String(Rc::from("hi")), items[3].node);
    }

    #[test]
    fn truncated_input_is_rejected() {
        let result = parse(r#"{"meta": "#);

        assert!(matches!(result, Err(JsonError::Parse { .. })));
    }

    #[test]
    fn invalid_character_is_a_lex_error() {
        let result = parse("[1, @]");

        assert!(matches!(result, Err(JsonError::Lex { .. })));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let result = parse("[] []");

        assert!(matches!(result, Err(JsonError::Parse { .. })));
    }
}
