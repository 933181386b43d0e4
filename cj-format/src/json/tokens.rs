use std::fmt::Display;

use chumsky::error::Rich;
use chumsky::extra::{self};
use chumsky::prelude::choice;
use chumsky::prelude::just;
use chumsky::prelude::none_of;
use chumsky::prelude::one_of;
use chumsky::text;
use chumsky::IterParser;
use chumsky::Parser;

use crate::ast;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'src> {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    /// The content between the quotes, without unescaping.
    String(&'src str),
    /// A number whose text is an optional minus sign followed only by digits.
    Int(i64),
    /// Any other number, kept as its raw text.
    Float(&'src str),
    Bool(bool),
    Null,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::OpenBrace => write!(f, "{{"),
            Token::CloseBrace => write!(f, "}}"),
            Token::OpenBracket => write!(f, "["),
            Token::CloseBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::String(string) => write!(f, "\"{string}\""),
            Token::Int(value) => write!(f, "{value}"),
            Token::Float(raw) => write!(f, "{raw}"),
            Token::Bool(boolean) => write!(f, "{boolean}"),
            Token::Null => write!(f, "null"),
        }
    }
}

type LexExtra<'src> = extra::Err<Rich<'src, char>>;

pub(super) fn lex<'src>(
) -> impl Parser<'src, &'src str, Vec<ast::Node<Token<'src>>>, LexExtra<'src>> {
    token().padded().repeated().collect()
}

fn token<'src>() -> impl Parser<'src, &'src str, ast::Node<Token<'src>>, LexExtra<'src>> {
    choice((
        // Punctuation
        just("{").to(Token::OpenBrace),
        just("}").to(Token::CloseBrace),
        just("[").to(Token::OpenBracket),
        just("]").to(Token::CloseBracket),
        just(",").to(Token::Comma),
        just(":").to(Token::Colon),
        // Keywords
        just("true").to(Token::Bool(true)),
        just("false").to(Token::Bool(false)),
        just("null").to(Token::Null),
        // Values
        number(),
        string().map(Token::String),
    ))
    .map_with(|token, extra| {
        let span: chumsky::prelude::SimpleSpan = extra.span();

        ast::Node {
            node: token,
            span: span.into(),
        }
    })
}

/// Lex any JSON number. Whether it is an integer literal is decided by its
/// text: an optional leading minus followed only by decimal digits.
fn number<'src>() -> impl Parser<'src, &'src str, Token<'src>, LexExtra<'src>> {
    let digits = text::digits(10);

    let frac = just('.').then(digits);
    let exp = one_of("eE").then(one_of("+-").or_not()).then(digits);

    just('-')
        .or_not()
        .then(text::int(10))
        .then(frac.or_not())
        .then(exp.or_not())
        .to_slice()
        .map(|slice: &str| match slice.parse::<i64>() {
            Ok(value) => Token::Int(value),
            Err(_) => Token::Float(slice),
        })
}

fn string<'src>() -> impl Parser<'src, &'src str, &'src str, LexExtra<'src>> {
    let escape = just('\\').then(chumsky::prelude::any()).ignored();

    none_of("\\\"")
        .ignored()
        .or(escape)
        .repeated()
        .to_slice()
        .delimited_by(just('"'), just('"'))
}
