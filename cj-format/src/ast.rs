//! The generic JSON value tree that the schema layer consumes.
//!
//! The tokenizer output is materialized into this tree before any schema
//! checking happens, so the schema layer can iterate children directly
//! instead of tracking consumed-token counts in a flat token stream.
use std::fmt::Display;
use std::rc::Rc;

/// A JSON value, annotated with the span of every child.
///
/// Object members are kept in source order, and duplicate keys are preserved;
/// rejecting duplicates is the responsibility of the schema layer. Strings
/// hold the raw source content between the quotes, without unescaping, and
/// non-integer numbers hold their raw text. Neither is interpreted further by
/// this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Object(Vec<(Node<Rc<str>>, Node<Value>)>),
    Array(Vec<Node<Value>>),
    String(Rc<str>),
    /// A primitive whose text is an optional minus sign followed only by
    /// decimal digits.
    Int(i64),
    /// Any other JSON number (fraction or exponent), kept as raw text.
    Float(Rc<str>),
    Bool(bool),
    Null,
}

impl Value {
    /// The [`Kind`] of this value, used in error reporting.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Number,
            Value::Bool(_) => Kind::Bool,
            Value::Null => Kind::Null,
        }
    }
}

/// The JSON kind of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Bool,
    Null,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Object => write!(f, "object"),
            Kind::Array => write!(f, "array"),
            Kind::String => write!(f, "string"),
            Kind::Integer => write!(f, "integer"),
            Kind::Number => write!(f, "number"),
            Kind::Bool => write!(f, "bool"),
            Kind::Null => write!(f, "null"),
        }
    }
}

/// Describes a range `[start, end)` in the source text that contains a
/// [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// The index in the source that starts the span.
    pub start: usize,
    /// The index in the source that ends the span.
    ///
    /// Note the end is exclusive.
    pub end: usize,
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl chumsky::span::Span for Span {
    type Context = ();

    type Offset = usize;

    fn new(_: Self::Context, range: std::ops::Range<Self::Offset>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    fn context(&self) -> Self::Context {}

    fn start(&self) -> Self::Offset {
        self.start
    }

    fn end(&self) -> Self::Offset {
        self.end
    }
}

impl From<chumsky::span::SimpleSpan> for Span {
    fn from(value: chumsky::span::SimpleSpan) -> Self {
        Span {
            start: value.start,
            end: value.end,
        }
    }
}

impl From<Span> for chumsky::span::SimpleSpan {
    fn from(value: Span) -> Self {
        chumsky::span::SimpleSpan::from(value.start..value.end)
    }
}

/// A node in the value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    /// The span in the source of this node.
    pub span: Span,
    /// The parsed node.
    pub node: T,
}
