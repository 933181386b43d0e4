use crate::ast;
use crate::json::JsonError;

/// The errors produced by the schema layer when a well-formed JSON tree does
/// not match the CSP-JSON grammar.
///
/// The variants fall into three groups: wrong JSON kind where a specific
/// kind was required ([`SchemaError::UnexpectedKind`]), wrong key set on an
/// object construct (`MissingField`, `DuplicateField`, `UnknownField`), and
/// malformed tuple containers (the remaining variants).
#[derive(Clone, Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("expected {expected}, got {actual} at {span}")]
    UnexpectedKind {
        expected: ast::Kind,
        actual: ast::Kind,
        span: ast::Span,
    },

    #[error("missing field '{field}' in {construct} at {span}")]
    MissingField {
        construct: &'static str,
        field: &'static str,
        span: ast::Span,
    },

    #[error("duplicate field '{field}' at {span}")]
    DuplicateField { field: String, span: ast::Span },

    #[error("unknown field '{field}' in {construct} at {span}")]
    UnknownField {
        construct: &'static str,
        field: String,
        span: ast::Span,
    },

    #[error("expected an integer element, got {actual} at {span}")]
    NonIntegerElement { actual: ast::Kind, span: ast::Span },

    #[error("integer literal does not fit in 64 bits at {span}")]
    IntegerOutOfRange { span: ast::Span },

    #[error("expected a tuple of width {expected}, got width {actual} at {span}")]
    TupleWidthMismatch {
        expected: usize,
        actual: usize,
        span: ast::Span,
    },

    #[error("cannot mix tuples and scalars in one array, at {span}")]
    MixedElements { span: ast::Span },

    #[error("array elements must be integers or tuples, got {actual} at {span}")]
    InvalidElement { actual: ast::Kind, span: ast::Span },
}

/// Any failure of [`crate::parse_instance`] or [`crate::parse_int_tuples`]:
/// either the source is not well-formed JSON, or the JSON does not match the
/// CSP-JSON grammar.
///
/// The JSON variant borrows the source text, so the conversions are written
/// by hand; a derived `source()` would demand a `'static` cause.
#[derive(Debug, thiserror::Error)]
pub enum ParseError<'src> {
    #[error("{0}")]
    Json(JsonError<'src>),

    #[error("{0}")]
    Schema(SchemaError),
}

impl<'src> From<JsonError<'src>> for ParseError<'src> {
    fn from(error: JsonError<'src>) -> Self {
        ParseError::Json(error)
    }
}

impl From<SchemaError> for ParseError<'_> {
    fn from(error: SchemaError) -> Self {
        ParseError::Schema(error)
    }
}
