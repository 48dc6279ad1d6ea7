//! # Error Types — Chainable Validation Failures
//!
//! Defines the error types used throughout contour. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A validation failure is a single [`Error`] type distinguished by its
//!   [`Code`]. Structural handlers link the deeper failure as the `cause`,
//!   adding one frame (a key or an index) per nesting level, so walking the
//!   [`Error::chain`] from the outside in reconstructs the failing path.
//! - Failures that are not validation results (a predicate crashed, a
//!   transform received data it cannot handle) are [`Fault`]s. They are
//!   never converted into validation errors unless an `Except` figure asks
//!   for it.
//! - Misused figures are [`FigureError`]s, reported once at construction
//!   time wherever possible.
//!
//! [`Failure`] is the union of all three and is what a check returns on
//! the error path.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::figure::Figure;
use crate::kind::Kind;

/// Category tag of a validation [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Code {
    /// Data kind does not match the expected kind.
    Type,
    /// Data does not equal the expected literal.
    Object,
    /// A predicate rejected the data.
    Call,
    /// A required mapping key is missing.
    Key,
    /// A mapping value failed; the cause holds the reason.
    Value,
    /// A sequence element failed; the cause holds the reason.
    Index,
    /// Too few sequence elements.
    Small,
    /// Too many sequence elements.
    Large,
    /// The inner figure of a `Not` unexpectedly passed.
    Not,
    /// The inner figure of an `Except` raised a listed fault.
    Except,
    /// Raised by a caller-supplied predicate or wrapper.
    Custom(String),
}

impl Code {
    /// Create a custom code.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Returns the lowercase identifier for this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Type => "type",
            Self::Object => "object",
            Self::Call => "call",
            Self::Key => "key",
            Self::Value => "value",
            Self::Index => "index",
            Self::Small => "small",
            Self::Large => "large",
            Self::Not => "not",
            Self::Except => "except",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Code {
    /// Built-in names map to their variants; anything else is custom.
    fn from(name: &str) -> Self {
        match name {
            "type" => Self::Type,
            "object" => Self::Object,
            "call" => Self::Call,
            "key" => Self::Key,
            "value" => Self::Value,
            "index" => Self::Index,
            "small" => Self::Small,
            "large" => Self::Large,
            "not" => Self::Not,
            "except" => Self::Except,
            other => Self::Custom(other.to_string()),
        }
    }
}

/// Serialized as its lowercase identifier, so reports carry the tag as data.
impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

/// One contextual value attached to an [`Error`].
#[derive(Debug, Clone)]
pub enum Info {
    /// A data value, key, or position.
    Value(Value),
    /// A value kind (expected or actual).
    Kind(Kind),
    /// The figure involved in the failure.
    Figure(Figure),
}

impl Info {
    /// Convert to a JSON value. Kinds become their identifier, figures
    /// their debug rendering.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Kind(kind) => Value::String(kind.as_str().to_string()),
            Self::Figure(figure) => Value::String(format!("{figure:?}")),
        }
    }

    /// The wrapped value, if this is `Info::Value`.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The wrapped kind, if this is `Info::Kind`.
    pub fn as_kind(&self) -> Option<Kind> {
        match self {
            Self::Kind(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The wrapped figure, if this is `Info::Figure`.
    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            Self::Figure(figure) => Some(figure),
            _ => None,
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Figure(figure) => write!(f, "{figure:?}"),
        }
    }
}

impl From<Value> for Info {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&Value> for Info {
    fn from(value: &Value) -> Self {
        Self::Value(value.clone())
    }
}

impl From<&str> for Info {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Info {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<usize> for Info {
    fn from(value: usize) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<Kind> for Info {
    fn from(kind: Kind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Figure> for Info {
    fn from(figure: Figure) -> Self {
        Self::Figure(figure)
    }
}

fn join_info(info: &[Info]) -> String {
    info.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validation failure.
///
/// # Invariants
///
/// - The cause link is exclusively owned, so a chain is finite and acyclic.
/// - The chain depth equals the nesting depth at which the root failure
///   occurred, plus one for the outermost frame.
#[derive(Error, Debug, Clone)]
#[error("{code}: {}", join_info(.info))]
pub struct Error {
    code: Code,
    info: Vec<Info>,
    #[source]
    cause: Option<Box<Error>>,
}

impl Error {
    /// Create an error with no cause.
    pub fn new(code: impl Into<Code>, info: impl IntoIterator<Item = Info>) -> Self {
        Self {
            code: code.into(),
            info: info.into_iter().collect(),
            cause: None,
        }
    }

    /// Attach the deeper error this one was raised from.
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The category tag.
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Contextual values, in the order the handler attached them.
    pub fn info(&self) -> &[Info] {
        &self.info
    }

    /// The deeper error, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// Iterate from this error down to the root cause.
    ///
    /// Each call walks the same immutable chain from the start.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of links in the chain, including this one.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// The innermost error of the chain.
    pub fn root(&self) -> &Error {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Render every `(code, info)` pair of the chain with `format` and join
    /// the pieces with `separator`.
    pub fn render<F>(&self, mut format: F, separator: &str) -> String
    where
        F: FnMut(&Code, &[Info]) -> String,
    {
        self.chain()
            .map(|error| format(&error.code, &error.info))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// JSON-friendly summary of this error alone.
    pub fn draw(&self) -> Frame {
        self.draw_with(Info::to_value)
    }

    /// Like [`Error::draw`], passing every info value through `alias`.
    pub fn draw_with<F>(&self, alias: F) -> Frame
    where
        F: Fn(&Info) -> Value,
    {
        Frame {
            code: self.code.as_str().to_string(),
            info: self.info.iter().map(alias).collect(),
        }
    }

    /// JSON-friendly summary of the whole chain, outermost first.
    pub fn show(&self) -> Vec<Frame> {
        self.show_with(Info::to_value)
    }

    /// Like [`Error::show`], passing every info value through `alias`.
    pub fn show_with<F>(&self, alias: F) -> Vec<Frame>
    where
        F: Fn(&Info) -> Value,
    {
        self.chain().map(|error| error.draw_with(&alias)).collect()
    }
}

/// Iterator over an error chain, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<&'a Error> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

/// Serializable summary of one link in an error chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// The error code identifier.
    pub code: String,
    /// Contextual values converted to JSON.
    pub info: Vec<Value>,
}

/// A foreign failure raised by a predicate or transform.
///
/// Faults are not validation results. They propagate through every
/// combinator untouched unless an `Except` figure lists their `kind`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Fault {
    /// Category used by `Except` figures to select faults.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

impl Fault {
    /// Create a fault.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Misuse of the figure algebra.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FigureError {
    /// A repetition marker was the first slot of a sequence.
    #[error("repetition marker before any figure")]
    RepeatWithoutFigure,

    /// A sequence had more than one repetition marker.
    #[error("sequence has {count} repetition markers, at most one is allowed")]
    MultipleRepeats {
        /// Number of markers found.
        count: usize,
    },

    /// An `Or` figure was built with no alternatives.
    #[error("or-figure needs at least one alternative")]
    EmptyAlternatives,

    /// No extension hook resolved an alias figure.
    #[error("no extension hook resolves alias {0:?}")]
    UnresolvedAlias(String),

    /// Extension hooks kept rewriting past the configured limit.
    #[error("figure still being rewritten after {limit} rewrites")]
    RewriteLimit {
        /// The configured limit.
        limit: usize,
    },

    /// A kind identifier could not be parsed.
    #[error("unknown kind: {0:?}")]
    UnknownKind(String),
}

/// Everything a check can fail with.
#[derive(Error, Debug, Clone)]
pub enum Failure {
    /// The data does not conform to the figure.
    #[error(transparent)]
    Invalid(#[from] Error),

    /// A predicate or transform failed outside the validation domain.
    #[error("fault: {0}")]
    Fault(#[from] Fault),

    /// The figure itself is unusable.
    #[error("figure error: {0}")]
    Figure(#[from] FigureError),
}

impl Failure {
    /// The validation error, if this is one.
    pub fn as_invalid(&self) -> Option<&Error> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// Consume and return the validation error, if this is one.
    pub fn into_invalid(self) -> Option<Error> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// The fault, if this is one.
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested() -> Error {
        let root = Error::new(Code::Type, [Kind::Integer.into(), Kind::String.into()]);
        let inner = Error::new(Code::Value, ["b".into()]).with_cause(root);
        Error::new(Code::Value, ["a".into()]).with_cause(inner)
    }

    #[test]
    fn test_chain_walks_outermost_first() {
        let error = nested();
        let codes: Vec<&str> = error.chain().map(|e| e.code().as_str()).collect();
        assert_eq!(codes, vec!["value", "value", "type"]);
        assert_eq!(error.depth(), 3);
    }

    #[test]
    fn test_chain_is_restartable() {
        let error = nested();
        assert_eq!(error.chain().count(), error.chain().count());
    }

    #[test]
    fn test_root_is_innermost() {
        let error = nested();
        assert_eq!(error.root().code(), &Code::Type);
        assert_eq!(error.root().info()[0].as_kind(), Some(Kind::Integer));
    }

    #[test]
    fn test_display_format() {
        let error = Error::new(Code::Object, [json!(2).into(), json!(3).into()]);
        assert_eq!(error.to_string(), "object: 2, 3");
        let error = Error::new(Code::Key, ["a".into()]);
        assert_eq!(error.to_string(), "key: \"a\"");
    }

    #[test]
    fn test_source_follows_cause() {
        let error = nested();
        let source = std::error::Error::source(&error).expect("has a source");
        assert_eq!(source.to_string(), "value: \"b\"");
        let leaf = error.root();
        assert!(std::error::Error::source(leaf).is_none());
    }

    #[test]
    fn test_render_with_formatter_and_separator() {
        let error = nested();
        let text = error.render(
            |code, info| match code {
                Code::Value => format!("at {}", info[0]),
                other => format!("{other}: expected {}", info[0]),
            },
            "\n",
        );
        assert_eq!(text, "at \"a\"\nat \"b\"\ntype: expected integer");
    }

    #[test]
    fn test_show_produces_frames() {
        let frames = nested().show();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].code, "value");
        assert_eq!(frames[0].info, vec![json!("a")]);
        assert_eq!(frames[2].info, vec![json!("integer"), json!("string")]);
        let serialized = serde_json::to_value(&frames[2]).unwrap();
        assert_eq!(
            serialized,
            json!({"code": "type", "info": ["integer", "string"]})
        );
    }

    #[test]
    fn test_show_with_alias() {
        let frames = nested().show_with(|_| Value::Null);
        assert!(frames.iter().all(|f| f.info.iter().all(Value::is_null)));
    }

    #[test]
    fn test_code_from_str() {
        assert_eq!(Code::from("index"), Code::Index);
        assert_eq!(Code::from("range"), Code::custom("range"));
        assert_eq!(Code::custom("range").to_string(), "range");
    }

    #[test]
    fn test_code_serializes_as_identifier() {
        assert_eq!(serde_json::to_value(Code::Index).unwrap(), json!("index"));
        assert_eq!(serde_json::to_value(Code::custom("range")).unwrap(), json!("range"));
        let code: Code = serde_json::from_value(json!("small")).unwrap();
        assert_eq!(code, Code::Small);
        let code: Code = serde_json::from_value(json!("range")).unwrap();
        assert_eq!(code, Code::custom("range"));
        assert!(serde_json::from_value::<Code>(json!(3)).is_err());
    }

    #[test]
    fn test_failure_accessors() {
        let failure = Failure::from(Error::new(Code::Call, []));
        assert!(failure.as_invalid().is_some());
        assert!(failure.as_fault().is_none());

        let failure = Failure::from(Fault::new("type_error", "not sized"));
        assert_eq!(failure.as_fault().map(|f| f.kind.as_str()), Some("type_error"));
        assert!(failure.clone().into_invalid().is_none());
        assert_eq!(failure.to_string(), "fault: type_error: not sized");
    }

    #[test]
    fn test_figure_error_display() {
        assert_eq!(
            FigureError::MultipleRepeats { count: 2 }.to_string(),
            "sequence has 2 repetition markers, at most one is allowed"
        );
        let failure = Failure::from(FigureError::UnresolvedAlias("port".into()));
        assert_eq!(
            failure.to_string(),
            "figure error: no extension hook resolves alias \"port\""
        );
    }
}
