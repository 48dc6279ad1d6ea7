//! # Figure Algebra — Declarative Validation Patterns
//!
//! A [`Figure`] describes the expected shape, kind, or value of a piece of
//! JSON data. Figures are plain immutable data: every payload is shared
//! behind an `Arc`, so cloning is cheap and a figure built once can be
//! checked against any number of values from any number of threads.
//!
//! ## Variants
//!
//! | Variant | Passes when |
//! |---------|-------------|
//! | `Nil` | always |
//! | `Type` | the data's kind is a subkind of the figure's kind |
//! | `Literal` | the data equals the literal |
//! | `Predicate` | the callable accepts the data |
//! | `Mapping` | every required key is present and every present key's value passes |
//! | `Sequence` | the elements match the slots positionally |
//! | `And` | every sub-figure passes |
//! | `Or` | some sub-figure passes |
//! | `Not` | the sub-figure fails |
//! | `Except` | the sub-figure passes without raising a listed fault |
//! | `Convert` | the transformed data passes the sub-figure |
//! | `Route` | the data passes the branch selected by the condition |
//! | `Wrap` | the sub-figure passes; failures are replaced by a fixed error |
//! | `Alias` | the figure an extension hook resolves it to passes |
//!
//! ## Construction Invariants
//!
//! Constructors that can be misused return `Result<Figure, FigureError>`:
//! a sequence has at most one repetition marker and never starts with one,
//! and an `Or` has at least one alternative. These are reported before any
//! checking begins.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Code, Failure, FigureError, Info};
use crate::kind::Kind;

/// Outcome of a predicate that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The data is valid as-is.
    Pass,
    /// The data is rejected; the engine raises a `call` error.
    Fail,
    /// The data is valid and this value replaces it in the result.
    Replace(Value),
}

impl From<bool> for Verdict {
    fn from(pass: bool) -> Self {
        if pass {
            Self::Pass
        } else {
            Self::Fail
        }
    }
}

type PredicateFn = dyn Fn(&Value) -> Result<Verdict, Failure> + Send + Sync;
type TransformFn = dyn Fn(&Value) -> Result<Value, Failure> + Send + Sync;

/// A named validation callable.
///
/// The name is only used for display; two predicates with the same name
/// are still distinct callables.
#[derive(Clone)]
pub struct Predicate {
    name: Arc<str>,
    func: Arc<PredicateFn>,
}

impl Predicate {
    /// Wrap a callable.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Verdict, Failure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Wrap a plain boolean test.
    pub fn test<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |value| Ok(Verdict::from(func(value))))
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, value: &Value) -> Result<Verdict, Failure> {
        (self.func)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

/// A named data transform used by `Convert` figures.
#[derive(Clone)]
pub struct Transform {
    name: Arc<str>,
    func: Arc<TransformFn>,
}

impl Transform {
    /// Wrap a callable.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, Failure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the transform.
    pub fn apply(&self, value: &Value) -> Result<Value, Failure> {
        (self.func)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transform({})", self.name)
    }
}

/// A mapping-figure key, required unless marked optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
    optional: bool,
}

impl Key {
    /// A key that must be present.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    /// A key that may be absent.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }

    /// The key as it appears in data.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether absence is allowed.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::required(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::required(name)
    }
}

/// Shorthand for [`Key::optional`].
pub fn opt(name: impl Into<String>) -> Key {
    Key::optional(name)
}

/// One position of a sequence figure.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Matches exactly one element.
    Figure(Figure),
    /// Repeats the previous slot's figure zero or more times.
    Repeat,
}

impl From<Figure> for Slot {
    fn from(figure: Figure) -> Self {
        Self::Figure(figure)
    }
}

impl From<Kind> for Slot {
    fn from(kind: Kind) -> Self {
        Self::Figure(Figure::Type(kind))
    }
}

/// Validated payload of a sequence figure.
#[derive(Clone)]
pub struct Sequence {
    inner: Arc<SequenceInner>,
}

struct SequenceInner {
    slots: Vec<Slot>,
    limit: usize,
    repeat_at: Option<usize>,
}

impl Sequence {
    fn new(slots: Vec<Slot>) -> Result<Self, FigureError> {
        let markers: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Slot::Repeat))
            .map(|(position, _)| position)
            .collect();
        if markers.len() > 1 {
            return Err(FigureError::MultipleRepeats {
                count: markers.len(),
            });
        }
        let repeat_at = markers.first().copied();
        if repeat_at == Some(0) {
            return Err(FigureError::RepeatWithoutFigure);
        }
        let limit = slots.len() - markers.len();
        Ok(Self {
            inner: Arc::new(SequenceInner {
                slots,
                limit,
                repeat_at,
            }),
        })
    }

    /// The slots in order.
    pub fn slots(&self) -> &[Slot] {
        &self.inner.slots
    }

    /// Number of fixed slots: the minimum element count.
    pub fn limit(&self) -> usize {
        self.inner.limit
    }

    /// Position of the repetition marker, if any.
    pub fn repeat_position(&self) -> Option<usize> {
        self.inner.repeat_at
    }

    /// Number of fixed slots after the repetition marker.
    pub fn fixed_after_repeat(&self) -> usize {
        self.inner
            .repeat_at
            .map_or(0, |position| self.inner.slots.len() - position - 1)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots()).finish()
    }
}

/// Payload of an `Except` figure.
#[derive(Debug, Clone)]
pub struct Except {
    /// The figure to run.
    pub figure: Figure,
    /// Fault kinds converted into `except` validation errors.
    pub kinds: Vec<String>,
}

/// Payload of a `Convert` figure.
#[derive(Debug, Clone)]
pub struct Convert {
    /// Applied to the data first.
    pub transform: Transform,
    /// Checked against the transformed value.
    pub figure: Figure,
}

/// Payload of a `Route` figure.
#[derive(Debug, Clone)]
pub struct Route {
    /// Probe whose validation errors are swallowed.
    pub condition: Figure,
    /// Checked when the condition passes.
    pub success: Figure,
    /// Checked when the condition fails.
    pub failure: Figure,
}

/// Payload of a `Wrap` figure.
#[derive(Debug, Clone)]
pub struct Wrap {
    /// The figure whose failures are replaced.
    pub figure: Figure,
    /// Code of the replacement error.
    pub code: Code,
    /// Info of the replacement error.
    pub info: Vec<Info>,
}

/// A validation pattern.
#[derive(Clone)]
pub enum Figure {
    /// Accepts anything, produces no result.
    Nil,
    /// Data must be of this kind.
    Type(Kind),
    /// Data must equal this value.
    Literal(Value),
    /// Data must satisfy this callable.
    Predicate(Predicate),
    /// Data must be an object matching these entries, in order.
    Mapping(Arc<[(Key, Figure)]>),
    /// Data must be an array matching these slots.
    Sequence(Sequence),
    /// Every sub-figure must pass.
    And(Arc<[Figure]>),
    /// Some sub-figure must pass.
    Or(Arc<[Figure]>),
    /// The sub-figure must fail.
    Not(Arc<Figure>),
    /// The sub-figure must pass without raising a listed fault.
    Except(Arc<Except>),
    /// Transform, then check.
    Convert(Arc<Convert>),
    /// Conditional branch.
    Route(Arc<Route>),
    /// Replace any failure with a fixed error.
    Wrap(Arc<Wrap>),
    /// Named placeholder resolved by extension hooks.
    Alias(Arc<str>),
}

impl Figure {
    /// Type figure.
    pub fn kind(kind: Kind) -> Self {
        Self::Type(kind)
    }

    /// Literal-equality figure.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Predicate figure from a callable.
    pub fn predicate<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Verdict, Failure> + Send + Sync + 'static,
    {
        Self::Predicate(Predicate::new(name, func))
    }

    /// Mapping figure. Entries are checked in the given order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Figure)>,
    {
        let entries: Vec<(Key, Figure)> = entries
            .into_iter()
            .map(|(key, figure)| (key.into(), figure))
            .collect();
        Self::Mapping(entries.into())
    }

    /// Sequence figure.
    ///
    /// # Errors
    ///
    /// Returns `FigureError::MultipleRepeats` for more than one marker and
    /// `FigureError::RepeatWithoutFigure` for a leading marker.
    pub fn sequence<I>(slots: I) -> Result<Self, FigureError>
    where
        I: IntoIterator<Item = Slot>,
    {
        Sequence::new(slots.into_iter().collect()).map(Self::Sequence)
    }

    /// Conjunction. An empty conjunction accepts everything.
    pub fn and<I>(figures: I) -> Self
    where
        I: IntoIterator<Item = Figure>,
    {
        Self::And(figures.into_iter().collect::<Vec<_>>().into())
    }

    /// Disjunction.
    ///
    /// # Errors
    ///
    /// Returns `FigureError::EmptyAlternatives` when `figures` is empty.
    pub fn or<I>(figures: I) -> Result<Self, FigureError>
    where
        I: IntoIterator<Item = Figure>,
    {
        let figures: Vec<Figure> = figures.into_iter().collect();
        if figures.is_empty() {
            return Err(FigureError::EmptyAlternatives);
        }
        Ok(Self::Or(figures.into()))
    }

    /// Disjunction over the characters of `alternatives`: each character
    /// becomes a one-character string literal.
    ///
    /// # Errors
    ///
    /// Returns `FigureError::EmptyAlternatives` when `alternatives` is empty.
    pub fn any_of(alternatives: &str) -> Result<Self, FigureError> {
        Self::or(
            alternatives
                .chars()
                .map(|c| Self::Literal(Value::String(c.to_string()))),
        )
    }

    /// Negation.
    pub fn not(figure: Figure) -> Self {
        Self::Not(Arc::new(figure))
    }

    /// Convert the listed fault kinds raised by `figure` into validation
    /// errors.
    pub fn except<I, S>(figure: Figure, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Except(Arc::new(Except {
            figure,
            kinds: kinds.into_iter().map(Into::into).collect(),
        }))
    }

    /// Check `transform(data)` against `figure`.
    pub fn convert(transform: Transform, figure: Figure) -> Self {
        Self::Convert(Arc::new(Convert { transform, figure }))
    }

    /// Check against `success` if `condition` passes, otherwise accept.
    pub fn route(condition: Figure, success: Figure) -> Self {
        Self::route_else(condition, success, Self::Nil)
    }

    /// Check against `success` if `condition` passes, otherwise against
    /// `failure`.
    pub fn route_else(condition: Figure, success: Figure, failure: Figure) -> Self {
        Self::Route(Arc::new(Route {
            condition,
            success,
            failure,
        }))
    }

    /// Replace every validation failure of `figure` with a fresh error built
    /// from `code` and `info`, dropping the original chain.
    pub fn wrap<I>(figure: Figure, code: impl Into<Code>, info: I) -> Self
    where
        I: IntoIterator<Item = Info>,
    {
        Self::Wrap(Arc::new(Wrap {
            figure,
            code: code.into(),
            info: info.into_iter().collect(),
        }))
    }

    /// Placeholder to be resolved by an extension hook.
    pub fn alias(name: impl Into<Arc<str>>) -> Self {
        Self::Alias(name.into())
    }

    /// The kind of data this figure is itself shaped like, if any.
    ///
    /// Literals have the kind of their value, mappings are objects and
    /// sequences are arrays. Combinators and callables have no data kind.
    pub fn data_kind(&self) -> Option<Kind> {
        match self {
            Self::Literal(value) => Some(Kind::of(value)),
            Self::Mapping(_) => Some(Kind::Object),
            Self::Sequence(_) => Some(Kind::Array),
            _ => None,
        }
    }
}

impl From<Kind> for Figure {
    fn from(kind: Kind) -> Self {
        Self::Type(kind)
    }
}

impl From<Value> for Figure {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Predicate> for Figure {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, figures: &[Figure]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, figure) in figures.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{figure:?}")?;
    }
    f.write_str(")")
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Type(kind) => write!(f, "Type({kind})"),
            Self::Literal(value) => write!(f, "Literal({value})"),
            Self::Predicate(predicate) => write!(f, "{predicate:?}"),
            Self::Mapping(entries) => {
                f.write_str("Mapping{")?;
                for (i, (key, figure)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let marker = if key.is_optional() { "?" } else { "" };
                    write!(f, "{marker}{:?}: {figure:?}", key.name())?;
                }
                f.write_str("}")
            }
            Self::Sequence(sequence) => {
                f.write_str("Sequence[")?;
                for (i, slot) in sequence.slots().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match slot {
                        Slot::Figure(figure) => write!(f, "{figure:?}")?,
                        Slot::Repeat => f.write_str("...")?,
                    }
                }
                f.write_str("]")
            }
            Self::And(figures) => write_list(f, "And", figures),
            Self::Or(figures) => write_list(f, "Or", figures),
            Self::Not(figure) => write!(f, "Not({figure:?})"),
            Self::Except(except) => {
                write!(f, "Except({:?}, {:?})", except.figure, except.kinds)
            }
            Self::Convert(convert) => write!(
                f,
                "Convert({}, {:?})",
                convert.transform.name(),
                convert.figure
            ),
            Self::Route(route) => write!(
                f,
                "Route({:?}, {:?}, {:?})",
                route.condition, route.success, route.failure
            ),
            Self::Wrap(wrap) => write!(f, "Wrap({:?} => {})", wrap.figure, wrap.code),
            Self::Alias(name) => write!(f, "Alias({name})"),
        }
    }
}
