//! # Dispatch Table
//!
//! Classifies a figure into exactly one [`Handler`]. Extension hooks have
//! already run by the time a figure reaches [`Handler::classify`].
//!
//! ## Precedence
//!
//! | # | Figure | Handler |
//! |---|--------|---------|
//! | 1 | `Nil` | always passes |
//! | 2 | `Type` | kind match |
//! | 3 | `Or` | first passing alternative |
//! | 4 | `And` | all sub-figures |
//! | 5 | `Not` | inverted sub-figure |
//! | 6 | `Except` | sub-figure with fault conversion |
//! | 7 | `Predicate` | callable |
//! | 8 | `Mapping` | object entries |
//! | 9 | `Sequence` | positional elements |
//! | 10 | `Convert` | transform, then sub-figure |
//! | 11 | `Route` | conditional branch |
//! | 12 | `Wrap` | sub-figure with replaced failures |
//! | 13 | `Literal` | equality |
//!
//! Figures are a closed enum, so no figure can match two rows and the
//! order only documents precedence. An `Alias` left unresolved by the
//! hooks has no handler.

use serde_json::Value;

use contour_core::{Convert, Except, Figure, FigureError, Key, Kind, Predicate, Route, Sequence, Wrap};

use crate::combinator;
use crate::leaf;
use crate::matcher::{CheckResult, Checker};
use crate::structure;

/// A classified figure, borrowing its payload.
#[derive(Debug, Clone, Copy)]
pub enum Handler<'f> {
    /// Passes any data.
    Nil,
    /// Kind match.
    Type(Kind),
    /// Disjunction.
    Or(&'f [Figure]),
    /// Conjunction.
    And(&'f [Figure]),
    /// Negation.
    Not(&'f Figure),
    /// Fault conversion.
    Except(&'f Except),
    /// Callable.
    Predicate(&'f Predicate),
    /// Object entries.
    Mapping(&'f [(Key, Figure)]),
    /// Positional elements.
    Sequence(&'f Sequence),
    /// Transform, then check.
    Convert(&'f Convert),
    /// Conditional branch.
    Route(&'f Route),
    /// Failure replacement.
    Wrap(&'f Wrap),
    /// Equality.
    Literal(&'f Value),
}

impl<'f> Handler<'f> {
    /// Pick the handler for a figure.
    ///
    /// # Errors
    ///
    /// Returns `FigureError::UnresolvedAlias` for an alias figure.
    pub fn classify(figure: &'f Figure) -> Result<Self, FigureError> {
        Ok(match figure {
            Figure::Nil => Self::Nil,
            Figure::Type(kind) => Self::Type(*kind),
            Figure::Or(figures) => Self::Or(figures),
            Figure::And(figures) => Self::And(figures),
            Figure::Not(figure) => Self::Not(figure),
            Figure::Except(except) => Self::Except(except),
            Figure::Predicate(predicate) => Self::Predicate(predicate),
            Figure::Mapping(entries) => Self::Mapping(entries),
            Figure::Sequence(sequence) => Self::Sequence(sequence),
            Figure::Convert(convert) => Self::Convert(convert),
            Figure::Route(route) => Self::Route(route),
            Figure::Wrap(wrap) => Self::Wrap(wrap),
            Figure::Literal(value) => Self::Literal(value),
            Figure::Alias(name) => return Err(FigureError::UnresolvedAlias(name.to_string())),
        })
    }

    /// Handler name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Type(_) => "type",
            Self::Or(_) => "or",
            Self::And(_) => "and",
            Self::Not(_) => "not",
            Self::Except(_) => "except",
            Self::Predicate(_) => "predicate",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Convert(_) => "convert",
            Self::Route(_) => "route",
            Self::Wrap(_) => "wrap",
            Self::Literal(_) => "literal",
        }
    }

    /// Whether automatic kind pre-checks apply before this handler.
    pub fn is_pre_checked(&self) -> bool {
        !matches!(self, Self::Nil | Self::Type(_))
    }

    /// Run the handler against `data`.
    pub(crate) fn run(self, checker: &Checker, data: &Value) -> CheckResult {
        match self {
            Self::Nil => Ok(None),
            Self::Type(kind) => leaf::check_type(kind, data),
            Self::Or(figures) => combinator::check_or(checker, figures, data),
            Self::And(figures) => combinator::check_and(checker, figures, data),
            Self::Not(figure) => combinator::check_not(checker, figure, data),
            Self::Except(except) => combinator::check_except(checker, except, data),
            Self::Predicate(predicate) => leaf::check_predicate(predicate, data),
            Self::Mapping(entries) => structure::check_mapping(checker, entries, data),
            Self::Sequence(sequence) => structure::check_sequence(checker, sequence, data),
            Self::Convert(convert) => combinator::check_convert(checker, convert, data),
            Self::Route(route) => combinator::check_route(checker, route, data),
            Self::Wrap(wrap) => combinator::check_wrap(checker, wrap, data),
            Self::Literal(expected) => leaf::check_literal(expected, data),
        }
    }
}
