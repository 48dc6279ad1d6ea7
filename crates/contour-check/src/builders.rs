//! # Builders — Ready-Made Predicates and Transforms
//!
//! Common callables for use inside figures. They are ordinary
//! [`Predicate`]s and [`Transform`]s; the matcher treats them like any
//! caller-supplied callable.
//!
//! ```
//! use contour_check::builders::{length, range};
//! use contour_check::{check, Figure};
//! use serde_json::json;
//!
//! // Strings of more than three characters.
//! let figure = Figure::convert(length(), range(3.0, f64::INFINITY).left(false).into());
//! assert!(check(&figure, &json!("hello")).is_ok());
//! assert!(check(&figure, &json!("hey")).is_err());
//! ```

use serde_json::Value;

use contour_core::{Code, Error, Failure, Fault, Figure, Info, Predicate, Transform, Verdict};

/// Numeric bounds check built by [`range`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: f64,
    upper: f64,
    left: bool,
    right: bool,
}

/// Accept numbers between `lower` and `upper`, both inclusive by default.
///
/// Out-of-range numbers raise a `range` error with info `[lower, upper]`.
/// Non-numeric data raises a `type_error` fault.
pub fn range(lower: f64, upper: f64) -> Range {
    Range {
        lower,
        upper,
        left: true,
        right: true,
    }
}

impl Range {
    /// Whether the lower bound is included.
    pub fn left(mut self, inclusive: bool) -> Self {
        self.left = inclusive;
        self
    }

    /// Whether the upper bound is included.
    pub fn right(mut self, inclusive: bool) -> Self {
        self.right = inclusive;
        self
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.left {
            self.lower <= value
        } else {
            self.lower < value
        };
        let below = if self.right {
            value <= self.upper
        } else {
            value < self.upper
        };
        above && below
    }

    /// Interval notation, e.g. `(0, 5.5]`.
    pub fn notation(&self) -> String {
        format!(
            "{}{}, {}{}",
            if self.left { '[' } else { '(' },
            self.lower,
            self.upper,
            if self.right { ']' } else { ')' },
        )
    }

    /// The predicate performing this check.
    pub fn predicate(self) -> Predicate {
        Predicate::new(format!("range{}", self.notation()), move |data| {
            let Some(value) = data.as_f64() else {
                return Err(Fault::new("type_error", format!("{data} is not a number")).into());
            };
            if self.contains(value) {
                Ok(Verdict::Pass)
            } else {
                Err(Error::new(
                    Code::custom("range"),
                    [Info::from(Value::from(self.lower)), Info::from(Value::from(self.upper))],
                )
                .into())
            }
        })
    }
}

impl From<Range> for Figure {
    fn from(range: Range) -> Self {
        Figure::Predicate(range.predicate())
    }
}

/// Membership check built by [`contain`].
#[derive(Debug, Clone, PartialEq)]
pub struct Contain {
    store: Vec<Value>,
    present: bool,
}

/// Accept data equal to one of the values in `store`.
///
/// Failures raise a `contain` error whose info is the store.
pub fn contain<I, V>(store: I) -> Contain
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Contain {
        store: store.into_iter().map(Into::into).collect(),
        present: true,
    }
}

impl Contain {
    /// Invert the check: accept data equal to none of the stored values.
    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    /// The stored values.
    pub fn store(&self) -> &[Value] {
        &self.store
    }

    /// The predicate performing this check.
    pub fn predicate(self) -> Predicate {
        let name = if self.present {
            "contain"
        } else {
            "contain(absent)"
        };
        Predicate::new(name, move |data| {
            if self.store.contains(data) == self.present {
                return Ok(Verdict::Pass);
            }
            let store = Value::from(self.store.clone());
            Err(Error::new(Code::custom("contain"), [Info::Value(store)]).into())
        })
    }
}

impl From<Contain> for Figure {
    fn from(contain: Contain) -> Self {
        Figure::Predicate(contain.predicate())
    }
}

/// Transform yielding the length of a string (in characters), array, or
/// object. Other data raises a `type_error` fault.
pub fn length() -> Transform {
    Transform::new("length", |data| {
        let size = match data {
            Value::String(text) => text.chars().count(),
            Value::Array(items) => items.len(),
            Value::Object(entries) => entries.len(),
            other => {
                return Err(Failure::from(Fault::new(
                    "type_error",
                    format!("{other} has no length"),
                )))
            }
        };
        Ok(Value::from(size))
    })
}
