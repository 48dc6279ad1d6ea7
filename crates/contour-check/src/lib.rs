//! # contour-check — Recursive Figure Matching
//!
//! Interprets the figures defined in `contour-core` against JSON data.
//!
//! ## Matching (`matcher`)
//!
//! [`check`] and [`Checker::check`] walk a figure and the data in lockstep.
//! Every figure is first offered to the registered extension [`Hook`]s,
//! then classified by the [`dispatch`] table and handed to exactly one
//! handler. Structural handlers recurse back through the checker, framing
//! nested failures with the key or index they occurred at:
//!
//! ```
//! use contour_check::{check, Code, Figure, Kind};
//! use serde_json::json;
//!
//! let figure = Figure::mapping([("a", Figure::mapping([("b", Figure::Type(Kind::Integer))]))]);
//! let error = check(&figure, &json!({"a": {"b": "x"}}))
//!     .unwrap_err()
//!     .into_invalid()
//!     .unwrap();
//! let codes: Vec<&Code> = error.chain().map(|e| e.code()).collect();
//! assert_eq!(codes, [&Code::Value, &Code::Value, &Code::Type]);
//! ```
//!
//! ## Builders (`builders`)
//!
//! Ready-made predicates and transforms: [`builders::range`],
//! [`builders::contain`] and [`builders::length`].
//!
//! ## Crate Policy
//!
//! - Depends only on `contour-core` internally.
//! - Checking never mutates its input; transformed data is always a fresh
//!   value returned in `Ok(Some(_))`.
//! - Faults raised by caller code propagate unchanged unless an `Except`
//!   figure selects them.
//! - Library code emits `tracing` events and never installs a subscriber.

pub mod builders;
pub mod config;
pub mod dispatch;
pub mod hook;
pub mod matcher;

mod combinator;
mod leaf;
mod structure;

pub use config::{CheckConfig, ConfigError};
pub use dispatch::Handler;
pub use hook::Hook;
pub use matcher::{check, check_with, CheckResult, Checker};

pub use contour_core::{
    opt, Code, Error, Failure, Fault, Figure, FigureError, Frame, Info, Key, Kind, Predicate,
    Slot, Transform, Verdict,
};
