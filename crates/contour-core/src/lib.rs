//! # contour-core — Figure Algebra and Error Model
//!
//! This crate is the leaf of the contour workspace. It defines the
//! vocabulary that the checking engine in `contour-check` interprets:
//!
//! 1. **`Kind` type descriptors.** One per JSON value shape, with a subkind
//!    relation: `integer` and `float` are `number`s, everything is `any`.
//!
//! 2. **`Figure` closed sum type.** Validation patterns: kinds,
//!    literals, predicates, mappings, sequences, and the combinators AND,
//!    OR, NOT, EXCEPT, CONVERT, ROUTE and WRAP. Constructors enforce the
//!    construction-time invariants of the algebra.
//!
//! 3. **`Error` chains.** A validation failure carries a `Code`, an
//!    ordered list of `Info` values, and an owned link to the deeper error
//!    it was raised from.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `contour-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Figures carry no mutable state and are `Send + Sync`.
//! - `Code` and `Frame` implement `Serialize`; `Code` also `Deserialize`.
//!   `Info` and `Figure` may hold callables and are not serializable: errors
//!   leave the process through [`Error::show`] frames.

pub mod error;
pub mod figure;
pub mod kind;

// Re-export primary types for ergonomic imports.
pub use error::{Chain, Code, Error, Failure, Fault, FigureError, Frame, Info};
pub use figure::{
    opt, Convert, Except, Figure, Key, Predicate, Route, Sequence, Slot, Transform, Verdict, Wrap,
};
pub use kind::Kind;
