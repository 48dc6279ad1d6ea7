//! # Matcher
//!
//! The recursive entry point. A check runs in three steps:
//!
//! 1. **Rewrite.** Extension hooks are tried in order. The first hook that
//!    returns a figure replaces the current one and the pass restarts.
//! 2. **Classify.** The resulting figure is mapped to its [`Handler`].
//! 3. **Run.** With `auto` enabled, the data's kind is first checked
//!    against the kind the figure is itself shaped like. The handler then
//!    runs, recursing through the checker for sub-figures.
//!
//! ## Results
//!
//! `Ok(None)` means the data is valid as-is. `Ok(Some(value))` carries a
//! freshly built copy (mappings, sequences, `Not`) or a predicate's
//! replacement value; it is authoritative and should be used instead of
//! the input.

use std::borrow::Cow;

use serde_json::Value;

use contour_core::{Code, Error, Failure, Figure, FigureError, Info, Kind};

use crate::config::CheckConfig;
use crate::dispatch::Handler;
use crate::hook::Hook;

/// Outcome of a check.
pub type CheckResult = Result<Option<Value>, Failure>;

/// Checks data against figures with a fixed configuration and hook list.
///
/// A `Checker` holds no per-check state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    config: CheckConfig,
    hooks: Vec<Hook>,
}

impl Checker {
    /// A checker with default settings and no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A checker with the given settings and no hooks.
    pub fn with_config(config: CheckConfig) -> Self {
        Self {
            config,
            hooks: Vec::new(),
        }
    }

    /// Enable or disable automatic kind pre-checks.
    pub fn auto(mut self, auto: bool) -> Self {
        self.config.auto = auto;
        self
    }

    /// Append an extension hook. Hooks are tried in registration order.
    pub fn hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// The active settings.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// The registered hooks.
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Check `data` against `figure`.
    pub fn check(&self, figure: &Figure, data: &Value) -> CheckResult {
        let figure = self.resolve(figure)?;
        let handler = Handler::classify(&figure)?;

        if self.config.auto && handler.is_pre_checked() {
            if let Some(expected) = figure.data_kind() {
                let actual = Kind::of(data);
                if !actual.is_subkind_of(expected) {
                    return Err(type_mismatch(expected, actual).into());
                }
            }
        }

        tracing::trace!(handler = handler.name(), "dispatching figure");
        handler.run(self, data)
    }

    fn resolve<'f>(&self, figure: &'f Figure) -> Result<Cow<'f, Figure>, FigureError> {
        let mut current = Cow::Borrowed(figure);
        let mut rewrites = 0usize;
        'pass: loop {
            for hook in &self.hooks {
                let Some(next) = hook.rewrite(&current) else {
                    continue;
                };
                rewrites += 1;
                if let Some(limit) = self.config.rewrite_limit {
                    if rewrites > limit {
                        return Err(FigureError::RewriteLimit { limit });
                    }
                }
                tracing::debug!(hook = hook.name(), rewrites, "figure rewritten by extension hook");
                current = Cow::Owned(next);
                continue 'pass;
            }
            return Ok(current);
        }
    }
}

/// Check `data` against `figure` with default settings and no hooks.
pub fn check(figure: &Figure, data: &Value) -> CheckResult {
    Checker::new().check(figure, data)
}

/// Check `data` against `figure` with explicit `auto` and hook list.
pub fn check_with(figure: &Figure, data: &Value, auto: bool, extra: &[Hook]) -> CheckResult {
    let checker = Checker {
        config: CheckConfig {
            auto,
            rewrite_limit: None,
        },
        hooks: extra.to_vec(),
    };
    checker.check(figure, data)
}

/// The `type` error for a kind mismatch.
pub(crate) fn type_mismatch(expected: Kind, actual: Kind) -> Error {
    Error::new(Code::Type, [Info::Kind(expected), Info::Kind(actual)])
}

/// Frame a validation failure as the cause of a new `code` error carrying
/// `info`. Faults and figure errors pass through unchanged.
pub(crate) fn nest(failure: Failure, code: Code, info: Info) -> Failure {
    match failure {
        Failure::Invalid(cause) => Error::new(code, [info]).with_cause(cause).into(),
        other => other,
    }
}
