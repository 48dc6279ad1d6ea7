//! # Extension Hooks
//!
//! A [`Hook`] rewrites a figure before it is classified. Hooks let callers
//! define their own placeholder figures (usually [`Figure::Alias`]) and
//! resolve them to concrete patterns without touching the dispatch table.
//!
//! A hook returns `None` to mean "not mine, try the next hook". When a hook
//! does return a figure, the hook pass starts over from the first hook on
//! the new figure, so an alias may resolve to another alias.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use contour_core::Figure;

type RewriteFn = dyn Fn(&Figure) -> Option<Figure> + Send + Sync;

/// A named figure-rewriting function.
#[derive(Clone)]
pub struct Hook {
    name: Arc<str>,
    func: Arc<RewriteFn>,
}

impl Hook {
    /// Wrap a rewrite function.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Figure) -> Option<Figure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// A hook resolving [`Figure::Alias`] names from a fixed table.
    pub fn aliases<I, S>(name: impl Into<Arc<str>>, table: I) -> Self
    where
        I: IntoIterator<Item = (S, Figure)>,
        S: Into<String>,
    {
        let table: HashMap<String, Figure> = table
            .into_iter()
            .map(|(alias, figure)| (alias.into(), figure))
            .collect();
        Self::new(name, move |figure| match figure {
            Figure::Alias(alias) => table.get(&**alias).cloned(),
            _ => None,
        })
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the hook.
    pub fn rewrite(&self, figure: &Figure) -> Option<Figure> {
        (self.func)(figure)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hook({})", self.name)
    }
}
