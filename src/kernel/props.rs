use std::fmt;
use std::sync::Arc;

/// Decides whether typed text that matches no option may be accepted as a new entry.
pub type AllowNewFn<T> = dyn Fn(&[T], &str) -> bool + Send + Sync;

/// Custom-entry capability. A plain flag is forced off while a search is in flight; a
/// predicate is trusted to make that call itself and is passed through untouched.
pub enum AllowNew<T> {
    Flag(bool),
    Predicate(Arc<AllowNewFn<T>>),
}

impl<T> AllowNew<T> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&[T], &str) -> bool + Send + Sync + 'static,
    {
        AllowNew::Predicate(Arc::new(f))
    }

    /// The capability as the widget should see it for the current loading state.
    pub fn resolve(&self, is_loading: bool) -> Self {
        match self {
            AllowNew::Flag(allowed) => AllowNew::Flag(*allowed && !is_loading),
            AllowNew::Predicate(f) => AllowNew::Predicate(Arc::clone(f)),
        }
    }

    pub fn allows(&self, options: &[T], text: &str) -> bool {
        match self {
            AllowNew::Flag(allowed) => *allowed,
            AllowNew::Predicate(f) => f(options, text),
        }
    }
}

impl<T> Default for AllowNew<T> {
    fn default() -> Self {
        AllowNew::Flag(false)
    }
}

impl<T> Clone for AllowNew<T> {
    fn clone(&self) -> Self {
        match self {
            AllowNew::Flag(allowed) => AllowNew::Flag(*allowed),
            AllowNew::Predicate(f) => AllowNew::Predicate(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for AllowNew<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowNew::Flag(allowed) => f.debug_tuple("Flag").field(allowed).finish(),
            AllowNew::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Caller-owned search state, handed to the orchestrator once per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProps<T> {
    pub is_loading: bool,
    pub options: Vec<T>,
}

impl<T> Default for SearchProps<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            options: Vec::new(),
        }
    }
}

/// What the display widget renders. Recomputed on every render, never stored.
#[derive(Debug, Clone)]
pub struct TypeaheadProps<'a, T> {
    pub is_loading: bool,
    pub min_length: usize,
    pub empty_label: &'a str,
    pub allow_new: AllowNew<T>,
    pub options: &'a [T],
}
