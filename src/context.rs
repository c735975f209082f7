//! Hands one shared [`DateUtils`] to a component subtree.
//!
//! A [`UtilsContextProvider`] builds (or adopts) the facade and wraps exactly
//! one child. The child receives a [`UtilsContext`] handle and passes clones of
//! it down to its own children, so every descendant reads the same facade.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{DateError, provider::DateProvider, utils::DateUtils};

/// Implemented by the component wrapped by a [`UtilsContextProvider`].
pub trait UsesDateUtils<P: DateProvider> {
    /// Receives the shared handle. Implementors forward clones to their
    /// descendants.
    fn provide(&mut self, context: UtilsContext<P>);
}

/// Read handle on the facade of the enclosing scope.
#[derive(Debug)]
pub struct UtilsContext<P: DateProvider> {
    current: Arc<RwLock<Arc<DateUtils<P>>>>,
}

impl<P: DateProvider> Clone for UtilsContext<P> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<P: DateProvider> UtilsContext<P> {
    fn new(utils: Arc<DateUtils<P>>) -> Self {
        Self {
            current: Arc::new(RwLock::new(utils)),
        }
    }

    /// The facade currently installed in the scope.
    pub fn utils(&self) -> Arc<DateUtils<P>> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn replace(&self, utils: Arc<DateUtils<P>>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = utils;
    }
}

/// Builder for a scope: either a ready facade or a provider to build one from.
#[derive(Debug)]
pub struct UtilsContextProvider<P: DateProvider> {
    utils:    Option<Arc<DateUtils<P>>>,
    provider: Option<P>,
}

impl<P: DateProvider> Default for UtilsContextProvider<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DateProvider> UtilsContextProvider<P> {
    pub const fn new() -> Self {
        Self {
            utils:    None,
            provider: None,
        }
    }

    /// Uses `utils` as-is. Takes precedence over [`Self::with_provider`].
    #[must_use]
    pub fn with_utils(mut self, utils: Arc<DateUtils<P>>) -> Self {
        self.utils = Some(utils);
        self
    }

    #[must_use]
    pub fn with_provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Installs the facade and hands it to the single child.
    ///
    /// # Errors
    /// Returns `DateError::ChildCount` unless `children` yields exactly one
    /// child, and `DateError::MissingProvider` when the builder was given
    /// neither a facade nor a provider.
    pub fn wrap<C>(self, children: impl IntoIterator<Item = C>) -> Result<UtilsScope<P, C>, DateError>
    where
        C: UsesDateUtils<P>,
    {
        let children: Vec<C> = children.into_iter().collect();
        let [mut child]: [C; 1] = children
            .try_into()
            .map_err(|children: Vec<C>| DateError::ChildCount(children.len()))?;

        let utils = match (self.utils, self.provider) {
            (Some(utils), provider) => {
                if provider.is_some() {
                    log::debug!("context given both a facade and a provider, using the facade");
                }
                utils
            },
            (None, Some(provider)) => {
                log::debug!("building a date facade for the context");
                Arc::new(DateUtils::new(provider))
            },
            (None, None) => return Err(DateError::MissingProvider),
        };

        let context = UtilsContext::new(utils);
        child.provide(context.clone());
        Ok(UtilsScope { context, child })
    }
}

impl<P: DateProvider + Default> UtilsContextProvider<P> {
    /// Builds the facade from `P::default()` unless a facade or provider is
    /// set later.
    #[must_use]
    pub fn with_default_provider(self) -> Self {
        self.with_provider(P::default())
    }
}

/// A wrapped child together with the facade it was given.
#[derive(Debug)]
pub struct UtilsScope<P: DateProvider, C> {
    context: UtilsContext<P>,
    child:   C,
}

impl<P: DateProvider, C> UtilsScope<P, C> {
    pub fn context(&self) -> UtilsContext<P> {
        self.context.clone()
    }

    pub fn utils(&self) -> Arc<DateUtils<P>> {
        self.context.utils()
    }

    /// Swaps the facade. Every handle sees the new one on its next read.
    pub fn set_utils(&self, utils: Arc<DateUtils<P>>) {
        self.context.replace(utils);
    }

    pub const fn child(&self) -> &C {
        &self.child
    }

    pub const fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn into_child(self) -> C {
        self.child
    }
}
