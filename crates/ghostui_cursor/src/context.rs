//! Cursor context handle

use crate::element::{ElementId, ElementNode, ElementOptions};
use crate::error::MissingProviderError;
use crate::provider::CursorEffectProvider;
use crate::state::CursorState;
use std::sync::Arc;

const MISSING: MissingProviderError =
    MissingProviderError::new("CursorContext", "CursorEffectProvider");

/// Context handle passed down the component tree
#[derive(Clone, Default)]
pub struct CursorContext {
    provider: Option<Arc<CursorEffectProvider>>,
}

impl CursorContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn provided(provider: Arc<CursorEffectProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Required accessor
    pub fn use_cursor(&self) -> Result<CursorContextValue, MissingProviderError> {
        self.use_cursor_optional().ok_or(MISSING)
    }

    /// Optional accessor for components that work without effects
    pub fn use_cursor_optional(&self) -> Option<CursorContextValue> {
        self.provider.as_ref().map(|provider| CursorContextValue {
            provider: Arc::clone(provider),
        })
    }
}

/// State snapshot plus registration, as seen by a component
#[derive(Clone)]
pub struct CursorContextValue {
    provider: Arc<CursorEffectProvider>,
}

impl std::fmt::Debug for CursorContextValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorContextValue").finish_non_exhaustive()
    }
}

impl CursorContextValue {
    pub fn state(&self) -> CursorState {
        self.provider.state()
    }

    pub fn register_element<N>(&self, id: impl Into<ElementId>, node: &Arc<N>, options: ElementOptions)
    where
        N: ElementNode + 'static,
    {
        self.provider.register_element(id, node, options);
    }

    pub fn unregister_element(&self, id: &ElementId) -> bool {
        self.provider.unregister_element(id)
    }

    pub fn provider(&self) -> &Arc<CursorEffectProvider> {
        &self.provider
    }
}
