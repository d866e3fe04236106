//! Document-level style variables
//!
//! Styling that is not aware of the component tree reads its colors from
//! named variables on the document scope. Services mirror their state here.

use rustc_hash::FxHashMap;
use std::sync::RwLock;

/// Global style variable scope for one browsing context
#[derive(Default)]
pub struct StyleScope {
    properties: RwLock<FxHashMap<String, String>>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&self, name: &str, value: impl Into<String>) {
        self.properties
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), value.into());
    }

    pub fn get_property(&self, name: &str) -> Option<String> {
        self.properties
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn remove_property(&self, name: &str) -> Option<String> {
        self.properties
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name)
    }

    /// Copy of every variable, sorted by name
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = self
            .properties
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.sort();
        vars
    }
}
