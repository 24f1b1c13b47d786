//! Registry of ERP modules a user can switch between.

use serde::Serialize;

/// One switchable ERP module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErpModule {
    /// Key used in `erp-mode` and stored as the preference.
    pub key: String,
    /// Display title.
    pub title: String,
}

/// Ordered set of registered modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRegistry {
    modules: Vec<ErpModule>,
}

impl ModuleRegistry {
    /// Builds a registry from `(key, title)` pairs in display order.
    #[must_use]
    pub fn new(modules: &[(&str, &str)]) -> Self {
        Self {
            modules: modules
                .iter()
                .map(|(key, title)| ErpModule {
                    key: (*key).to_string(),
                    title: (*title).to_string(),
                })
                .collect(),
        }
    }

    /// HR, CRM and Accounting.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(&[
            ("hrm", "HR Management"),
            ("crm", "CR Management"),
            ("accounting", "Accounting"),
        ])
    }

    /// All modules in registration order.
    #[must_use]
    pub fn all(&self) -> &[ErpModule] {
        &self.modules
    }

    /// Looks up a module by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErpModule> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Returns true when `key` names a registered module.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolves the active module: the stored preference when it is still
    /// registered, otherwise the first module.
    #[must_use]
    pub fn current(&self, preference: Option<&str>) -> Option<&ErpModule> {
        preference
            .and_then(|key| self.get(key))
            .or_else(|| self.modules.first())
    }
}
