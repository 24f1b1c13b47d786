//! The ERP mode switch: a per-user "active module" preference.

use std::sync::Arc;

use serde::Deserialize;

use super::modules::{ErpModule, ModuleRegistry};
use crate::context::{RequestContext, capabilities};
use crate::store::StoreError;

/// Preference key holding the active module.
pub const MODE_META_KEY: &str = "_erp_mode";

/// Nonce action (and query parameter name) protecting the switch.
pub const MODE_NONCE_ACTION: &str = "erp_mode_nonce";

/// Query parameter naming the requested module.
pub const MODE_QUERY_PARAM: &str = "erp-mode";

/// Query parameters read by the mode switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModeSwitchParams {
    /// Requested module key.
    #[serde(rename = "erp-mode")]
    pub mode: Option<String>,
    /// Nonce issued for [`MODE_NONCE_ACTION`].
    #[serde(rename = "erp_mode_nonce")]
    pub nonce: Option<String>,
}

/// Per-user key/value preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read a preference.
    fn get(
        &self,
        user_id: i64,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Write a preference, replacing any previous value.
    fn set(
        &self,
        user_id: i64,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Result of [`ModeSwitchService::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSwitchOutcome {
    /// Nothing to do; the request proceeds.
    Ignored,
    /// The preference was written; redirect.
    Switched {
        /// Module now active.
        module: String,
        /// Redirect target.
        redirect_to: String,
    },
}

/// Applies mode switches and resolves the active module.
pub struct ModeSwitchService<P: PreferenceStore> {
    preferences: Arc<P>,
    registry: ModuleRegistry,
    dashboard_url: String,
}

impl<P: PreferenceStore> ModeSwitchService<P> {
    /// Create a new mode switch service.
    #[must_use]
    pub fn new(preferences: Arc<P>, registry: ModuleRegistry, dashboard_url: impl Into<String>) -> Self {
        Self {
            preferences,
            registry,
            dashboard_url: dashboard_url.into(),
        }
    }

    /// Registered modules.
    #[must_use]
    pub const fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Switches the active module when every check passes.
    ///
    /// The principal must hold `manage_options`, the nonce must verify for
    /// [`MODE_NONCE_ACTION`] and the current user, and the requested mode
    /// must be registered. Any failed check yields `Ignored` without
    /// touching the store. `verify` receives `(nonce, action, user_id)`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if writing the preference fails.
    pub async fn apply<V>(
        &self,
        ctx: &RequestContext,
        params: &ModeSwitchParams,
        verify: V,
    ) -> Result<ModeSwitchOutcome, StoreError>
    where
        V: Fn(&str, &str, i64) -> bool,
    {
        if !ctx.can(capabilities::MANAGE_OPTIONS) {
            return Ok(ModeSwitchOutcome::Ignored);
        }

        let Some(nonce) = params.nonce.as_deref() else {
            return Ok(ModeSwitchOutcome::Ignored);
        };
        if !verify(nonce, MODE_NONCE_ACTION, ctx.user_id()) {
            return Ok(ModeSwitchOutcome::Ignored);
        }

        let Some(module) = params.mode.as_deref().and_then(|key| self.registry.get(key)) else {
            return Ok(ModeSwitchOutcome::Ignored);
        };

        self.preferences
            .set(ctx.user_id(), MODE_META_KEY, &module.key)
            .await?;

        Ok(ModeSwitchOutcome::Switched {
            module: module.key.clone(),
            redirect_to: self.dashboard_url.clone(),
        })
    }

    /// The active module for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if reading the preference fails.
    pub async fn current_module(&self, ctx: &RequestContext) -> Result<Option<&ErpModule>, StoreError> {
        let preference = self.preferences.get(ctx.user_id(), MODE_META_KEY).await?;
        Ok(self.registry.current(preference.as_deref()))
    }
}

#[cfg(test)]
#[path = "mode_switch_tests.rs"]
mod tests;
