//! Admin bar nodes for the mode switch.

use serde::Serialize;

use super::mode_switch::{MODE_NONCE_ACTION, MODE_QUERY_PARAM};
use super::modules::{ErpModule, ModuleRegistry};
use crate::context::{RequestContext, capabilities};

/// ID of the root mode-switch node.
pub const MODE_SWITCH_NODE: &str = "erp-mode-switch";

/// One admin bar node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminBarNode {
    /// Node ID.
    pub id: String,
    /// Parent node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Label.
    pub title: String,
    /// Link target.
    pub href: String,
    /// Tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
}

/// Builds the mode-switch nodes for `ctx`.
///
/// Users without `manage_options` get nothing. Each child links to
/// `base_url` with `erp-mode` and the given nonce appended.
#[must_use]
pub fn mode_switch_nodes(
    ctx: &RequestContext,
    registry: &ModuleRegistry,
    current: &ErpModule,
    nonce: &str,
    base_url: &str,
) -> Vec<AdminBarNode> {
    if !ctx.can(capabilities::MANAGE_OPTIONS) {
        return Vec::new();
    }

    let separator = if base_url.contains('?') { '&' } else { '?' };

    let mut nodes = Vec::with_capacity(registry.all().len() + 1);
    nodes.push(AdminBarNode {
        id: MODE_SWITCH_NODE.to_string(),
        parent: None,
        title: format!("ERP Mode: {}", current.title),
        href: "#".to_string(),
        meta_title: Some("Switch ERP Mode".to_string()),
    });

    nodes.extend(registry.all().iter().map(|module| AdminBarNode {
        id: format!("erp-mode-{}", module.key),
        parent: Some(MODE_SWITCH_NODE.to_string()),
        title: module.title.clone(),
        href: format!(
            "{base_url}{separator}{MODE_QUERY_PARAM}={}&{MODE_NONCE_ACTION}={nonce}",
            module.key
        ),
        meta_title: None,
    }));

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_for_admin() {
        let registry = ModuleRegistry::standard();
        let current = registry.current(Some("crm")).unwrap();
        let ctx = RequestContext::new(1, [capabilities::MANAGE_OPTIONS]);

        let nodes = mode_switch_nodes(&ctx, &registry, current, "abc", "/admin/index");

        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].id, "erp-mode-switch");
        assert_eq!(nodes[0].title, "ERP Mode: CR Management");
        assert_eq!(nodes[0].href, "#");
        assert_eq!(nodes[0].meta_title.as_deref(), Some("Switch ERP Mode"));

        assert_eq!(nodes[3].id, "erp-mode-accounting");
        assert_eq!(nodes[3].parent.as_deref(), Some("erp-mode-switch"));
        assert_eq!(
            nodes[3].href,
            "/admin/index?erp-mode=accounting&erp_mode_nonce=abc"
        );
    }

    #[test]
    fn test_existing_query_is_extended() {
        let registry = ModuleRegistry::standard();
        let ctx = RequestContext::new(1, [capabilities::MANAGE_OPTIONS]);

        let nodes = mode_switch_nodes(&ctx, &registry, &registry.all()[0], "n", "/admin?page=1");

        assert_eq!(nodes[1].href, "/admin?page=1&erp-mode=hrm&erp_mode_nonce=n");
    }

    #[test]
    fn test_no_nodes_without_capability() {
        let registry = ModuleRegistry::standard();
        let ctx = RequestContext::new(1, ["read"]);

        assert!(mode_switch_nodes(&ctx, &registry, &registry.all()[0], "n", "/admin").is_empty());
    }
}
