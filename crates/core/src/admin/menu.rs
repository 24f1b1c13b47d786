//! Admin navigation: ERP pages merged into the host's default menu.

use serde::Serialize;

use crate::context::{RequestContext, capabilities};

/// Host menu slugs hidden while the ERP is active.
pub const HIDDEN_HOST_SLUGS: &[&str] = &[
    "edit.php",
    "upload.php",
    "edit.php?post_type=page",
    "edit-comments.php",
    "themes.php",
    "users.php",
    "tools.php",
];

/// A top-level menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage {
    /// Title of the page itself.
    pub page_title: String,
    /// Label shown in the menu.
    pub menu_title: String,
    /// Capability required to see the entry.
    pub capability: String,
    /// Page slug.
    pub slug: String,
    /// Icon class.
    pub icon: Option<String>,
    /// Menu position; `None` appends after positioned entries.
    pub position: Option<i32>,
    /// Nested entries.
    pub submenus: Vec<SubmenuPage>,
}

/// A nested menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuPage {
    /// Title of the page itself.
    pub page_title: String,
    /// Label shown in the menu.
    pub menu_title: String,
    /// Capability required to see the entry.
    pub capability: String,
    /// Page slug.
    pub slug: String,
}

impl MenuPage {
    fn host(title: &str, slug: &str, capability: &str, icon: &str, position: i32) -> Self {
        Self {
            page_title: title.to_string(),
            menu_title: title.to_string(),
            capability: capability.to_string(),
            slug: slug.to_string(),
            icon: Some(icon.to_string()),
            position: Some(position),
            submenus: Vec::new(),
        }
    }
}

impl SubmenuPage {
    fn new(title: &str, slug: &str, capability: &str) -> Self {
        Self {
            page_title: title.to_string(),
            menu_title: title.to_string(),
            capability: capability.to_string(),
            slug: slug.to_string(),
        }
    }
}

/// A visible navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Menu label.
    pub title: String,
    /// Page slug.
    pub slug: String,
    /// Icon class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Visible children.
    pub children: Vec<NavChild>,
}

/// A visible nested navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavChild {
    /// Menu label.
    pub title: String,
    /// Page slug.
    pub slug: String,
}

/// The admin menu registration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMenu {
    host: Vec<MenuPage>,
    pages: Vec<MenuPage>,
    hidden: Vec<String>,
}

impl AdminMenu {
    /// The host's default navigation.
    #[must_use]
    pub fn host_defaults() -> Vec<MenuPage> {
        vec![
            MenuPage::host("Dashboard", "index.php", "read", "dashicons-dashboard", 2),
            MenuPage::host("Posts", "edit.php", "edit_posts", "dashicons-admin-post", 5),
            MenuPage::host("Media", "upload.php", "upload_files", "dashicons-admin-media", 10),
            MenuPage::host(
                "Pages",
                "edit.php?post_type=page",
                "edit_pages",
                "dashicons-admin-page",
                20,
            ),
            MenuPage::host(
                "Comments",
                "edit-comments.php",
                "edit_posts",
                "dashicons-admin-comments",
                25,
            ),
            MenuPage::host(
                "Appearance",
                "themes.php",
                "switch_themes",
                "dashicons-admin-appearance",
                60,
            ),
            MenuPage::host(
                "Plugins",
                "plugins.php",
                "activate_plugins",
                "dashicons-admin-plugins",
                65,
            ),
            MenuPage::host("Users", "users.php", "list_users", "dashicons-admin-users", 70),
            MenuPage::host("Tools", "tools.php", "edit_posts", "dashicons-admin-tools", 75),
            MenuPage::host(
                "Settings",
                "options-general.php",
                capabilities::MANAGE_OPTIONS,
                "dashicons-admin-settings",
                80,
            ),
        ]
    }

    /// The ERP menu: one top-level page with Company and Settings beneath it,
    /// and the host entries the ERP hides.
    #[must_use]
    pub fn standard(position: Option<i32>) -> Self {
        let erp = MenuPage {
            page_title: "ERP".to_string(),
            menu_title: "ERP Settings".to_string(),
            capability: capabilities::MANAGE_OPTIONS.to_string(),
            slug: "erp-dashboard".to_string(),
            icon: Some("dashicons-admin-tools".to_string()),
            position,
            submenus: vec![
                SubmenuPage::new("Company", "erp-company", capabilities::MANAGE_OPTIONS),
                SubmenuPage::new("Settings", "erp-settings", capabilities::MANAGE_OPTIONS),
            ],
        };

        Self {
            host: Self::host_defaults(),
            pages: vec![erp],
            hidden: HIDDEN_HOST_SLUGS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Registered ERP pages.
    #[must_use]
    pub fn pages(&self) -> &[MenuPage] {
        &self.pages
    }

    /// Returns true when a host slug is hidden.
    #[must_use]
    pub fn is_hidden(&self, slug: &str) -> bool {
        self.hidden.iter().any(|s| s == slug)
    }

    /// Builds the navigation visible to `ctx`.
    ///
    /// Entries are ordered by position; unpositioned entries follow in
    /// registration order.
    #[must_use]
    pub fn navigation(&self, ctx: &RequestContext) -> Vec<NavEntry> {
        let mut visible: Vec<(usize, &MenuPage)> = self
            .host
            .iter()
            .filter(|page| !self.is_hidden(&page.slug))
            .chain(self.pages.iter())
            .filter(|page| ctx.can(&page.capability))
            .enumerate()
            .collect();

        visible.sort_by_key(|(index, page)| (page.position.unwrap_or(i32::MAX), *index));

        visible
            .into_iter()
            .map(|(_, page)| NavEntry {
                title: page.menu_title.clone(),
                slug: page.slug.clone(),
                icon: page.icon.clone(),
                children: page
                    .submenus
                    .iter()
                    .filter(|sub| ctx.can(&sub.capability))
                    .map(|sub| NavChild {
                        title: sub.menu_title.clone(),
                        slug: sub.slug.clone(),
                    })
                    .collect(),
            })
            .collect()
    }
}
