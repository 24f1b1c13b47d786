//! Admin menu integration.
//!
//! - Module registry and the per-user mode switch
//! - Admin menu registration with hidden host entries
//! - Admin bar nodes for switching modes

pub mod bar;
pub mod menu;
pub mod mode_switch;
pub mod modules;

pub use bar::{AdminBarNode, MODE_SWITCH_NODE, mode_switch_nodes};
pub use menu::{AdminMenu, HIDDEN_HOST_SLUGS, MenuPage, NavChild, NavEntry, SubmenuPage};
pub use mode_switch::{
    MODE_META_KEY, MODE_NONCE_ACTION, MODE_QUERY_PARAM, ModeSwitchOutcome, ModeSwitchParams,
    ModeSwitchService, PreferenceStore,
};
pub use modules::{ErpModule, ModuleRegistry};
