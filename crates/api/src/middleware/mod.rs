//! Request middleware.

pub mod auth;
pub mod mode_switch;

pub use auth::{Ctx, auth_middleware};
pub use mode_switch::mode_switch_middleware;
