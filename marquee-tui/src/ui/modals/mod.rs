mod auth;
mod confirm;
mod help;
mod utils;

pub use auth::{render_login_modal, render_register_modal};
pub use confirm::render_cancel_reservation_modal;
pub use help::render_help_modal;
