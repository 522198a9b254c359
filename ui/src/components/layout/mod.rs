//! Layout components: header navigation and the app shell.

mod app_shell;
mod header_nav;

pub use app_shell::AppShell;
pub use header_nav::{HeaderNav, HEAD_ROUTES};
