pub mod collection;
pub mod context;
pub mod editing;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod tui;

mod tui_shell;

pub use error::GistError;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
