pub mod form;
mod interface;
pub mod list;
pub mod session;
pub mod watch;

pub use interface::{ConsoleInterface, Report};
