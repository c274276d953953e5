//! Operator console: command parsing, the stdin reader and the text dashboard.

mod command;
mod console_endpoint;
mod dashboard;


pub use command::ConsoleCommand;
pub(crate) use console_endpoint::ConsoleEndpoint;
pub use dashboard::{DashboardView, LogFeed};

#[cfg(test)]
pub use command::CommandParseError;
#[cfg(test)]
pub use dashboard::sparkline;
