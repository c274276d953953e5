use crate::flight_control::MissionCommand;
use regex::Regex;
use std::{str::FromStr, sync::LazyLock};
use strum_macros::Display;

/// A line entered on the operator console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// A command forwarded to the flight simulation.
    Mission(MissionCommand),
    /// Prints the dashboard immediately.
    Status,
    /// Prints the full mission snapshot as JSON.
    Json,
    Help,
    Quit,
}

/// Errors raised while parsing a console line.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[strum(to_string = "empty command")]
    Empty,
    #[strum(to_string = "unknown command '{line}', type 'help' for a list of commands")]
    Unknown { line: String },
    #[strum(to_string = "throttle expects an integer percentage, got '{arg}'")]
    BadThrottle { arg: String },
}

impl std::error::Error for CommandParseError {}

/// Matches `<verb> [argument]`, case-insensitive and whitespace tolerant.
static COMMAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z-]+)(?:\s+(\S+))?\s*$").unwrap());

impl ConsoleCommand {
    pub const HELP: &'static str = "commands: arm | disarm | throttle <0-100> | initiate | \
        abort | reset | status | json | help | quit";

    fn parse_throttle(arg: Option<&str>) -> Result<Self, CommandParseError> {
        let raw = arg.unwrap_or_default();
        raw.trim_end_matches('%')
            .parse::<i64>()
            .map(|percent| ConsoleCommand::Mission(MissionCommand::SetThrottle(percent)))
            .map_err(|_| CommandParseError::BadThrottle { arg: raw.to_string() })
    }
}

impl FromStr for ConsoleCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line.trim().is_empty() {
            return Err(CommandParseError::Empty);
        }
        let unknown = || CommandParseError::Unknown { line: line.trim().to_string() };
        let captures = COMMAND_REGEX.captures(line).ok_or_else(unknown)?;
        let verb = captures.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let arg = captures.get(2).map(|m| m.as_str());

        let command = match (verb.as_str(), arg) {
            ("throttle" | "thr", _) => return Self::parse_throttle(arg),
            ("arm", None) => ConsoleCommand::Mission(MissionCommand::Arm(true)),
            ("disarm" | "safe", None) => ConsoleCommand::Mission(MissionCommand::Arm(false)),
            ("initiate" | "launch", None) => ConsoleCommand::Mission(MissionCommand::Initiate),
            ("abort", None) => ConsoleCommand::Mission(MissionCommand::Abort),
            ("reset", None) => ConsoleCommand::Mission(MissionCommand::Reset),
            ("status", None) => ConsoleCommand::Status,
            ("json", None) => ConsoleCommand::Json,
            ("help", None) => ConsoleCommand::Help,
            ("quit" | "exit", None) => ConsoleCommand::Quit,
            _ => return Err(unknown()),
        };
        Ok(command)
    }
}
