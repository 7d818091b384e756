//! `:` commands: parsing and execution.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit`, `q!`, `quit!` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `view <map\|list>` | Switch view |
//! | `from [year\|-]`, `to [year\|-]` | Set or clear the award-year bounds |
//! | `reset` | Clear every filter |
//! | `locate` | Ask for the user's position |
//! | `address <text>` | Centre the map on an address |
//! | `export <path>` | Write the filtered records as a JSON-LD `ItemList` |

use crate::{app::AppState, theme::Theme, widgets::view_bar::Status};
use mof_core::ViewMode;
use std::path::PathBuf;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    View(ViewMode),
    /// `None` clears the bound.
    YearFrom(Option<i32>),
    YearTo(Option<i32>),
    Reset,
    Locate,
    Address(String),
    Export(PathBuf),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close without
    /// acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "reset" => Ok(Command::Reset),
            "locate" => Ok(Command::Locate),
            "theme" if rest.is_empty() => Err("usage: theme <default|gruvbox>".to_string()),
            "theme" => Ok(Command::Theme(rest.to_string())),
            "view" => rest.parse().map(Command::View),
            "from" => parse_year(rest).map(Command::YearFrom),
            "to" => parse_year(rest).map(Command::YearTo),
            "address" if rest.is_empty() => Err("usage: address <text>".to_string()),
            "address" => Ok(Command::Address(rest.to_string())),
            "export" if rest.is_empty() => Err("usage: export <path>".to_string()),
            "export" => Ok(Command::Export(PathBuf::from(rest))),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_year(s: &str) -> Result<Option<i32>, String> {
    if s.is_empty() || s == "-" {
        return Ok(None);
    }
    s.parse::<i32>()
        .map(Some)
        .map_err(|_| format!("not a year: {s}"))
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message for the command bar when the command could not
/// be carried out.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::View(view) => s.set_view(view),
        Command::YearFrom(year) => s.apply(|store| store.set_year_min(year)),
        Command::YearTo(year) => s.apply(|store| store.set_year_max(year)),
        Command::Reset => s.reset_filters(),
        Command::Locate => s.request_location(),
        Command::Address(text) => s.request_address(text),
        Command::Export(path) => {
            let count = s.export(&path).map_err(|e| format!("export failed: {e}"))?;
            s.status = Some(Status::Info(format!(
                "exported {count} records to {}",
                path.display()
            )));
        }
    }
    Ok(())
}
