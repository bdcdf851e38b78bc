//! Input line parsing.
//!
//! Plain text searches for a city. Lines starting with `:` are commands.

use crate::events::DashboardEvent;

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct Command {
    /// Primary name, without the leading colon.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Argument placeholder shown in help, if any.
    pub argument: Option<&'static str>,
    pub description: &'static str,
}

impl Command {
    fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }

    /// e.g. `:open <n>`
    pub fn usage(&self) -> String {
        match self.argument {
            Some(arg) => format!(":{} <{}>", self.name, arg),
            None => format!(":{}", self.name),
        }
    }
}

/// Available commands.
pub const COMMANDS: &[Command] = &[
    Command {
        name: "units",
        aliases: &["u"],
        argument: None,
        description: "Toggle °C / °F",
    },
    Command {
        name: "fav",
        aliases: &["f"],
        argument: None,
        description: "Add or remove the current city from favorites",
    },
    Command {
        name: "open",
        aliases: &["o"],
        argument: Some("n"),
        description: "Show favorite number n",
    },
    Command {
        name: "here",
        aliases: &["loc"],
        argument: None,
        description: "Weather at your location",
    },
    Command {
        name: "refresh",
        aliases: &["r"],
        argument: None,
        description: "Fetch the current city again",
    },
    Command {
        name: "help",
        aliases: &["h", "?"],
        argument: None,
        description: "Show this help",
    },
    Command {
        name: "quit",
        aliases: &["q", "exit"],
        argument: None,
        description: "Exit Skycast",
    },
];

/// What an input line asks for
#[derive(Debug)]
pub enum Input {
    Dispatch(DashboardEvent),
    Help,
    /// Unusable input, with the reason to show
    Invalid(String),
    Empty,
}

pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Input::Dispatch(DashboardEvent::Search(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let word = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next();

    let Some(command) = COMMANDS.iter().find(|c| c.matches(&word)) else {
        return Input::Invalid(format!("Unknown command :{word} (try :help)"));
    };

    match command.name {
        "units" => Input::Dispatch(DashboardEvent::ToggleUnits),
        "fav" => Input::Dispatch(DashboardEvent::ToggleFavorite),
        "here" => Input::Dispatch(DashboardEvent::UseMyLocation),
        "refresh" => Input::Dispatch(DashboardEvent::Refresh),
        "quit" => Input::Dispatch(DashboardEvent::Quit),
        "open" => match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(n) if n >= 1 => Input::Dispatch(DashboardEvent::OpenFavorite(n - 1)),
            _ => Input::Invalid(format!("Usage: {}", command.usage())),
        },
        _ => Input::Help,
    }
}

pub fn help_text() -> String {
    let mut out = String::from("Type a city name to search, or:\n");
    for command in COMMANDS {
        out.push_str(&format!("  {:<12} {}\n", command.usage(), command.description));
    }
    out
}
