//! Line-oriented terminal front end.
//!
//! Each screen is printed as text and each input line is parsed into an
//! [`AppAction`] for the screen currently shown. Parsing needs the rendered
//! screen because Home rows are addressed by their position.

use crate::reducer::{AddAction, AppAction, DetailAction, HomeAction};
use crate::view::{AddView, DetailView, HomeView, Screen};
use colored::Colorize;
use std::fmt::Write as _;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What an input line asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send an action to the store
    Dispatch(AppAction),
    /// Show the commands available on this screen
    Help,
    /// Leave the application
    Quit,
}

/// Input that does not map to a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("Empty input")]
    Empty,
    /// Not a command on this screen
    #[error("Unknown command {input:?} on {screen} (type 'help')")]
    Unknown {
        /// Screen name
        screen: &'static str,
        /// First word of the input
        input: String,
    },
    /// Row number outside the list
    #[error("No row {row} (the list has {len} rows)")]
    RowOutOfRange {
        /// Requested row, 1-based
        row: usize,
        /// Rows shown
        len: usize,
    },
}

/// Output styling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    /// Use terminal colors and attributes; otherwise fall back to `~~text~~`
    pub ansi: bool,
}

impl Style {
    /// Styled output
    pub const ANSI: Self = Self { ansi: true };
    /// Plain output
    pub const PLAIN: Self = Self { ansi: false };

    /// Picks the style for this terminal
    ///
    /// Styling needs both `enabled` and `colored`'s own check (`NO_COLOR`,
    /// `CLICOLOR`, whether stdout is a terminal), so that done items are
    /// never shown without any marking.
    #[must_use]
    pub fn detect(enabled: bool) -> Self {
        if enabled && colored::control::SHOULD_COLORIZE.should_colorize() {
            Self::ANSI
        } else {
            Self::PLAIN
        }
    }

    fn strike(self, text: &str, done: bool) -> String {
        match (done, self.ansi) {
            (false, _) => text.to_string(),
            (true, true) => text.strikethrough().dimmed().to_string(),
            (true, false) => format!("~~{text}~~"),
        }
    }

    fn bold(self, text: &str) -> String {
        if self.ansi {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

const fn screen_name(screen: &Screen) -> &'static str {
    match screen {
        Screen::Home(_) => "Home",
        Screen::Detail(_) => "Detail",
        Screen::Add(_) => "Add",
    }
}

/// Parses one input line for the screen currently shown
///
/// Text arguments (`title`, `description`) are taken verbatim after the
/// first space; a literal `\n` in a description becomes a line break.
///
/// # Errors
///
/// Returns [`ParseError`] if the line is empty, names no command available
/// on `screen`, or addresses a row that is not shown.
pub fn parse_command(screen: &Screen, line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let trimmed = line.trim_start();
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let word = word.to_ascii_lowercase();

    match word.as_str() {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" => return Ok(Command::Quit),
        _ => {},
    }

    let action = match screen {
        Screen::Home(view) => parse_home(view, &word)?,
        Screen::Detail(view) => parse_detail(view, &word),
        Screen::Add(_) => parse_add(&word, rest),
    };

    action.map(Command::Dispatch).ok_or(ParseError::Unknown {
        screen: screen_name(screen),
        input: word,
    })
}

fn parse_home(view: &HomeView, word: &str) -> Result<Option<AppAction>, ParseError> {
    if let Ok(row) = word.parse::<usize>() {
        let len = view.rows.len();
        let Some(selected) = row.checked_sub(1).and_then(|i| view.rows.get(i)) else {
            return Err(ParseError::RowOutOfRange { row, len });
        };
        return Ok(Some(AppAction::Home(HomeAction::RowTapped { id: selected.id })));
    }

    Ok(match word {
        "add" | "a" => Some(AppAction::Home(HomeAction::AddTapped)),
        _ => None,
    })
}

fn parse_detail(view: &DetailView, word: &str) -> Option<AppAction> {
    match (view, word) {
        (_, "back" | "b") => Some(AppAction::pop()),
        (DetailView::Found { .. }, "toggle" | "t") => {
            Some(AppAction::Detail(DetailAction::ToggleTapped))
        },
        (DetailView::Found { .. }, "delete" | "d") => {
            Some(AppAction::Detail(DetailAction::DeleteTapped))
        },
        _ => None,
    }
}

fn parse_add(word: &str, rest: &str) -> Option<AppAction> {
    match word {
        "title" => Some(AppAction::Add(AddAction::TitleChanged(rest.to_string()))),
        "description" | "desc" => Some(AppAction::Add(AddAction::DescriptionChanged(
            rest.replace("\\n", "\n"),
        ))),
        "submit" | "s" => Some(AppAction::Add(AddAction::SubmitTapped)),
        "cancel" | "c" | "back" | "b" => Some(AppAction::pop()),
        _ => None,
    }
}

/// Action to send before `screen` is shown, if any
///
/// A Detail screen whose record no longer exists is never shown; it pops
/// straight back to Home.
#[must_use]
pub fn auto_action(screen: &Screen) -> Option<AppAction> {
    match screen {
        Screen::Detail(DetailView::NotFound { id }) => {
            tracing::warn!(%id, "Detail shown for a missing todo, going back");
            Some(AppAction::pop())
        },
        _ => None,
    }
}

/// Reads one input line, without its line ending
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray byte costs one unknown command instead of the session.
/// Returns `None` at end of input.
///
/// # Errors
///
/// Returns any I/O error from `reader`.
pub async fn read_line<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    let line = match String::from_utf8(buf) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("Input line is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        },
    };
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Commands available on `screen`
#[must_use]
pub const fn help_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::Home(_) => "<n> open row n · add · help · quit",
        Screen::Detail(DetailView::Found { .. }) => "toggle · delete · back · help · quit",
        Screen::Detail(DetailView::NotFound { .. }) => "back · help · quit",
        Screen::Add(_) => {
            "title <text> · description <text> (\\n for a new line) · submit · cancel · help · quit"
        },
    }
}

/// Renders `screen` as terminal text
#[must_use]
pub fn render_text(screen: &Screen, style: Style) -> String {
    match screen {
        Screen::Home(view) => render_home(view, style),
        Screen::Detail(view) => render_detail(view, style),
        Screen::Add(view) => render_add(view, style),
    }
}

fn render_home(view: &HomeView, style: Style) -> String {
    let mut out = format!("{}  [{}]\n", style.bold("Home"), view.header_action);
    if view.rows.is_empty() {
        out.push_str("  (no todos yet)\n");
    }
    for (i, row) in view.rows.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}  >", i + 1, style.strike(&row.title, row.done));
    }
    out
}

fn render_detail(view: &DetailView, style: Style) -> String {
    match view {
        DetailView::Found {
            title,
            description,
            done,
            toggle_label,
            delete_label,
            ..
        } => {
            let mut out = format!("{}\n", style.bold(&style.strike(title, *done)));
            for line in description.lines() {
                let _ = writeln!(out, "  {}", style.strike(line, *done));
            }
            let _ = writeln!(out, "[{toggle_label}]  [{delete_label}]");
            out
        },
        DetailView::NotFound { id } => format!("Todo {id} no longer exists\n"),
    }
}

fn render_add(view: &AddView, style: Style) -> String {
    let field = |value: &str, placeholder: &str| {
        if value.is_empty() {
            format!("<{placeholder}>")
        } else {
            value.to_string()
        }
    };

    let mut out = String::from("┌─ New todo ─\n");
    let _ = writeln!(out, "│ {}", style.bold(&field(&view.title, view.title_placeholder)));
    for line in field(&view.description, view.description_placeholder).lines() {
        let _ = writeln!(out, "│ {line}");
    }
    let _ = writeln!(out, "│ [{}]", view.submit_label);
    out.push_str("└─\n");
    out
}
