use clap::ValueEnum;

use crate::modal::{ClickTarget, Key};
use crate::models::{SortKey, ViewMode};

pub const HELP: &str = "\
commands:
  search [text]       filter by name or id (empty clears)
  group [name]        filter by group (empty shows all)
  sort id|name|date   sort, repeating a key flips direction
  view primary|compact
  open <id>           show member detail
  close               dismiss the detail
  click backdrop|content|close
  esc | ctrl+1 | ctrl+2
  list | stats | groups | help | quit";

/// One line of input from the interactive browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Group(String),
    Sort(SortKey),
    View(ViewMode),
    Open(String),
    Close,
    Click(ClickTarget),
    Press(Key),
    List,
    Stats,
    Groups,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "search" | "/" => BrowseCommand::Search(rest.to_string()),
        "group" => BrowseCommand::Group(rest.to_string()),
        "sort" => BrowseCommand::Sort(SortKey::from_str(rest, true)?),
        "view" => BrowseCommand::View(ViewMode::from_str(rest, true)?),
        "open" if !rest.is_empty() => BrowseCommand::Open(rest.to_string()),
        "open" => return Err("open needs a member id".to_string()),
        "close" => BrowseCommand::Close,
        "click" => BrowseCommand::Click(match rest {
            "backdrop" => ClickTarget::Backdrop,
            "content" => ClickTarget::Content,
            "close" => ClickTarget::CloseButton,
            _ => return Err("click needs backdrop, content or close".to_string()),
        }),
        "esc" | "escape" => BrowseCommand::Press(Key::Escape),
        "ctrl+1" => BrowseCommand::Press(Key::Ctrl('1')),
        "ctrl+2" => BrowseCommand::Press(Key::Ctrl('2')),
        "" | "list" | "ls" => BrowseCommand::List,
        "stats" => BrowseCommand::Stats,
        "groups" => BrowseCommand::Groups,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(command)
}
