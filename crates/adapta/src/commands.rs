use anyhow::{Context as _, Result, anyhow, bail};
use browser::{Action, DownloadId, Theme};

pub const HELP: &str = "\
commands:
  open <text>             load a url or search from the address bar
  back | forward | reload | home
  tab new [text]          open a tab, showing the home page without text
  tab close [n]           close tab n (the active tab by default)
  tab <n> | tab next | tab prev
  bookmark                bookmark or unbookmark the active page
  theme [dark|light]      switch theme
  downloads               show or hide the downloads list
  cancel <n>              cancel download n
  voice                   type a voice command
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    Show,
    Help,
    Quit,
}

/// Parses one line of terminal input. Tab and download numbers are shown
/// and typed 1-based.
pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((line, ""));

    let action = match name {
        "" | "show" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "open" | "go" => {
            if rest.is_empty() {
                bail!("open needs a url or search text");
            }
            Action::Navigate(rest.to_string())
        }
        "back" => Action::GoBack,
        "forward" => Action::GoForward,
        "reload" => Action::Reload,
        "home" => Action::GoHome,
        "tab" => parse_tab(rest)?,
        "bookmark" => Action::ToggleBookmark,
        "theme" => match rest {
            "" => Action::ToggleTheme,
            "dark" => Action::SetTheme(Theme::Dark),
            "light" => Action::SetTheme(Theme::Light),
            other => bail!("unknown theme {other:?}"),
        },
        "downloads" => Action::ToggleDownloads,
        "cancel" => Action::CancelDownload(DownloadId::from_index(parse_number(rest)?)),
        "voice" => Action::ListenForVoiceCommand,
        other => return Err(anyhow!("unknown command {other:?}, try \"help\"")),
    };
    Ok(Command::Action(action))
}

fn parse_tab(rest: &str) -> Result<Action> {
    let (sub, argument) = rest
        .split_once(char::is_whitespace)
        .map(|(sub, argument)| (sub, argument.trim()))
        .unwrap_or((rest, ""));

    let action = match sub {
        "new" => Action::NewTab((!argument.is_empty()).then(|| argument.to_string())),
        "close" if argument.is_empty() => Action::CloseActiveTab,
        "close" => Action::CloseTab(parse_number(argument)?),
        "next" => Action::NextTab,
        "prev" | "previous" => Action::PreviousTab,
        number => Action::ActivateTab(parse_number(number)?),
    };
    Ok(action)
}

fn parse_number(text: &str) -> Result<usize> {
    let number: usize = text
        .parse()
        .with_context(|| format!("expected a number, got {text:?}"))?;
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("numbers start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(line: &str) -> Action {
        match parse(line).unwrap() {
            Command::Action(action) => action,
            other => panic!("expected an action for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn address_bar_text_is_passed_through() {
        assert_eq!(
            action("open  rust borrow checker "),
            Action::Navigate("rust borrow checker".into())
        );
        assert!(parse("open").is_err());
    }

    #[test]
    fn tab_commands_are_one_based() {
        assert_eq!(action("tab new"), Action::NewTab(None));
        assert_eq!(
            action("tab new docs.rs"),
            Action::NewTab(Some("docs.rs".into()))
        );
        assert_eq!(action("tab 2"), Action::ActivateTab(1));
        assert_eq!(action("tab close"), Action::CloseActiveTab);
        assert_eq!(action("tab close 1"), Action::CloseTab(0));
        assert_eq!(action("tab prev"), Action::PreviousTab);
        assert!(parse("tab 0").is_err());
        assert!(parse("tab close x").is_err());
    }

    #[test]
    fn theme_and_downloads() {
        assert_eq!(action("theme"), Action::ToggleTheme);
        assert_eq!(action("theme dark"), Action::SetTheme(Theme::Dark));
        assert!(parse("theme blue").is_err());
        assert_eq!(
            action("cancel 3"),
            Action::CancelDownload(DownloadId::from_index(2))
        );
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse("").unwrap(), Command::Show);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(parse("?").unwrap(), Command::Help);
        assert!(parse("fly").is_err());
    }
}
