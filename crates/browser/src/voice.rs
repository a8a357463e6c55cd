//! Voice commands
//!
//! A transcript is lowercased and checked against an ordered rule table. The
//! first rule whose phrase occurs anywhere in the transcript wins, so a
//! transcript such as "go back to the previous tab" is a back navigation.

use crate::theme::Theme;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Listening timed out. Click the microphone and start speaking.")]
    Timeout,
    #[error("Sorry, I couldn't understand what you said.")]
    Unrecognized,
    #[error("The speech recognition service is unavailable: {0}")]
    Service(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    GoBack,
    GoForward,
    Reload,
    GoHome,
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    SetTheme(Theme),
    ToggleTheme,
    /// The requested theme is already active.
    AlreadyInTheme(Theme),
    Search(String),
    Open(String),
    ToggleBookmark,
    Unrecognized,
}

pub const HELP_MESSAGE: &str = "Sorry, I didn't recognize that command. Try saying \
\"go back\", \"refresh\", \"new tab\", \"close tab\", \"enable dark mode\", \
\"search for rust tutorials\", \"open github.com\" or \"bookmark this page\".";

#[derive(Clone, Copy)]
enum Intent {
    Back,
    Forward,
    Reload,
    Home,
    NewTab,
    CloseTab,
    NextTab,
    PreviousTab,
    Theme,
    ToggleTheme,
    SearchFor,
    OpenSite,
    Bookmark,
}

struct Rule {
    phrases: &'static [&'static str],
    intent: Intent,
}

const RULES: &[Rule] = &[
    // navigation
    Rule {
        phrases: &["go back", "previous page", "back"],
        intent: Intent::Back,
    },
    Rule {
        phrases: &["go forward", "next page", "forward"],
        intent: Intent::Forward,
    },
    Rule {
        phrases: &["reload", "refresh"],
        intent: Intent::Reload,
    },
    Rule {
        phrases: &["go home", "home page", "homepage", "home"],
        intent: Intent::Home,
    },
    // tabs
    Rule {
        phrases: &["new tab", "open tab", "open a tab"],
        intent: Intent::NewTab,
    },
    Rule {
        phrases: &["close tab", "close this tab", "close the tab"],
        intent: Intent::CloseTab,
    },
    Rule {
        phrases: &["next tab"],
        intent: Intent::NextTab,
    },
    Rule {
        phrases: &["previous tab", "last tab"],
        intent: Intent::PreviousTab,
    },
    // theme
    Rule {
        phrases: &["dark mode", "dark theme", "light mode", "light theme"],
        intent: Intent::Theme,
    },
    Rule {
        phrases: &["toggle theme", "switch theme", "change theme"],
        intent: Intent::ToggleTheme,
    },
    // search
    Rule {
        phrases: &["search for ", "look up ", "google ", "search "],
        intent: Intent::SearchFor,
    },
    Rule {
        phrases: &["go to ", "navigate to ", "open ", "visit "],
        intent: Intent::OpenSite,
    },
    // bookmarks
    Rule {
        phrases: &["bookmark", "save this page", "add to favorites"],
        intent: Intent::Bookmark,
    },
];

const NEGATIONS: &[&str] = &["disable", "turn off", "deactivate", "exit", "stop", " off"];

/// Maps a transcript to a command. `theme` is the window's current theme,
/// used to resolve requests for the theme that is already active.
pub fn interpret(transcript: &str, theme: Theme) -> VoiceCommand {
    let text = transcript.trim().to_lowercase();
    if text.is_empty() {
        return VoiceCommand::Unrecognized;
    }

    for rule in RULES {
        for phrase in rule.phrases {
            let Some(position) = text.find(phrase) else {
                continue;
            };
            let rest = &text[position + phrase.len()..];
            if let Some(command) = command_for(rule.intent, &text, rest, theme) {
                return command;
            }
        }
    }

    VoiceCommand::Unrecognized
}

fn command_for(intent: Intent, text: &str, rest: &str, theme: Theme) -> Option<VoiceCommand> {
    let command = match intent {
        Intent::Back => VoiceCommand::GoBack,
        Intent::Forward => VoiceCommand::GoForward,
        Intent::Reload => VoiceCommand::Reload,
        Intent::Home => VoiceCommand::GoHome,
        Intent::NewTab => VoiceCommand::NewTab,
        Intent::CloseTab => VoiceCommand::CloseTab,
        Intent::NextTab => VoiceCommand::NextTab,
        Intent::PreviousTab => VoiceCommand::PreviousTab,
        Intent::Theme => {
            let target = requested_theme(text);
            if target == theme {
                VoiceCommand::AlreadyInTheme(target)
            } else {
                VoiceCommand::SetTheme(target)
            }
        }
        Intent::ToggleTheme => VoiceCommand::ToggleTheme,
        Intent::SearchFor => VoiceCommand::Search(payload(rest)?),
        Intent::OpenSite => VoiceCommand::Open(payload(rest)?),
        Intent::Bookmark => VoiceCommand::ToggleBookmark,
    };
    Some(command)
}

/// Resolves which theme a transcript mentioning dark and/or light mode asks
/// for. The mode mentioned last is the target; a negation flips it.
fn requested_theme(text: &str) -> Theme {
    let dark = ["dark mode", "dark theme"]
        .iter()
        .filter_map(|phrase| text.rfind(phrase))
        .max();
    let light = ["light mode", "light theme"]
        .iter()
        .filter_map(|phrase| text.rfind(phrase))
        .max();

    let mentioned = match (dark, light) {
        (Some(dark), Some(light)) if light > dark => Theme::Light,
        (Some(_), _) => Theme::Dark,
        _ => Theme::Light,
    };
    let negated = dark.is_none() != light.is_none()
        && NEGATIONS.iter().any(|negation| text.contains(negation));

    if negated { mentioned.toggled() } else { mentioned }
}

fn payload(rest: &str) -> Option<String> {
    let payload = rest
        .trim()
        .trim_end_matches(['.', '!', '?', ','])
        .trim();
    (!payload.is_empty()).then(|| payload.to_string())
}

impl VoiceCommand {
    /// Message shown to the user after the command ran.
    pub fn feedback(&self) -> String {
        match self {
            VoiceCommand::GoBack => "Going back".into(),
            VoiceCommand::GoForward => "Going forward".into(),
            VoiceCommand::Reload => "Reloading the page".into(),
            VoiceCommand::GoHome => "Opening the home page".into(),
            VoiceCommand::NewTab => "Opened a new tab".into(),
            VoiceCommand::CloseTab => "Closed the tab".into(),
            VoiceCommand::NextTab => "Switched to the next tab".into(),
            VoiceCommand::PreviousTab => "Switched to the previous tab".into(),
            VoiceCommand::SetTheme(theme) => format!("Switched to {}", theme.label()),
            VoiceCommand::ToggleTheme => "Switched theme".into(),
            VoiceCommand::AlreadyInTheme(theme) => {
                format!("{} is already on", capitalize(theme.label()))
            }
            VoiceCommand::Search(query) => format!("Searching for \"{query}\""),
            VoiceCommand::Open(site) => format!("Opening {site}"),
            VoiceCommand::ToggleBookmark => "Updated bookmark for this page".into(),
            VoiceCommand::Unrecognized => HELP_MESSAGE.into(),
        }
    }

    /// Message shown instead of [`Self::feedback`] when the command had
    /// nothing to act on.
    pub fn failure_feedback(&self) -> String {
        match self {
            VoiceCommand::GoBack => "There is no page to go back to".into(),
            VoiceCommand::GoForward => "There is no page to go forward to".into(),
            VoiceCommand::CloseTab => "The last tab can't be closed".into(),
            VoiceCommand::NextTab | VoiceCommand::PreviousTab => {
                "There is no other tab to switch to".into()
            }
            VoiceCommand::ToggleBookmark => "This page can't be bookmarked".into(),
            VoiceCommand::SetTheme(theme) => {
                format!("{} is already on", capitalize(theme.label()))
            }
            VoiceCommand::Search(_) | VoiceCommand::Open(_) => "Nothing to open".into(),
            _ => "Nothing to do".into(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
