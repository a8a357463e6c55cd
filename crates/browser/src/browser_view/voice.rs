use crate::engine::HostServices;
use crate::omnibox::OmniboxInput;
use crate::voice::{self, VoiceCommand};

use super::{Action, BrowserView};

const VOICE_DIALOG_TITLE: &str = "Voice Command";

impl BrowserView {
    pub(super) fn listen_for_voice_command(&mut self, host: &mut dyn HostServices) {
        let transcript = match host.capture_speech() {
            Ok(transcript) => transcript,
            Err(error) => {
                log::info!("[browser] speech capture failed: {error}");
                host.show_message(VOICE_DIALOG_TITLE, &error.to_string());
                return;
            }
        };

        let command = voice::interpret(&transcript, self.shared.theme);
        log::info!("[browser] voice command {transcript:?} -> {command:?}");

        let applied = match self.action_for_command(&command) {
            Some(action) => self.dispatch(action, host),
            None => true,
        };
        let message = if applied {
            command.feedback()
        } else {
            command.failure_feedback()
        };
        host.show_message(VOICE_DIALOG_TITLE, &message);
    }

    fn action_for_command(&self, command: &VoiceCommand) -> Option<Action> {
        let action = match command {
            VoiceCommand::GoBack => Action::GoBack,
            VoiceCommand::GoForward => Action::GoForward,
            VoiceCommand::Reload => Action::Reload,
            VoiceCommand::GoHome => Action::GoHome,
            VoiceCommand::NewTab => Action::NewTab(None),
            VoiceCommand::CloseTab => Action::CloseActiveTab,
            VoiceCommand::NextTab => Action::NextTab,
            VoiceCommand::PreviousTab => Action::PreviousTab,
            VoiceCommand::SetTheme(theme) => Action::SetTheme(*theme),
            VoiceCommand::ToggleTheme => Action::ToggleTheme,
            VoiceCommand::Search(query) => Action::Navigate(
                OmniboxInput::SearchQuery(query.clone()).to_url(&self.shared.settings.search_url),
            ),
            VoiceCommand::Open(site) => Action::Navigate(site.clone()),
            VoiceCommand::ToggleBookmark => Action::ToggleBookmark,
            VoiceCommand::AlreadyInTheme(_) | VoiceCommand::Unrecognized => return None,
        };
        Some(action)
    }
}
