use crate::engine::HostServices;
use crate::theme::Theme;

use super::{Action, BrowserView};

impl BrowserView {
    /// Performs `action`. Returns `false` when it had nothing to act on, such
    /// as going back at the start of history or closing the last tab.
    pub fn dispatch(&mut self, action: Action, host: &mut dyn HostServices) -> bool {
        log::debug!("[browser] dispatch {action:?}");
        match action {
            Action::Navigate(text) => self.navigate(&text),
            Action::GoBack => self.go_back(),
            Action::GoForward => self.go_forward(),
            Action::Reload => self.reload(),
            Action::GoHome => self.go_home(),
            Action::NewTab(text) => self.add_tab(text.as_deref()),
            Action::CloseTab(index) => self.close_tab(index),
            Action::CloseActiveTab => self.close_tab(self.active_tab_index),
            Action::ActivateTab(index) => self.activate_tab(index),
            Action::NextTab => self.next_tab(),
            Action::PreviousTab => self.previous_tab(),
            Action::ToggleBookmark => self.toggle_bookmark(),
            Action::ToggleTheme => self.set_theme(self.shared.theme.toggled()),
            Action::SetTheme(theme) => self.set_theme(theme),
            Action::ToggleDownloads => self.toggle_download_center(),
            Action::CancelDownload(id) => self.cancel_download(id),
            Action::ListenForVoiceCommand => {
                self.listen_for_voice_command(host);
                true
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) -> bool {
        if self.shared.theme == theme {
            return false;
        }
        log::info!("[browser] switching to {}", theme.label());
        self.shared.theme = theme;
        self.refresh_home_tabs();
        true
    }
}
