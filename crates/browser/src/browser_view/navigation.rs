use crate::omnibox;
use crate::tab::BrowserTab;
use util::ResultExt as _;

use super::BrowserView;

impl BrowserView {
    /// Loads address bar text in the active tab. Returns `false` for blank
    /// input, which leaves the tab alone.
    pub(super) fn navigate(&mut self, text: &str) -> bool {
        let Some(url) = omnibox::text_to_url(text, &self.shared.settings.search_url) else {
            return false;
        };

        if omnibox::is_home_url(&url) {
            return self.go_home();
        }

        let Some(tab) = self.active_tab_mut() else {
            return false;
        };
        tab.navigate(&url);
        true
    }

    /// Regenerates the home page and loads it in the active tab.
    pub(super) fn go_home(&mut self) -> bool {
        let Some(url) = self.write_home_page() else {
            return false;
        };
        let Some(tab) = self.active_tab_mut() else {
            return false;
        };
        tab.navigate(url.as_str());
        true
    }

    pub(super) fn go_back(&mut self) -> bool {
        self.active_tab_mut().is_some_and(BrowserTab::go_back)
    }

    pub(super) fn go_forward(&mut self) -> bool {
        self.active_tab_mut().is_some_and(BrowserTab::go_forward)
    }

    pub(super) fn reload(&mut self) -> bool {
        let Some(tab) = self.active_tab_mut() else {
            return false;
        };
        tab.reload();
        true
    }

    /// Reloads every tab showing the home page, so it picks up the current
    /// theme and bookmarks.
    pub(super) fn refresh_home_tabs(&mut self) {
        if !self.tabs.iter().any(|tab| tab.is_home_page()) {
            return;
        }
        let Some(url) = self.write_home_page() else {
            return;
        };
        for tab in self.tabs.iter_mut().filter(|tab| tab.is_home_page()) {
            tab.navigate(url.as_str());
        }
    }

    fn write_home_page(&self) -> Option<url::Url> {
        let now = chrono::Local::now().naive_local();
        self.shared
            .new_tab_page
            .write(self.shared.bookmarks.store(), self.shared.theme, now)
            .log_err()
    }

    pub(super) fn handle_address_changed(&mut self, index: usize, url: &str) {
        if index == self.active_tab_index {
            self.address_text = omnibox::display_url(url);
        }
    }
}
