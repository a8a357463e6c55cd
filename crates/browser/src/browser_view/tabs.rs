use crate::omnibox;
use crate::tab::BrowserTab;

use super::{BrowserView, TabStripItem};

impl BrowserView {
    /// Opens a tab and activates it. Without `text` the tab shows the home
    /// page; otherwise `text` is handled like address bar input.
    pub(super) fn add_tab(&mut self, text: Option<&str>) -> bool {
        let tab = BrowserTab::new(self.engine.as_mut());
        self.tabs.push(tab);
        self.active_tab_index = self.tabs.len() - 1;
        log::debug!("[browser] opened tab {}", self.active_tab_index);

        let navigated = text.is_some_and(|text| self.navigate(text));
        if !navigated {
            self.go_home();
        }
        self.update_address_text();
        true
    }

    /// Closes the tab at `index`. The last tab stays open.
    pub(super) fn close_tab(&mut self, index: usize) -> bool {
        if self.tabs.len() <= 1 || index >= self.tabs.len() {
            return false;
        }

        self.tabs.remove(index);
        if index < self.active_tab_index || self.active_tab_index >= self.tabs.len() {
            self.active_tab_index -= 1;
        }
        self.update_address_text();
        true
    }

    pub(super) fn activate_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active_tab_index = index;
        self.update_address_text();
        true
    }

    pub(super) fn next_tab(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        self.activate_tab((self.active_tab_index + 1) % self.tabs.len())
    }

    pub(super) fn previous_tab(&mut self) -> bool {
        let count = self.tabs.len();
        if count <= 1 {
            return false;
        }
        self.activate_tab((self.active_tab_index + count - 1) % count)
    }

    pub(super) fn update_address_text(&mut self) {
        self.address_text = self
            .active_tab()
            .map(|tab| omnibox::display_url(tab.url()))
            .unwrap_or_default();
    }

    pub fn tab_strip_items(&self) -> Vec<TabStripItem> {
        let max_chars = self.shared.settings.tab_title_max_chars;
        self.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| TabStripItem {
                title: tab.display_title(max_chars),
                favicon_url: tab.favicon_url().map(ToString::to_string),
                is_active: index == self.active_tab_index,
            })
            .collect()
    }
}
