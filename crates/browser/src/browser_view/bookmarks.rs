use crate::bookmarks::BookmarkToggle;
use crate::tab::NEW_TAB_TITLE;

use super::BrowserView;

impl BrowserView {
    /// Adds or removes the active tab's location. The home page and blank
    /// tabs cannot be bookmarked.
    pub(super) fn toggle_bookmark(&mut self) -> bool {
        let Some(tab) = self.active_tab() else {
            return false;
        };
        let url = tab.url().to_string();
        if url.is_empty() || url == "about:blank" || tab.is_home_page() {
            return false;
        }

        let title = match tab.title() {
            "" | NEW_TAB_TITLE => util::strip_url_scheme(&url).to_string(),
            title => title.to_string(),
        };

        match self.shared.bookmarks.toggle(url.clone(), title) {
            BookmarkToggle::Added => log::info!("[browser] bookmarked {url}"),
            BookmarkToggle::Removed => log::info!("[browser] removed bookmark {url}"),
        }
        self.refresh_home_tabs();
        true
    }
}
