mod actions;
mod bookmarks;
mod downloads;
mod navigation;
mod tabs;
mod voice;


use crate::bookmarks::Bookmarks;
use crate::downloads::{DownloadId, DownloadTracker};
use crate::engine::{HostServices, WebEngine};
use crate::new_tab_page::NewTabPage;
use crate::settings::BrowserSettings;
use crate::tab::{BrowserTab, TabEvent};
use crate::theme::Theme;

/// Everything the toolbar, tab strip and voice input can ask the window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Text typed into the address bar.
    Navigate(String),
    GoBack,
    GoForward,
    Reload,
    GoHome,
    NewTab(Option<String>),
    CloseTab(usize),
    CloseActiveTab,
    ActivateTab(usize),
    NextTab,
    PreviousTab,
    ToggleBookmark,
    ToggleTheme,
    SetTheme(Theme),
    ToggleDownloads,
    CancelDownload(DownloadId),
    ListenForVoiceCommand,
}

/// State shared by every tab of the window.
pub struct SharedState {
    pub settings: BrowserSettings,
    pub bookmarks: Bookmarks,
    pub downloads: DownloadTracker,
    pub new_tab_page: NewTabPage,
    pub theme: Theme,
}

impl SharedState {
    pub fn new(settings: BrowserSettings, bookmarks: Bookmarks, new_tab_page: NewTabPage) -> Self {
        let theme = Theme::from_dark_mode(settings.dark_mode);
        Self {
            settings,
            bookmarks,
            downloads: DownloadTracker::new(),
            new_tab_page,
            theme,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub address_text: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_bookmarked: bool,
    pub bookmark_glyph: &'static str,
    pub theme_glyph: &'static str,
    pub theme_tooltip: &'static str,
    pub downloads_visible: bool,
    pub downloads_in_progress: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStripItem {
    pub title: String,
    pub favicon_url: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRow {
    pub id: DownloadId,
    pub file_name: String,
    pub status_line: String,
    pub progress: u8,
    pub can_cancel: bool,
}

/// The browser window: tabs over one shared state.
pub struct BrowserView {
    engine: Box<dyn WebEngine>,
    shared: SharedState,
    tabs: Vec<BrowserTab>,
    active_tab_index: usize,
    address_text: String,
    download_center_visible: bool,
}

impl BrowserView {
    /// Creates the window with a single tab showing the home page.
    pub fn new(engine: Box<dyn WebEngine>, shared: SharedState) -> Self {
        let mut this = Self {
            engine,
            shared,
            tabs: Vec::new(),
            active_tab_index: 0,
            address_text: String::new(),
            download_center_visible: false,
        };
        this.add_tab(None);
        this
    }

    /// Drains the engine events of every tab, then the transfer callbacks.
    /// Called by the host's event loop on the UI thread.
    pub fn pump_events(&mut self, host: &mut dyn HostServices) {
        for index in 0..self.tabs.len() {
            let events = self.tabs[index].drain_events();
            for event in events {
                self.handle_tab_event(index, event, host);
            }
        }
        self.shared.downloads.drain_events();
    }

    fn handle_tab_event(&mut self, index: usize, event: TabEvent, host: &mut dyn HostServices) {
        match event {
            TabEvent::AddressChanged(url) => self.handle_address_changed(index, &url),
            TabEvent::TitleChanged(title) => {
                log::trace!("[browser] tab {index} title: {title}");
            }
            TabEvent::FaviconChanged(_) => {}
            TabEvent::DownloadRequested(request) => self.handle_download_request(request, host),
        }
    }

    fn active_tab(&self) -> Option<&BrowserTab> {
        self.tabs.get(self.active_tab_index)
    }

    fn active_tab_mut(&mut self) -> Option<&mut BrowserTab> {
        self.tabs.get_mut(self.active_tab_index)
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn theme(&self) -> Theme {
        self.shared.theme
    }

    pub fn tabs(&self) -> &[BrowserTab] {
        &self.tabs
    }

    pub fn active_tab_index(&self) -> usize {
        self.active_tab_index
    }

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        let tab = self.active_tab();
        let is_bookmarked = tab
            .is_some_and(|tab| self.shared.bookmarks.is_bookmarked(tab.url()));
        ToolbarState {
            address_text: self.address_text.clone(),
            can_go_back: tab.is_some_and(BrowserTab::can_go_back),
            can_go_forward: tab.is_some_and(BrowserTab::can_go_forward),
            is_bookmarked,
            bookmark_glyph: if is_bookmarked { "★" } else { "☆" },
            theme_glyph: self.shared.theme.toggle_glyph(),
            theme_tooltip: self.shared.theme.toggle_tooltip(),
            downloads_visible: self.download_center_visible,
            downloads_in_progress: self.shared.downloads.in_progress_count(),
        }
    }
}
