//! Browser tab
//!
//! Wraps one engine view. Owns the tab's navigation history and drains the
//! view's event channel, turning engine callbacks into `TabEvent`s for the
//! window.

use crate::downloads::DownloadRequest;
use crate::engine::{WebEngine, WebView};
use crate::events::{self, BrowserEvent, EventReceiver};
use crate::navigation::NavigationHistory;
use crate::omnibox;

pub const NEW_TAB_TITLE: &str = "New Tab";

/// Events emitted by BrowserTab to the window (toolbar, tab strip, download prompt).
pub enum TabEvent {
    AddressChanged(String),
    TitleChanged(String),
    FaviconChanged(Option<String>),
    DownloadRequested(DownloadRequest),
}

pub struct BrowserTab {
    view: Box<dyn WebView>,
    event_receiver: EventReceiver,
    history: NavigationHistory,
    url: String,
    title: String,
    favicon_url: Option<String>,
}

impl BrowserTab {
    pub fn new(engine: &mut dyn WebEngine) -> Self {
        let (sender, receiver) = events::event_channel();
        let view = engine.create_view(sender);

        Self {
            view,
            event_receiver: receiver,
            history: NavigationHistory::new(),
            url: String::from("about:blank"),
            title: String::from(NEW_TAB_TITLE),
            favicon_url: None,
        }
    }

    /// Applies every pending engine event to the tab and returns them.
    pub fn drain_events(&mut self) -> Vec<TabEvent> {
        let mut emitted = Vec::new();
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                BrowserEvent::AddressChanged(url) => {
                    self.url.clone_from(&url);
                    self.history.record(&url);
                    emitted.push(TabEvent::AddressChanged(url));
                }
                BrowserEvent::TitleChanged(title) => {
                    self.title = if title.is_empty() {
                        String::from(NEW_TAB_TITLE)
                    } else {
                        title
                    };
                    emitted.push(TabEvent::TitleChanged(self.title.clone()));
                }
                BrowserEvent::FaviconUrlChanged(urls) => {
                    self.favicon_url = urls.into_iter().next();
                    emitted.push(TabEvent::FaviconChanged(self.favicon_url.clone()));
                }
                BrowserEvent::DownloadRequested(request) => {
                    emitted.push(TabEvent::DownloadRequested(request));
                }
            }
        }
        emitted
    }

    pub fn navigate(&mut self, url: &str) {
        log::debug!("[browser] loading {url}");
        self.view.load(url);
    }

    pub fn reload(&mut self) {
        self.view.reload();
    }

    pub fn go_back(&mut self) -> bool {
        let Some(url) = self.history.go_back() else {
            return false;
        };
        self.view.load(url);
        true
    }

    pub fn go_forward(&mut self) -> bool {
        let Some(url) = self.history.go_forward() else {
            return false;
        };
        self.view.load(url);
        true
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for the tab strip, cut to `max_chars`.
    pub fn display_title(&self, max_chars: usize) -> String {
        util::truncate_and_trailoff(&self.title, max_chars)
    }

    pub fn favicon_url(&self) -> Option<&str> {
        self.favicon_url.as_deref()
    }

    pub fn is_home_page(&self) -> bool {
        omnibox::is_home_url(&self.url)
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }
}
