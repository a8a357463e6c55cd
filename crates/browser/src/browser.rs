//! Adapta browser shell
//!
//! The window logic of a tabbed web browser: address bar classification,
//! per-tab history, bookmarks, downloads, the synthesized home page and voice
//! commands. Page rendering and native dialogs are supplied by the host
//! through the traits in [`engine`].

pub mod bookmarks;
mod browser_view;
pub mod downloads;
pub mod engine;
pub mod events;
pub mod navigation;
pub mod new_tab_page;
pub mod omnibox;
pub mod session;
pub mod settings;
pub mod tab;
pub mod theme;
pub mod voice;

#[cfg(test)]
mod test_support;

pub use bookmarks::{Bookmark, BookmarkStore, Bookmarks};
pub use browser_view::{
    Action, BrowserView, DownloadRow, SharedState, TabStripItem, ToolbarState,
};
pub use downloads::{DownloadId, DownloadRequest, DownloadStatus, TransferOutcome};
pub use engine::{DownloadHandle, HostServices, WebEngine, WebView};
pub use events::{BrowserEvent, DownloadEvent, DownloadEventSender, EventSender};
pub use new_tab_page::NewTabPage;
pub use settings::BrowserSettings;
pub use theme::Theme;
pub use voice::SpeechError;
