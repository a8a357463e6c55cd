//! Seams to the host-provided components.
//!
//! The rendering engine and the native toolkit are supplied by the embedding
//! application. The shell talks to them only through these traits.

use crate::downloads::DownloadId;
use crate::events::{DownloadEventSender, EventSender};
use crate::voice::SpeechError;
use std::path::{Path, PathBuf};

pub trait WebEngine {
    /// Creates the view backing a new tab. Every callback of the view is
    /// reported through `events`.
    fn create_view(&mut self, events: EventSender) -> Box<dyn WebView>;
}

pub trait WebView {
    fn load(&mut self, url: &str);
    fn reload(&mut self);
}

/// The engine's handle on one transfer.
pub trait DownloadHandle: Send {
    /// Starts writing to `destination`. Progress and completion are reported
    /// on `events`, tagged with `id`, for as long as the transfer runs.
    fn accept(&mut self, id: DownloadId, destination: &Path, events: DownloadEventSender);
    fn cancel(&mut self);
}

/// Dialogs and devices owned by the native toolkit.
pub trait HostServices {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    /// Shows a save dialog. `None` means the user declined.
    fn choose_download_path(&mut self, suggested: &Path) -> Option<PathBuf>;
    fn show_message(&mut self, title: &str, message: &str);
    /// Records from the microphone and returns the transcript.
    fn capture_speech(&mut self) -> Result<String, SpeechError>;
}
