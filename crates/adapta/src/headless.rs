//! Headless engine
//!
//! Stands in for a rendering engine when the shell runs in a terminal. Loads
//! commit immediately; locations that name a downloadable file turn into a
//! download request whose transfer is simulated on a worker thread.

use browser::{
    BrowserEvent, DownloadEvent, DownloadEventSender, DownloadHandle, DownloadId,
    DownloadRequest, EventSender, TransferOutcome, WebEngine, WebView, omnibox,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const DOWNLOAD_EXTENSIONS: &[&str] = &["zip", "pdf", "tar", "gz", "dmg", "exe", "iso", "deb"];
const SIMULATED_SIZE: i64 = 4 * 1024 * 1024;
const SIMULATED_CHUNKS: i64 = 8;

pub struct HeadlessEngine;

impl WebEngine for HeadlessEngine {
    fn create_view(&mut self, events: EventSender) -> Box<dyn WebView> {
        Box::new(HeadlessView {
            events,
            current_url: None,
        })
    }
}

struct HeadlessView {
    events: EventSender,
    current_url: Option<String>,
}

impl HeadlessView {
    fn emit(&self, event: BrowserEvent) {
        if self.events.send(event).is_err() {
            log::debug!("[headless] tab closed, dropping event");
        }
    }

    fn commit(&mut self, url: &str) {
        self.current_url = Some(url.to_string());
        self.emit(BrowserEvent::AddressChanged(url.to_string()));
        self.emit(BrowserEvent::TitleChanged(page_title(url)));
        if let Some(favicon) = favicon_url(url) {
            self.emit(BrowserEvent::FaviconUrlChanged(vec![favicon]));
        }
    }
}

impl WebView for HeadlessView {
    fn load(&mut self, url: &str) {
        if is_download(url) {
            self.emit(BrowserEvent::DownloadRequested(DownloadRequest {
                url: url.to_string(),
                suggested_file_name: String::new(),
                handle: Box::new(SimulatedDownload {
                    cancelled: Arc::new(AtomicBool::new(false)),
                }),
            }));
            return;
        }
        self.commit(url);
    }

    fn reload(&mut self) {
        if let Some(url) = self.current_url.clone() {
            self.commit(&url);
        }
    }
}

struct SimulatedDownload {
    cancelled: Arc<AtomicBool>,
}

impl DownloadHandle for SimulatedDownload {
    fn accept(&mut self, id: DownloadId, destination: &Path, events: DownloadEventSender) {
        let cancelled = self.cancelled.clone();
        let destination = destination.to_path_buf();
        thread::spawn(move || transfer(id, destination, events, cancelled));
    }

    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

fn transfer(
    id: DownloadId,
    destination: PathBuf,
    events: DownloadEventSender,
    cancelled: Arc<AtomicBool>,
) {
    let report = |event: DownloadEvent| {
        let sent = events.send(event).is_ok();
        if !sent {
            log::warn!("[headless] window closed, abandoning download {}", id.index());
        }
        sent
    };

    let chunk = SIMULATED_SIZE / SIMULATED_CHUNKS;
    for step in 1..=SIMULATED_CHUNKS {
        thread::sleep(Duration::from_millis(250));
        if cancelled.load(Ordering::SeqCst) {
            report(DownloadEvent::Finished {
                id,
                outcome: TransferOutcome::Cancelled,
            });
            return;
        }
        let update = DownloadEvent::Updated {
            id,
            received_bytes: chunk * step,
            total_bytes: SIMULATED_SIZE,
        };
        if !report(update) {
            return;
        }
    }

    let outcome = match std::fs::write(&destination, b"") {
        Ok(()) => TransferOutcome::Completed,
        Err(error) => {
            log::error!(
                "[headless] failed to write {}: {}",
                destination.display(),
                error
            );
            TransferOutcome::Interrupted
        }
    };
    report(DownloadEvent::Finished { id, outcome });
}

fn is_download(url: &str) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };
    if parsed.scheme() == "file" {
        return false;
    }
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(_, extension)| {
            DOWNLOAD_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
        })
}

fn page_title(url: &str) -> String {
    if omnibox::is_home_url(url) {
        return String::from("Adapta - Home");
    }
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(ToString::to_string))
        .unwrap_or_else(|| util::strip_url_scheme(url).to_string())
}

fn favicon_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.join("/favicon.ico").ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_links_become_downloads() {
        assert!(is_download("https://example.com/files/archive.ZIP"));
        assert!(is_download("https://example.com/report.pdf?version=2"));
        assert!(!is_download("https://example.com/index.html"));
        assert!(!is_download("https://example.com/"));
        assert!(!is_download("file:///tmp/notes.pdf"));
        assert!(!is_download("not a url"));
    }

    #[test]
    fn titles_and_icons_come_from_the_host() {
        assert_eq!(page_title("https://www.rust-lang.org/learn"), "www.rust-lang.org");
        assert_eq!(page_title("file:///tmp/adapta_home.html"), "Adapta - Home");
        assert_eq!(
            favicon_url("https://docs.rs/serde/latest").as_deref(),
            Some("https://docs.rs/favicon.ico")
        );
        assert_eq!(favicon_url("about:blank"), None);
    }

    #[test]
    fn loads_commit_through_the_event_channel() {
        let (sender, receiver) = browser::events::event_channel();
        let mut view = HeadlessEngine.create_view(sender);
        view.load("https://example.com");

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            BrowserEvent::AddressChanged(url) if url == "https://example.com"
        ));
        assert!(matches!(
            &events[1],
            BrowserEvent::TitleChanged(title) if title == "example.com"
        ));
    }

    #[test]
    fn transfers_report_on_the_download_channel() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("archive.zip");
        let (sender, receiver) = browser::events::download_event_channel();
        let id = DownloadId::from_index(0);

        transfer(id, destination.clone(), sender, Arc::new(AtomicBool::new(false)));

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len() as i64, SIMULATED_CHUNKS + 1);
        assert_eq!(
            events.last(),
            Some(&DownloadEvent::Finished {
                id,
                outcome: TransferOutcome::Completed,
            })
        );
        assert!(destination.exists());
    }
}
