//! Download tracking
//!
//! Records are kept in the order transfers were accepted and are never removed
//! during a session. A record's position is its id.

use crate::engine::DownloadHandle;
use crate::events::{self, DownloadEvent, DownloadEventReceiver, DownloadEventSender};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownloadId(usize);

impl DownloadId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl DownloadStatus {
    pub fn is_terminal(self) -> bool {
        self != DownloadStatus::InProgress
    }
}

/// Terminal state reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    Interrupted,
    Cancelled,
}

impl From<TransferOutcome> for DownloadStatus {
    fn from(outcome: TransferOutcome) -> Self {
        match outcome {
            TransferOutcome::Completed => DownloadStatus::Completed,
            TransferOutcome::Interrupted => DownloadStatus::Failed,
            TransferOutcome::Cancelled => DownloadStatus::Cancelled,
        }
    }
}

/// A transfer the engine wants to start, awaiting the user's decision.
pub struct DownloadRequest {
    pub url: String,
    pub suggested_file_name: String,
    pub handle: Box<dyn DownloadHandle>,
}

impl DownloadRequest {
    pub fn file_name(&self) -> String {
        file_name_for_download(&self.suggested_file_name, &self.url)
    }
}

pub struct DownloadRecord {
    pub file_name: String,
    pub url: String,
    pub destination: PathBuf,
    pub status: DownloadStatus,
    pub progress: u8,
    pub received_bytes: i64,
    pub total_bytes: i64,
    handle: Box<dyn DownloadHandle>,
}

impl DownloadRecord {
    pub fn status_line(&self) -> String {
        match self.status {
            DownloadStatus::Completed => String::from("Complete"),
            DownloadStatus::Cancelled => String::from("Canceled"),
            DownloadStatus::Failed => String::from("Failed"),
            DownloadStatus::InProgress => {
                let received = format_download_size(self.received_bytes);
                let total = if self.total_bytes > 0 {
                    format_download_size(self.total_bytes)
                } else {
                    String::from("--")
                };
                format!("{}% ({received}/{total})", self.progress)
            }
        }
    }

    pub fn can_cancel(&self) -> bool {
        self.status == DownloadStatus::InProgress
    }
}

impl fmt::Debug for DownloadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadRecord")
            .field("file_name", &self.file_name)
            .field("url", &self.url)
            .field("destination", &self.destination)
            .field("status", &self.status)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

/// The window's downloads. Owns the channel every accepted transfer reports
/// on, so records keep updating after the tab that started them is closed.
pub struct DownloadTracker {
    records: Vec<DownloadRecord>,
    event_sender: DownloadEventSender,
    event_receiver: DownloadEventReceiver,
}

impl Default for DownloadTracker {
    fn default() -> Self {
        let (event_sender, event_receiver) = events::download_event_channel();
        Self {
            records: Vec::new(),
            event_sender,
            event_receiver,
        }
    }
}

impl DownloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every pending transfer callback.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                DownloadEvent::Updated {
                    id,
                    received_bytes,
                    total_bytes,
                } => self.update_progress(id, received_bytes, total_bytes),
                DownloadEvent::Finished { id, outcome } => self.finish(id, outcome),
            }
        }
    }

    /// Records an accepted transfer and tells the engine where to write it.
    pub fn start(&mut self, request: DownloadRequest, destination: PathBuf) -> DownloadId {
        let id = DownloadId(self.records.len());
        let file_name = destination
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToString::to_string)
            .unwrap_or_else(|| request.file_name());
        let DownloadRequest {
            url, mut handle, ..
        } = request;
        handle.accept(id, &destination, self.event_sender.clone());
        log::info!(
            "[browser] download {id} started: {url} -> {}",
            destination.display()
        );

        self.records.push(DownloadRecord {
            file_name,
            url,
            destination,
            status: DownloadStatus::InProgress,
            progress: 0,
            received_bytes: 0,
            total_bytes: 0,
            handle,
        });
        id
    }

    pub fn update_progress(&mut self, id: DownloadId, received_bytes: i64, total_bytes: i64) {
        let Some(record) = self.records.get_mut(id.0) else {
            log::debug!("[browser] progress for unknown download {id}");
            return;
        };
        if record.status.is_terminal() {
            return;
        }
        record.received_bytes = received_bytes;
        record.total_bytes = total_bytes;
        record.progress = progress_percent(received_bytes, total_bytes);
    }

    pub fn finish(&mut self, id: DownloadId, outcome: TransferOutcome) {
        let Some(record) = self.records.get_mut(id.0) else {
            log::debug!("[browser] completion for unknown download {id}");
            return;
        };
        if record.status.is_terminal() {
            return;
        }
        record.status = outcome.into();
        if record.status == DownloadStatus::Completed {
            record.progress = 100;
        }
        log::info!(
            "[browser] download {id} finished: {:?}",
            record.status
        );
    }

    /// Cancels an in-progress transfer. Returns whether anything changed.
    pub fn cancel(&mut self, id: DownloadId) -> bool {
        let Some(record) = self.records.get_mut(id.0) else {
            return false;
        };
        if !record.can_cancel() {
            return false;
        }
        record.handle.cancel();
        record.status = DownloadStatus::Cancelled;
        log::info!("[browser] download {id} cancelled by user");
        true
    }

    pub fn get(&self, id: DownloadId) -> Option<&DownloadRecord> {
        self.records.get(id.0)
    }

    pub fn records(&self) -> impl Iterator<Item = (DownloadId, &DownloadRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (DownloadId(index), record))
    }

    pub fn in_progress_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.status == DownloadStatus::InProgress)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn progress_percent(received_bytes: i64, total_bytes: i64) -> u8 {
    if total_bytes <= 0 || received_bytes <= 0 {
        return 0;
    }
    let percent = (received_bytes as i128 * 100) / total_bytes as i128;
    percent.clamp(0, 100) as u8
}

pub fn format_download_size(bytes: i64) -> String {
    let safe_bytes = bytes.max(0) as f64;
    if safe_bytes < 1024.0 {
        return format!("{} B", safe_bytes as i64);
    }
    if safe_bytes < 1024.0 * 1024.0 {
        return format!("{:.1} KB", safe_bytes / 1024.0);
    }
    if safe_bytes < 1024.0 * 1024.0 * 1024.0 {
        return format!("{:.1} MB", safe_bytes / (1024.0 * 1024.0));
    }
    format!("{:.1} GB", safe_bytes / (1024.0 * 1024.0 * 1024.0))
}

/// Picks the directory downloads are offered into.
pub fn default_download_directory(configured: Option<&Path>) -> PathBuf {
    if let Some(configured) = configured {
        if std::fs::create_dir_all(configured).is_ok() {
            return configured.to_path_buf();
        }
        log::warn!(
            "[browser] configured download directory {} is unusable",
            configured.display()
        );
    }

    let preferred = paths::downloads_dir();
    if std::fs::create_dir_all(&preferred).is_ok() {
        return preferred;
    }

    let fallback = paths::fallback_downloads_dir();
    if let Err(error) = std::fs::create_dir_all(&fallback) {
        log::warn!(
            "[browser] failed to create fallback download directory {}: {}",
            fallback.display(),
            error
        );
    }
    fallback
}

pub fn file_name_for_download(suggested_name: &str, url: &str) -> String {
    if !suggested_name.is_empty() {
        return suggested_name.to_string();
    }

    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(segment) = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
        {
            return segment.to_string();
        }
    }

    String::from("download")
}

/// Returns `directory/file_name`, or `stem (n).ext` if that already exists.
pub fn unique_download_path(directory: &Path, file_name: &str) -> PathBuf {
    let file_name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("download");

    let original_path = directory.join(file_name);
    if !original_path.exists() {
        return original_path;
    }

    let file_path = Path::new(file_name);
    let stem = file_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("download");
    let extension = file_path.extension().and_then(|ext| ext.to_str());

    let mut attempt = 1u32;
    loop {
        let candidate_file_name = if let Some(extension) = extension {
            format!("{stem} ({attempt}).{extension}")
        } else {
            format!("{stem} ({attempt})")
        };

        let candidate_path = directory.join(candidate_file_name);
        if !candidate_path.exists() {
            return candidate_path;
        }

        attempt += 1;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum HandleCall {
        Accepted(DownloadId, PathBuf),
        Cancelled,
    }

    pub(crate) struct RecordingHandle {
        calls: Arc<Mutex<Vec<HandleCall>>>,
        events: Arc<Mutex<Option<DownloadEventSender>>>,
    }

    impl DownloadHandle for RecordingHandle {
        fn accept(&mut self, id: DownloadId, destination: &Path, events: DownloadEventSender) {
            self.calls
                .lock()
                .push(HandleCall::Accepted(id, destination.to_path_buf()));
            *self.events.lock() = Some(events);
        }

        fn cancel(&mut self) {
            self.calls.lock().push(HandleCall::Cancelled);
        }
    }

    /// The test's side of a `RecordingHandle`.
    pub(crate) struct RecordedTransfer {
        calls: Arc<Mutex<Vec<HandleCall>>>,
        events: Arc<Mutex<Option<DownloadEventSender>>>,
    }

    impl RecordedTransfer {
        pub fn calls(&self) -> Vec<HandleCall> {
            self.calls.lock().clone()
        }

        /// Reports a callback the way the engine would once the transfer
        /// was accepted.
        pub fn report(&self, event: DownloadEvent) {
            self.events
                .lock()
                .as_ref()
                .expect("transfer was not accepted")
                .send(event)
                .unwrap();
        }
    }

    pub(crate) fn request(url: &str) -> (DownloadRequest, RecordedTransfer) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(None));
        let request = DownloadRequest {
            url: url.to_string(),
            suggested_file_name: String::new(),
            handle: Box::new(RecordingHandle {
                calls: calls.clone(),
                events: events.clone(),
            }),
        };
        (request, RecordedTransfer { calls, events })
    }

    #[test]
    fn zero_total_size_reports_zero_progress() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(4096, 0), 0);
        assert_eq!(progress_percent(10, -1), 0);
        assert_eq!(progress_percent(50, 200), 25);
        assert_eq!(progress_percent(300, 200), 100);
    }

    #[test]
    fn records_follow_progress_and_completion() {
        let mut tracker = DownloadTracker::new();
        let (request, transfer) = request("https://example.com/files/report.pdf");
        let id = tracker.start(request, PathBuf::from("/tmp/report.pdf"));
        assert_eq!(
            transfer.calls(),
            [HandleCall::Accepted(id, PathBuf::from("/tmp/report.pdf"))]
        );

        tracker.update_progress(id, 512 * 1024, 2 * 1024 * 1024);
        let record = tracker.get(id).unwrap();
        assert_eq!(record.file_name, "report.pdf");
        assert_eq!(record.progress, 25);
        assert_eq!(record.status_line(), "25% (512.0 KB/2.0 MB)");

        tracker.finish(id, TransferOutcome::Completed);
        let record = tracker.get(id).unwrap();
        assert_eq!(record.status, DownloadStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.status_line(), "Complete");
    }

    #[test]
    fn transfer_callbacks_arrive_on_the_tracker_channel() {
        let mut tracker = DownloadTracker::new();
        let (request, transfer) = request("https://example.com/disk.iso");
        let id = tracker.start(request, PathBuf::from("/tmp/disk.iso"));

        transfer.report(DownloadEvent::Updated {
            id,
            received_bytes: 3,
            total_bytes: 4,
        });
        assert_eq!(tracker.get(id).unwrap().progress, 0);

        tracker.drain_events();
        assert_eq!(tracker.get(id).unwrap().progress, 75);

        transfer.report(DownloadEvent::Finished {
            id,
            outcome: TransferOutcome::Interrupted,
        });
        tracker.drain_events();
        assert_eq!(tracker.get(id).unwrap().status, DownloadStatus::Failed);
    }

    #[test]
    fn unknown_total_is_shown_as_dashes() {
        let mut tracker = DownloadTracker::new();
        let (request, _) = request("https://example.com/stream");
        let id = tracker.start(request, PathBuf::from("/tmp/stream"));
        tracker.update_progress(id, 100, 0);
        assert_eq!(tracker.get(id).unwrap().status_line(), "0% (100 B/--)");
    }

    #[test]
    fn engine_terminal_states_map_to_statuses() {
        let mut tracker = DownloadTracker::new();
        let outcomes = [
            (TransferOutcome::Completed, DownloadStatus::Completed),
            (TransferOutcome::Interrupted, DownloadStatus::Failed),
            (TransferOutcome::Cancelled, DownloadStatus::Cancelled),
        ];
        for (outcome, expected) in outcomes {
            let (request, _) = request("https://example.com/a.zip");
            let id = tracker.start(request, PathBuf::from("/tmp/a.zip"));
            tracker.finish(id, outcome);
            assert_eq!(tracker.get(id).unwrap().status, expected);
        }
        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.in_progress_count(), 0);
    }

    #[test]
    fn cancel_only_applies_to_in_progress_records() {
        let mut tracker = DownloadTracker::new();
        let (request, transfer) = request("https://example.com/big.iso");
        let id = tracker.start(request, PathBuf::from("/tmp/big.iso"));

        assert!(tracker.cancel(id));
        assert_eq!(tracker.get(id).unwrap().status, DownloadStatus::Cancelled);
        assert_eq!(transfer.calls().last(), Some(&HandleCall::Cancelled));

        assert!(!tracker.cancel(id));
        tracker.finish(id, TransferOutcome::Completed);
        assert_eq!(tracker.get(id).unwrap().status, DownloadStatus::Cancelled);
        assert_eq!(transfer.calls().len(), 2);
    }

    #[test]
    fn records_keep_insertion_order() {
        let mut tracker = DownloadTracker::new();
        for name in ["one", "two", "three"] {
            let (request, _) = request(&format!("https://example.com/{name}"));
            tracker.start(request, PathBuf::from(format!("/tmp/{name}")));
        }
        let names: Vec<_> = tracker
            .records()
            .map(|(id, record)| (id.index(), record.file_name.clone()))
            .collect();
        assert_eq!(
            names,
            [(0, "one".to_string()), (1, "two".to_string()), (2, "three".to_string())]
        );
    }

    #[test]
    fn file_name_prefers_suggestion_then_url() {
        assert_eq!(file_name_for_download("notes.txt", "https://x.io/a.bin"), "notes.txt");
        assert_eq!(file_name_for_download("", "https://x.io/dir/a.bin"), "a.bin");
        assert_eq!(file_name_for_download("", "https://x.io/"), "download");
        assert_eq!(file_name_for_download("", "not a url"), "download");
    }

    #[test]
    fn unique_path_avoids_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_download_path(dir.path(), "photo.png");
        assert_eq!(first, dir.path().join("photo.png"));
        std::fs::write(&first, b"x").unwrap();

        let second = unique_download_path(dir.path(), "photo.png");
        assert_eq!(second, dir.path().join("photo (1).png"));
        std::fs::write(&second, b"x").unwrap();

        assert_eq!(
            unique_download_path(dir.path(), "photo.png"),
            dir.path().join("photo (2).png")
        );
        assert_eq!(
            unique_download_path(dir.path(), "../escape"),
            dir.path().join("escape")
        );
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_download_size(-5), "0 B");
        assert_eq!(format_download_size(1023), "1023 B");
        assert_eq!(format_download_size(1536), "1.5 KB");
        assert_eq!(format_download_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
