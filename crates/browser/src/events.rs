//! Engine events
//!
//! Callbacks from the embedded engine may fire on engine threads. Each tab
//! owns a channel for its page events; the engine side holds the sender and
//! the tab drains the receiver on the UI thread. Transfer callbacks outlive
//! the tab that started them, so they go to a channel owned by the window's
//! download tracker instead.

use crate::downloads::{DownloadId, DownloadRequest, TransferOutcome};
use std::sync::mpsc;

pub enum BrowserEvent {
    AddressChanged(String),
    TitleChanged(String),
    FaviconUrlChanged(Vec<String>),
    DownloadRequested(DownloadRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    Updated {
        id: DownloadId,
        received_bytes: i64,
        total_bytes: i64,
    },
    Finished {
        id: DownloadId,
        outcome: TransferOutcome,
    },
}

pub type EventSender = mpsc::Sender<BrowserEvent>;
pub type EventReceiver = mpsc::Receiver<BrowserEvent>;

pub type DownloadEventSender = mpsc::Sender<DownloadEvent>;
pub type DownloadEventReceiver = mpsc::Receiver<DownloadEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel()
}

pub fn download_event_channel() -> (DownloadEventSender, DownloadEventReceiver) {
    mpsc::channel()
}
