use crate::engine::{HostServices, WebEngine, WebView};
use crate::events::{BrowserEvent, EventSender};
use crate::voice::SpeechError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

struct FakeViewState {
    loads: Vec<String>,
    reloads: usize,
    events: EventSender,
}

/// Engine whose views commit every load immediately. Views are numbered in
/// creation order.
#[derive(Clone, Default)]
pub(crate) struct FakeEngine {
    views: Rc<RefCell<Vec<FakeViewState>>>,
}

impl FakeEngine {
    pub fn view_count(&self) -> usize {
        self.views.borrow().len()
    }

    pub fn loads(&self, view: usize) -> Vec<String> {
        self.views.borrow()[view].loads.clone()
    }

    pub fn last_load(&self, view: usize) -> String {
        self.loads(view).last().cloned().unwrap_or_default()
    }

    pub fn reloads(&self, view: usize) -> usize {
        self.views.borrow()[view].reloads
    }

    /// Delivers an event as if the engine had fired it for `view`.
    pub fn send(&self, view: usize, event: BrowserEvent) {
        self.views.borrow()[view].events.send(event).unwrap();
    }
}

impl WebEngine for FakeEngine {
    fn create_view(&mut self, events: EventSender) -> Box<dyn WebView> {
        let mut views = self.views.borrow_mut();
        views.push(FakeViewState {
            loads: Vec::new(),
            reloads: 0,
            events,
        });
        Box::new(FakeView {
            index: views.len() - 1,
            views: self.views.clone(),
        })
    }
}

struct FakeView {
    index: usize,
    views: Rc<RefCell<Vec<FakeViewState>>>,
}

impl WebView for FakeView {
    fn load(&mut self, url: &str) {
        let mut views = self.views.borrow_mut();
        let view = &mut views[self.index];
        view.loads.push(url.to_string());
        view.events
            .send(BrowserEvent::AddressChanged(url.to_string()))
            .ok();
    }

    fn reload(&mut self) {
        self.views.borrow_mut()[self.index].reloads += 1;
    }
}

pub(crate) struct FakeHost {
    pub accept_downloads: bool,
    pub choose_path: bool,
    pub speech: VecDeque<Result<String, SpeechError>>,
    pub confirmations: Vec<String>,
    pub suggested_paths: Vec<PathBuf>,
    pub messages: Vec<String>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            accept_downloads: true,
            choose_path: true,
            speech: VecDeque::new(),
            confirmations: Vec::new(),
            suggested_paths: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn say(&mut self, transcript: &str) {
        self.speech.push_back(Ok(transcript.to_string()));
    }
}

impl HostServices for FakeHost {
    fn confirm(&mut self, _title: &str, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.accept_downloads
    }

    fn choose_download_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        self.suggested_paths.push(suggested.to_path_buf());
        self.choose_path.then(|| suggested.to_path_buf())
    }

    fn show_message(&mut self, _title: &str, message: &str) {
        self.messages.push(message.to_string());
    }

    fn capture_speech(&mut self) -> Result<String, SpeechError> {
        self.speech
            .pop_front()
            .unwrap_or(Err(SpeechError::Timeout))
    }
}
