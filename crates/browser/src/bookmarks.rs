use crate::session;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use util::ResultExt as _;

const MAX_CHIP_TITLE_CHARS: usize = 20;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
}

impl Bookmark {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Title shown on bookmark chips and home page tiles.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            return util::strip_url_scheme(&self.url).to_string();
        }
        util::truncate_and_trailoff(&self.title, MAX_CHIP_TITLE_CHARS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkToggle {
    Added,
    Removed,
}

/// Ordered bookmarks, at most one per url.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct BookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// The store a fresh profile starts with.
    pub fn seeded() -> Self {
        Self {
            bookmarks: vec![Bookmark::new("https://www.google.com", "Google")],
        }
    }

    pub fn add_bookmark(&mut self, url: String, title: String) -> bool {
        if self.find_by_url(&url).is_some() {
            return false;
        }
        self.bookmarks.push(Bookmark { url, title });
        true
    }

    pub fn remove_bookmark(&mut self, url: &str) -> bool {
        let len = self.bookmarks.len();
        self.bookmarks.retain(|bookmark| bookmark.url != url);
        self.bookmarks.len() != len
    }

    pub fn toggle(&mut self, url: String, title: String) -> BookmarkToggle {
        if self.remove_bookmark(&url) {
            BookmarkToggle::Removed
        } else {
            self.bookmarks.push(Bookmark { url, title });
            BookmarkToggle::Added
        }
    }

    /// Drops every bookmark whose url appeared earlier in the store and
    /// returns how many were dropped.
    pub fn remove_duplicate_urls(&mut self) -> usize {
        let len = self.bookmarks.len();
        let mut seen = HashSet::new();
        self.bookmarks
            .retain(|bookmark| seen.insert(bookmark.url.clone()));
        len - self.bookmarks.len()
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|bookmark| bookmark.url == url)
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// The window's bookmark collection, written back to its file after every
/// mutation.
pub struct Bookmarks {
    store: BookmarkStore,
    path: PathBuf,
}

impl Bookmarks {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let store = session::restore_bookmarks(&path);
        Self { store, path }
    }

    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.store.find_by_url(url).is_some()
    }

    pub fn add_bookmark(&mut self, url: String, title: String) {
        if self.store.add_bookmark(url, title) {
            self.save();
        }
    }

    pub fn remove_bookmark(&mut self, url: &str) {
        if self.store.remove_bookmark(url) {
            self.save();
        }
    }

    pub fn toggle(&mut self, url: String, title: String) -> BookmarkToggle {
        let toggle = self.store.toggle(url, title);
        self.save();
        toggle
    }

    fn save(&self) {
        session::save_bookmarks(&self.path, &self.store).log_err();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_urls_are_not_added() {
        let mut store = BookmarkStore::default();
        assert!(store.add_bookmark("https://a.com".into(), "A".into()));
        assert!(!store.add_bookmark("https://a.com".into(), "Other".into()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.bookmarks()[0].title, "A");
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut store = BookmarkStore::seeded();
        let original = store.clone();

        let toggle = store.toggle("https://rust-lang.org".into(), "Rust".into());
        assert_eq!(toggle, BookmarkToggle::Added);
        assert_eq!(store.len(), 2);
        assert_eq!(store.bookmarks()[1], Bookmark::new("https://rust-lang.org", "Rust"));

        let toggle = store.toggle("https://rust-lang.org".into(), "Rust".into());
        assert_eq!(toggle, BookmarkToggle::Removed);
        assert_eq!(store, original);
    }

    #[test]
    fn display_title_truncates_and_falls_back_to_url() {
        let long = Bookmark::new("https://a.com", "An extraordinarily long title");
        assert_eq!(long.display_title(), "An extraordinarily l...");

        let untitled = Bookmark::new("https://www.github.com/rust-lang", "");
        assert_eq!(untitled.display_title(), "github.com/rust-lang");
    }

    #[test]
    fn toggling_twice_persists_each_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        let mut bookmarks = Bookmarks::load(&path);
        assert_eq!(bookmarks.store(), &BookmarkStore::seeded());

        bookmarks.toggle("https://docs.rs".into(), "Docs".into());
        assert_eq!(
            session::restore_bookmarks(&path).bookmarks(),
            [
                Bookmark::new("https://www.google.com", "Google"),
                Bookmark::new("https://docs.rs", "Docs"),
            ]
        );

        bookmarks.toggle("https://docs.rs".into(), "Docs".into());
        assert_eq!(session::restore_bookmarks(&path), BookmarkStore::seeded());
        assert!(!bookmarks.is_bookmarked("https://docs.rs"));
    }

    #[test]
    fn removing_missing_bookmark_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        let mut bookmarks = Bookmarks::load(&path);
        let before = std::fs::read_to_string(&path).unwrap();
        bookmarks.remove_bookmark("https://not-there.example");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
