use crate::bookmarks::BookmarkStore;
use anyhow::{Context as _, Result};
use std::path::Path;
use util::ResultExt as _;

/// Loads the bookmark file, falling back to the seeded store (and writing it
/// back) when the file is missing or cannot be parsed. Repeated urls keep
/// their first entry and the file is rewritten without the others.
pub fn restore_bookmarks(path: &Path) -> BookmarkStore {
    if let Some(mut store) = read_bookmarks(path).warn_on_err() {
        let dropped = store.remove_duplicate_urls();
        if dropped > 0 {
            log::warn!(
                "[browser] dropped {dropped} duplicate bookmarks from {}",
                path.display()
            );
            save_bookmarks(path, &store).log_err();
        }
        return store;
    }

    log::info!(
        "[browser] recreating bookmark store at {}",
        path.display()
    );
    let store = BookmarkStore::seeded();
    save_bookmarks(path, &store).log_err();
    store
}

fn read_bookmarks(path: &Path) -> Result<BookmarkStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading bookmarks from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing bookmarks in {}", path.display()))
}

pub fn save_bookmarks(path: &Path, store: &BookmarkStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(store)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing bookmarks to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::Bookmark;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_seeded_and_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookmarks.json");

        let store = restore_bookmarks(&path);
        assert_eq!(store, BookmarkStore::seeded());
        assert!(path.exists());
        assert_eq!(read_bookmarks(&path).unwrap(), BookmarkStore::seeded());
    }

    #[test]
    fn corrupt_file_is_replaced_by_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(restore_bookmarks(&path), BookmarkStore::seeded());
        assert_eq!(read_bookmarks(&path).unwrap(), BookmarkStore::seeded());
    }

    #[test]
    fn reads_the_stored_collection_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(
            &path,
            indoc! {r#"
                [
                  {"url": "https://b.example", "title": "B"},
                  {"url": "https://a.example", "title": "A"}
                ]
            "#},
        )
        .unwrap();

        let store = restore_bookmarks(&path);
        assert_eq!(
            store.bookmarks(),
            [
                Bookmark::new("https://b.example", "B"),
                Bookmark::new("https://a.example", "A"),
            ]
        );
    }

    #[test]
    fn duplicate_urls_keep_their_first_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(
            &path,
            indoc! {r#"
                [
                  {"url": "https://a.example", "title": "A"},
                  {"url": "https://b.example", "title": "B"},
                  {"url": "https://a.example", "title": "A2"}
                ]
            "#},
        )
        .unwrap();

        let expected = [
            Bookmark::new("https://a.example", "A"),
            Bookmark::new("https://b.example", "B"),
        ];
        let store = restore_bookmarks(&path);
        assert_eq!(store.bookmarks(), expected);
        assert_eq!(read_bookmarks(&path).unwrap().bookmarks(), expected);
    }
}
