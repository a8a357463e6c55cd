//! Home page synthesis
//!
//! The home page is a local document rendered from `home.html` in the assets
//! directory. Placeholders are replaced with the clock, the date, the theme
//! class and the bookmark tiles, and the result is written to a temporary
//! file for the engine to load.

use crate::bookmarks::{Bookmark, BookmarkStore};
use crate::theme::Theme;
use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const TEMPLATE_FILE: &str = "home.html";
const STATIC_ASSETS: [&str; 2] = ["home.css", "home.js"];

pub struct NewTabPage {
    assets_dir: PathBuf,
    output_dir: PathBuf,
}

impl NewTabPage {
    pub fn new(assets_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_file(&self) -> PathBuf {
        paths::home_page_file(&self.output_dir)
    }

    /// Renders the page from the template, or the built-in page when the
    /// template cannot be read.
    pub fn render(&self, bookmarks: &BookmarkStore, theme: Theme, now: NaiveDateTime) -> String {
        let template_path = self.assets_dir.join(TEMPLATE_FILE);
        match std::fs::read_to_string(&template_path) {
            Ok(template) => render_template(&template, bookmarks, theme, now),
            Err(error) => {
                log::debug!(
                    "[browser] no home page template at {}: {}",
                    template_path.display(),
                    error
                );
                fallback_html(theme, now)
            }
        }
    }

    /// Writes the page and its static assets, returning the url to load. A
    /// missing asset only costs the page its styling, so asset failures are
    /// logged and the page is kept.
    pub fn write(
        &self,
        bookmarks: &BookmarkStore,
        theme: Theme,
        now: NaiveDateTime,
    ) -> Result<url::Url> {
        let html = self.render(bookmarks, theme, now);
        let home_file = self.output_file();

        if let Err(error) = self.write_page(&home_file, &html) {
            log::error!("[browser] error creating home page: {error:#}");
            std::fs::write(&home_file, fallback_html(theme, now))
                .with_context(|| format!("writing fallback home page {}", home_file.display()))?;
        }

        url::Url::from_file_path(&home_file)
            .map_err(|()| anyhow!("home page path {} is not absolute", home_file.display()))
    }

    fn write_page(&self, home_file: &Path, html: &str) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating {}", self.output_dir.display()))?;
        std::fs::write(home_file, html)
            .with_context(|| format!("writing {}", home_file.display()))?;

        for asset in STATIC_ASSETS {
            let source = self.assets_dir.join(asset);
            if !source.exists() {
                continue;
            }
            if let Err(error) = std::fs::copy(&source, self.output_dir.join(asset)) {
                log::warn!(
                    "[browser] failed to copy home page asset {}: {}",
                    source.display(),
                    error
                );
            }
        }
        Ok(())
    }
}

pub fn render_template(
    template: &str,
    bookmarks: &BookmarkStore,
    theme: Theme,
    now: NaiveDateTime,
) -> String {
    template
        .replace("{{current_time}}", &format_time(now))
        .replace("{{current_date}}", &format_date(now))
        .replace("{{theme_class}}", theme.css_class())
        .replace("{{bookmarks_html}}", &bookmarks_html(bookmarks))
}

pub fn bookmarks_html(bookmarks: &BookmarkStore) -> String {
    let mut html = String::new();
    for bookmark in bookmarks.bookmarks() {
        let title = bookmark.display_title();
        html.push_str(&format!(
            concat!(
                "\n<a class=\"bookmark-item\" href=\"{url}\">",
                "\n    <div class=\"bookmark-icon\">{icon}</div>",
                "\n    <div class=\"bookmark-name\">{name}</div>",
                "\n</a>",
            ),
            url = escape_html(&bookmark.url),
            icon = escape_html(&bookmark_icon(bookmark)),
            name = escape_html(&title),
        ));
    }
    html
}

fn bookmark_icon(bookmark: &Bookmark) -> String {
    bookmark
        .display_title()
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| String::from("★"))
}

pub fn fallback_html(theme: Theme, now: NaiveDateTime) -> String {
    let (background, text) = match theme {
        Theme::Dark => ("#1e1e1e", "#e0e0e0"),
        Theme::Light => ("#f5f5f7", "#1d1d1f"),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Adapta - Home</title>
    <style>
        body {{ background: {background}; color: {text}; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; text-align: center; padding: 60px 20px; }}
        .time {{ font-size: 4rem; font-weight: 300; margin-bottom: 10px; }}
        .search-box {{ width: 100%; max-width: 600px; padding: 16px 24px; font-size: 18px; border: 1px solid #ccc; border-radius: 50px; }}
    </style>
</head>
<body class="{theme_class}">
    <div class="time">{time}</div>
    <div class="date">{date}</div>
    <br><br>
    <input type="text" class="search-box" placeholder="Search or enter website URL" onkeypress="if(event.key==='Enter') window.location.href=this.value">
    <p>Welcome to Adapta Browser</p>
</body>
</html>
"#,
        theme_class = theme.css_class(),
        time = format_time(now),
        date = format_date(now),
    )
}

fn format_time(now: NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

fn format_date(now: NaiveDateTime) -> String {
    now.format("%A, %B %d").to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
