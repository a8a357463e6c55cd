use std::fmt::Debug;
use std::panic::Location;

pub trait ResultExt<E> {
    type Ok;

    fn log_err(self) -> Option<Self::Ok>;
    /// Like `log_err`, but only logs at warn level.
    fn warn_on_err(self) -> Option<Self::Ok>;
}

impl<T, E> ResultExt<E> for Result<T, E>
where
    E: Debug,
{
    type Ok = T;

    #[track_caller]
    fn log_err(self) -> Option<T> {
        self.log_with_level(log::Level::Error)
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        self.log_with_level(log::Level::Warn)
    }
}

trait LogWithLevel<T> {
    fn log_with_level(self, level: log::Level) -> Option<T>;
}

impl<T, E: Debug> LogWithLevel<T> for Result<T, E> {
    #[track_caller]
    fn log_with_level(self, level: log::Level) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = Location::caller();
                log::log!(
                    level,
                    "{}:{}: {:?}",
                    caller.file(),
                    caller.line(),
                    error
                );
                None
            }
        }
    }
}

/// Truncates `s` to at most `max_chars` characters, appending `...` when
/// anything was cut off.
pub fn truncate_and_trailoff(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &s[..byte_index]),
        None => s.to_string(),
    }
}

/// Strips the `http(s)://` scheme and a leading `www.` from a url.
pub fn strip_url_scheme(url: &str) -> &str {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped.strip_prefix("www.").unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate_and_trailoff("short", 20), "short");
        assert_eq!(
            truncate_and_trailoff("A very long page title indeed", 20),
            "A very long page tit..."
        );
        assert_eq!(truncate_and_trailoff("exactly20characters!", 20), "exactly20characters!");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_and_trailoff("ééééé", 2), "éé...");
    }

    #[test]
    fn strips_scheme_and_www() {
        assert_eq!(strip_url_scheme("https://www.github.com/rust"), "github.com/rust");
        assert_eq!(strip_url_scheme("http://example.com"), "example.com");
        assert_eq!(strip_url_scheme("file:///tmp/x"), "file:///tmp/x");
    }

    #[test]
    fn log_err_turns_errors_into_none() {
        let ok: Result<u32, anyhow::Error> = Ok(3);
        assert_eq!(ok.log_err(), Some(3));
        let err: Result<u32, anyhow::Error> = Err(anyhow::anyhow!("boom"));
        assert_eq!(err.warn_on_err(), None);
    }
}
