use browser::{HostServices, SpeechError};
use std::io::{self, BufRead as _, Write as _};
use std::path::{Path, PathBuf};

/// Dialogs rendered as prompts on stdin/stdout. Voice input is typed.
pub struct TerminalHost;

impl TerminalHost {
    fn prompt(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(error) => {
                log::error!("[adapta] failed to read stdin: {error}");
                None
            }
        }
    }
}

impl HostServices for TerminalHost {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let Some(answer) = self.prompt(&format!("{title}: {message} [y/N] ")) else {
            return false;
        };
        matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn choose_download_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        let answer = self.prompt(&format!(
            "Save as [{}] (enter to accept, \"-\" to cancel): ",
            suggested.display()
        ))?;
        match answer.as_str() {
            "" => Some(suggested.to_path_buf()),
            "-" => None,
            path => Some(PathBuf::from(path)),
        }
    }

    fn show_message(&mut self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }

    fn capture_speech(&mut self) -> Result<String, SpeechError> {
        match self.prompt("🎤 Listening... ") {
            None => Err(SpeechError::Timeout),
            Some(transcript) if transcript.is_empty() => Err(SpeechError::Unrecognized),
            Some(transcript) => Ok(transcript),
        }
    }
}
