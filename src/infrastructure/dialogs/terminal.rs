//! Terminal dialog adapter
//!
//! Stands in for native dialogs on headless machines: prompts go to stderr,
//! answers are read from stdin. End of input always means "cancel".

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::application::ports::{
    DialogError, FileDialogs, FolderDialog, OpenFileDialog, SaveFileDialog,
};
use crate::domain::request::FileKind;

/// Answer that cancels a save prompt (an empty answer accepts the default)
pub const CANCEL_ANSWER: &str = "-";

/// Prompt-based dialogs on the controlling terminal
pub struct TerminalDialogs {
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalDialogs {
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    /// Print a prompt and read one line; `None` on end of input
    async fn ask(&self, prompt: &str) -> Result<Option<String>, DialogError> {
        eprint!("{} ", prompt);
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| DialogError::Unavailable(e.to_string()))?;

        if read == 0 {
            eprintln!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Default for TerminalDialogs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileDialogs for TerminalDialogs {
    async fn pick_file(&self, dialog: &OpenFileDialog) -> Result<Option<PathBuf>, DialogError> {
        let prompt = format!(
            "{} [{}] in {} (empty to cancel):",
            dialog.title,
            dialog.kind.extensions().join(", "),
            dialog.directory.display()
        );
        match self.ask(&prompt).await? {
            Some(answer) => interpret_open_answer(&answer, &dialog.directory, dialog.kind),
            None => Ok(None),
        }
    }

    async fn save_file(&self, dialog: &SaveFileDialog) -> Result<Option<PathBuf>, DialogError> {
        let prompt = format!(
            "{} [{}] ('{}' to cancel):",
            dialog.title,
            dialog.default_path().display(),
            CANCEL_ANSWER
        );
        Ok(self
            .ask(&prompt)
            .await?
            .and_then(|answer| interpret_save_answer(&answer, dialog)))
    }

    async fn pick_folder(&self, dialog: &FolderDialog) -> Result<Option<PathBuf>, DialogError> {
        let prompt = format!(
            "{} (currently {}, empty to keep):",
            dialog.title,
            dialog.directory.display()
        );
        match self.ask(&prompt).await? {
            Some(answer) => interpret_folder_answer(&answer, &dialog.directory),
            None => Ok(None),
        }
    }
}

/// Resolve an answer relative to the dialog's directory, folding `.` and `..`
fn resolve(answer: &str, base: &Path) -> PathBuf {
    let path = PathBuf::from(answer);
    let joined = if path.is_absolute() {
        path
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    resolved.push(component);
                }
            }
            other => resolved.push(other),
        }
    }
    resolved
}

fn interpret_open_answer(
    answer: &str,
    base: &Path,
    kind: FileKind,
) -> Result<Option<PathBuf>, DialogError> {
    if answer.is_empty() {
        return Ok(None);
    }

    let path = resolve(answer, base);
    if !path.is_file() {
        return Err(DialogError::InvalidSelection(format!(
            "{} is not a file",
            path.display()
        )));
    }
    if !kind.accepts(&path) {
        return Err(DialogError::InvalidSelection(format!(
            "{} is not one of: {}",
            path.display(),
            kind.extensions().join(", ")
        )));
    }
    Ok(Some(path))
}

fn interpret_save_answer(answer: &str, dialog: &SaveFileDialog) -> Option<PathBuf> {
    if answer == CANCEL_ANSWER {
        return None;
    }
    if answer.is_empty() {
        return Some(dialog.default_path());
    }

    let path = resolve(answer, &dialog.directory);
    if path.is_dir() {
        Some(path.join(&dialog.file_name))
    } else {
        Some(path)
    }
}

fn interpret_folder_answer(answer: &str, base: &Path) -> Result<Option<PathBuf>, DialogError> {
    if answer.is_empty() {
        return Ok(None);
    }

    let path = resolve(answer, base);
    if !path.is_dir() {
        return Err(DialogError::InvalidSelection(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn save_dialog(dir: &Path) -> SaveFileDialog {
        SaveFileDialog {
            title: "Save Memory Chunk".to_string(),
            directory: dir.to_path_buf(),
            file_name: "my_title.jsonl".to_string(),
        }
    }

    #[test]
    fn save_empty_accepts_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            interpret_save_answer("", &save_dialog(dir.path())),
            Some(dir.path().join("my_title.jsonl"))
        );
    }

    #[test]
    fn save_dash_cancels() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(interpret_save_answer("-", &save_dialog(dir.path())), None);
    }

    #[test]
    fn save_into_directory_keeps_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("exports");
        fs::create_dir(&sub).unwrap();
        assert_eq!(
            interpret_save_answer("exports", &save_dialog(dir.path())),
            Some(sub.join("my_title.jsonl"))
        );
    }

    #[test]
    fn save_relative_name() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            interpret_save_answer("other.jsonl", &save_dialog(dir.path())),
            Some(dir.path().join("other.jsonl"))
        );
    }

    #[test]
    fn open_checks_existence_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("talk.txt"), "hello").unwrap();
        fs::write(dir.path().join("talk.mp3"), "id3").unwrap();

        assert_eq!(
            interpret_open_answer("talk.txt", dir.path(), FileKind::Text).unwrap(),
            Some(dir.path().join("talk.txt"))
        );
        assert!(interpret_open_answer("talk.mp3", dir.path(), FileKind::Text).is_err());
        assert!(interpret_open_answer("missing.txt", dir.path(), FileKind::Text).is_err());
        assert_eq!(
            interpret_open_answer("", dir.path(), FileKind::Text).unwrap(),
            None
        );
    }

    #[test]
    fn folder_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(interpret_folder_answer("", dir.path()).unwrap(), None);
        assert_eq!(
            interpret_folder_answer(".", dir.path()).unwrap(),
            Some(dir.path().to_path_buf())
        );
        assert!(interpret_folder_answer("nope", dir.path()).is_err());
    }

    #[test]
    fn folder_answer_is_stored_without_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("exports");
        fs::create_dir(&sub).unwrap();

        assert_eq!(
            interpret_folder_answer("./exports/../exports/.", dir.path()).unwrap(),
            Some(sub.clone())
        );
        let absolute = format!("{}/./", sub.display());
        assert_eq!(
            interpret_folder_answer(&absolute, dir.path()).unwrap(),
            Some(sub)
        );
    }
}
