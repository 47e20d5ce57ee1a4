//! Directory posting sink.
//!
//! Writes every post to its own file so a thread can be reviewed or handed
//! to another tool before it goes live.

use crate::core::Chunk;
use crate::error::PublishError;
use crate::publish::PostingSink;
use std::fs;
use std::path::{Path, PathBuf};

/// Sink that writes each post to `<dir>/<prefix>_<order>.txt`.
///
/// The file holds the post text; when the post is a reply, the first line
/// is `in-reply-to: <id>` followed by a blank line. The remote id is the
/// file name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
}

impl DirectorySink {
    /// Creates a sink writing into `dir` (created if missing).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Delivery`] if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, PublishError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| PublishError::Delivery {
            reason: format!("{}: {e}", dir.display()),
        })?;
        Ok(Self {
            dir,
            prefix: "post".to_string(),
        })
    }

    /// Sets the file name prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PostingSink for DirectorySink {
    fn post(&mut self, chunk: &Chunk, in_reply_to: Option<&str>) -> Result<String, PublishError> {
        let file_name = format!("{}_{:03}.txt", self.prefix, chunk.order);
        let path = self.dir.join(&file_name);

        let mut body = String::new();
        if let Some(parent) = in_reply_to {
            body.push_str("in-reply-to: ");
            body.push_str(parent);
            body.push_str("\n\n");
        }
        body.push_str(&chunk.text);
        body.push('\n');

        fs::write(&path, body).map_err(|e| PublishError::Delivery {
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(file_name)
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_sink_writes_files() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path().join("out")).unwrap();

        let first = sink.post(&Chunk::new(1, "First post"), None).unwrap();
        let second = sink.post(&Chunk::new(2, "Second post"), Some(&first)).unwrap();
        assert_eq!(first, "post_001.txt");
        assert_eq!(second, "post_002.txt");

        let content = fs::read_to_string(sink.dir().join(&first)).unwrap();
        assert_eq!(content, "First post\n");
        let content = fs::read_to_string(sink.dir().join(&second)).unwrap();
        assert_eq!(content, "in-reply-to: post_001.txt\n\nSecond post\n");
    }

    #[test]
    fn test_directory_sink_prefix() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path()).unwrap().prefix("tweet");
        let id = sink.post(&Chunk::new(12, "x"), None).unwrap();
        assert_eq!(id, "tweet_012.txt");
        assert_eq!(sink.name(), "directory");
    }

    #[test]
    fn test_directory_sink_delivery_failure() {
        let temp = TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp.path()).unwrap();
        // A directory where the post file should go makes the write fail.
        fs::create_dir(temp.path().join("post_001.txt")).unwrap();
        let err = sink.post(&Chunk::new(1, "x"), None).unwrap_err();
        assert!(matches!(err, PublishError::Delivery { .. }));
    }
}
