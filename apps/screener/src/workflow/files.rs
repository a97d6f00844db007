//! Pending-file buffer. Files are admitted by extension before they
//! ever reach the backend; rejected files are reported by name, never
//! silently dropped. The buffer is independent of the session stage.

use crate::client::ResumeFile;

/// Extensions the document parser accepts (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "txt"];

/// Outcome of admitting one batch. `rejected` holds the file names
/// that failed the allow-list, in batch order.
#[derive(Debug, Clone)]
pub struct Admission {
    pub admitted: usize,
    pub rejected: Vec<String>,
}

impl Admission {
    pub fn all_admitted(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct FileBuffer {
    files: Vec<ResumeFile>,
}

impl FileBuffer {
    /// Appends the batch's allowed files in order and reports the rest.
    pub fn admit(&mut self, batch: Vec<ResumeFile>) -> Admission {
        let mut admitted = 0;
        let mut rejected = Vec::new();
        for file in batch {
            if has_allowed_extension(&file.file_name) {
                self.files.push(file);
                admitted += 1;
            } else {
                rejected.push(file.file_name);
            }
        }
        Admission { admitted, rejected }
    }

    /// Drops one pending file; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.file_name.clone()).collect()
    }

    pub fn to_batch(&self) -> Vec<ResumeFile> {
        self.files.clone()
    }
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
