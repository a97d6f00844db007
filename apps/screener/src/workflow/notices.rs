//! Transient user-facing messages. Error and success are independent
//! channels — both can be live at once (e.g. "2 resumes uploaded" next
//! to a list of per-file failures). Each notice expires on its own
//! after a fixed interval; expiry is evaluated lazily when a notice is
//! read, so no background timer is involved.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    error: Option<Notice>,
    success: Option<Notice>,
}

impl Notices {
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.error = Some(Notice {
            text: text.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    pub fn show_success(&mut self, text: impl Into<String>) {
        self.success = Some(Notice {
            text: text.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    pub fn error(&self) -> Option<&str> {
        self.error_at(Instant::now())
    }

    pub fn success(&self) -> Option<&str> {
        self.success_at(Instant::now())
    }

    fn error_at(&self, now: Instant) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|n| n.expires_at > now)
            .map(|n| n.text.as_str())
    }

    fn success_at(&self, now: Instant) -> Option<&str> {
        self.success
            .as_ref()
            .filter(|n| n.expires_at > now)
            .map(|n| n.text.as_str())
    }
}
