use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    kind: NoticeKind,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub message: String,
    pub kind: NoticeKind,
    pub remaining_ms: u64,
}

/// Transient banners. Each notice is handed out once and dropped unseen once
/// its display time has passed.
#[derive(Debug)]
pub struct NotificationQueue {
    ttl: Duration,
    pending: VecDeque<Notice>,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.push_at(Instant::now(), kind, message);
    }

    pub fn push_at(&mut self, now: Instant, kind: NoticeKind, message: impl Into<String>) {
        self.pending.retain(|notice| notice.expires_at > now);
        self.pending.push_back(Notice {
            message: message.into(),
            kind,
            expires_at: now + self.ttl,
        });
    }

    pub fn take_active(&mut self) -> Vec<NoticeView> {
        self.take_active_at(Instant::now())
    }

    pub fn take_active_at(&mut self, now: Instant) -> Vec<NoticeView> {
        self.pending
            .drain(..)
            .filter(|notice| notice.expires_at > now)
            .map(|notice| NoticeView {
                remaining_ms: (notice.expires_at - now).as_millis() as u64,
                message: notice.message,
                kind: notice.kind,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
