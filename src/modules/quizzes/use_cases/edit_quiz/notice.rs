use crate::shared::core::primitives::Timestamp;
use chrono::TimeDelta;
use serde::Serialize;

/// How long a save or publish confirmation stays visible.
pub const NOTICE_TTL: TimeDelta = TimeDelta::seconds(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Timestamp,
}

impl Notice {
    pub fn success(message: impl Into<String>, raised_at: Timestamp) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            raised_at,
        }
    }

    pub fn error(message: impl Into<String>, raised_at: Timestamp) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            raised_at,
        }
    }

    pub fn is_visible_at(&self, at: Timestamp) -> bool {
        at < self.raised_at + NOTICE_TTL
    }
}
