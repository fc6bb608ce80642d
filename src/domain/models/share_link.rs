use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareLink {
    pub id: Uuid,
    #[serde(rename = "folderId")]
    pub folder_id: Uuid,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Lifetime requested for a share link, written as `<days>d` (e.g. `7d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareDuration {
    days: u32,
}

impl ShareDuration {
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_suffix('d')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let days = digits.parse::<u32>().ok()?;
        Some(Self { days })
    }

    /// `None` when the deadline falls outside the representable calendar.
    pub fn expires_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        now.checked_add_signed(Duration::days(self.days as i64))
    }
}
