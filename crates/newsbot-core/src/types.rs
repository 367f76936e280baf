//! Broadcast data model — groups, scheduled broadcasts and dashboard views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NewsBotError;

/// An audience segment that broadcasts are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable identifier, unique within the registry.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Subscriber count. Informational only.
    pub count: u32,
    /// Display color tag, e.g. `#6366f1`.
    pub color: String,
}

impl Group {
    pub fn new(id: &str, name: &str, count: u32, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            count,
            color: color.to_string(),
        }
    }

    /// Share of `total` subscribers this group holds, in percent (0.0 when `total` is zero).
    pub fn share_of(&self, total: u32) -> f64 {
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count) / f64::from(total) * 100.0
    }
}

/// Delivery lifecycle of a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Pending,
    Sent,
}

impl BroadcastStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
        }
    }

    /// Label shown in the schedule view.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Ожидает",
            Self::Sent => "Отправлено",
        }
    }
}

impl fmt::Display for BroadcastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message addressed to a group for delivery at a given time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledBroadcast {
    pub id: String,
    /// Message body.
    pub text: String,
    /// Display name of the target group, copied at creation time.
    pub group: String,
    /// Target date-time exactly as the user entered it.
    pub datetime: String,
    pub status: BroadcastStatus,
    /// When the record was composed. `None` for seeded records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ScheduledBroadcast {
    /// A freshly composed broadcast, always `pending`, with a random id.
    pub fn pending(text: &str, group: &str, datetime: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            group: group.to_string(),
            datetime: datetime.to_string(),
            status: BroadcastStatus::Pending,
            created_at: Some(Utc::now()),
        }
    }

    /// A record that bypasses the compose path (startup data).
    pub fn seeded(id: &str, text: &str, group: &str, datetime: &str, status: BroadcastStatus) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            group: group.to_string(),
            datetime: datetime.to_string(),
            status,
            created_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == BroadcastStatus::Pending
    }
}

/// The four dashboard views reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Overview: stats and upcoming broadcasts.
    #[default]
    Dashboard,
    Compose,
    Schedule,
    Subscribers,
}

impl View {
    /// Sidebar order.
    pub const ALL: [View; 4] = [View::Dashboard, View::Compose, View::Schedule, View::Subscribers];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Compose => "compose",
            Self::Schedule => "schedule",
            Self::Subscribers => "subscribers",
        }
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Обзор",
            Self::Compose => "Создать",
            Self::Schedule => "Расписание",
            Self::Subscribers => "Группы",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = NewsBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| NewsBotError::UnknownView(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_roundtrip_ids() {
        for view in View::ALL {
            assert_eq!(view.id().parse::<View>().unwrap(), view);
        }
        assert_eq!(View::default(), View::Dashboard);
    }

    #[test]
    fn test_unknown_view() {
        let err = "settings".parse::<View>().unwrap_err();
        assert!(matches!(err, NewsBotError::UnknownView(v) if v == "settings"));
    }

    #[test]
    fn test_pending_ids_are_unique() {
        let a = ScheduledBroadcast::pending("a", "Новые", "2026-03-01 09:00");
        let b = ScheduledBroadcast::pending("a", "Новые", "2026-03-01 09:00");
        assert_ne!(a.id, b.id);
        assert!(a.is_pending());
        assert!(a.created_at.is_some());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let item = ScheduledBroadcast::seeded("3", "hi", "Новые", "2026-02-21 09:00", BroadcastStatus::Sent);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "sent");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_group_share() {
        let vip = Group::new("vip", "VIP клиенты", 84, "#f59e0b");
        assert_eq!(vip.share_of(1248).round(), 7.0);
        assert_eq!(vip.share_of(0), 0.0);
    }
}
