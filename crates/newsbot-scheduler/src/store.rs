//! In-memory broadcast store — newest first, lives as long as the process.

use newsbot_core::{BroadcastStatus, ScheduledBroadcast};

/// Ordered collection of scheduled broadcasts, newest at the front.
#[derive(Debug, Clone, Default)]
pub struct BroadcastStore {
    items: Vec<ScheduledBroadcast>,
}

impl BroadcastStore {
    /// Empty store.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Store pre-filled with the startup sample: two pending, one sent.
    pub fn seeded() -> Self {
        Self {
            items: vec![
                ScheduledBroadcast::seeded(
                    "1",
                    "Напоминаем: акция действует до конца недели!",
                    "Все подписчики",
                    "2026-02-22 10:00",
                    BroadcastStatus::Pending,
                ),
                ScheduledBroadcast::seeded(
                    "2",
                    "Только для вас — скидка 20% на следующий заказ.",
                    "VIP клиенты",
                    "2026-02-23 14:00",
                    BroadcastStatus::Pending,
                ),
                ScheduledBroadcast::seeded(
                    "3",
                    "Добро пожаловать! Рады видеть вас среди нас.",
                    "Новые",
                    "2026-02-21 09:00",
                    BroadcastStatus::Sent,
                ),
            ],
        }
    }

    /// Put a broadcast in front of everything else. No dedup, no bound.
    pub fn insert(&mut self, item: ScheduledBroadcast) {
        tracing::debug!("Broadcast stored: {} → {} at {}", item.id, item.group, item.datetime);
        self.items.insert(0, item);
    }

    /// Remove the broadcast with this id, whatever its status.
    /// Returns the removed record; a missing id is a no-op.
    pub fn delete(&mut self, id: &str) -> Option<ScheduledBroadcast> {
        let pos = self.items.iter().position(|s| s.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&ScheduledBroadcast> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn list_all(&self) -> &[ScheduledBroadcast] {
        &self.items
    }

    /// Pending broadcasts in store order, optionally only the first `limit`.
    pub fn list_pending(&self, limit: Option<usize>) -> Vec<&ScheduledBroadcast> {
        self.items
            .iter()
            .filter(|s| s.is_pending())
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|s| s.is_pending()).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
