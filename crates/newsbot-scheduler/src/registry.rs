//! Group registry — the fixed set of audience segments.

use newsbot_core::Group;

/// Identifier of the catch-all group every form starts with.
pub const ALL_GROUP_ID: &str = "all";

/// Read-only list of groups, in declaration order.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    groups: Vec<Group>,
}

impl GroupRegistry {
    /// Registry with the built-in segments.
    pub fn new() -> Self {
        Self {
            groups: vec![
                Group::new(ALL_GROUP_ID, "Все подписчики", 1248, "#6366f1"),
                Group::new("vip", "VIP клиенты", 84, "#f59e0b"),
                Group::new("new", "Новые", 312, "#10b981"),
                Group::new("inactive", "Неактивные", 203, "#6b7280"),
            ],
        }
    }

    pub fn list(&self) -> &[Group] {
        &self.groups
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Total audience: the size of the catch-all group.
    pub fn total_subscribers(&self) -> u32 {
        self.find_by_id(ALL_GROUP_ID).map(|g| g.count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}
