//! Overview statistics panel.

use serde::Serialize;

use crate::registry::GroupRegistry;
use crate::store::BroadcastStore;

/// All-time sent counter shown on the overview. Not tracked by this service.
const TOTAL_SENT: u32 = 3841;
/// Open rate in percent, reported by the messenger side.
const OPEN_RATE_PCT: u32 = 68;

/// One metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    /// Icon name for the card.
    pub icon: &'static str,
    /// Secondary caption under the value.
    pub delta: &'static str,
}

/// The four overview cards.
pub struct StatsPanel;

impl StatsPanel {
    /// Subscribers come from the registry, "scheduled" from the live store;
    /// sent and open rate are fixed figures.
    pub fn compute(registry: &GroupRegistry, store: &BroadcastStore) -> Vec<Stat> {
        vec![
            Stat {
                label: "Подписчиков",
                value: format_count(registry.total_subscribers() as usize),
                icon: "Users",
                delta: "+24 за неделю",
            },
            Stat {
                label: "Отправлено",
                value: format_count(TOTAL_SENT as usize),
                icon: "Send",
                delta: "за всё время",
            },
            Stat {
                label: "Открываемость",
                value: format!("{OPEN_RATE_PCT}%"),
                icon: "BarChart2",
                delta: "+3% к прошлой неделе",
            },
            Stat {
                label: "Запланировано",
                value: format_count(store.pending_count()),
                icon: "Clock",
                delta: "ближайших рассылки",
            },
        ]
    }
}

/// Group digits by thousands with a plain space: 3841 → "3 841".
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsbot_core::ScheduledBroadcast;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(84), "84");
        assert_eq!(format_count(1248), "1 248");
        assert_eq!(format_count(3841), "3 841");
        assert_eq!(format_count(1234567), "1 234 567");
    }

    #[test]
    fn test_seed_values() {
        let stats = StatsPanel::compute(&GroupRegistry::new(), &BroadcastStore::seeded());
        let values: Vec<_> = stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, ["1 248", "3 841", "68%", "2"]);
    }

    #[test]
    fn test_scheduled_follows_store() {
        let registry = GroupRegistry::new();
        let mut store = BroadcastStore::seeded();
        store.insert(ScheduledBroadcast::pending("hi", "Новые", "2026-03-01 09:00"));
        assert_eq!(StatsPanel::compute(&registry, &store)[3].value, "3");

        store.delete("1");
        store.delete("2");
        assert_eq!(StatsPanel::compute(&registry, &store)[3].value, "1");
    }
}
