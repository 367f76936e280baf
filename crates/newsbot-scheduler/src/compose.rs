//! Compose form — the draft a broadcast is built from.

use newsbot_core::{NewsBotError, Result, ScheduledBroadcast};
use serde::Serialize;

use crate::registry::{ALL_GROUP_ID, GroupRegistry};

/// Pending user input for a new broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeForm {
    text: String,
    group_id: String,
    datetime: String,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            group_id: ALL_GROUP_ID.to_string(),
            datetime: String::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn set_group(&mut self, group_id: &str) {
        self.group_id = group_id.to_string();
    }

    pub fn set_datetime(&mut self, datetime: &str) {
        self.datetime = datetime.to_string();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn datetime(&self) -> &str {
        &self.datetime
    }

    /// Message length in characters, as the counter under the textarea shows it.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether submit would do anything: text is not blank and a date-time is set.
    pub fn is_ready(&self) -> bool {
        !self.text.trim().is_empty() && !self.datetime.is_empty()
    }

    /// Drop text and date-time. The group selection survives.
    pub fn clear(&mut self) {
        self.text.clear();
        self.datetime.clear();
    }

    /// Build a pending broadcast from the draft without touching it.
    ///
    /// `Ok(None)` when the draft is not ready; an unknown group id is an error.
    pub fn build(&self, registry: &GroupRegistry) -> Result<Option<ScheduledBroadcast>> {
        if !self.is_ready() {
            return Ok(None);
        }
        let group = registry
            .find_by_id(&self.group_id)
            .ok_or_else(|| NewsBotError::UnknownGroup(self.group_id.clone()))?;
        Ok(Some(ScheduledBroadcast::pending(&self.text, &group.name, &self.datetime)))
    }
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text: &str, group: &str, datetime: &str) -> ComposeForm {
        let mut form = ComposeForm::new();
        form.set_text(text);
        form.set_group(group);
        form.set_datetime(datetime);
        form
    }

    #[test]
    fn test_defaults() {
        let form = ComposeForm::new();
        assert_eq!(form.text(), "");
        assert_eq!(form.group_id(), "all");
        assert_eq!(form.datetime(), "");
        assert!(!form.is_ready());
    }

    #[test]
    fn test_build_resolves_group_name() {
        let registry = GroupRegistry::new();
        let item = filled("Hello", "vip", "2026-03-01 09:00").build(&registry).unwrap().unwrap();
        assert_eq!(item.text, "Hello");
        assert_eq!(item.group, "VIP клиенты");
        assert_eq!(item.datetime, "2026-03-01 09:00");
        assert!(item.is_pending());
    }

    #[test]
    fn test_blank_text_is_not_ready() {
        let registry = GroupRegistry::new();
        assert!(filled("", "all", "2026-03-01 09:00").build(&registry).unwrap().is_none());
        assert!(filled("  \n\t", "all", "2026-03-01 09:00").build(&registry).unwrap().is_none());
    }

    #[test]
    fn test_missing_datetime_is_not_ready() {
        let registry = GroupRegistry::new();
        assert!(filled("Hello", "all", "").build(&registry).unwrap().is_none());
    }

    #[test]
    fn test_text_kept_verbatim() {
        let registry = GroupRegistry::new();
        let item = filled("  Hello  ", "all", "x").build(&registry).unwrap().unwrap();
        assert_eq!(item.text, "  Hello  ");
    }

    #[test]
    fn test_unknown_group_is_reported() {
        let registry = GroupRegistry::new();
        let err = filled("Hello", "vipp", "2026-03-01 09:00").build(&registry).unwrap_err();
        assert!(matches!(err, NewsBotError::UnknownGroup(id) if id == "vipp"));
    }

    #[test]
    fn test_clear_keeps_group() {
        let mut form = filled("Hello", "new", "2026-03-01 09:00");
        form.clear();
        assert_eq!(form.text(), "");
        assert_eq!(form.datetime(), "");
        assert_eq!(form.group_id(), "new");
    }

    #[test]
    fn test_char_count_counts_chars() {
        let form = filled("Привет", "all", "");
        assert_eq!(form.char_count(), 6);
    }
}
