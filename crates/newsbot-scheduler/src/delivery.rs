//! Delivery seam — where scheduled broadcasts would leave the process.
//!
//! Only a Telegram placeholder exists. It reports whether a bot token is
//! configured and never sends anything: broadcasts stay `pending` until an
//! external worker delivers them.

use newsbot_core::{NewsBotConfig, ScheduledBroadcast};

/// A channel that accepts newly scheduled broadcasts.
pub trait DeliveryChannel: Send + Sync {
    /// Channel name, e.g. "telegram".
    fn name(&self) -> &str;

    /// Whether credentials are present.
    fn is_configured(&self) -> bool;

    /// One-line status for the sidebar.
    fn status_line(&self) -> String;

    /// Hand over a freshly scheduled broadcast.
    fn accept(&self, item: &ScheduledBroadcast);
}

/// Telegram bot placeholder built from config.
#[derive(Debug, Clone, Default)]
pub struct TelegramStub {
    bot_token: Option<String>,
}

impl TelegramStub {
    pub fn new(bot_token: Option<String>) -> Self {
        Self { bot_token }
    }

    pub fn from_config(config: &NewsBotConfig) -> Self {
        Self::new(config.bot_token().map(String::from))
    }
}

impl DeliveryChannel for TelegramStub {
    fn name(&self) -> &str {
        "telegram"
    }

    fn is_configured(&self) -> bool {
        self.bot_token.is_some()
    }

    fn status_line(&self) -> String {
        match &self.bot_token {
            Some(token) => format!("Токен {}", mask_secret(token)),
            None => "Токен не задан".to_string(),
        }
    }

    fn accept(&self, item: &ScheduledBroadcast) {
        if self.is_configured() {
            tracing::info!(
                "📨 Broadcast {} queued for {} at {} (awaiting delivery worker)",
                item.id,
                item.group,
                item.datetime
            );
        } else {
            tracing::debug!("Bot token not set — broadcast {} stays pending", item.id);
        }
    }
}

/// Mask a secret for display — first 4 chars + ••••
pub fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if s.chars().count() <= 4 {
        return "••••".to_string();
    }
    let head: String = s.chars().take(4).collect();
    format!("{head}••••")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_status() {
        let stub = TelegramStub::from_config(&NewsBotConfig::default());
        assert!(!stub.is_configured());
        assert_eq!(stub.name(), "telegram");
        assert_eq!(stub.status_line(), "Токен не задан");
    }

    #[test]
    fn test_configured_status_is_masked() {
        let stub = TelegramStub::new(Some("123456:ABCDEF".into()));
        assert!(stub.is_configured());
        assert_eq!(stub.status_line(), "Токен 1234••••");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("abc"), "••••");
        assert_eq!(mask_secret("токен-длинный"), "токе••••");
    }
}
