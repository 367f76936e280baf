//! "Broadcast scheduled" confirmation — a one-shot flag that expires on its own.
//! No background task: the flag is a deadline on the tokio clock, so a new
//! `show()` simply moves the deadline.

use std::time::Duration;
use tokio::time::Instant;

/// Transient confirmation raised by a successful submit.
#[derive(Debug, Clone)]
pub struct Confirmation {
    window: Duration,
    visible_until: Option<Instant>,
}

impl Confirmation {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            visible_until: None,
        }
    }

    /// Raise the flag, restarting the window if it is already up.
    pub fn show(&mut self) {
        self.visible_until = Some(Instant::now() + self.window);
    }

    pub fn is_visible(&self) -> bool {
        self.visible_until.is_some_and(|until| Instant::now() < until)
    }

    /// Time left before the flag clears, if it is visible.
    pub fn remaining(&self) -> Option<Duration> {
        let until = self.visible_until?;
        let left = until.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hidden_until_shown() {
        let confirmation = Confirmation::default();
        assert!(!confirmation.is_visible());
        assert!(confirmation.remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_window() {
        let mut confirmation = Confirmation::default();
        confirmation.show();
        assert!(confirmation.is_visible());

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(confirmation.is_visible());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!confirmation.is_visible());
        assert!(confirmation.remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_restarts_window() {
        let mut confirmation = Confirmation::default();
        confirmation.show();
        tokio::time::advance(Duration::from_secs(2)).await;

        confirmation.show();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(confirmation.is_visible());
        assert_eq!(confirmation.remaining(), Some(Duration::from_secs(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!confirmation.is_visible());
    }
}
