use std::time::{Duration, Instant};

/// Delay used when no configuration overrides it
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    PendingFire { deadline: Instant },
}

/// Last-write-wins debounce state machine for a text input.
///
/// At most one fire is pending at a time; every new input replaces both the text
/// and the deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
    text: String,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, state: DebounceState::Idle, text: String::new() }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::PendingFire { .. })
    }

    pub fn input(&mut self, text: impl Into<String>) {
        self.input_at(text, Instant::now());
    }

    /// Record a text change at `now`, replacing any pending fire
    pub fn input_at(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.state = DebounceState::PendingFire { deadline: now + self.delay };
    }

    pub fn poll(&mut self) -> Option<String> {
        self.poll_at(Instant::now())
    }

    /// Fire if the pending deadline has passed. Returns the text to search for.
    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        match self.state {
            DebounceState::PendingFire { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                Some(self.text.clone())
            }
            _ => None,
        }
    }

    /// Fire immediately with the current text, cancelling any pending fire
    pub fn submit(&mut self) -> String {
        self.state = DebounceState::Idle;
        self.text.clone()
    }

    /// Reset the text to empty and cancel any pending fire
    pub fn clear(&mut self) {
        self.text.clear();
        self.state = DebounceState::Idle;
    }

    /// Drop any pending fire, keeping the text. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_idle() {
        let debouncer = Debouncer::default();
        assert_eq!(debouncer.state(), DebounceState::Idle);
        assert_eq!(debouncer.delay(), ms(500));
        assert_eq!(debouncer.text(), "");
    }

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        debouncer.input_at("pho", start);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll_at(start + ms(299)), None);
        assert_eq!(debouncer.poll_at(start + ms(300)), Some("pho".to_string()));
        assert_eq!(debouncer.state(), DebounceState::Idle);

        // Fires only once
        assert_eq!(debouncer.poll_at(start + ms(900)), None);
    }

    #[test]
    fn test_rapid_inputs_fire_once_with_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        let mut fired = Vec::new();

        for (i, text) in ["p", "ph", "pho", "pho ", "pho g"].iter().enumerate() {
            let now = start + ms(i as u64 * 100);
            debouncer.input_at(*text, now);
            fired.extend(debouncer.poll_at(now));
        }

        // Poll generously after the last keystroke
        for step in 1..=20 {
            fired.extend(debouncer.poll_at(start + ms(400 + step * 50)));
        }

        assert_eq!(fired, vec!["pho g".to_string()]);
    }

    #[test]
    fn test_new_input_resets_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));

        debouncer.input_at("a", start);
        debouncer.input_at("ab", start + ms(400));
        assert_eq!(debouncer.poll_at(start + ms(600)), None);
        assert_eq!(debouncer.poll_at(start + ms(900)), Some("ab".to_string()));
    }

    #[test]
    fn test_submit_fires_immediately_and_cancels() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));

        debouncer.input_at("laksa", start);
        assert_eq!(debouncer.submit(), "laksa");
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll_at(start + ms(1000)), None);
    }

    #[test]
    fn test_clear_resets_text_and_cancels() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));

        debouncer.input_at("bao", start);
        debouncer.clear();
        assert_eq!(debouncer.text(), "");
        assert_eq!(debouncer.poll_at(start + ms(1000)), None);
    }

    #[test]
    fn test_cancel_keeps_text() {
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.input("x");
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.text(), "x");
    }
}
