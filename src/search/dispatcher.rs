use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use super::debounce::Debouncer;

/// Message form of the dispatcher callbacks, for owners that receive over a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Search(String),
    Cleared,
}

type SearchCallback = Box<dyn FnMut(&str)>;
type ClearCallback = Box<dyn FnMut()>;

/// Debounced search input bound to the callbacks of the screen that owns it.
///
/// The dispatcher owns the pending fire. Dropping it (or calling
/// [`dispose`](Self::dispose)) cancels anything pending, so no callback runs after
/// the owning screen is torn down.
pub struct SearchDispatcher {
    debouncer: Debouncer,
    on_search: SearchCallback,
    on_clear: Option<ClearCallback>,
}

impl SearchDispatcher {
    pub fn new(delay: Duration, on_search: impl FnMut(&str) + 'static) -> Self {
        Self { debouncer: Debouncer::new(delay), on_search: Box::new(on_search), on_clear: None }
    }

    /// Dispatcher whose callbacks forward [`SearchEvent`]s to `tx`.
    ///
    /// Send errors mean the receiving screen is gone and are ignored.
    pub fn with_channel(delay: Duration, tx: Sender<SearchEvent>) -> Self {
        let clear_tx = tx.clone();
        Self::new(delay, move |text| {
            let _ = tx.send(SearchEvent::Search(text.to_string()));
        })
        .with_clear_callback(move || {
            let _ = clear_tx.send(SearchEvent::Cleared);
        })
    }

    pub fn with_clear_callback(mut self, on_clear: impl FnMut() + 'static) -> Self {
        self.on_clear = Some(Box::new(on_clear));
        self
    }

    pub fn text(&self) -> &str {
        self.debouncer.text()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn on_input(&mut self, text: impl Into<String>) {
        self.on_input_at(text, Instant::now());
    }

    pub fn on_input_at(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.input_at(text, now);
    }

    /// Deliver a pending search if its deadline has passed. Returns whether it fired.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.debouncer.poll_at(now) {
            Some(text) => {
                tracing::debug!(query = %text, "Debounced search fired");
                (self.on_search)(&text);
                true
            }
            None => false,
        }
    }

    /// Search now with the current text, cancelling any pending fire
    pub fn submit(&mut self) {
        let text = self.debouncer.submit();
        (self.on_search)(&text);
    }

    /// Run the clear callback (if any), empty the text, and cancel any pending fire
    pub fn clear(&mut self) {
        self.debouncer.clear();
        if let Some(on_clear) = self.on_clear.as_mut() {
            on_clear();
        }
    }

    /// Tear down explicitly; equivalent to dropping
    pub fn dispose(self) {}
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        if self.debouncer.cancel() {
            tracing::debug!("Cancelled pending search on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn recording_dispatcher(delay: Duration) -> (SearchDispatcher, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let dispatcher = SearchDispatcher::new(delay, move |text| {
            sink.borrow_mut().push(text.to_string());
        });
        (dispatcher, calls)
    }

    #[test]
    fn test_single_fire_for_burst() {
        let start = Instant::now();
        let (mut dispatcher, calls) = recording_dispatcher(ms(500));

        for (i, text) in ["g", "gy", "gyo", "gyoz", "gyoza"].iter().enumerate() {
            let now = start + ms(i as u64 * 50);
            dispatcher.on_input_at(*text, now);
            dispatcher.tick_at(now);
        }
        assert!(calls.borrow().is_empty());

        assert!(dispatcher.tick_at(start + ms(700)));
        assert!(!dispatcher.tick_at(start + ms(1500)));
        assert_eq!(*calls.borrow(), vec!["gyoza".to_string()]);
    }

    #[test]
    fn test_submit_fires_immediately() {
        let start = Instant::now();
        let (mut dispatcher, calls) = recording_dispatcher(ms(500));

        dispatcher.on_input_at("ramen", start);
        dispatcher.submit();
        assert_eq!(*calls.borrow(), vec!["ramen".to_string()]);

        // The superseded timer never fires
        assert!(!dispatcher.tick_at(start + ms(600)));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_clear_invokes_clear_callback() {
        let start = Instant::now();
        let cleared = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&cleared);
        let (dispatcher, calls) = recording_dispatcher(ms(500));
        let mut dispatcher = dispatcher.with_clear_callback(move || *counter.borrow_mut() += 1);

        dispatcher.on_input_at("bao", start);
        dispatcher.clear();

        assert_eq!(*cleared.borrow(), 1);
        assert_eq!(dispatcher.text(), "");
        assert!(!dispatcher.tick_at(start + ms(600)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_clear_without_callback() {
        let (mut dispatcher, _calls) = recording_dispatcher(ms(500));
        dispatcher.on_input("x");
        dispatcher.clear();
        assert!(!dispatcher.is_pending());
    }

    #[test]
    fn test_drop_cancels_pending_fire() {
        let (tx, rx) = mpsc::channel();
        let mut dispatcher = SearchDispatcher::with_channel(ms(10), tx);

        dispatcher.on_input("pending");
        assert!(dispatcher.is_pending());
        dispatcher.dispose();

        std::thread::sleep(ms(20));
        // Sender side was dropped with the dispatcher and nothing was sent
        assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected));
    }

    #[test]
    fn test_channel_events() {
        let start = Instant::now();
        let (tx, rx) = mpsc::channel();
        let mut dispatcher = SearchDispatcher::with_channel(ms(100), tx);

        dispatcher.on_input_at("tip", start);
        dispatcher.tick_at(start + ms(100));
        dispatcher.clear();

        assert_eq!(rx.try_recv(), Ok(SearchEvent::Search("tip".to_string())));
        assert_eq!(rx.try_recv(), Ok(SearchEvent::Cleared));
        assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Empty));
    }
}
