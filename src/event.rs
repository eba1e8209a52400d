use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Sample / render tick
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

impl Event {
    /// `q`, `Esc` and `Ctrl-C` close the window.
    pub fn is_close(&self) -> bool {
        match self {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
                KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
                _ => false,
            },
            _ => false,
        }
    }
}

/// Handles event collection from multiple sources.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) instead of
/// blocking `event::poll()` / `event::read()`, so no tokio worker thread is
/// ever blocked.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler. Spawns background tasks for async input and tick generation.
    pub fn new(tick_rate: Duration) -> Self {
        let handler = Self::without_input(tick_rate);

        // Async input task, uses crossterm's EventStream (non-blocking)
        let input_tx = handler.tx.clone();
        let input_stop = handler.stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        if key.kind == KeyEventKind::Press
                            && input_tx.send(Event::Key(key)).is_err()
                        {
                            return;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => {
                        if input_tx.send(Event::Resize(w, h)).is_err() {
                            return;
                        }
                    }
                    Some(Err(_)) | None => {
                        // Stream ended or errored
                        return;
                    }
                    _ => {}
                }
            }
        });

        handler
    }

    /// Tick-only handler; other events can still be injected via [`sender`](Self::sender).
    pub fn without_input(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));

        // Tick task
        let tick_tx = tx.clone();
        let tick_stop = stop.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tick_stop.load(Ordering::Relaxed) {
                    return;
                }
                if tick_tx.send(Event::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx, stop }
    }

    /// Get a clone of the sender for injecting events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal all background tasks to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
