//! The data refresh loop.
//!
//! A session owns a [`PollTimer`] and a single event channel. The loop thread is the
//! only writer of [`DashboardState`]: it multiplexes poll ticks, user commands and
//! fetch completions with `crossbeam_channel::select!`, applies each as an [`Event`],
//! and hands the resulting [`Effect`]s to short-lived worker threads. A quotes poll and
//! a history fetch may run at the same time; their completions are serialized through
//! the channel.
//!
//! Fetch errors never leave a worker: they are turned into `*Failed` events.
use crossbeam_channel::{Receiver, Sender, never, select, tick, unbounded};
use log::{debug, info, warn};
use moex_common::{MoexError, Result, Ticker};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::source::QuoteSource;
use crate::state::{DashboardState, Effect, Event};

/// User input accepted by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show another instrument.
    Select(Ticker),
    /// Poll quotes now instead of waiting for the next tick.
    Refresh,
    /// Search securities by name or ticker.
    Search(String),
    /// End the session.
    Quit,
}

/// Recurring quotes timer owned by a session.
///
/// Ticks stop as soon as the timer is cancelled or dropped.
pub struct PollTimer {
    ticks: Receiver<Instant>,
    active: bool,
}

impl PollTimer {
    /// Starts ticking every `interval`, first tick one `interval` from now.
    pub fn start(interval: Duration) -> Self {
        Self {
            ticks: tick(interval),
            active: true,
        }
    }

    /// Channel yielding one `Instant` per tick; never ready once cancelled.
    pub fn ticks(&self) -> &Receiver<Instant> {
        &self.ticks
    }

    /// Releases the timer.
    pub fn cancel(&mut self) {
        self.ticks = never();
        self.active = false;
    }

    /// `false` after [`PollTimer::cancel`].
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Effect {
    /// Runs the fetch on the calling thread and reports the outcome as an event.
    pub fn execute(self, source: &dyn QuoteSource) -> Event {
        match self {
            Effect::FetchQuotes { request, tickers } => match source.fetch_quotes(&tickers) {
                Ok(quotes) => Event::QuotesLoaded { request, quotes },
                Err(e) => Event::QuotesFailed {
                    request,
                    error: e.to_string(),
                },
            },
            Effect::FetchHistory {
                selection,
                ticker,
                days,
            } => match source.fetch_history(&ticker, days) {
                Ok(history) => Event::HistoryLoaded {
                    selection,
                    ticker,
                    history,
                },
                Err(e) => Event::HistoryFailed {
                    selection,
                    ticker,
                    error: e.to_string(),
                },
            },
            Effect::Search { query } => match source.search(&query) {
                Ok(results) => Event::SearchLoaded { query, results },
                Err(e) => {
                    warn!("Search for '{query}' failed: {e}");
                    Event::SearchLoaded {
                        query,
                        results: Vec::new(),
                    }
                }
            },
        }
    }
}

/// Drives a [`DashboardState`] against a [`QuoteSource`].
pub struct RefreshLoop {
    source: Arc<dyn QuoteSource>,
    interval: Duration,
}

impl RefreshLoop {
    /// Creates a loop polling `source` every `interval`.
    pub fn new(source: Arc<dyn QuoteSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Runs a session until [`Command::Quit`] arrives or every command sender is gone.
    ///
    /// `on_render` is called once on activation and then after every event that changed
    /// what the dashboard shows.
    pub fn run<F>(
        &self,
        state: &mut DashboardState,
        commands: &Receiver<Command>,
        mut on_render: F,
    ) -> Result<(), MoexError>
    where
        F: FnMut(&DashboardState),
    {
        let (event_tx, event_rx) = unbounded::<Event>();
        let mut timer = PollTimer::start(self.interval);
        info!(
            "Refresh loop started: {} tickers every {:?}",
            state.tickers().len(),
            self.interval
        );

        let effects = state.apply(Event::Activate);
        self.dispatch(effects, &event_tx);
        on_render(state);
        let mut rendered = state.revision();

        loop {
            let event = select! {
                recv(timer.ticks()) -> _ => Event::PollTick,
                recv(commands) -> cmd => match cmd {
                    Ok(Command::Select(ticker)) => Event::SelectTicker(ticker),
                    Ok(Command::Refresh) => Event::RefreshRequested,
                    Ok(Command::Search(query)) => Event::SearchRequested(query),
                    Ok(Command::Quit) | Err(_) => break,
                },
                recv(event_rx) -> msg => msg.map_err(|e| MoexError::ChannelRecv(e.to_string()))?,
            };

            let effects = state.apply(event);
            self.dispatch(effects, &event_tx);
            if state.revision() != rendered {
                on_render(state);
                rendered = state.revision();
            }
        }

        timer.cancel();
        info!("Refresh loop stopping...");
        Ok(())
    }

    /// Starts one worker thread per effect.
    fn dispatch(&self, effects: Vec<Effect>, events: &Sender<Event>) {
        for effect in effects {
            debug!("Dispatching {effect:?}");
            let source = Arc::clone(&self.source);
            let events = events.clone();
            thread::spawn(move || {
                let event = effect.execute(source.as_ref());
                if events.send(event).is_err() {
                    debug!("Session ended before the fetch completed");
                }
            });
        }
    }
}
