//! Dashboard view state and its transition function.
//!
//! Every external happening (activation, poll tick, user command, fetch completion) is
//! an [`Event`]. [`DashboardState::apply`] is the only place the state changes; it
//! returns the fetches ([`Effect`]s) the event calls for, and the refresh loop runs
//! them and feeds their completions back as events.
//!
//! Two guards keep late responses from overwriting newer data:
//! - history completions carry the selection generation they were issued for and are
//!   dropped once the user has selected something else;
//! - quotes completions carry a request sequence number and are dropped when a newer
//!   request has already been applied.
use log::{debug, warn};
use moex_common::quote::SearchResult;
use moex_common::{HistoryCandle, Quote, Ticker};

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The session starts: load quotes and the selected history.
    Activate,
    /// The poll timer fired.
    PollTick,
    /// The user asked for an immediate quotes refresh.
    RefreshRequested,
    /// The user picked another instrument.
    SelectTicker(Ticker),
    /// The user asked the endpoint to search securities.
    SearchRequested(String),
    /// A quotes fetch succeeded.
    QuotesLoaded {
        /// Sequence number of the originating request.
        request: u64,
        /// Quotes in endpoint order.
        quotes: Vec<Quote>,
    },
    /// A quotes fetch failed (transport or malformed payload).
    QuotesFailed {
        /// Sequence number of the originating request.
        request: u64,
        /// Failure description.
        error: String,
    },
    /// A history fetch succeeded.
    HistoryLoaded {
        /// Selection generation the fetch was issued for.
        selection: u64,
        /// Instrument the history belongs to.
        ticker: Ticker,
        /// Candles, oldest first.
        history: Vec<HistoryCandle>,
    },
    /// A history fetch failed.
    HistoryFailed {
        /// Selection generation the fetch was issued for.
        selection: u64,
        /// Instrument whose fetch failed.
        ticker: Ticker,
        /// Failure description.
        error: String,
    },
    /// A search finished; failures arrive as an empty list.
    SearchLoaded {
        /// Text that was searched.
        query: String,
        /// Matching securities.
        results: Vec<SearchResult>,
    },
}

/// Fetch requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load quotes for `tickers`.
    FetchQuotes {
        /// Sequence number echoed by the completion.
        request: u64,
        /// Watched tickers.
        tickers: Vec<Ticker>,
    },
    /// Load the trailing `days` of history for `ticker`.
    FetchHistory {
        /// Selection generation echoed by the completion.
        selection: u64,
        /// Instrument to load.
        ticker: Ticker,
        /// Window length in days.
        days: u32,
    },
    /// Search securities.
    Search {
        /// Search text.
        query: String,
    },
}

/// Everything the dashboard displays that is not static.
#[derive(Debug, Clone)]
pub struct DashboardState {
    tickers: Vec<Ticker>,
    history_days: u32,
    quotes: Vec<Quote>,
    history: Vec<HistoryCandle>,
    history_ticker: Option<Ticker>,
    search: Option<(String, Vec<SearchResult>)>,
    loading: bool,
    selected: Ticker,
    selection: u64,
    next_request: u64,
    applied_request: u64,
    revision: u64,
}

impl DashboardState {
    /// Fresh state: loading, nothing fetched yet.
    pub fn new(tickers: Vec<Ticker>, selected: Ticker, history_days: u32) -> Self {
        Self {
            tickers,
            history_days,
            quotes: Vec::new(),
            history: Vec::new(),
            history_ticker: None,
            search: None,
            loading: true,
            selected,
            selection: 0,
            next_request: 0,
            applied_request: 0,
            revision: 0,
        }
    }

    /// Applies one event and returns the fetches it requires.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Activate => vec![self.quotes_request(), self.history_request()],
            Event::PollTick | Event::RefreshRequested => vec![self.quotes_request()],
            Event::SelectTicker(ticker) => {
                if ticker == self.selected {
                    return Vec::new();
                }
                self.selected = ticker;
                self.selection += 1;
                self.touch();
                vec![self.history_request()]
            }
            Event::SearchRequested(query) => vec![Effect::Search { query }],
            Event::QuotesLoaded { request, quotes } => {
                if request <= self.applied_request {
                    debug!("Dropping stale quotes response #{request}");
                    return Vec::new();
                }
                self.applied_request = request;
                self.quotes = quotes;
                self.loading = false;
                self.touch();
                Vec::new()
            }
            Event::QuotesFailed { request, error } => {
                warn!("Quotes request #{request} failed: {error}");
                if self.loading {
                    self.loading = false;
                    self.touch();
                }
                Vec::new()
            }
            Event::HistoryLoaded {
                selection,
                ticker,
                history,
            } => {
                if selection != self.selection {
                    debug!("Dropping history for {ticker}: selection moved on");
                    return Vec::new();
                }
                self.history = history;
                self.history_ticker = Some(ticker);
                self.touch();
                Vec::new()
            }
            Event::HistoryFailed { ticker, error, .. } => {
                debug!("History for {ticker} unavailable: {error}");
                Vec::new()
            }
            Event::SearchLoaded { query, results } => {
                self.search = Some((query, results));
                self.touch();
                Vec::new()
            }
        }
    }

    fn quotes_request(&mut self) -> Effect {
        self.next_request += 1;
        Effect::FetchQuotes {
            request: self.next_request,
            tickers: self.tickers.clone(),
        }
    }

    fn history_request(&self) -> Effect {
        Effect::FetchHistory {
            selection: self.selection,
            ticker: self.selected.clone(),
            days: self.history_days,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Latest quotes, in endpoint order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// History currently on screen, oldest first.
    pub fn history(&self) -> &[HistoryCandle] {
        &self.history
    }

    /// Ticker the displayed history belongs to; lags `selected` while a fetch is in flight.
    pub fn history_ticker(&self) -> Option<&Ticker> {
        self.history_ticker.as_ref()
    }

    /// Last search and its results.
    pub fn search(&self) -> Option<&(String, Vec<SearchResult>)> {
        self.search.as_ref()
    }

    /// `true` until the first quotes fetch resolves either way.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Currently selected instrument.
    pub fn selected(&self) -> &Ticker {
        &self.selected
    }

    /// Watched tickers.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn state() -> DashboardState {
        DashboardState::new(
            vec![Ticker::from("SBER"), Ticker::from("YNDX")],
            Ticker::from("YNDX"),
            30,
        )
    }

    fn quote(ticker: &str, price: f64) -> Quote {
        Quote {
            ticker: Ticker::from(ticker),
            name: ticker.to_string(),
            price,
            change: 0.0,
            change_percent: 0.0,
            volume: 0,
            high: None,
            low: None,
            open: None,
        }
    }

    fn candles(close: f64) -> Vec<HistoryCandle> {
        vec![HistoryCandle {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            open: None,
            high: None,
            low: None,
            close,
            volume: 1000.0,
        }]
    }

    fn history_selection(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::FetchHistory { selection, .. }] => *selection,
            other => panic!("expected a single history fetch, got {other:?}"),
        }
    }

    #[test]
    fn activation_fetches_quotes_and_history() {
        let mut state = state();
        let effects = state.apply(Event::Activate);
        assert_eq!(
            effects,
            vec![
                Effect::FetchQuotes {
                    request: 1,
                    tickers: vec![Ticker::from("SBER"), Ticker::from("YNDX")],
                },
                Effect::FetchHistory {
                    selection: 0,
                    ticker: Ticker::from("YNDX"),
                    days: 30,
                },
            ]
        );
        assert!(state.is_loading());
    }

    #[test]
    fn quotes_replace_previous_set() {
        let mut state = state();
        state.apply(Event::Activate);
        state.apply(Event::QuotesLoaded {
            request: 1,
            quotes: vec![quote("SBER", 1.0), quote("YNDX", 2.0)],
        });
        state.apply(Event::PollTick);
        state.apply(Event::QuotesLoaded {
            request: 2,
            quotes: vec![quote("SBER", 3.0)],
        });
        assert_eq!(state.quotes(), &[quote("SBER", 3.0)]);
        assert!(!state.is_loading());
    }

    #[test]
    fn failed_quotes_keep_data_and_clear_loading_once() {
        let mut state = state();
        state.apply(Event::Activate);
        state.apply(Event::QuotesLoaded {
            request: 1,
            quotes: vec![quote("SBER", 1.0)],
        });
        state.apply(Event::PollTick);
        let revision = state.revision();
        state.apply(Event::QuotesFailed {
            request: 2,
            error: "timeout".into(),
        });
        assert_eq!(state.quotes(), &[quote("SBER", 1.0)]);
        assert!(!state.is_loading());
        assert_eq!(state.revision(), revision);
    }

    #[test]
    fn first_failure_resolves_loading() {
        let mut state = state();
        state.apply(Event::Activate);
        let before = state.revision();
        state.apply(Event::QuotesFailed {
            request: 1,
            error: "connection refused".into(),
        });
        assert!(!state.is_loading());
        assert!(state.quotes().is_empty());
        assert_eq!(state.revision(), before + 1);
    }

    #[test]
    fn slow_poll_cannot_roll_quotes_back() {
        let mut state = state();
        state.apply(Event::Activate);
        state.apply(Event::PollTick);
        state.apply(Event::QuotesLoaded {
            request: 2,
            quotes: vec![quote("SBER", 2.0)],
        });
        state.apply(Event::QuotesLoaded {
            request: 1,
            quotes: vec![quote("SBER", 1.0)],
        });
        assert_eq!(state.quotes(), &[quote("SBER", 2.0)]);
    }

    #[test]
    fn latest_selection_wins_over_late_response() {
        let mut state = state();
        state.apply(Event::Activate);
        let gazp = history_selection(&state.apply(Event::SelectTicker(Ticker::from("GAZP"))));
        let lkoh = history_selection(&state.apply(Event::SelectTicker(Ticker::from("LKOH"))));

        state.apply(Event::HistoryLoaded {
            selection: lkoh,
            ticker: Ticker::from("LKOH"),
            history: candles(6543.0),
        });
        state.apply(Event::HistoryLoaded {
            selection: gazp,
            ticker: Ticker::from("GAZP"),
            history: candles(167.2),
        });

        assert_eq!(state.history_ticker(), Some(&Ticker::from("LKOH")));
        assert_eq!(state.history()[0].close, 6543.0);
    }

    #[test]
    fn history_failure_keeps_previous_history() {
        let mut state = state();
        state.apply(Event::Activate);
        state.apply(Event::HistoryLoaded {
            selection: 0,
            ticker: Ticker::from("YNDX"),
            history: candles(2950.0),
        });
        let selection = history_selection(&state.apply(Event::SelectTicker(Ticker::from("SBER"))));
        state.apply(Event::HistoryFailed {
            selection,
            ticker: Ticker::from("SBER"),
            error: "502".into(),
        });
        assert_eq!(state.history_ticker(), Some(&Ticker::from("YNDX")));
        assert_eq!(state.history(), candles(2950.0).as_slice());
        assert_eq!(state.selected(), &Ticker::from("SBER"));
    }

    #[test]
    fn reselecting_current_ticker_is_a_no_op() {
        let mut state = state();
        assert!(state.apply(Event::SelectTicker(Ticker::from("YNDX"))).is_empty());
    }
}
