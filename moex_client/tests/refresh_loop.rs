use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender, unbounded};
use moex_client::source::QuoteSource;
use moex_client::{Command, DashboardState, RefreshLoop};
use moex_common::quote::SearchResult;
use moex_common::{HistoryCandle, MoexError, Quote, Result, Ticker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct Snapshot {
    loading: bool,
    quotes: Vec<Quote>,
    history_ticker: Option<Ticker>,
    history: Vec<HistoryCandle>,
}

impl Snapshot {
    fn of(state: &DashboardState) -> Self {
        Self {
            loading: state.is_loading(),
            quotes: state.quotes().to_vec(),
            history_ticker: state.history_ticker().cloned(),
            history: state.history().to_vec(),
        }
    }
}

/// Source scripted per test: quotes succeed or fail by call index, history for
/// `GAZP` blocks until the test opens the gate.
struct ScriptedSource {
    quote_calls: AtomicUsize,
    fail_quotes_from: usize,
    gate: Mutex<Option<Receiver<()>>>,
}

impl ScriptedSource {
    fn new(fail_quotes_from: usize) -> Self {
        Self {
            quote_calls: AtomicUsize::new(0),
            fail_quotes_from,
            gate: Mutex::new(None),
        }
    }

    fn gated(fail_quotes_from: usize) -> (Self, Sender<()>) {
        let (tx, rx) = unbounded();
        let source = Self::new(fail_quotes_from);
        *source.gate.lock().unwrap() = Some(rx);
        (source, tx)
    }
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

fn close_for(ticker: &Ticker) -> f64 {
    match ticker.as_str() {
        "GAZP" => 167.2,
        "LKOH" => 6543.0,
        _ => 2950.0,
    }
}

impl QuoteSource for ScriptedSource {
    fn fetch_quotes(&self, tickers: &[Ticker]) -> Result<Vec<Quote>> {
        let call = self.quote_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_quotes_from {
            return Err(MoexError::Upstream("endpoint down".into()));
        }
        Ok(tickers
            .iter()
            .map(|t| quote(t.as_str(), 100.0 + call as f64))
            .collect())
    }

    fn fetch_history(&self, ticker: &Ticker, _days: u32) -> Result<Vec<HistoryCandle>> {
        if ticker.as_str() == "GAZP" {
            let gate = self.gate.lock()?.clone();
            if let Some(gate) = gate {
                gate.recv_timeout(WAIT)
                    .map_err(|e| MoexError::ChannelRecv(e.to_string()))?;
            }
        }
        Ok(vec![HistoryCandle {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            open: None,
            high: None,
            low: None,
            close: close_for(ticker),
            volume: 1000.0,
        }])
    }

    fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }
}

struct Session {
    commands: Sender<Command>,
    renders: Receiver<Snapshot>,
    handle: thread::JoinHandle<DashboardState>,
}

fn start(source: ScriptedSource, interval: Duration) -> Session {
    let (commands, command_rx) = unbounded();
    let (render_tx, renders) = unbounded();
    let handle = thread::spawn(move || {
        let refresh = RefreshLoop::new(Arc::new(source), interval);
        let mut state = DashboardState::new(
            vec![Ticker::from("SBER"), Ticker::from("GAZP")],
            Ticker::from("YNDX"),
            30,
        );
        refresh
            .run(&mut state, &command_rx, |state| {
                let _ = render_tx.send(Snapshot::of(state));
            })
            .unwrap();
        state
    });
    Session {
        commands,
        renders,
        handle,
    }
}

fn wait_for(renders: &Receiver<Snapshot>, pred: impl Fn(&Snapshot) -> bool) -> Snapshot {
    loop {
        let snapshot = renders.recv_timeout(WAIT).expect("no matching render");
        if pred(&snapshot) {
            return snapshot;
        }
    }
}

#[test]
fn activation_loads_quotes_and_history() {
    let session = start(ScriptedSource::new(usize::MAX), Duration::from_secs(3600));

    let first = session.renders.recv_timeout(WAIT).unwrap();
    assert!(first.loading);
    assert!(first.quotes.is_empty());

    let loaded = wait_for(&session.renders, |s| {
        !s.quotes.is_empty() && s.history_ticker.is_some()
    });
    assert!(!loaded.loading);
    assert_eq!(loaded.quotes, vec![quote("SBER", 100.0), quote("GAZP", 100.0)]);
    assert_eq!(loaded.history_ticker, Some(Ticker::from("YNDX")));

    session.commands.send(Command::Quit).unwrap();
    session.handle.join().unwrap();
}

#[test]
fn polling_replaces_quotes_every_interval() {
    let session = start(ScriptedSource::new(usize::MAX), Duration::from_millis(20));
    let later = wait_for(&session.renders, |s| {
        s.quotes.first().is_some_and(|q| q.price >= 102.0)
    });
    assert_eq!(later.quotes.len(), 2);
    session.commands.send(Command::Quit).unwrap();
    session.handle.join().unwrap();
}

#[test]
fn failed_polls_keep_last_quotes_and_resolve_loading_once() {
    let session = start(ScriptedSource::new(1), Duration::from_millis(20));
    wait_for(&session.renders, |s| !s.quotes.is_empty());
    thread::sleep(Duration::from_millis(150));

    session.commands.send(Command::Quit).unwrap();
    let state = session.handle.join().unwrap();
    assert_eq!(state.quotes(), &[quote("SBER", 100.0), quote("GAZP", 100.0)]);
    assert!(!state.is_loading());
}

#[test]
fn first_failure_clears_loading_exactly_once() {
    let session = start(ScriptedSource::new(0), Duration::from_millis(20));
    thread::sleep(Duration::from_millis(150));
    session.commands.send(Command::Quit).unwrap();
    let state = session.handle.join().unwrap();

    let snapshots: Vec<Snapshot> = session.renders.try_iter().collect();
    let transitions = snapshots
        .windows(2)
        .filter(|w| w[0].loading && !w[1].loading)
        .count();
    assert!(snapshots[0].loading);
    assert_eq!(transitions, 1);
    assert!(snapshots.iter().all(|s| s.quotes.is_empty()));
    assert!(!state.is_loading());
}

#[test]
fn late_history_for_old_selection_is_discarded() {
    let (source, release_gazp) = ScriptedSource::gated(usize::MAX);
    let session = start(source, Duration::from_secs(3600));
    wait_for(&session.renders, |s| s.history_ticker == Some(Ticker::from("YNDX")));

    session.commands.send(Command::Select(Ticker::from("GAZP"))).unwrap();
    session.commands.send(Command::Select(Ticker::from("LKOH"))).unwrap();
    let shown = wait_for(&session.renders, |s| s.history_ticker == Some(Ticker::from("LKOH")));
    assert_eq!(shown.history[0].close, 6543.0);

    release_gazp.send(()).unwrap();
    thread::sleep(Duration::from_millis(200));
    session.commands.send(Command::Quit).unwrap();
    let state = session.handle.join().unwrap();

    assert_eq!(state.selected(), &Ticker::from("LKOH"));
    assert_eq!(state.history_ticker(), Some(&Ticker::from("LKOH")));
    assert_eq!(state.history()[0].close, 6543.0);
    assert!(
        session
            .renders
            .try_iter()
            .all(|s| s.history_ticker != Some(Ticker::from("GAZP")))
    );
}

#[test]
fn dropping_all_command_senders_ends_the_session() {
    let session = start(ScriptedSource::new(usize::MAX), Duration::from_secs(3600));
    session.renders.recv_timeout(WAIT).unwrap();
    drop(session.commands);
    session.handle.join().unwrap();
}
