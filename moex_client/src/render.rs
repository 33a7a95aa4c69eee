//! Plain-text dashboard.
//!
//! [`DashboardView::build`] derives everything shown from the current state and the
//! static holdings: live signals, portfolio totals and the chart series are recomputed
//! on every render and never cached.
use moex_common::chart::{ChartPoint, project_series};
use moex_common::fixtures::{MOEX_INDEX, PATTERNS, SIGNALS};
use moex_common::portfolio::{Holding, PortfolioSummary};
use moex_common::signal::{Signal, Strength, classify};
use moex_common::{Quote, Ticker};
use std::fmt;

use crate::state::DashboardState;

/// A quote with its classified signal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSignal {
    /// Instrument.
    pub ticker: Ticker,
    /// Last price.
    pub price: f64,
    /// Day change in percent, as classified.
    pub change_percent: f64,
    /// Classifier label.
    pub signal: Signal,
    /// Classifier tier.
    pub strength: Strength,
}

/// Snapshot of everything the dashboard prints.
pub struct DashboardView<'a> {
    state: &'a DashboardState,
    /// One signal per quote, in quote order.
    pub signals: Vec<LiveSignal>,
    /// Holdings valued at the latest quotes.
    pub portfolio: PortfolioSummary,
    /// Chart points of the displayed history.
    pub series: Vec<ChartPoint>,
}

impl<'a> DashboardView<'a> {
    /// Derives the view from `state` and `holdings`.
    pub fn build(state: &'a DashboardState, holdings: &[Holding]) -> Self {
        let signals = state.quotes().iter().map(LiveSignal::from_quote).collect();
        Self {
            state,
            signals,
            portfolio: PortfolioSummary::evaluate(holdings, state.quotes()),
            series: project_series(state.history()),
        }
    }

    /// Signals other than `HOLD`.
    pub fn active_signals(&self) -> usize {
        self.signals.iter().filter(|s| s.signal != Signal::Hold).count()
    }

    /// `BUY` signals.
    pub fn buy_signals(&self) -> usize {
        self.signals.iter().filter(|s| s.signal == Signal::Buy).count()
    }
}

impl LiveSignal {
    fn from_quote(quote: &Quote) -> Self {
        let (signal, strength) = classify(quote.change_percent);
        Self {
            ticker: quote.ticker.clone(),
            price: quote.price,
            change_percent: quote.change_percent,
            signal,
            strength,
        }
    }
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        writeln!(f, "==== MOEX Analytics ====")?;
        writeln!(
            f,
            "{}: {:.2} ({}%) | signals: {} ({} buy) | patterns: {} | portfolio: {:.2} RUB ({} RUB)",
            MOEX_INDEX.name,
            MOEX_INDEX.value,
            signed(MOEX_INDEX.change_percent),
            self.active_signals(),
            self.buy_signals(),
            PATTERNS.len(),
            self.portfolio.total_value,
            signed(self.portfolio.total_profit_loss),
        )?;

        writeln!(f, "-- Quotes --")?;
        if state.is_loading() {
            writeln!(f, "loading...")?;
        } else if self.signals.is_empty() {
            writeln!(f, "no data")?;
        }
        for s in &self.signals {
            writeln!(
                f,
                "{:<6} {:>12.2} {:>8}% {:<4} {}",
                s.ticker,
                s.price,
                signed(s.change_percent),
                s.signal.to_string(),
                s.strength
            )?;
        }

        writeln!(f, "-- Patterns --")?;
        for p in &PATTERNS {
            writeln!(
                f,
                "{:<6} {:<20} {:<8} {:>3}% [{}] {}",
                p.ticker,
                p.name,
                p.kind.to_string(),
                p.confidence,
                p.confidence_band(),
                p.detected
            )?;
        }

        writeln!(f, "-- Signals --")?;
        for s in &SIGNALS {
            writeln!(
                f,
                "{:<6} {:<4} {:>10.2} {:>7}% {}",
                s.ticker,
                s.signal.to_string(),
                s.price,
                signed(s.change),
                s.strength
            )?;
        }

        writeln!(f, "-- Portfolio --")?;
        for p in &self.portfolio.positions {
            writeln!(
                f,
                "{:<6} {:>6} x {:>10.2} now {:>10.2} P/L {:>12}",
                p.holding.ticker,
                p.holding.shares,
                p.holding.avg_price,
                p.current,
                signed(p.profit_loss)
            )?;
        }
        writeln!(
            f,
            "total {:.2} RUB, P/L {} RUB",
            self.portfolio.total_value,
            signed(self.portfolio.total_profit_loss)
        )?;

        match state.history_ticker() {
            Some(ticker) if ticker == state.selected() => {
                writeln!(f, "-- Chart {ticker} ({} days) --", self.series.len())?
            }
            Some(ticker) => writeln!(
                f,
                "-- Chart {ticker} (loading {}) --",
                state.selected()
            )?,
            None => writeln!(f, "-- Chart {} (loading) --", state.selected())?,
        }
        for point in &self.series {
            writeln!(
                f,
                "{} {:>10.2} vol {:>10.1}k",
                point.date, point.price, point.volume
            )?;
        }

        if let Some((query, results)) = state.search() {
            writeln!(f, "-- Search '{query}' --")?;
            for r in results {
                writeln!(
                    f,
                    "{:<8} {}",
                    r.ticker,
                    r.name.as_deref().unwrap_or(r.ticker.as_str())
                )?;
            }
        }
        Ok(())
    }
}
