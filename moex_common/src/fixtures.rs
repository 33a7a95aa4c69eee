//! Static dashboard data: the index card, detected patterns, the illustrative signal
//! table and the default holdings. None of it is computed.
use strum_macros::Display;

use crate::portfolio::Holding;
use crate::signal::{Signal, Strength};
use crate::tickers::Ticker;

/// Market index card.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct MarketIndex {
    pub name: &'static str,
    pub value: f64,
    pub change_percent: f64,
}

/// Direction a chart pattern points to.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PatternKind {
    Bullish,
    Bearish,
}

/// A detected chart pattern.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub id: u32,
    pub name: &'static str,
    pub ticker: &'static str,
    pub kind: PatternKind,
    /// Detector confidence, percent.
    pub confidence: u8,
    /// Free-form age label.
    pub detected: &'static str,
    pub description: &'static str,
}

/// A row of the static signal table.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRecord {
    pub ticker: &'static str,
    pub signal: Signal,
    pub price: f64,
    /// Percent change.
    pub change: f64,
    pub strength: Strength,
}

/// Headline index card.
pub const MOEX_INDEX: MarketIndex = MarketIndex {
    name: "MOEX Index",
    value: 3245.67,
    change_percent: 1.23,
};

/// Patterns shown on the patterns tab.
pub const PATTERNS: [Pattern; 4] = [
    Pattern {
        id: 1,
        name: "Head and shoulders",
        ticker: "SBER",
        kind: PatternKind::Bearish,
        confidence: 87,
        detected: "2 hours ago",
        description: "Bearish trend reversal",
    },
    Pattern {
        id: 2,
        name: "Double bottom",
        ticker: "GAZP",
        kind: PatternKind::Bullish,
        confidence: 92,
        detected: "30 min ago",
        description: "Bullish trend reversal",
    },
    Pattern {
        id: 3,
        name: "Rising flag",
        ticker: "LKOH",
        kind: PatternKind::Bullish,
        confidence: 78,
        detected: "1 hour ago",
        description: "Bullish continuation",
    },
    Pattern {
        id: 4,
        name: "Falling wedge",
        ticker: "YNDX",
        kind: PatternKind::Bullish,
        confidence: 84,
        detected: "45 min ago",
        description: "Bullish reversal",
    },
];

/// Illustrative signal table.
pub const SIGNALS: [SignalRecord; 5] = [
    SignalRecord { ticker: "SBER", signal: Signal::Buy, price: 295.4, change: 2.3, strength: Strength::Strong },
    SignalRecord { ticker: "GAZP", signal: Signal::Buy, price: 167.2, change: 1.8, strength: Strength::Medium },
    SignalRecord { ticker: "LKOH", signal: Signal::Sell, price: 6543.0, change: -1.2, strength: Strength::Strong },
    SignalRecord { ticker: "YNDX", signal: Signal::Hold, price: 2950.0, change: 0.5, strength: Strength::Weak },
    SignalRecord { ticker: "ROSN", signal: Signal::Buy, price: 543.2, change: 3.1, strength: Strength::Strong },
];

/// Holdings used when no portfolio file is configured.
pub fn default_holdings() -> Vec<Holding> {
    vec![
        Holding::new("SBER", 100, 280.5),
        Holding::new("GAZP", 200, 165.0),
        Holding::new("LKOH", 10, 6600.0),
        Holding::new("YNDX", 5, 2900.0),
    ]
}

/// Reference price of `ticker` in the static signal table.
pub fn reference_price(ticker: &Ticker) -> Option<f64> {
    SIGNALS
        .iter()
        .find(|s| s.ticker == ticker.as_str())
        .map(|s| s.price)
}

impl Pattern {
    /// Confidence bucket used for colouring: `high` above 85, `medium` above 70.
    pub fn confidence_band(&self) -> &'static str {
        if self.confidence > 85 {
            "high"
        } else if self.confidence > 70 {
            "medium"
        } else {
            "low"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bands() {
        let bands: Vec<&str> = PATTERNS.iter().map(Pattern::confidence_band).collect();
        assert_eq!(bands, vec!["high", "high", "medium", "medium"]);
    }

    #[test]
    fn reference_prices() {
        assert_eq!(reference_price(&Ticker::from("ROSN")), Some(543.2));
        assert_eq!(reference_price(&Ticker::from("AFLT")), None);
    }
}
