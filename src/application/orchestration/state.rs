//! Orchestrator lifecycle.

use std::fmt;

use serde::Serialize;

use crate::domain::order::Order;

/// Consecutive unusable ticks after which a market is abandoned.
pub const MAX_EMPTY_TICKS: u32 = 10;

/// Lifecycle state of one market's orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    /// Accepting ticks.
    Running,
    /// The market closed. Terminal.
    Closed,
    /// Too many consecutive ticks without usable data. Terminal.
    Exhausted,
}

impl MarketState {
    /// Whether no further ticks will be processed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Closed => "closed",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// State after the tick.
    pub state: MarketState,
    /// Whether the tick produced a usable snapshot.
    pub usable: bool,
    /// Number of candidate signals.
    pub signals: usize,
    /// Orders the sink accepted.
    pub executed: Vec<Order>,
}

impl TickOutcome {
    pub(crate) fn new(state: MarketState) -> Self {
        Self {
            state,
            usable: false,
            signals: 0,
            executed: Vec::new(),
        }
    }
}
