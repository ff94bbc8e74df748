// Per-user summary row and the delta a single transaction contributes to it.
//
// Responsibilities
// - Map a transaction to its contribution: Sale to total_revenue, Purchase to cogs,
//   Credit to trapped_capital, anything else to nothing.
// - Add a delta onto a row without partially applying it.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::modules::user_summaries::core::transaction::{TransactionEvent, TransactionType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryDelta {
    pub total_revenue: Decimal,
    pub cogs: Decimal,
    pub trapped_capital: Decimal,
}

impl SummaryDelta {
    pub fn for_transaction(transaction_type: &TransactionType, amount: Decimal) -> Self {
        match transaction_type {
            TransactionType::Sale => Self {
                total_revenue: amount,
                ..Self::default()
            },
            TransactionType::Purchase => Self {
                cogs: amount,
                ..Self::default()
            },
            TransactionType::Credit => Self {
                trapped_capital: amount,
                ..Self::default()
            },
            TransactionType::Other(_) => Self::default(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total_revenue.is_zero() && self.cogs.is_zero() && self.trapped_capital.is_zero()
    }
}

impl From<&TransactionEvent> for SummaryDelta {
    fn from(event: &TransactionEvent) -> Self {
        Self::for_transaction(&event.transaction_type, event.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user_id: String,
    pub total_revenue: Decimal,
    pub cogs: Decimal,
    pub trapped_capital: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Textual `last_updated` as persisted by stores: ISO-8601, UTC, microseconds.
pub fn format_last_updated(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A delta would push a field past the representable decimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOverflow;

impl UserSummary {
    /// Row as it exists before its first increment: every field zero.
    pub fn empty(user_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            total_revenue: Decimal::ZERO,
            cogs: Decimal::ZERO,
            trapped_capital: Decimal::ZERO,
            last_updated: at,
        }
    }

    /// All-or-nothing: on overflow the row is left untouched.
    pub fn apply(&mut self, delta: &SummaryDelta, at: DateTime<Utc>) -> Result<(), SummaryOverflow> {
        let total_revenue = self
            .total_revenue
            .checked_add(delta.total_revenue)
            .ok_or(SummaryOverflow)?;
        let cogs = self.cogs.checked_add(delta.cogs).ok_or(SummaryOverflow)?;
        let trapped_capital = self
            .trapped_capital
            .checked_add(delta.trapped_capital)
            .ok_or(SummaryOverflow)?;

        self.total_revenue = total_revenue;
        self.cogs = cogs;
        self.trapped_capital = trapped_capital;
        self.last_updated = at;
        Ok(())
    }
}
