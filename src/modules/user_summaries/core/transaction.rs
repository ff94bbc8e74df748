use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Modified,
    Removed,
    Unknown,
}

impl From<&str> for EventKind {
    fn from(event_name: &str) -> Self {
        match event_name {
            "INSERT" => EventKind::Created,
            "MODIFY" => EventKind::Modified,
            "REMOVE" => EventKind::Removed,
            _ => EventKind::Unknown,
        }
    }
}

/// Ledger transaction type. Matching is exact; anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Sale,
    Purchase,
    Credit,
    Other(String),
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        match value {
            "Sale" => TransactionType::Sale,
            "Purchase" => TransactionType::Purchase,
            "Credit" => TransactionType::Credit,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEvent {
    pub user_id: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: String,
}
