use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of rows requested per page
pub const DEFAULT_ROW_LIMIT: u32 = 10;

/// Error thrown when a [`TableQuery`] violates its invariants
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableQueryError {
    #[error("limit must be greater than zero")]
    ZeroLimit,
    #[error("index position must be at least 1, got {0}")]
    InvalidIndexPosition(u32),
    #[error("`{0}` must not be empty")]
    MissingField(&'static str),
}

/// Parameters of a paged `get_table_rows` read.
///
/// ```
/// use antelope_core::types::TableQuery;
///
/// let query = TableQuery::new("eosio.token", "alice", "accounts").limit(20).show_payer(true);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    pub json: bool,
    pub code: String,
    pub scope: String,
    pub table: String,
    pub lower_bound: String,
    pub upper_bound: String,
    /// 1 is the primary index, 2 the first secondary index and so on
    pub index_position: u32,
    pub key_type: String,
    pub limit: u32,
    pub reverse: bool,
    pub show_payer: bool,
}

impl TableQuery {
    /// Creates a query for the first page of `code`'s `table` in `scope`
    pub fn new(code: impl Into<String>, scope: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            json: true,
            code: code.into(),
            scope: scope.into(),
            table: table.into(),
            lower_bound: String::new(),
            upper_bound: String::new(),
            index_position: 1,
            key_type: String::new(),
            limit: DEFAULT_ROW_LIMIT,
            reverse: false,
            show_payer: false,
        }
    }

    // Builder pattern helpers

    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn lower_bound(mut self, bound: impl Into<String>) -> Self {
        self.lower_bound = bound.into();
        self
    }

    #[must_use]
    pub fn upper_bound(mut self, bound: impl Into<String>) -> Self {
        self.upper_bound = bound.into();
        self
    }

    /// Selects a secondary index together with its key type, e.g. `(2, "i64")`
    #[must_use]
    pub fn index(mut self, position: u32, key_type: impl Into<String>) -> Self {
        self.index_position = position;
        self.key_type = key_type.into();
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub fn show_payer(mut self, show_payer: bool) -> Self {
        self.show_payer = show_payer;
        self
    }

    /// The query for the page following `page`, if there is one
    pub fn next_page(&self, page: &RowPage) -> Option<Self> {
        let next_key = page.next_key.as_ref().filter(|key| page.more && !key.is_empty())?;
        let mut next = self.clone();
        if self.reverse {
            next.upper_bound = next_key.clone();
        } else {
            next.lower_bound = next_key.clone();
        }
        Some(next)
    }

    /// Checks the query's invariants
    pub fn validate(&self) -> Result<(), TableQueryError> {
        if self.limit == 0 {
            return Err(TableQueryError::ZeroLimit)
        }
        if self.index_position < 1 {
            return Err(TableQueryError::InvalidIndexPosition(self.index_position))
        }
        for (field, value) in [("code", &self.code), ("scope", &self.scope), ("table", &self.table)] {
            if value.is_empty() {
                return Err(TableQueryError::MissingField(field))
            }
        }
        Ok(())
    }
}

/// One page of table rows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPage {
    pub rows: Vec<serde_json::Value>,
    /// Whether a further page exists
    pub more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
}

/// A row annotated with the account paying for its storage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerRow {
    pub data: serde_json::Value,
    pub payer: String,
}

impl RowPage {
    /// Payer annotations of the rows, present when the query set `show_payer`. Rows without
    /// an annotation are skipped.
    pub fn payer_rows(&self) -> Vec<PayerRow> {
        self.rows.iter().filter_map(|row| serde_json::from_value(row.clone()).ok()).collect()
    }
}
