//! Search budgets — `spec.md` §4.9's row- and request-level work limits.

use thiserror::Error;

/// Per-query work limits. All four are honored independently; exceeding any
/// one terminates the search with a categorized, reason-coded error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchBudget {
    /// Max states (`extract_min` calls) processed for one source row.
    pub max_states_per_row: usize,
    /// Max labels (`insert`/decrease-key calls) created for one source row.
    pub max_labels_per_row: usize,
    /// Max simultaneous entries the queue may hold for one source row.
    pub max_frontier_per_row: usize,
    /// Max states processed across every row of the request (point-to-point
    /// requests have exactly one row).
    pub max_states_per_request: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_states_per_row: 1_000_000,
            max_labels_per_row: 2_000_000,
            max_frontier_per_row: 500_000,
            max_states_per_request: 4_000_000,
        }
    }
}

/// A point-to-point budget violation, carrying the deterministic reason
/// code `spec.md` §4.9 names.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudgetError {
    #[error("ROW_WORK_EXCEEDED: more than {limit} states processed in this row")]
    RowWorkExceeded { limit: usize },
    #[error("ROW_LABEL_EXCEEDED: more than {limit} labels created in this row")]
    RowLabelExceeded { limit: usize },
    #[error("ROW_FRONTIER_EXCEEDED: frontier grew past {limit} entries in this row")]
    RowFrontierExceeded { limit: usize },
    #[error("REQUEST_WORK_EXCEEDED: more than {limit} states processed across the request")]
    RequestWorkExceeded { limit: usize },
}

impl SearchBudgetError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::RowWorkExceeded { .. } => "ROW_WORK_EXCEEDED",
            Self::RowLabelExceeded { .. } => "ROW_LABEL_EXCEEDED",
            Self::RowFrontierExceeded { .. } => "ROW_FRONTIER_EXCEEDED",
            Self::RequestWorkExceeded { .. } => "REQUEST_WORK_EXCEEDED",
        }
    }
}

/// Matrix-specific budget taxonomy. Point-to-point violations remap
/// verbatim via [`From`]; `SettledExceeded` is the one condition with no
/// point-to-point analogue (too many edges permanently settled while target
/// nodes remain unresolved).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixBudgetError {
    #[error(transparent)]
    Row(#[from] SearchBudgetError),
    #[error("SETTLED_EXCEEDED: more than {limit} edges settled while targets remained unresolved")]
    SettledExceeded { limit: usize },
}

impl MatrixBudgetError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Row(e) => e.reason_code(),
            Self::SettledExceeded { .. } => "SETTLED_EXCEEDED",
        }
    }
}

/// Running counters checked against a [`SearchBudget`] as a search
/// progresses. Not `pub` outside the crate — callers only ever see the
/// categorized error it produces.
pub(crate) struct BudgetTracker {
    budget: SearchBudget,
    states_this_row: usize,
    labels_this_row: usize,
    states_total: usize,
}

impl BudgetTracker {
    pub(crate) fn new(budget: SearchBudget) -> Self {
        Self { budget, states_this_row: 0, labels_this_row: 0, states_total: 0 }
    }

    pub(crate) fn record_state(&mut self) -> Result<(), SearchBudgetError> {
        self.states_this_row += 1;
        self.states_total += 1;
        if self.states_this_row > self.budget.max_states_per_row {
            return Err(SearchBudgetError::RowWorkExceeded { limit: self.budget.max_states_per_row });
        }
        if self.states_total > self.budget.max_states_per_request {
            return Err(SearchBudgetError::RequestWorkExceeded { limit: self.budget.max_states_per_request });
        }
        Ok(())
    }

    pub(crate) fn record_label(&mut self, frontier_len: usize) -> Result<(), SearchBudgetError> {
        self.labels_this_row += 1;
        if self.labels_this_row > self.budget.max_labels_per_row {
            return Err(SearchBudgetError::RowLabelExceeded { limit: self.budget.max_labels_per_row });
        }
        if frontier_len > self.budget.max_frontier_per_row {
            return Err(SearchBudgetError::RowFrontierExceeded { limit: self.budget.max_frontier_per_row });
        }
        Ok(())
    }

    pub(crate) fn states_total(&self) -> usize {
        self.states_total
    }
}
