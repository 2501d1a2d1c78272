use crate::executor::{Completion, ExecError};
use serde_json::Value;

/// Lifecycle of one endpoint's simulated call.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExecutionResult {
    #[default]
    Idle,
    Executing,
    Settled {
        response: Value,
        status: u16,
        latency_ms: u64,
    },
    Failed {
        error: ExecError,
    },
}

impl ExecutionResult {
    pub fn is_executing(&self) -> bool {
        matches!(self, ExecutionResult::Executing)
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            ExecutionResult::Settled { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ExecutionResult::Settled { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn latency_ms(&self) -> Option<u64> {
        match self {
            ExecutionResult::Settled { latency_ms, .. } => Some(*latency_ms),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExecError> {
        match self {
            ExecutionResult::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Moves to `Executing`, dropping any previous outcome.
    /// Returns false when a call is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_executing() {
            return false;
        }
        *self = ExecutionResult::Executing;
        true
    }

    /// Applies a completion. Ignored unless a call is in flight.
    pub fn settle(&mut self, outcome: Result<Completion, ExecError>) -> bool {
        if !self.is_executing() {
            return false;
        }
        *self = match outcome {
            Ok(done) => ExecutionResult::Settled {
                response: done.response,
                status: done.status,
                latency_ms: done.latency_ms,
            },
            Err(error) => ExecutionResult::Failed { error },
        };
        true
    }
}

/// One slot per catalog entry, indexed like the catalog.
#[derive(Clone, Debug)]
pub struct ExecutionTable {
    slots: Vec<ExecutionResult>,
}

impl ExecutionTable {
    pub fn new(len: usize) -> Self {
        ExecutionTable {
            slots: vec![ExecutionResult::Idle; len],
        }
    }

    pub fn get(&self, index: usize) -> Option<&ExecutionResult> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ExecutionResult> {
        self.slots.get_mut(index)
    }

    pub fn in_flight(&self) -> usize {
        self.slots.iter().filter(|s| s.is_executing()).count()
    }
}
