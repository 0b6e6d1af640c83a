use crate::server::{ServerApi, ServerRecord};

/// Latest outcome of polling the status endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SnapshotState {
    /// Nothing received yet.
    #[default]
    Loading,
    /// `None` when the endpoint answered without a `result` array.
    Ready(Option<Vec<ServerRecord>>),
    /// Transport failure; the message is shown instead of the list.
    Failed(String),
}

impl SnapshotState {
    pub fn from_response(response: Result<ServerApi, String>) -> Self {
        match response {
            Ok(api) => SnapshotState::Ready(api.result),
            Err(error) => SnapshotState::Failed(error),
        }
    }

    pub fn servers(&self) -> Option<&[ServerRecord]> {
        match self {
            SnapshotState::Ready(servers) => servers.as_deref(),
            _ => None,
        }
    }
}

/// Numbers poll requests and decides which responses are applied.
///
/// At most one request is outstanding: a tick that finds the previous request
/// still running is skipped, so a slow endpoint is waited for instead of
/// being cancelled. A response is applied only when no newer one has been.
#[derive(Debug, Default)]
pub struct SnapshotFeed {
    issued: u64,
    applied: Option<u64>,
    outstanding: Option<u64>,
}

impl SnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number for a new request, `None` while one is outstanding.
    pub fn next_request(&mut self) -> Option<u64> {
        if self.outstanding.is_some() {
            return None;
        }
        self.issued += 1;
        self.outstanding = Some(self.issued);
        Some(self.issued)
    }

    /// `Some(state)` when the response is the newest seen so far.
    pub fn accept(&mut self, sequence: u64, response: Result<ServerApi, String>) -> Option<SnapshotState> {
        if self.outstanding == Some(sequence) {
            self.outstanding = None;
        }
        if self.applied.is_some_and(|applied| sequence <= applied) {
            return None;
        }
        self.applied = Some(sequence);
        Some(SnapshotState::from_response(response))
    }
}
