/// Result of a single backend exchange, classified for the orchestrator.
///
/// Deliberately not a `Result`: every variant is an expected outcome that the
/// caller matches on to pick a message.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome<T> {
    Ok(T),
    /// The backend answered but reported `success: false`.
    ServerRejected { message: Option<String> },
    /// No such route (HTTP 404).
    NotFound,
    /// The connection could not be established.
    Unreachable { host: String, port: u16 },
    /// Any other transport or decoding fault.
    Unknown { detail: String },
}

/// Discriminant of a `CallOutcome`, handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    ServerRejected,
    NotFound,
    Unreachable,
    Unknown,
}

impl<T> CallOutcome<T> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            CallOutcome::Ok(_) => OutcomeKind::Ok,
            CallOutcome::ServerRejected { .. } => OutcomeKind::ServerRejected,
            CallOutcome::NotFound => OutcomeKind::NotFound,
            CallOutcome::Unreachable { .. } => OutcomeKind::Unreachable,
            CallOutcome::Unknown { .. } => OutcomeKind::Unknown,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallOutcome<U> {
        match self {
            CallOutcome::Ok(value) => CallOutcome::Ok(f(value)),
            CallOutcome::ServerRejected { message } => CallOutcome::ServerRejected { message },
            CallOutcome::NotFound => CallOutcome::NotFound,
            CallOutcome::Unreachable { host, port } => CallOutcome::Unreachable { host, port },
            CallOutcome::Unknown { detail } => CallOutcome::Unknown { detail },
        }
    }
}
