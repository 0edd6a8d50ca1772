use std::fmt;

/// Classified failure of one time fetch.
///
/// Every failure crosses the fetch boundary as one of these values carrying a
/// human-readable message; no raw transport or parser error type leaks
/// through. Callers decide whether to retry, display the message, or fall
/// back to a previous reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced an HTTP response: no connectivity, DNS
    /// failure, refused connection, timeout, or the body could not be read.
    Transport(String),
    /// The server answered with a non-2xx status.
    Server { status: u16, message: String },
    /// The body was not the expected XML document: malformed markup, a
    /// required element missing, or a required element empty.
    Parse(String),
}

impl FetchError {
    /// Builds the `Server` variant with the standard message for `status`.
    pub fn server(status: u16) -> Self {
        FetchError::Server {
            status,
            message: server_message(status),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    pub fn is_server(&self) -> bool {
        matches!(self, FetchError::Server { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse(_))
    }
}

/// Message for a non-2xx status. 404, 500 and 503 get distinct wording;
/// everything else falls back to a generic status-annotated message.
fn server_message(status: u16) -> String {
    match status {
        404 => "time service endpoint not found (404)".to_string(),
        500 => "time service internal error (500)".to_string(),
        503 => "time service temporarily unavailable (503)".to_string(),
        other => format!("time service returned status {other}"),
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(cause) => write!(f, "transport failure: {cause}"),
            FetchError::Server { message, .. } => f.write_str(message),
            FetchError::Parse(cause) => write!(f, "invalid time response: {cause}"),
        }
    }
}

impl std::error::Error for FetchError {}
