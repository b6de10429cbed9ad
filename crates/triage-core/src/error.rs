/// Failure reported by the remote alert/case store.
///
/// `status` is the HTTP status when one was received; transport-level
/// failures (connection refused, timeout) carry no status. This is the one
/// error shape every component surfaces to the notifier; richer per-crate
/// errors wrap it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub status: Option<u16>,
    pub body: String,
}

impl RemoteError {
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn transport(body: impl Into<String>) -> Self {
        Self {
            status: None,
            body: body.into(),
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "remote store error ({}): {}", status, self.body),
            None => write!(f, "remote store error (transport): {}", self.body),
        }
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_status() {
        let err = RemoteError::with_status(500, "boom");
        assert_eq!(err.to_string(), "remote store error (500): boom");

        let err = RemoteError::transport("connection refused");
        assert_eq!(
            err.to_string(),
            "remote store error (transport): connection refused"
        );
    }
}
