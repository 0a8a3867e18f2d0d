use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("background task failed")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no display target registered as `{primary}` or `{fallback}`")]
    TargetNotFound { primary: String, fallback: String },
    #[error("notifier requires a running tokio runtime")]
    NoRuntime,
    #[error("failed to render notification")]
    Render {
        #[source]
        source: std::io::Error,
    },
    #[error("display target lock poisoned")]
    Poisoned,
    #[error("notification backend failed: {0}")]
    Backend(String),
}

impl From<std::io::Error> for NotifyError {
    fn from(source: std::io::Error) -> Self {
        Self::Render { source }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::Task { source }
    }
}

impl Error {
    pub const fn is_target_not_found(&self) -> bool {
        matches!(self, Self::Notify(NotifyError::TargetNotFound { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, NotifyError};
    use std::error::Error as StdError;

    #[tokio::test]
    async fn aborted_task_is_reported_as_task_failure() {
        let task = tokio::spawn(std::future::pending::<()>());
        task.abort();
        let join_err = match task.await {
            Ok(()) => panic!("aborted task should not complete"),
            Err(err) => err,
        };
        let err = Error::from(join_err);
        assert!(matches!(err, Error::Task { .. }));
        assert_eq!(err.to_string(), "background task failed");
        assert!(err.source().is_some());
        assert!(!err.is_target_not_found());
    }

    #[test]
    fn target_not_found_is_recognised() {
        let err = Error::from(NotifyError::TargetNotFound {
            primary: "message".to_string(),
            fallback: "rental-message".to_string(),
        });
        assert!(err.is_target_not_found());
    }
}
