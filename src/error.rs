#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema creation failed: {0}")]
    Schema(String),

    // The field is deliberately not called `source`: thiserror reserves
    // that name for the error's cause chain.
    #[error("Source '{name}' failed: {reason}")]
    Source { name: String, reason: String },
}

impl PipelineError {
    /// Connection and schema errors abort the run; everything else is
    /// recovered per source or per table and recorded in the run report.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::Schema(_)
                | PipelineError::Database(
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_carry_their_origin_and_are_recoverable() {
        let err = PipelineError::Source {
            name: "report".into(),
            reason: "disk full".into(),
        };
        assert_eq!(err.to_string(), "Source 'report' failed: disk full");
        assert!(!err.is_fatal());
    }

    #[test]
    fn schema_errors_are_fatal() {
        assert!(PipelineError::Schema("relation exists".into()).is_fatal());
    }
}
