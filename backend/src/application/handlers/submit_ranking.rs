//! SubmitRanking - Command handler for an uploaded decision table.
//!
//! Validates the request inputs, ranks the alternatives, writes the ranked
//! table to an ephemeral file, and emails it to the requester. The file is
//! removed when the handler returns, whether delivery succeeded or not.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::csv::{parse_decision_matrix, write_ranked_result, CsvWriteError};
use crate::domain::foundation::{DegenerateColumnError, EmailAddress, TopsisError, ValidationError};
use crate::domain::topsis::{tokenize, ImpactVector, TopsisEngine, WeightVector};
use crate::ports::{
    DispatchError, EmailAttachment, EmailDispatcher, ResultEmail, ResultStorage, StorageError,
};

/// Command to rank an uploaded table and email the result.
#[derive(Debug, Clone)]
pub struct SubmitRankingCommand {
    /// Raw bytes of the uploaded CSV file.
    pub upload: Vec<u8>,
    /// Client-supplied file name, for logs only.
    pub upload_name: Option<String>,
    /// Comma-separated weights, e.g. `"1,1,1,2"`.
    pub weights: String,
    /// Comma-separated impacts, e.g. `"+,+,-,+"`.
    pub impacts: String,
    /// Recipient address.
    pub email: String,
    /// Request correlation id, when the transport supplies one.
    pub request_id: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRankingResult {
    pub recipient: EmailAddress,
    pub alternatives: usize,
    pub criteria: usize,
    /// Identifier of the top-ranked alternative.
    pub best: String,
}

/// Errors from processing a submission.
#[derive(Debug, Error)]
pub enum SubmitRankingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DegenerateColumn(#[from] DegenerateColumnError),

    #[error(transparent)]
    Serialization(#[from] CsvWriteError),

    #[error("Failed to store result: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to send email: {0}")]
    Dispatch(#[from] DispatchError),
}

impl From<TopsisError> for SubmitRankingError {
    fn from(err: TopsisError) -> Self {
        match err {
            TopsisError::Validation(e) => SubmitRankingError::Validation(e),
            TopsisError::DegenerateColumn(e) => SubmitRankingError::DegenerateColumn(e),
        }
    }
}

/// Handler for ranking submissions.
pub struct SubmitRankingHandler {
    dispatcher: Arc<dyn EmailDispatcher>,
    storage: Arc<dyn ResultStorage>,
    subject: String,
}

impl SubmitRankingHandler {
    pub fn new(
        dispatcher: Arc<dyn EmailDispatcher>,
        storage: Arc<dyn ResultStorage>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            storage,
            subject: subject.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitRankingCommand,
    ) -> Result<SubmitRankingResult, SubmitRankingError> {
        let request_id = cmd.request_id.as_deref().unwrap_or("-");

        // 1. Recipient
        let recipient = EmailAddress::parse(cmd.email)?;

        // 2. Weights and impacts must pair up before either is interpreted
        let weight_tokens = tokenize(&cmd.weights);
        let impact_tokens = tokenize(&cmd.impacts);
        if weight_tokens.len() != impact_tokens.len() {
            return Err(ValidationError::CountMismatch {
                weights: weight_tokens.len(),
                impacts: impact_tokens.len(),
            }
            .into());
        }
        let impacts = ImpactVector::from_tokens(&impact_tokens)?;
        let weights = WeightVector::from_tokens(&weight_tokens)?;

        // 3. Decision table
        let matrix = parse_decision_matrix(&cmd.upload)?;
        let alternatives = matrix.alternative_count();
        let criteria = matrix.criteria_count();
        tracing::debug!(
            request_id,
            upload = cmd.upload_name.as_deref().unwrap_or("-"),
            alternatives,
            criteria,
            "Parsed decision table"
        );

        // 4. Rank
        let result = TopsisEngine::rank(matrix, &weights, &impacts)?;
        let best = result
            .best()
            .map(|row| row.identifier.to_string())
            .unwrap_or_default();

        // 5. Persist; the guard deletes the file on every return below
        let contents = write_ranked_result(&result)?;
        let stored = self.storage.store(&contents).await?;

        // 6. Deliver
        let email = ResultEmail::ranked_result(
            recipient.clone(),
            self.subject.clone(),
            EmailAttachment::csv(stored.path()),
        );
        if let Err(e) = self.dispatcher.send(email).await {
            tracing::warn!(
                request_id,
                transport = self.dispatcher.transport(),
                recipient_domain = recipient.domain(),
                error = %e,
                "Result email dispatch failed"
            );
            return Err(e.into());
        }

        tracing::info!(
            request_id,
            transport = self.dispatcher.transport(),
            recipient_domain = recipient.domain(),
            alternatives,
            criteria,
            best = %best,
            "Ranking result sent"
        );

        drop(stored);
        Ok(SubmitRankingResult {
            recipient,
            alternatives,
            criteria,
            best,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockEmailDispatcher;
    use crate::adapters::storage::LocalResultStorage;
    use crate::ports::DispatchErrorCode;
    use tempfile::TempDir;

    const PHONES: &str = "\
Model,Price,Storage,Camera,Looks
M1,250,16,12,5
M2,200,16,8,3
M3,300,32,16,4
M4,275,32,8,4
";

    struct Fixture {
        handler: SubmitRankingHandler,
        dispatcher: MockEmailDispatcher,
        output_dir: std::path::PathBuf,
        _temp: TempDir,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("uploads");
        let dispatcher = MockEmailDispatcher::new();
        let handler = SubmitRankingHandler::new(
            Arc::new(dispatcher.clone()),
            Arc::new(LocalResultStorage::new(&output_dir)),
            "TOPSIS Result",
        );
        Fixture {
            handler,
            dispatcher,
            output_dir,
            _temp: temp,
        }
    }

    fn command(weights: &str, impacts: &str, email: &str) -> SubmitRankingCommand {
        SubmitRankingCommand {
            upload: PHONES.as_bytes().to_vec(),
            upload_name: Some("phones.csv".to_string()),
            weights: weights.to_string(),
            impacts: impacts.to_string(),
            email: email.to_string(),
            request_id: None,
        }
    }

    fn leftover_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn ranks_and_emails_result() {
        let f = fixture();

        let result = f
            .handler
            .handle(command("1,1,1,1", "+,+,+,-", "jane@example.org"))
            .await
            .unwrap();

        assert_eq!(result.recipient.as_str(), "jane@example.org");
        assert_eq!(result.alternatives, 4);
        assert_eq!(result.criteria, 4);
        assert_eq!(result.best, "M3");

        let sent = f.dispatcher.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email.subject, "TOPSIS Result");
        assert_eq!(sent[0].email.attachment.filename, "result.csv");
        let csv = String::from_utf8(sent[0].attachment.clone()).unwrap();
        assert!(csv.starts_with("Model,Price,Storage,Camera,Looks,Topsis Score,Rank\n"));
        assert_eq!(csv.lines().count(), 5);
    }

    #[tokio::test]
    async fn result_file_removed_after_success() {
        let f = fixture();

        f.handler
            .handle(command("1,1,1,1", "+,+,+,-", "jane@example.org"))
            .await
            .unwrap();

        assert_eq!(leftover_files(&f.output_dir), 0);
    }

    #[tokio::test]
    async fn result_file_removed_after_failed_dispatch() {
        let f = fixture();
        f.dispatcher.set_error(DispatchError::transport("relay down"));

        let err = f
            .handler
            .handle(command("1,1,1,1", "+,+,+,-", "jane@example.org"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Dispatch(DispatchError {
                code: DispatchErrorCode::Transport,
                ..
            })
        ));
        assert_eq!(leftover_files(&f.output_dir), 0);
    }

    #[tokio::test]
    async fn invalid_email_is_checked_first() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("1,1", "+,+,+,x", "not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Validation(ValidationError::InvalidEmail { .. })
        ));
        assert_eq!(f.dispatcher.sent_count(), 0);
    }

    #[tokio::test]
    async fn count_mismatch_is_checked_before_tokens() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("1,x", "+,+,?", "jane@example.org"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Validation(ValidationError::CountMismatch {
                weights: 2,
                impacts: 3
            })
        ));
    }

    #[tokio::test]
    async fn impacts_are_checked_before_weights() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("1,x,1,1", "+,*,+,-", "jane@example.org"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Validation(ValidationError::InvalidImpact { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_weight_is_rejected() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("1,0,1,1", "+,+,+,-", "jane@example.org"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Validation(ValidationError::InvalidWeight { .. })
        ));
    }

    #[tokio::test]
    async fn whitespace_and_empty_tokens_are_ignored() {
        let f = fixture();

        let result = f
            .handler
            .handle(command(" 1, 1 ,,1,1 ", "+ ,+,+, -,", "jane@example.org"))
            .await
            .unwrap();

        assert_eq!(result.best, "M3");
    }

    #[tokio::test]
    async fn criteria_count_must_match_weights() {
        let f = fixture();

        let err = f
            .handler
            .handle(command("1,1,1", "+,+,-", "jane@example.org"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitRankingError::Validation(ValidationError::DimensionMismatch { .. })
        ));
        assert_eq!(leftover_files(&f.output_dir), 0);
    }

    #[tokio::test]
    async fn degenerate_column_is_reported() {
        let f = fixture();
        let mut cmd = command("1,1", "+,+", "jane@example.org");
        cmd.upload = b"Id,A,B\nx,0,1\ny,0,2\n".to_vec();

        let err = f.handler.handle(cmd).await.unwrap_err();

        match err {
            SubmitRankingError::DegenerateColumn(e) => assert_eq!(e.column, "A"),
            other => panic!("expected degenerate column, got {other:?}"),
        }
        assert_eq!(f.dispatcher.sent_count(), 0);
    }

    #[tokio::test]
    async fn malformed_upload_is_a_validation_error() {
        let f = fixture();
        let mut cmd = command("1,1", "+,+", "jane@example.org");
        cmd.upload = b"Id,A,B\nx,1\n".to_vec();

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, SubmitRankingError::Validation(_)));
    }
}
