//! Submission path for outgoing chat messages.
//!
//! Every outgoing message passes the payload gate first; nothing is
//! emitted for a rejected payload. Accepted submissions are tracked
//! until the server acknowledges receipt or the ack deadline passes.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::protocol::{
    self,
    payload::{self, ValidationError},
    request::{ChatMessageRequest, ComposeForm},
    CorrelationId,
};
use crate::transport::contracts::{ClientSocket, TransportError};

/// Result of a submission attempt that reached the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request went out; the correlation id identifies the pending
    /// acknowledgment.
    Submitted(CorrelationId),
    /// The gate rejected the payload. Nothing was emitted.
    Rejected(ValidationError),
}

/// Tracks in-flight submissions and their acknowledgment deadlines.
///
/// An acknowledgment confirms receipt only; the outcome of the save
/// arrives later through the broadcast channel.
#[derive(Debug)]
pub struct MessageSubmitter {
    next_correlation: u64,
    pending: HashMap<CorrelationId, DateTime<Utc>>,
    ack_timeout: Duration,
}

impl MessageSubmitter {
    pub fn new(ack_timeout: Duration) -> Self {
        Self {
            next_correlation: 0,
            pending: HashMap::new(),
            ack_timeout,
        }
    }

    /// Validates the form and, if it passes, emits `save_chat_request`
    /// with a fresh correlation id.
    pub fn submit(
        &mut self,
        socket: &mut dyn ClientSocket,
        form: &ComposeForm,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, TransportError> {
        let request = ChatMessageRequest::from_form(form);
        let value = match serde_json::to_value(&request) {
            Ok(value) => value,
            Err(error) => {
                return Ok(SubmitOutcome::Rejected(ValidationError::Serialize(
                    error.to_string(),
                )))
            }
        };

        self.submit_payload(socket, &value, now)
    }

    /// Gate-then-emit step shared by every submission path. A rejected
    /// payload never reaches the socket and leaves nothing pending.
    fn submit_payload(
        &mut self,
        socket: &mut dyn ClientSocket,
        value: &Value,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, TransportError> {
        let serialized = match payload::validate_chat_request(value) {
            Ok(serialized) => serialized,
            Err(error) => {
                tracing::error!(error = %error, "chat request rejected before emission");
                return Ok(SubmitOutcome::Rejected(error));
            }
        };

        let correlation = self.allocate_correlation();
        socket.emit_with_ack(protocol::SAVE_CHAT_REQUEST, serialized.as_str(), correlation)?;
        self.pending.insert(correlation, now + self.ack_timeout);

        tracing::info!(correlation = %correlation, "chat request submitted");
        Ok(SubmitOutcome::Submitted(correlation))
    }

    /// Marks a pending submission as received by the server. Returns
    /// false for unknown or already-settled correlation ids.
    pub fn acknowledge(&mut self, correlation: CorrelationId) -> bool {
        self.pending.remove(&correlation).is_some()
    }

    /// Drops every pending submission whose deadline has passed and
    /// returns their correlation ids.
    pub fn expire_overdue(&mut self, now: DateTime<Utc>) -> Vec<CorrelationId> {
        let overdue: Vec<CorrelationId> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(correlation, _)| *correlation)
            .collect();

        for correlation in &overdue {
            self.pending.remove(correlation);
        }

        overdue
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn allocate_correlation(&mut self) -> CorrelationId {
        self.next_correlation += 1;
        CorrelationId(self.next_correlation)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[derive(Default)]
    struct RecordingSocket {
        emitted: Vec<(String, String, Option<CorrelationId>)>,
    }

    impl ClientSocket for RecordingSocket {
        fn emit(&mut self, event: &str, payload: &str) -> Result<(), TransportError> {
            self.emitted.push((event.to_owned(), payload.to_owned(), None));
            Ok(())
        }

        fn emit_with_ack(
            &mut self,
            event: &str,
            payload: &str,
            correlation: CorrelationId,
        ) -> Result<(), TransportError> {
            self.emitted
                .push((event.to_owned(), payload.to_owned(), Some(correlation)));
            Ok(())
        }
    }

    fn form() -> ComposeForm {
        ComposeForm {
            to_username: "bob".to_owned(),
            from_username: "edet".to_owned(),
            text: "hi".to_owned(),
            attachments: vec![],
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).single().unwrap()
    }

    #[test]
    fn valid_form_is_emitted_with_a_correlation_id() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        let outcome = submitter
            .submit(&mut socket, &form(), at(0))
            .expect("submit must succeed");

        assert_eq!(outcome, SubmitOutcome::Submitted(CorrelationId(1)));
        assert_eq!(socket.emitted.len(), 1);
        assert_eq!(socket.emitted[0].0, "save_chat_request");
        assert!(socket.emitted[0].1.contains("\"text\":\"hi\""));
        assert_eq!(socket.emitted[0].2, Some(CorrelationId(1)));
        assert!(submitter.has_pending());
    }

    #[test]
    fn correlation_ids_are_unique_per_submission() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        let first = submitter.submit(&mut socket, &form(), at(0)).unwrap();
        let second = submitter.submit(&mut socket, &form(), at(1)).unwrap();

        assert_eq!(first, SubmitOutcome::Submitted(CorrelationId(1)));
        assert_eq!(second, SubmitOutcome::Submitted(CorrelationId(2)));
    }

    #[test]
    fn acknowledge_settles_a_pending_submission_once() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        submitter.submit(&mut socket, &form(), at(0)).unwrap();

        assert!(submitter.acknowledge(CorrelationId(1)));
        assert!(!submitter.acknowledge(CorrelationId(1)));
        assert!(!submitter.has_pending());
    }

    #[test]
    fn unknown_acknowledgment_is_reported() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));

        assert!(!submitter.acknowledge(CorrelationId(99)));
    }

    #[test]
    fn overdue_submissions_expire_at_the_deadline() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        submitter.submit(&mut socket, &form(), at(0)).unwrap();

        assert!(submitter.expire_overdue(at(9)).is_empty());
        assert_eq!(submitter.expire_overdue(at(10)), vec![CorrelationId(1)]);
        assert!(!submitter.has_pending());
    }

    #[test]
    fn expired_submission_cannot_be_acknowledged_later() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        submitter.submit(&mut socket, &form(), at(0)).unwrap();
        submitter.expire_overdue(at(30));

        assert!(!submitter.acknowledge(CorrelationId(1)));
    }

    #[test]
    fn rejected_payload_emits_nothing_and_leaves_nothing_pending() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();
        let broken = serde_json::json!({ "to_username": "bob" });

        let outcome = submitter
            .submit_payload(&mut socket, &broken, at(0))
            .expect("rejection is not a transport failure");

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::MissingField("from_username"))
        );
        assert!(socket.emitted.is_empty());
        assert!(!submitter.has_pending());
    }

    #[test]
    fn rejected_payload_does_not_consume_a_correlation_id() {
        let mut submitter = MessageSubmitter::new(Duration::seconds(10));
        let mut socket = RecordingSocket::default();

        let _ = submitter
            .submit_payload(&mut socket, &serde_json::json!([1, 2, 3]), at(0))
            .expect("rejection is not a transport failure");
        let accepted = submitter.submit(&mut socket, &form(), at(1)).unwrap();

        assert_eq!(accepted, SubmitOutcome::Submitted(CorrelationId(1)));
    }
}
