//! Delivery dispatcher: per-target fan-out with failure isolation.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing;

use crate::domain::entities::notification::{
    CaseEvent, DeliveryAttempt, DeliveryOutcome, DeliveryReport, NotificationTarget,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::account_directory::AccountDirectory;
use crate::repositories::case_repository::CaseRepository;

use super::composer::MessageComposer;
use super::config::DispatchConfig;
use super::resolver::RecipientResolver;
use super::traits::DeliveryProvider;

/// Fans one event out to every resolved target, one independent delivery
/// attempt each.
///
/// The single most important property here: no attempt's outcome ever
/// affects another attempt in the same batch. A provider error, a timeout
/// or a missing endpoint is recorded for that target and the loop moves on.
/// Only resolution itself (a storage read) can fail the whole operation.
pub struct DeliveryDispatcher<R, D, P>
where
    R: CaseRepository + 'static,
    D: AccountDirectory + 'static,
    P: DeliveryProvider + 'static,
{
    resolver: RecipientResolver<R, D>,
    composer: MessageComposer,
    provider: Arc<P>,
    config: DispatchConfig,
}

impl<R, D, P> DeliveryDispatcher<R, D, P>
where
    R: CaseRepository + 'static,
    D: AccountDirectory + 'static,
    P: DeliveryProvider + 'static,
{
    pub fn new(resolver: RecipientResolver<R, D>, provider: Arc<P>, config: DispatchConfig) -> Self {
        Self {
            resolver,
            composer: MessageComposer::new(),
            provider,
            config,
        }
    }

    /// Resolve, compose and deliver; return the per-target report.
    ///
    /// Callers invoke this *after* committing the state change that
    /// triggered the event and treat that change as final regardless of the
    /// report: notification is a side effect, not part of the transaction's
    /// success criteria. No attempt is retried here; a failed outcome is
    /// terminal for that attempt.
    ///
    /// The batch runs in its own spawned task and always runs to completion,
    /// report generation included. A caller that goes away mid-flight (a
    /// cancelled request) merely detaches; it never aborts in-flight
    /// deliveries for an already-committed state change.
    pub async fn dispatch(&self, case_id: i64, event: &CaseEvent) -> DomainResult<DeliveryReport> {
        let resolver = self.resolver.clone();
        let composer = self.composer.clone();
        let provider = Arc::clone(&self.provider);
        let config = self.config.clone();
        let event = event.clone();

        let batch = tokio::spawn(async move {
            Self::run_batch(resolver, composer, provider, config, case_id, event).await
        });

        match batch.await {
            Ok(result) => result,
            Err(join_error) => Err(DomainError::Internal {
                message: format!("dispatch task failed: {}", join_error),
            }),
        }
    }

    async fn run_batch(
        resolver: RecipientResolver<R, D>,
        composer: MessageComposer,
        provider: Arc<P>,
        config: DispatchConfig,
        case_id: i64,
        event: CaseEvent,
    ) -> DomainResult<DeliveryReport> {
        let resolved = resolver.resolve(case_id, &event).await?;

        if resolved.targets.is_empty() {
            tracing::info!(
                case_id,
                event = event.type_tag(),
                "No notification targets resolved for event"
            );
            return Ok(DeliveryReport {
                case_id,
                event_type: event.type_tag().to_string(),
                attempts: Vec::new(),
            });
        }

        // Targets are provably independent (no shared mutable state), so the
        // attempts run concurrently; within one dispatch no ordering between
        // targets is guaranteed or required
        let mut set: JoinSet<DeliveryAttempt> = JoinSet::new();
        let mut in_flight: HashMap<tokio::task::Id, NotificationTarget> = HashMap::new();

        for target in resolved.targets {
            let message = composer.compose(&event, target.role, resolved.case.as_ref());
            let provider = Arc::clone(&provider);
            let timeout = config.send_timeout;
            let task_target = target.clone();

            let handle = set.spawn(async move {
                let outcome = match task_target.endpoint.as_deref() {
                    // No registered channel is a normal state, not a failure
                    None => DeliveryOutcome::Skipped,
                    Some(endpoint) => {
                        match tokio::time::timeout(timeout, provider.send(endpoint, &message)).await
                        {
                            Ok(Ok(message_id)) => DeliveryOutcome::Sent { message_id },
                            Ok(Err(reason)) => DeliveryOutcome::Failed { reason },
                            Err(_) => DeliveryOutcome::Failed {
                                reason: "timeout".to_string(),
                            },
                        }
                    }
                };
                DeliveryAttempt {
                    target: task_target,
                    outcome,
                }
            });
            in_flight.insert(handle.id(), target);
        }

        let mut attempts = Vec::with_capacity(in_flight.len());
        while let Some(joined) = set.join_next_with_id().await {
            let attempt = match joined {
                Ok((id, attempt)) => {
                    in_flight.remove(&id);
                    attempt
                }
                // A panicking provider still only costs its own target
                Err(join_error) => {
                    let target = in_flight.remove(&join_error.id());
                    tracing::error!(
                        case_id,
                        error = %join_error,
                        "Delivery task failed abnormally"
                    );
                    match target {
                        Some(target) => DeliveryAttempt {
                            target,
                            outcome: DeliveryOutcome::Failed {
                                reason: format!("delivery task failed: {}", join_error),
                            },
                        },
                        None => continue,
                    }
                }
            };

            match &attempt.outcome {
                DeliveryOutcome::Sent { message_id } => tracing::debug!(
                    case_id,
                    person_id = %attempt.target.person_id,
                    message_id = %message_id,
                    "Notification delivered"
                ),
                DeliveryOutcome::Skipped => tracing::debug!(
                    case_id,
                    person_id = %attempt.target.person_id,
                    "Target has no registered channel endpoint, skipped"
                ),
                DeliveryOutcome::Failed { reason } => tracing::warn!(
                    case_id,
                    person_id = %attempt.target.person_id,
                    reason = %reason,
                    "Notification delivery failed"
                ),
            }
            attempts.push(attempt);
        }

        let report = DeliveryReport {
            case_id,
            event_type: event.type_tag().to_string(),
            attempts,
        };

        tracing::info!(
            case_id,
            event = event.type_tag(),
            provider = provider.provider_name(),
            sent = report.sent(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Notification fan-out complete"
        );

        Ok(report)
    }
}
