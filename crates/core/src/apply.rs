// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::TransitionResult;
use cageside_audit::{Action, Actor, AuditEvent, Cause, CounterSnapshot};
use cageside_domain::{Counter, PointWeights, Reputation, require_user, validate_user_absent};

/// Applies a command to a user's current record, producing the new record
/// and its audit event.
///
/// This function is pure. It does not read or write storage; the caller
/// supplies the current record and is responsible for committing the result
/// atomically.
///
/// # Arguments
///
/// * `current` - The user's record as read inside the commit, if any
/// * `command` - The command to apply
/// * `weights` - Points awarded per event kind
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A `RegisterUser` targets an existing user
/// - An `ApplyEvent` targets an unknown user
pub fn apply(
    current: Option<&Reputation>,
    command: Command,
    weights: &PointWeights,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RegisterUser {
            user_id,
            username,
            role,
        } => {
            validate_user_absent(current, &user_id)?;

            let after: Reputation = Reputation::new(user_id.clone(), username, role);
            let action: Action = Action::new(
                String::from("RegisterUser"),
                Some(format!(
                    "Registered '{}' as {}",
                    after.username(),
                    after.role()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                None,
                CounterSnapshot::of(&after),
                user_id,
            );

            Ok(TransitionResult {
                before: None,
                after,
                audit_event,
            })
        }
        Command::ApplyEvent {
            target,
            kind,
            delta,
        } => {
            let before: &Reputation = require_user(current, &target)?;
            let after: Reputation = before.with_event(kind, delta, weights);

            let counter: Counter = kind.counter();
            let action: Action = Action::new(
                String::from(kind.as_str()),
                Some(format!(
                    "{delta} {counter}: {} -> {}, points {} -> {}",
                    before.counters().get(counter),
                    after.counters().get(counter),
                    before.points(),
                    after.points()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                Some(CounterSnapshot::of(before)),
                CounterSnapshot::of(&after),
                target,
            );

            Ok(TransitionResult {
                before: Some(before.clone()),
                after,
                audit_event,
            })
        }
    }
}
