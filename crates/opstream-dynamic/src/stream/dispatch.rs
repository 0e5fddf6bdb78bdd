//! Predictive dispatch: turning a call into a pending step.

use std::sync::Arc;

use opstream_core::types::join_types;
use opstream_core::{Result, SemanticType, StreamError};
use tracing::debug;

use crate::registry::{Candidate, Snapshot};
use crate::tag::tag_all;
use crate::value::Value;

/// A call recorded on a stream, waiting for resolution.
#[derive(Debug, Clone)]
pub struct PendingStep {
    operation: Arc<str>,
    candidates: Vec<Candidate>,
    args: Vec<Value>,
}

impl PendingStep {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Candidates that accepted the predicted argument types.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Arguments captured at call time, receiver excluded.
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Filters the candidates of `name` against the predicted receiver type and
/// the tags of `args`, returning the step and the next predicted type.
///
/// Surviving candidates that disagree on their return type widen the
/// prediction to `Any`.
pub(crate) fn plan_step(
    snapshot: &Snapshot,
    predicted: SemanticType,
    name: &str,
    args: Vec<Value>,
) -> Result<(PendingStep, SemanticType)> {
    let candidates = snapshot
        .candidates(name)
        .ok_or_else(|| StreamError::UnknownOperation(name.to_string()))?;

    let arg_types = tag_all(predicted, &args);
    let surviving: Vec<Candidate> = candidates
        .iter()
        .filter(|candidate| candidate.accepts(&arg_types))
        .cloned()
        .collect();

    let Some(next) = surviving
        .iter()
        .map(Candidate::returns)
        .reduce(SemanticType::merge)
    else {
        return Err(StreamError::WrongOperationArgs {
            operation: name.to_string(),
            args: arg_types,
        });
    };

    debug!(
        event = "step_appended",
        operation = name,
        arg_types = %join_types(&arg_types),
        candidates = surviving.len() as u64,
        predicted = %next,
    );

    let step = PendingStep {
        operation: Arc::from(name),
        candidates: surviving,
        args,
    };
    Ok((step, next))
}
