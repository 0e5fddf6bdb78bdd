//! Resolution: running pending steps against actual values.

use std::sync::Arc;

use opstream_core::types::join_types;
use opstream_core::{Result, StreamError};
use tracing::{trace, warn};

use crate::stream::dispatch::PendingStep;
use crate::tag::{tag, tag_all};
use crate::value::Value;

/// Applies `steps` in order, starting from `source`.
///
/// Each step re-checks its candidates against the concrete tags of the
/// current value and arguments, then invokes the first one that accepts
/// them. The first step without a match aborts the whole resolution.
pub(crate) fn resolve(source: &Value, steps: &[Arc<PendingStep>]) -> Result<Value> {
    let mut current = source.clone();

    for (index, step) in steps.iter().enumerate() {
        let actual = tag_all(tag(&current), step.args());

        let Some(candidate) = step
            .candidates()
            .iter()
            .find(|candidate| candidate.accepts(&actual))
        else {
            warn!(
                event = "wrong_transformation_args",
                operation = step.operation(),
                step = index as u64,
                arg_types = %join_types(&actual),
            );
            return Err(StreamError::WrongTransformationArgs {
                operation: step.operation().to_string(),
                args: actual,
                expected: step
                    .candidates()
                    .iter()
                    .map(|candidate| candidate.params().to_vec())
                    .collect(),
            });
        };

        trace!(
            event = "step_resolved",
            operation = step.operation(),
            step = index as u64,
            arg_types = %join_types(&actual),
            signature = %candidate.signature(),
        );

        let mut call_args = Vec::with_capacity(step.args().len() + 1);
        call_args.push(current);
        call_args.extend(step.args().iter().cloned());
        current = candidate.callable().call(call_args)?;
    }

    Ok(current)
}
