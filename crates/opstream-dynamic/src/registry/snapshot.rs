//! Immutable, validated registry copies.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use opstream_core::{Result, SemanticType, Signature, StreamError};
use tracing::warn;

use crate::callable::Callable;
use crate::registry::OperationVariant;

/// A single-signature entry of an operation.
///
/// Variants registered with unions are split into one candidate per
/// expanded signature; candidates keep registration order.
#[derive(Debug, Clone)]
pub struct Candidate {
    name: Arc<str>,
    signature: Signature,
    callable: Callable,
}

impl Candidate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn params(&self) -> &[SemanticType] {
        self.signature.params()
    }

    pub fn returns(&self) -> SemanticType {
        self.signature.returns()
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    #[inline]
    pub fn accepts(&self, args: &[SemanticType]) -> bool {
        self.signature.accepts(args)
    }
}

/// A read-only copy of a registry, taken when a stream is created.
///
/// Later registry changes never reach a snapshot. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    operations: Arc<BTreeMap<Arc<str>, Arc<[Candidate]>>>,
}

impl Snapshot {
    pub(crate) fn build(operations: &BTreeMap<Arc<str>, Vec<OperationVariant>>) -> Result<Self> {
        let mut flattened: BTreeMap<Arc<str>, Arc<[Candidate]>> = BTreeMap::new();
        for (name, variants) in operations {
            let candidates = split_signatures(variants);
            ensure_unambiguous(name, &candidates)?;
            flattened.insert(name.clone(), Arc::from(candidates));
        }
        Ok(Self {
            operations: Arc::new(flattened),
        })
    }

    /// Candidates of `name`, or `None` if the operation is unknown.
    pub fn candidates(&self, name: &str) -> Option<&[Candidate]> {
        self.operations.get(name).map(|c| c.as_ref())
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(|name| name.as_ref())
    }
}

fn split_signatures(variants: &[OperationVariant]) -> Vec<Candidate> {
    variants
        .iter()
        .flat_map(|variant| {
            variant.signatures().iter().map(move |signature| Candidate {
                name: variant.name.clone(),
                signature: signature.clone(),
                callable: variant.callable().clone(),
            })
        })
        .collect()
}

// Two candidates with identical parameter tuples make dispatch ambiguous,
// whatever their return types.
fn ensure_unambiguous(name: &str, candidates: &[Candidate]) -> Result<()> {
    let mut seen: HashSet<&[SemanticType]> = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.params()) {
            warn!(
                event = "ambiguous_signature",
                operation = name,
                signature = %candidate.signature,
            );
            return Err(StreamError::AmbiguousSignature(name.to_string()));
        }
    }
    Ok(())
}
