//! Operation registry.
//!
//! A [`Registry`] maps operation names to the variants registered under
//! them. Registration validates signature text and callables eagerly;
//! ambiguity between variants is only checked when a [`Snapshot`] is
//! taken, which is what every new stream does.

pub mod global;
mod snapshot;


use std::collections::BTreeMap;
use std::sync::Arc;

use opstream_config::{DuplicatePolicy, StreamConfig};
use opstream_core::{parse_signatures, Result, Signature, StreamError};
use tracing::debug;

use crate::builtins;
use crate::callable::{Callable, CallableRef};

pub use snapshot::{Candidate, Snapshot};

/// One registration: a set of signatures sharing a callable.
#[derive(Debug, Clone)]
pub struct OperationVariant {
    name: Arc<str>,
    signatures: Vec<Signature>,
    callable: Callable,
}

impl OperationVariant {
    pub fn new(name: impl Into<Arc<str>>, signatures: Vec<Signature>, callable: Callable) -> Self {
        Self {
            name: name.into(),
            signatures,
            callable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }
}

/// Signature text accepted at registration: one text or several.
pub trait SignatureTexts {
    fn signature_texts(&self) -> Vec<&str>;
}

impl SignatureTexts for &str {
    fn signature_texts(&self) -> Vec<&str> {
        vec![*self]
    }
}

impl SignatureTexts for String {
    fn signature_texts(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl SignatureTexts for &[&str] {
    fn signature_texts(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl<const N: usize> SignatureTexts for [&str; N] {
    fn signature_texts(&self) -> Vec<&str> {
        self.to_vec()
    }
}

impl SignatureTexts for Vec<&str> {
    fn signature_texts(&self) -> Vec<&str> {
        self.clone()
    }
}

impl SignatureTexts for Vec<String> {
    fn signature_texts(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }
}

/// Table of operations, keyed by name.
///
/// # Examples
///
/// ```
/// use opstream_dynamic::{Registry, Stream, Value};
///
/// let mut registry = Registry::new();
/// registry.operation_by_name("count", "List|Map -> Number").unwrap();
///
/// let stream = Stream::of_in(&registry, Value::list([1, 2, 3])).unwrap();
/// let size = stream.invoke("count", vec![]).unwrap();
/// assert_eq!(size.result().unwrap(), Value::Int(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    operations: BTreeMap<Arc<str>, Vec<OperationVariant>>,
    duplicate_policy: DuplicatePolicy,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::install(&mut registry);
        registry
    }

    /// Creates a registry following the given configuration.
    pub fn from_config(config: &StreamConfig) -> Self {
        let registry = if config.builtins {
            Self::with_builtins()
        } else {
            Self::new()
        };
        registry.with_duplicate_policy(config.duplicate_policy)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Registers an operation.
    ///
    /// Every signature text is parsed and expanded; the callable is resolved
    /// (a name goes through the native function table). Variants that clash
    /// with existing ones are accepted here and reported when a stream is
    /// created, unless the duplicate policy rejects exact re-registrations.
    ///
    /// # Errors
    ///
    /// - [`StreamError::UnknownCallable`] if the callable is not invocable
    /// - [`StreamError::InvalidSignature`] if a signature text is malformed
    /// - [`StreamError::DuplicatedOperation`] under [`DuplicatePolicy::Reject`]
    pub fn operation(
        &mut self,
        name: &str,
        signatures: impl SignatureTexts,
        callable: impl Into<CallableRef>,
    ) -> Result<()> {
        let callable = callable.into().resolve()?;

        let mut expanded: Vec<Signature> = Vec::new();
        for text in signatures.signature_texts() {
            for signature in parse_signatures(text)? {
                if !expanded.contains(&signature) {
                    expanded.push(signature);
                }
            }
        }

        self.insert(OperationVariant::new(name, expanded, callable))
    }

    /// Registers an operation whose callable is the native function of the same name.
    pub fn operation_by_name(&mut self, name: &str, signatures: impl SignatureTexts) -> Result<()> {
        self.operation(name, signatures, name)
    }

    /// Adds an already built variant, applying the duplicate policy.
    pub fn insert(&mut self, variant: OperationVariant) -> Result<()> {
        if self.duplicate_policy == DuplicatePolicy::Reject && self.is_duplicate(&variant) {
            return Err(StreamError::DuplicatedOperation(variant.name.to_string()));
        }
        self.push(variant);
        Ok(())
    }

    pub(crate) fn push(&mut self, variant: OperationVariant) {
        debug!(
            event = "operation_registered",
            operation = %variant.name,
            signatures = variant.signatures.len() as u64,
        );
        self.operations
            .entry(variant.name.clone())
            .or_default()
            .push(variant);
    }

    fn is_duplicate(&self, variant: &OperationVariant) -> bool {
        self.variants(&variant.name).iter().any(|existing| {
            existing
                .signatures
                .iter()
                .any(|sig| variant.signatures.contains(sig))
        })
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Removes every variant of each named operation. Unknown names are ignored.
    pub fn remove_operations<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut removed = 0u64;
        for name in names {
            if self.operations.remove(name.as_ref()).is_some() {
                removed += 1;
            }
        }
        debug!(event = "operations_removed", count = removed);
    }

    /// Removes every operation, built-ins included.
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Registered operation names, sorted.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(|name| name.as_ref())
    }

    /// Variants registered under `name`, in registration order.
    pub fn variants(&self, name: &str) -> &[OperationVariant] {
        self.operations
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of registered operation names.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Takes an immutable, validated copy of the registry.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::AmbiguousSignature`] naming the first operation
    /// with two signatures sharing a parameter tuple.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::build(&self.operations)
    }
}
