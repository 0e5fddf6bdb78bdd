//! Signatures and the textual signature language.
//!
//! A signature text is a chain of `->` separated groups; each group is a
//! `|` separated union of type names. The last group is the return type:
//!
//! ```text
//! Number|List -> Number -> String|Map -> Number
//! ```
//!
//! Text is parsed once, at registration, into concrete [`Signature`]s.
//! Unions are expanded into their cartesian product so that nothing
//! downstream ever deals with alternatives.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{Result, StreamError};
use crate::types::SemanticType;

/// A concrete signature: parameter types followed by the return type.
///
/// Always holds at least two types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    types: SmallVec<[SemanticType; 4]>,
}

impl Signature {
    /// Builds a signature from the receiver type, the extra argument types
    /// and the return type.
    pub fn new(receiver: SemanticType, args: &[SemanticType], returns: SemanticType) -> Self {
        let mut types: SmallVec<[SemanticType; 4]> = SmallVec::with_capacity(args.len() + 2);
        types.push(receiver);
        types.extend_from_slice(args);
        types.push(returns);
        Self { types }
    }

    /// The receiver type (first parameter).
    #[inline]
    pub fn receiver(&self) -> SemanticType {
        self.types[0]
    }

    /// The parameter types (everything but the return type).
    #[inline]
    pub fn params(&self) -> &[SemanticType] {
        &self.types[..self.types.len() - 1]
    }

    #[inline]
    pub fn returns(&self) -> SemanticType {
        self.types[self.types.len() - 1]
    }

    /// Checks the parameters position by position against argument types.
    ///
    /// The arity must match exactly; each position matches when either side
    /// is `Any` or both tags are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use opstream_core::{Signature, SemanticType::*};
    ///
    /// let fill = Signature::new(Number, &[Any], List);
    /// assert!(fill.accepts(&[Number, String]));
    /// assert!(fill.accepts(&[Any, String]));
    /// assert!(!fill.accepts(&[String, String]));
    /// assert!(!fill.accepts(&[Number]));
    /// ```
    pub fn accepts(&self, args: &[SemanticType]) -> bool {
        let params = self.params();
        params.len() == args.len()
            && params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.accepts(*arg))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(|ty| ty.name()).collect();
        f.write_str(&names.join(" -> "))
    }
}

/// Parses signature text and expands its unions.
///
/// Earlier groups vary fastest in the output, and duplicates produced by a
/// repeated alternative are dropped.
///
/// # Errors
///
/// Returns [`StreamError::InvalidSignature`] quoting `text` when it has
/// fewer than two groups or names a type outside the vocabulary.
///
/// # Examples
///
/// ```
/// use opstream_core::{parse_signatures, SemanticType::*, Signature};
///
/// let sigs = parse_signatures("Number|List -> Number -> String|Array -> Number").unwrap();
/// assert_eq!(sigs, vec![
///     Signature::new(Number, &[Number, String], Number),
///     Signature::new(List, &[Number, String], Number),
///     Signature::new(Number, &[Number, Map], Number),
///     Signature::new(List, &[Number, Map], Number),
/// ]);
///
/// assert!(parse_signatures("List, Number").is_err());
/// ```
pub fn parse_signatures(text: &str) -> Result<Vec<Signature>> {
    let invalid = || StreamError::InvalidSignature(text.to_string());

    let groups = text
        .split("->")
        .map(|group| {
            group
                .split('|')
                .map(|name| SemanticType::from_name(name.trim()).ok_or_else(invalid))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    if groups.len() < 2 {
        return Err(invalid());
    }

    Ok(expand(&groups)
        .into_iter()
        .map(|types| Signature { types })
        .collect())
}

// Cartesian product of the groups; the inner loop walks the partial results
// so earlier groups vary fastest.
fn expand(groups: &[Vec<SemanticType>]) -> Vec<SmallVec<[SemanticType; 4]>> {
    let mut partial: Vec<SmallVec<[SemanticType; 4]>> = vec![SmallVec::new()];
    for group in groups {
        let mut next = Vec::with_capacity(partial.len() * group.len());
        for ty in group {
            for prefix in &partial {
                let mut types = prefix.clone();
                types.push(*ty);
                if !next.contains(&types) {
                    next.push(types);
                }
            }
        }
        partial = next;
    }
    partial
}
