//! Semantic type tags.

use std::fmt;

/// The semantic tag of a runtime value.
///
/// Tags are what signatures are written in and what dispatch compares.
/// `Any` never describes a concrete value; it only appears in signatures
/// and in widened predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SemanticType {
    Null,
    Boolean,
    Number,
    String,
    Resource,
    Function,
    /// Sequential-integer-keyed collection.
    List,
    /// Any other keyed collection.
    Map,
    Object,
    Error,
    Stream,
    Any,
}

impl SemanticType {
    /// Every tag, in vocabulary order.
    pub const ALL: [SemanticType; 12] = [
        SemanticType::Null,
        SemanticType::Boolean,
        SemanticType::Number,
        SemanticType::String,
        SemanticType::Resource,
        SemanticType::Function,
        SemanticType::List,
        SemanticType::Map,
        SemanticType::Object,
        SemanticType::Error,
        SemanticType::Stream,
        SemanticType::Any,
    ];

    /// Returns the capitalized name used in signatures and messages.
    pub fn name(self) -> &'static str {
        match self {
            SemanticType::Null => "Null",
            SemanticType::Boolean => "Boolean",
            SemanticType::Number => "Number",
            SemanticType::String => "String",
            SemanticType::Resource => "Resource",
            SemanticType::Function => "Function",
            SemanticType::List => "List",
            SemanticType::Map => "Map",
            SemanticType::Object => "Object",
            SemanticType::Error => "Error",
            SemanticType::Stream => "Stream",
            SemanticType::Any => "Any",
        }
    }

    /// Looks up a tag by name, ignoring case.
    ///
    /// `Array` is accepted as the historical spelling of `Map`.
    ///
    /// # Examples
    ///
    /// ```
    /// use opstream_core::SemanticType;
    ///
    /// assert_eq!(SemanticType::from_name("number"), Some(SemanticType::Number));
    /// assert_eq!(SemanticType::from_name("Array"), Some(SemanticType::Map));
    /// assert_eq!(SemanticType::from_name("[a]"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        if lowered == "array" {
            return Some(SemanticType::Map);
        }
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(&lowered))
    }

    #[inline]
    pub fn is_any(self) -> bool {
        matches!(self, SemanticType::Any)
    }

    /// Compatibility used by dispatch: `Any` on either side matches,
    /// otherwise the tags must be equal.
    ///
    /// Structural equality (`==`) stays strict so that `Any` and `Number`
    /// parameters are distinct when checking for ambiguity.
    #[inline]
    pub fn accepts(self, other: SemanticType) -> bool {
        self.is_any() || other.is_any() || self == other
    }

    /// Merges two predicted types: equal tags are kept, anything else widens to `Any`.
    #[inline]
    pub fn merge(self, other: SemanticType) -> SemanticType {
        if self == other {
            self
        } else {
            SemanticType::Any
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats a tuple of tags as `A, B, C`.
pub fn join_types(types: &[SemanticType]) -> String {
    types
        .iter()
        .map(|ty| ty.name())
        .collect::<Vec<_>>()
        .join(", ")
}
