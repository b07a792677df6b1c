use std::fmt;

/// Where an imputed field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImputationTag {
    /// The value was present in the input.
    Original,
    /// The value was missing and no cascade level could fill it.
    NotImputed,
    /// The value was supplied by the given cascade level.
    Level(usize),
    /// Categorical value left unresolved; the field holds [`TBD`].
    Tbd,
}

/// Placeholder stored in categorical fields the cascade could not resolve.
pub const TBD: &str = "TBD";

impl ImputationTag {
    /// Whether the cascade supplied the value.
    #[must_use]
    pub fn is_imputed(self) -> bool {
        matches!(self, Self::Level(_))
    }
}

impl fmt::Display for ImputationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::NotImputed => f.write_str("not_imputed"),
            Self::Level(level) => write!(f, "level_{level}"),
            Self::Tbd => f.write_str(TBD),
        }
    }
}

impl serde::Serialize for ImputationTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
