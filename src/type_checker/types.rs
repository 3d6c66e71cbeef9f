use std::fmt::Display;

/// The closed set of value categories the language knows about.
///
/// There is no subtyping; two types are compatible only when their tags are
/// equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Type {
    /// Unknown or invalid. Also what a map reads as before it is assigned.
    #[default]
    None,
    Integer,
    /// Result of `quantize()`, a power-of-two histogram.
    Quantize,
    /// Result of `count()`.
    Count,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Type::None => "none",
            Type::Integer => "integer",
            Type::Quantize => "quantize",
            Type::Count => "count",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
