use crate::atom::Sym;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while evaluating or differentiating an
/// expression. Construction of expressions never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("symbol '{0}' has no value in context")]
    UnboundSymbol(Sym),

    #[error("unknown function: {0}")]
    UnknownFunction(Sym),

    #[error("invalid number of arguments for {name}: {got}")]
    Arity { name: &'static str, got: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("math domain error")]
    Domain,

    #[error("derivative of function '{0}' not implemented")]
    NotDifferentiable(String),
}
