//! Symbolic computation over unified number and symbol nodes.
//!
//! Expressions are immutable trees ([`Expr`](atom::Expr)) built from numbers,
//! symbols, operators and named functions. They can be evaluated against a
//! [`Context`](eval::Context), simplified and differentiated.
//!
//! ```
//! use coreceptus::prelude::*;
//!
//! let x = Expr::var("x");
//! let f = &x * &x + Expr::from(3) * &x;
//!
//! let ctx: Context = [("x", 2)].into_iter().collect();
//! assert_eq!(f.evaluate(&ctx), Ok(Number::Int(10)));
//!
//! let df = f.derivative("x").unwrap().simplify();
//! assert_eq!(df.evaluate(&ctx), Ok(Number::Int(7)));
//! ```

pub extern crate self as coreceptus;

pub mod atom;
pub mod derivative;
pub mod error;
pub mod eval;
pub mod fmt_ast;
pub mod number;
pub mod simplify;
pub mod utils;

pub mod prelude {
    pub use crate::{
        atom::{Atom, BinOp, Binary, Expr, Func, Sym, SymbolicExpr},
        error::Error,
        eval::Context,
        number::Number,
        utils::Pow,
    };
}

pub use crate::{atom::Expr, error::Error, eval::Context, number::Number};

#[cfg(test)]
mod tests;
