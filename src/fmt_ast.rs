//! Textual rendering of expression trees.
//!
//! The format is stable and fully parenthesized: every binary node renders
//! as `(lhs op rhs)`, negation as `(-e)` and functions as `name(a, b)`, so
//! the printed string mirrors the tree shape exactly.

use std::fmt;

use crate::{
    atom::{Atom, Binary, Expr, Func, SymbolicExpr},
    utils,
};

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.lhs(), self.op(), self.rhs())
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        utils::fmt_iter(
            ["(", ", ", ")"],
            self.iter_args(),
            |a, f| write!(f, "{a}"),
            f,
        )
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Num(n) => write!(f, "{n}"),
            Atom::Sym(s) => write!(f, "{s}"),
            Atom::Neg(e) => write!(f, "(-{e})"),
            Atom::Binary(binary) => write!(f, "{binary}"),
            Atom::Func(func) => write!(f, "{func}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.atom())
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
impl fmt::Debug for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Expr::from(42), "42")]
    #[test_case(Expr::from(2.0), "2.0")]
    #[test_case(Expr::var("x"), "x")]
    #[test_case(Expr::from(5) + Expr::from(3), "(5 + 3)")]
    #[test_case(Expr::var("a") * Expr::from(2), "(a * 2)")]
    #[test_case(Expr::neg(Expr::from(5)), "(-5)")]
    #[test_case(Expr::var("x").pow(Expr::from(2)), "(x ^ 2)")]
    #[test_case(Expr::sum([Expr::from(1), Expr::from(2), Expr::from(3)]), "sum(1, 2, 3)")]
    #[test_case(Expr::ln(Expr::var("x")), "ln(x)")]
    #[test_case(Expr::log_base(Expr::var("x"), Expr::from(2)), "log(x, 2)")]
    #[test_case(Expr::func("f", [Expr::var("x"), Expr::var("y")]), "f(x, y)")]
    fn display(e: Expr, res: &str) {
        assert_eq!(e.to_string(), res);
    }

    #[test]
    fn nested() {
        let e = Expr::from(5) + Expr::var("x") * Expr::from(2);
        assert_eq!(e.to_string(), "(5 + (x * 2))");
    }
}
