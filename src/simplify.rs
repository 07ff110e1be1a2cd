use log::warn;

use crate::atom::{Atom, BinOp, Binary, Expr, SymbolicExpr};

impl Expr {
    /// Recursively rewrites the tree into a reduced form: children first,
    /// then constant folding and the identity rules at this node.
    ///
    /// Simplification is total. A numeric subtree that cannot be folded
    /// (`1 / 0`, `0 ^ -2`, a user-named function) is left as written and
    /// surfaces its error at [`evaluate`](Expr::evaluate) time instead.
    pub fn simplify(&self) -> Expr {
        match self.atom() {
            Atom::Num(_) | Atom::Sym(_) => self.clone(),
            Atom::Neg(e) => {
                let e = e.simplify();
                match e.num_val() {
                    Some(n) => Expr::num(-n),
                    None => Expr::neg(e),
                }
            }
            Atom::Binary(binary) => {
                simplify_binary(binary.op(), binary.lhs().simplify(), binary.rhs().simplify())
            }
            Atom::Func(func) => {
                let func = func.clone().map_args(|a| *a = a.simplify());
                let args: Option<Vec<_>> = func.iter_args().map(Expr::num_val).collect();
                if let Some(args) = args {
                    match func.apply(&args) {
                        Ok(n) => return Expr::num(n),
                        Err(err) => warn!("not folding {}(..): {err}", func.name()),
                    }
                }
                func.into()
            }
        }
    }
}

fn simplify_binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    use BinOp as Op;

    let node = Binary::new(op, &lhs, &rhs);
    if let Some(folded) = node.fold() {
        match folded {
            Ok(n) => return Expr::num(n),
            Err(err) => {
                warn!("not folding {lhs} {op} {rhs}: {err}");
                return node.into();
            }
        }
    }

    match op {
        Op::Add => {
            if lhs.is_zero() {
                return rhs;
            }
            if rhs.is_zero() {
                return lhs;
            }
            // x + x = 2 * x
            if lhs == rhs {
                return Expr::mul(Expr::from(2), lhs).simplify();
            }
        }
        Op::Sub => {
            if rhs.is_zero() {
                return lhs;
            }
            // x - x = 0
            if lhs == rhs {
                return Expr::zero();
            }
        }
        Op::Mul => {
            if let Some(n) = lhs.num_val() {
                if n.is_one() {
                    return rhs;
                }
                if n.is_zero() {
                    return Expr::zero();
                }
            }
            if let Some(n) = rhs.num_val() {
                if n.is_one() {
                    return lhs;
                }
                if n.is_zero() {
                    return Expr::zero();
                }
            }
        }
        Op::Div => {
            if rhs.is_one() {
                return lhs;
            }
        }
        Op::Pow => {
            if rhs.is_zero() {
                return Expr::one();
            }
            if rhs.is_one() {
                return lhs;
            }
        }
    }

    node.into()
}
