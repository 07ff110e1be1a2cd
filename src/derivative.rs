use crate::{
    atom::{Atom, BinOp, Expr, Func, Sym},
    error::{Error, Result},
    number::Number,
    utils::Pow,
};

impl Expr {
    /// The symbolic derivative with respect to `x`.
    ///
    /// The result is the raw rule application, call
    /// [`simplify`](Expr::simplify) to clean it up. Fails with
    /// [`Error::NotDifferentiable`] on `sum`, `log` and user-named
    /// functions.
    pub fn derivative(&self, x: impl Into<Sym>) -> Result<Expr> {
        self.derive(&x.into())
    }

    fn derive(&self, x: &Sym) -> Result<Expr> {
        match self.atom() {
            Atom::Num(_) => Ok(Expr::zero()),
            Atom::Sym(s) => Ok(if s == x { Expr::one() } else { Expr::zero() }),
            Atom::Neg(e) => Ok(Expr::neg(e.derive(x)?)),
            Atom::Binary(binary) => {
                let (f, g) = (binary.lhs(), binary.rhs());
                match binary.op() {
                    BinOp::Add => Ok(f.derive(x)? + g.derive(x)?),
                    BinOp::Sub => Ok(f.derive(x)? - g.derive(x)?),
                    // (f*g)' = f'*g + f*g'
                    BinOp::Mul => Ok(f.derive(x)? * g + f * g.derive(x)?),
                    // (f/g)' = (f'*g - f*g') / g^2
                    BinOp::Div => {
                        let num = f.derive(x)? * g - f * g.derive(x)?;
                        let denom = g.pow(Expr::from(2));
                        Ok(num / denom)
                    }
                    BinOp::Pow => match g.num_val() {
                        // (f^n)' = (n * f^(n-1)) * f'
                        Some(n) => {
                            let coeff = Expr::num(n);
                            let pow = f.pow(Expr::num(n.sub(Number::ONE)));
                            Ok(coeff * pow * f.derive(x)?)
                        }
                        // (f^g)' = f^g * (g'*ln(f) + g * f'/f)
                        None => {
                            let term1 = g.derive(x)? * Expr::ln(f);
                            let term2 = g * (f.derive(x)? / f);
                            Ok(self * (term1 + term2))
                        }
                    },
                }
            }
            Atom::Func(func) => func.derive(x),
        }
    }
}

impl Func {
    fn derive(&self, x: &Sym) -> Result<Expr> {
        use Func as F;
        let one = Expr::one;

        match self {
            F::Sin(f) => Ok(Expr::cos(f) * f.derive(x)?),
            F::Cos(f) => Ok(Expr::from(-1) * Expr::sin(f) * f.derive(x)?),
            F::Tan(f) => {
                let sec2 = one() / Expr::cos(f).pow(Expr::from(2));
                Ok(sec2 * f.derive(x)?)
            }
            F::Exp(f) => Ok(Expr::exp(f) * f.derive(x)?),
            F::Ln(f) => Ok(one() / f * f.derive(x)?),
            F::Sqrt(f) => {
                let denom = Expr::from(2) * Expr::sqrt(f);
                Ok(one() / denom * f.derive(x)?)
            }
            F::Sum(_) | F::Log(_) | F::Other(..) => {
                Err(Error::NotDifferentiable(self.name().to_string()))
            }
        }
    }
}
