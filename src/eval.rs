use crate::{
    atom::{Atom, BinOp, Binary, Expr, Func, Sym, SymbolicExpr},
    error::{Error, Result},
    number::Number,
    utils::HashMap,
};

/// Variable bindings for numeric evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: HashMap<Sym, Number>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<Sym>, value: impl Into<Number>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &Sym) -> Option<Number> {
        self.vars.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<S: Into<Sym>, N: Into<Number>> FromIterator<(S, N)> for Context {
    fn from_iter<T: IntoIterator<Item = (S, N)>>(iter: T) -> Self {
        let mut ctx = Context::new();
        iter.into_iter().for_each(|(name, value)| {
            ctx.insert(name, value);
        });
        ctx
    }
}

impl Expr {
    /// Evaluates the tree to a [`Number`] under the bindings in `ctx`.
    pub fn evaluate(&self, ctx: &Context) -> Result<Number> {
        match self.atom() {
            Atom::Num(n) => Ok(*n),
            Atom::Sym(s) => ctx.get(s).ok_or_else(|| Error::UnboundSymbol(s.clone())),
            Atom::Neg(e) => Ok(-e.evaluate(ctx)?),
            Atom::Binary(binary) => {
                let lhs = binary.lhs().evaluate(ctx)?;
                let rhs = binary.rhs().evaluate(ctx)?;
                binary.op().apply(lhs, rhs)
            }
            Atom::Func(func) => {
                let args = func
                    .iter_args()
                    .map(|a| a.evaluate(ctx))
                    .collect::<Result<Vec<_>>>()?;
                func.apply(&args)
            }
        }
    }
}

impl BinOp {
    pub(crate) fn apply(self, lhs: Number, rhs: Number) -> Result<Number> {
        match self {
            BinOp::Add => Ok(lhs.add(rhs)),
            BinOp::Sub => Ok(lhs.sub(rhs)),
            BinOp::Mul => Ok(lhs.mul(rhs)),
            BinOp::Div => lhs.try_div(rhs),
            BinOp::Pow => lhs.try_pow(rhs),
        }
    }
}

impl Binary {
    pub(crate) fn fold(&self) -> Option<Result<Number>> {
        let lhs = self.lhs().num_val()?;
        let rhs = self.rhs().num_val()?;
        Some(self.op().apply(lhs, rhs))
    }
}

fn ln(x: f64) -> Result<f64> {
    if x <= 0.0 {
        Err(Error::Domain)
    } else {
        Ok(x.ln())
    }
}

impl Func {
    /// Applies the function to already-evaluated arguments. `args` lines up
    /// with [`SymbolicExpr::args`], so the single-argument variants always
    /// see exactly one value.
    pub(crate) fn apply(&self, args: &[Number]) -> Result<Number> {
        use Func as F;
        debug_assert_eq!(args.len(), self.n_args());

        let unary = |f: fn(f64) -> f64| Ok(Number::from(f(args[0].to_f64())));
        match self {
            F::Sum(_) => Ok(args.iter().fold(Number::ZERO, |acc, n| acc.add(*n))),
            F::Sin(_) => unary(f64::sin),
            F::Cos(_) => unary(f64::cos),
            F::Tan(_) => unary(f64::tan),
            F::Exp(_) => unary(f64::exp),
            F::Ln(_) => Ok(ln(args[0].to_f64())?.into()),
            F::Sqrt(_) => {
                let x = args[0].to_f64();
                if x < 0.0 {
                    Err(Error::Domain)
                } else {
                    Ok(x.sqrt().into())
                }
            }
            F::Log(_) => match args {
                [x] => Ok(ln(x.to_f64())?.into()),
                [x, base] => {
                    let denom = ln(base.to_f64())?;
                    if denom == 0.0 {
                        return Err(Error::Domain);
                    }
                    Ok((ln(x.to_f64())? / denom).into())
                }
                _ => Err(Error::Arity {
                    name: "log",
                    got: args.len(),
                }),
            },
            F::Other(name, _) => Err(Error::UnknownFunction(name.clone())),
        }
    }
}
