use std::{borrow::Borrow, fmt, ops, rc::Rc, slice};

use derive_more::{Display, IsVariant};
use paste::paste;
use serde::{Deserialize, Serialize};

use crate::{number::Number, utils::HashSet};

pub(crate) type PTR<T> = Rc<T>;

/// A symbol name. Clones share the backing allocation.
#[derive(Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Sym(pub(crate) PTR<str>);

impl Sym {
    pub fn new(name: impl AsRef<str>) -> Self {
        Sym(PTR::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sym {
    fn from(value: &str) -> Self {
        Sym::new(value)
    }
}
impl From<String> for Sym {
    fn from(value: String) -> Self {
        Sym::new(value)
    }
}
impl From<&Sym> for Sym {
    fn from(value: &Sym) -> Self {
        value.clone()
    }
}
impl From<Sym> for String {
    fn from(value: Sym) -> Self {
        value.0.as_ref().to_owned()
    }
}

impl fmt::Debug for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant, Serialize, Deserialize,
)]
pub enum BinOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("/")]
    Div,
    #[display("^")]
    Pow,
}

/// A binary operator applied to exactly two operands.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binary {
    pub(crate) op: BinOp,
    /// [lhs, rhs]
    pub(crate) args: [Expr; 2],
}

impl Binary {
    pub fn new(op: BinOp, lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Self {
        Binary {
            op,
            args: [lhs.borrow().clone(), rhs.borrow().clone()],
        }
    }

    pub fn op(&self) -> BinOp {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.args[0]
    }

    pub fn rhs(&self) -> &Expr {
        &self.args[1]
    }
}

/// A named function applied to arguments.
///
/// The known functions carry their arity structurally where the name fixes
/// it; [`Func::Log`] takes one argument (natural log) or two (argument,
/// base). [`Func::Other`] is a user-named function: it renders and
/// substitutes like any node but cannot be evaluated or differentiated.
#[derive(Clone, PartialEq, Eq, Hash, IsVariant, Serialize, Deserialize)]
pub enum Func {
    Sum(Vec<Expr>),
    Sin(Expr),
    Cos(Expr),
    Tan(Expr),
    Exp(Expr),
    Ln(Expr),
    Sqrt(Expr),
    Log(Vec<Expr>),
    Other(Sym, Vec<Expr>),
}

impl Func {
    pub fn name(&self) -> &str {
        use Func as F;
        match self {
            F::Sum(_) => "sum",
            F::Sin(_) => "sin",
            F::Cos(_) => "cos",
            F::Tan(_) => "tan",
            F::Exp(_) => "exp",
            F::Ln(_) => "ln",
            F::Sqrt(_) => "sqrt",
            F::Log(_) => "log",
            F::Other(name, _) => name.as_str(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, IsVariant, Serialize, Deserialize)]
pub enum Atom {
    Num(Number),
    Sym(Sym),
    Neg(Expr),
    Binary(Binary),
    Func(Func),
}

impl Atom {
    pub const ZERO: Atom = Atom::Num(Number::ZERO);
    pub const ONE: Atom = Atom::Num(Number::ONE);

    pub fn num(&self) -> Option<Number> {
        match self {
            Atom::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.num().is_some_and(|n| n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        self.num().is_some_and(|n| n.is_one())
    }
}

/// A shared handle to an expression tree node.
///
/// Clones are cheap; [`Expr::atom_mut`] copies on write. Constructors build
/// the tree exactly as written, all rewriting lives in
/// [`simplify`](Expr::simplify).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expr(pub(crate) PTR<Atom>);

impl From<Atom> for Expr {
    fn from(value: Atom) -> Self {
        Expr(PTR::from(value))
    }
}
impl From<Binary> for Expr {
    fn from(value: Binary) -> Self {
        Atom::Binary(value).into()
    }
}
impl From<Func> for Expr {
    fn from(value: Func) -> Self {
        Atom::Func(value).into()
    }
}
impl From<Sym> for Expr {
    fn from(value: Sym) -> Self {
        Atom::Sym(value).into()
    }
}
impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::var(value)
    }
}
impl<T: Into<Number>> From<T> for Expr {
    fn from(value: T) -> Self {
        Atom::Num(value.into()).into()
    }
}

macro_rules! func_atom {
    ($name: ident) => {
        pub fn $name(e: impl Borrow<Expr>) -> Expr {
            paste! {
                Expr::from(Atom::Func(Func::[<$name:camel>](e.borrow().clone())))
            }
        }
    };
}

impl Expr {
    pub fn zero() -> Expr {
        Atom::ZERO.into()
    }

    pub fn one() -> Expr {
        Atom::ONE.into()
    }

    pub fn num(n: impl Into<Number>) -> Expr {
        Atom::Num(n.into()).into()
    }

    pub fn var(name: impl Into<Sym>) -> Expr {
        Atom::Sym(name.into()).into()
    }

    pub fn neg(e: impl Borrow<Expr>) -> Expr {
        Atom::Neg(e.borrow().clone()).into()
    }

    pub fn binary(op: BinOp, lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Expr {
        Binary::new(op, lhs, rhs).into()
    }

    pub fn add(lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Expr {
        Expr::binary(BinOp::Add, lhs, rhs)
    }
    pub fn sub(lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Expr {
        Expr::binary(BinOp::Sub, lhs, rhs)
    }
    pub fn mul(lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Expr {
        Expr::binary(BinOp::Mul, lhs, rhs)
    }
    pub fn div(lhs: impl Borrow<Expr>, rhs: impl Borrow<Expr>) -> Expr {
        Expr::binary(BinOp::Div, lhs, rhs)
    }
    pub fn pow(base: impl Borrow<Expr>, exponent: impl Borrow<Expr>) -> Expr {
        Expr::binary(BinOp::Pow, base, exponent)
    }

    func_atom!(sin);
    func_atom!(cos);
    func_atom!(tan);
    func_atom!(exp);
    func_atom!(ln);
    func_atom!(sqrt);

    pub fn sum(args: impl IntoIterator<Item = Expr>) -> Expr {
        Func::Sum(args.into_iter().collect()).into()
    }

    /// `log(x)`, the natural logarithm spelled `log`.
    pub fn log(e: impl Borrow<Expr>) -> Expr {
        Func::Log(vec![e.borrow().clone()]).into()
    }

    /// `log(x, b)`, the logarithm of `x` in base `b`.
    pub fn log_base(e: impl Borrow<Expr>, base: impl Borrow<Expr>) -> Expr {
        Func::Log(vec![e.borrow().clone(), base.borrow().clone()]).into()
    }

    /// A user-named function application.
    pub fn func(name: impl Into<Sym>, args: impl IntoIterator<Item = Expr>) -> Expr {
        Func::Other(name.into(), args.into_iter().collect()).into()
    }

    pub fn atom(&self) -> &Atom {
        self.0.as_ref()
    }

    pub fn atom_mut(&mut self) -> &mut Atom {
        PTR::make_mut(&mut self.0)
    }

    pub fn num_val(&self) -> Option<Number> {
        self.atom().num()
    }

    pub fn is_zero(&self) -> bool {
        self.atom().is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.atom().is_one()
    }

    /// The set of symbols occurring anywhere in the tree.
    pub fn variables(&self) -> HashSet<Sym> {
        let mut vars = HashSet::default();
        for e in self.iter_sub_exprs() {
            if let Atom::Sym(s) = e.atom() {
                vars.insert(s.clone());
            }
        }
        vars
    }

    /// True if `expr` occurs nowhere in the tree (including the root).
    pub fn free_of(&self, expr: &Expr) -> bool {
        self.iter_sub_exprs().all(|e| e != expr)
    }

    /// Replaces every occurrence of `from` with `to`, without descending
    /// into the replacement.
    pub fn substitute(&self, from: &Expr, to: &Expr) -> Expr {
        let mut res = self.clone();
        res.try_for_each_sub_expr_mut(|e| {
            if e == from {
                *e = to.clone();
                ops::ControlFlow::Break(())
            } else {
                ops::ControlFlow::Continue(())
            }
        });
        res
    }

    pub fn iter_sub_exprs(&self) -> ExprIterator<'_> {
        ExprIterator { stack: vec![self] }
    }

    fn try_for_each_sub_expr_mut<F>(&mut self, func: F)
    where
        F: Fn(&mut Expr) -> ops::ControlFlow<()> + Copy,
    {
        if func(self).is_break() {
            return;
        }
        self.atom_mut()
            .args_mut()
            .iter_mut()
            .for_each(|a| a.try_for_each_sub_expr_mut(func));
    }
}

/// Depth-first iterator over an expression and all its subexpressions.
pub struct ExprIterator<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for ExprIterator<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().inspect(|expr| {
            expr.iter_args().for_each(|arg| self.stack.push(arg));
        })
    }
}

/// Uniform access to the child expressions of a node.
pub trait SymbolicExpr: Clone + Into<Expr> {
    fn args(&self) -> &[Expr] {
        &[]
    }
    fn args_mut(&mut self) -> &mut [Expr] {
        &mut []
    }
    fn n_args(&self) -> usize {
        self.args().len()
    }
    fn is_atom(&self) -> bool {
        self.n_args() == 0
    }
    fn iter_args(&self) -> slice::Iter<'_, Expr> {
        self.args().iter()
    }
    fn map_args(mut self, map_fn: impl Fn(&mut Expr)) -> Self {
        self.args_mut().iter_mut().for_each(map_fn);
        self
    }
}

impl SymbolicExpr for Binary {
    fn args(&self) -> &[Expr] {
        &self.args
    }
    fn args_mut(&mut self) -> &mut [Expr] {
        &mut self.args
    }
}

impl SymbolicExpr for Func {
    fn args(&self) -> &[Expr] {
        use Func as F;
        match self {
            F::Sum(args) | F::Log(args) | F::Other(_, args) => args.as_slice(),
            F::Sin(x) | F::Cos(x) | F::Tan(x) | F::Exp(x) | F::Ln(x) | F::Sqrt(x) => {
                slice::from_ref(x)
            }
        }
    }

    fn args_mut(&mut self) -> &mut [Expr] {
        use Func as F;
        match self {
            F::Sum(args) | F::Log(args) | F::Other(_, args) => args.as_mut_slice(),
            F::Sin(x) | F::Cos(x) | F::Tan(x) | F::Exp(x) | F::Ln(x) | F::Sqrt(x) => {
                slice::from_mut(x)
            }
        }
    }
}

impl SymbolicExpr for Atom {
    fn args(&self) -> &[Expr] {
        use Atom as A;
        match self {
            A::Num(_) | A::Sym(_) => &[],
            A::Neg(e) => slice::from_ref(e),
            A::Binary(binary) => binary.args(),
            A::Func(func) => func.args(),
        }
    }

    fn args_mut(&mut self) -> &mut [Expr] {
        use Atom as A;
        match self {
            A::Num(_) | A::Sym(_) => &mut [],
            A::Neg(e) => slice::from_mut(e),
            A::Binary(binary) => binary.args_mut(),
            A::Func(func) => func.args_mut(),
        }
    }
}

impl SymbolicExpr for Expr {
    fn args(&self) -> &[Expr] {
        self.atom().args()
    }
    fn args_mut(&mut self) -> &mut [Expr] {
        self.atom_mut().args_mut()
    }
}

impl<T: Borrow<Expr>> ops::Add<T> for &Expr {
    type Output = Expr;
    fn add(self, rhs: T) -> Self::Output {
        Expr::add(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::Add<T> for Expr {
    type Output = Expr;
    fn add(self, rhs: T) -> Self::Output {
        Expr::add(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::AddAssign<T> for Expr {
    fn add_assign(&mut self, rhs: T) {
        *self = &*self + rhs;
    }
}
impl<T: Borrow<Expr>> ops::Sub<T> for &Expr {
    type Output = Expr;
    fn sub(self, rhs: T) -> Self::Output {
        Expr::sub(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::Sub<T> for Expr {
    type Output = Expr;
    fn sub(self, rhs: T) -> Self::Output {
        Expr::sub(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::SubAssign<T> for Expr {
    fn sub_assign(&mut self, rhs: T) {
        *self = &*self - rhs;
    }
}
impl<T: Borrow<Expr>> ops::Mul<T> for &Expr {
    type Output = Expr;
    fn mul(self, rhs: T) -> Self::Output {
        Expr::mul(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::Mul<T> for Expr {
    type Output = Expr;
    fn mul(self, rhs: T) -> Self::Output {
        Expr::mul(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::MulAssign<T> for Expr {
    fn mul_assign(&mut self, rhs: T) {
        *self = &*self * rhs;
    }
}
impl<T: Borrow<Expr>> ops::Div<T> for &Expr {
    type Output = Expr;
    fn div(self, rhs: T) -> Self::Output {
        Expr::div(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::Div<T> for Expr {
    type Output = Expr;
    fn div(self, rhs: T) -> Self::Output {
        Expr::div(self, rhs)
    }
}
impl<T: Borrow<Expr>> ops::DivAssign<T> for Expr {
    fn div_assign(&mut self, rhs: T) {
        *self = &*self / rhs;
    }
}
impl ops::Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Self::Output {
        Expr::neg(self)
    }
}
impl ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Self::Output {
        Expr::neg(&self)
    }
}
impl<T: Borrow<Expr>> crate::utils::Pow<T> for &Expr {
    type Output = Expr;
    fn pow(self, rhs: T) -> Self::Output {
        Expr::pow(self, rhs)
    }
}
impl<T: Borrow<Expr>> crate::utils::Pow<T> for Expr {
    type Output = Expr;
    fn pow(self, rhs: T) -> Self::Output {
        Expr::pow(self, rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_equality() {
        let a = Expr::var("x") + Expr::from(1);
        let b = Expr::var("x") + Expr::from(1);
        assert_eq!(a, b);
        assert_ne!(a, Expr::from(1) + Expr::var("x"));
    }

    #[test]
    fn variables() {
        let e = Expr::sin(Expr::var("x")) * Expr::var("y") + Expr::from(2);
        let vars = e.variables();
        assert_eq!(vars.len(), 2);
        assert!(vars.contains(&Sym::new("x")));
        assert!(vars.contains(&Sym::new("y")));
    }

    #[test]
    fn free_of() {
        let x = Expr::var("x");
        let e = &x * &x + Expr::from(1);
        assert!(!e.free_of(&x));
        assert!(e.free_of(&Expr::var("y")));
    }

    #[test]
    fn substitute() {
        let x = Expr::var("x");
        let y = Expr::var("y");
        let e = Expr::sin(&x) + &x;
        assert_eq!(e.substitute(&x, &y), Expr::sin(&y) + &y);
        // the replacement itself is not descended into
        let e = x.substitute(&x, &(&x + Expr::from(1)));
        assert_eq!(e, &x + Expr::from(1));
    }
}
