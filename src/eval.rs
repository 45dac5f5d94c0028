//! Operator sugar for building functions.
//!
//! The operators `&`, `|`, `^` and `!` on [`Ref`] do not touch any manager.
//! They build a small expression tree, which may nest arbitrarily, and
//! [`Bdd::eval`] computes it bottom-up through the manager the leaves belong to.
//!
//! ```
//! use robdd::bdd::Bdd;
//!
//! let bdd = Bdd::new(3);
//! let x = bdd.mk_var(0);
//! let y = bdd.mk_var(1);
//! let z = bdd.mk_var(2);
//!
//! assert_eq!(bdd.eval(x & y), bdd.apply_and(x, y));
//! // Negating a variable gives its complemented literal.
//! assert_eq!(bdd.eval(!x), bdd.literal(0, true));
//!
//! let f = bdd.eval(!(x & y) ^ z);
//! assert_eq!(f, bdd.apply_xor(bdd.apply_not(bdd.apply_and(x, y)), z));
//! ```

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::bdd::Bdd;
use crate::reference::Ref;

/// Something that yields a function once a manager is at hand.
pub trait Eval {
    fn eval(&self, bdd: &Bdd) -> Ref;
}

impl Bdd {
    pub fn eval(&self, value: impl Eval) -> Ref {
        value.eval(self)
    }
}

impl Eval for Ref {
    fn eval(&self, bdd: &Bdd) -> Ref {
        bdd.check(*self);
        *self
    }
}

/// Complement of the inner expression.
pub struct NotExpr<F>(F);

impl<F: Eval> Eval for NotExpr<F> {
    fn eval(&self, bdd: &Bdd) -> Ref {
        bdd.apply_not(self.0.eval(bdd))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
}

/// A binary connective applied to two expressions.
pub struct BinaryExpr<F, G> {
    op: BinaryOp,
    f: F,
    g: G,
}

impl<F: Eval, G: Eval> Eval for BinaryExpr<F, G> {
    fn eval(&self, bdd: &Bdd) -> Ref {
        let f = self.f.eval(bdd);
        let g = self.g.eval(bdd);
        match self.op {
            BinaryOp::And => bdd.apply_and(f, g),
            BinaryOp::Or => bdd.apply_or(f, g),
            BinaryOp::Xor => bdd.apply_xor(f, g),
        }
    }
}

macro_rules! impl_operators {
    ($([$($param:ident),*] $ty:ty),* $(,)?) => {
        $(
            impl<$($param: Eval,)* Rhs: Eval> BitAnd<Rhs> for $ty {
                type Output = BinaryExpr<Self, Rhs>;

                fn bitand(self, rhs: Rhs) -> Self::Output {
                    BinaryExpr { op: BinaryOp::And, f: self, g: rhs }
                }
            }

            impl<$($param: Eval,)* Rhs: Eval> BitOr<Rhs> for $ty {
                type Output = BinaryExpr<Self, Rhs>;

                fn bitor(self, rhs: Rhs) -> Self::Output {
                    BinaryExpr { op: BinaryOp::Or, f: self, g: rhs }
                }
            }

            impl<$($param: Eval,)* Rhs: Eval> BitXor<Rhs> for $ty {
                type Output = BinaryExpr<Self, Rhs>;

                fn bitxor(self, rhs: Rhs) -> Self::Output {
                    BinaryExpr { op: BinaryOp::Xor, f: self, g: rhs }
                }
            }

            impl<$($param: Eval),*> Not for $ty {
                type Output = NotExpr<Self>;

                fn not(self) -> Self::Output {
                    NotExpr(self)
                }
            }
        )*
    };
}

impl_operators!([] Ref, [F] NotExpr<F>, [F, G] BinaryExpr<F, G>);
