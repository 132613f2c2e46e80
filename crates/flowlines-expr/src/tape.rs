//! Linear SSA programs lowered from [`Expr`] trees.
//!
//! A [`Tape`] is a list of instructions, each writing one slot and reading
//! only earlier slots; the last instruction produces the result. The same
//! tape runs in two modes:
//!
//! - point mode, over a small stack buffer of `f64` slots;
//! - grid mode, where each slot holds either a scalar or a whole array and
//!   every instruction is one elementwise pass.
//!
//! Both modes apply the same scalar kernels ([`UnaryFn::apply`],
//! [`BinOp::apply`]), so grid results equal point results bit for bit.

use ndarray::{ArrayD, ArrayViewD, Zip};
use smallvec::SmallVec;

use crate::ast::{Axis, BinOp, Expr, UnaryFn};

/// One tape instruction. Operands are indices of earlier slots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    /// Load a constant.
    Const(f64),
    /// Load a coordinate.
    Load(Axis),
    /// Negate a slot.
    Neg(u32),
    /// Apply a unary builtin to a slot.
    Unary(UnaryFn, u32),
    /// Combine two slots.
    Binary(BinOp, u32, u32),
}

/// A compiled scalar function of `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tape {
    instrs: Vec<Instr>,
}

/// A grid-mode slot value. Constants stay scalar until the end.
enum Lane {
    Scalar(f64),
    Array(ArrayD<f64>),
}

impl Tape {
    /// Lower an expression. Each coordinate is loaded at most once.
    pub fn lower(expr: &Expr) -> Tape {
        let mut lowering = Lowering::default();
        lowering.emit(expr);
        Tape {
            instrs: lowering.instrs,
        }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    /// Returns `true` if the tape has no instructions. Never the case for a
    /// lowered expression.
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// The instruction list.
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Evaluate at a single point.
    pub fn eval_point(&self, x: f64, y: f64) -> f64 {
        let mut slots: SmallVec<[f64; 32]> = SmallVec::with_capacity(self.instrs.len());
        for instr in &self.instrs {
            let value = match *instr {
                Instr::Const(c) => c,
                Instr::Load(Axis::X) => x,
                Instr::Load(Axis::Y) => y,
                Instr::Neg(a) => -slots[a as usize],
                Instr::Unary(f, a) => f.apply(slots[a as usize]),
                Instr::Binary(op, a, b) => op.apply(slots[a as usize], slots[b as usize]),
            };
            slots.push(value);
        }
        slots.last().copied().unwrap_or(f64::NAN)
    }

    /// Evaluate over equal-shaped coordinate arrays.
    ///
    /// The result always has the input shape, including for formulas that
    /// do not mention `x` or `y`. Callers are responsible for checking that
    /// `xs` and `ys` share a shape.
    pub fn eval_grid(&self, xs: ArrayViewD<'_, f64>, ys: ArrayViewD<'_, f64>) -> ArrayD<f64> {
        let mut slots: Vec<Lane> = Vec::with_capacity(self.instrs.len());
        for instr in &self.instrs {
            let lane = match *instr {
                Instr::Const(c) => Lane::Scalar(c),
                Instr::Load(Axis::X) => Lane::Array(xs.to_owned()),
                Instr::Load(Axis::Y) => Lane::Array(ys.to_owned()),
                Instr::Neg(a) => match &slots[a as usize] {
                    Lane::Scalar(s) => Lane::Scalar(-s),
                    Lane::Array(arr) => Lane::Array(arr.mapv(|v| -v)),
                },
                Instr::Unary(f, a) => match &slots[a as usize] {
                    Lane::Scalar(s) => Lane::Scalar(f.apply(*s)),
                    Lane::Array(arr) => Lane::Array(arr.mapv(|v| f.apply(v))),
                },
                Instr::Binary(op, a, b) => binary_lane(op, &slots[a as usize], &slots[b as usize]),
            };
            slots.push(lane);
        }
        match slots.pop() {
            Some(Lane::Array(arr)) => arr,
            Some(Lane::Scalar(s)) => ArrayD::from_elem(xs.raw_dim(), s),
            None => ArrayD::from_elem(xs.raw_dim(), f64::NAN),
        }
    }
}

fn binary_lane(op: BinOp, a: &Lane, b: &Lane) -> Lane {
    match (a, b) {
        (Lane::Scalar(l), Lane::Scalar(r)) => Lane::Scalar(op.apply(*l, *r)),
        (Lane::Array(l), Lane::Scalar(r)) => {
            let r = *r;
            Lane::Array(l.mapv(|v| op.apply(v, r)))
        }
        (Lane::Scalar(l), Lane::Array(r)) => {
            let l = *l;
            Lane::Array(r.mapv(|v| op.apply(l, v)))
        }
        (Lane::Array(l), Lane::Array(r)) => {
            Lane::Array(Zip::from(l).and(r).map_collect(|&lv, &rv| op.apply(lv, rv)))
        }
    }
}

#[derive(Default)]
struct Lowering {
    instrs: Vec<Instr>,
    x: Option<u32>,
    y: Option<u32>,
}

impl Lowering {
    fn push(&mut self, instr: Instr) -> u32 {
        self.instrs.push(instr);
        (self.instrs.len() - 1) as u32
    }

    fn load(&mut self, axis: Axis) -> u32 {
        let cached = match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        };
        if let Some(slot) = cached {
            return slot;
        }
        let slot = self.push(Instr::Load(axis));
        match axis {
            Axis::X => self.x = Some(slot),
            Axis::Y => self.y = Some(slot),
        }
        slot
    }

    fn emit(&mut self, expr: &Expr) -> u32 {
        match expr {
            Expr::Const(c) => self.push(Instr::Const(*c)),
            Expr::Var(axis) => self.load(*axis),
            Expr::Neg(a) => {
                let a = self.emit(a);
                self.push(Instr::Neg(a))
            }
            Expr::Unary(f, a) => {
                let a = self.emit(a);
                self.push(Instr::Unary(*f, a))
            }
            Expr::Binary(op, a, b) => {
                let a = self.emit(a);
                let b = self.emit(b);
                self.push(Instr::Binary(*op, a, b))
            }
        }
    }
}
