//! Truth tables of small Boolean functions.
//!
//! A [`TruthTable`] stores the value of a function of at most six variables
//! for all `2^n` assignments in a single `u64`: bit `i` is the value under the
//! assignment whose variable `x_k` equals bit `k` of `i`.
//!
//! Truth tables are the reference semantics for BDDs in tests:
//! [`Bdd::to_truth_table`] expands a diagram into its truth table by Shannon
//! expansion, and the result can be compared against a table computed with
//! plain bitwise operations.
//!
//! The textual form lists the bits from the highest assignment down to the
//! lowest, so `x0 & x1` over two variables is `"1000"`:
//!
//! ```
//! use robdd::truth_table::TruthTable;
//!
//! let x0 = TruthTable::nth_var(2, 0, true);
//! let x1 = TruthTable::nth_var(2, 1, true);
//! assert_eq!((x0 & x1).to_string(), "1000");
//! assert_eq!((x0 ^ x1).to_string(), "0110");
//! assert_eq!("1000".parse::<TruthTable>().unwrap(), x0 & x1);
//! ```

use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

use thiserror::Error;

use crate::bdd::Bdd;
use crate::node::Node;
use crate::reference::Ref;

/// Masks keeping the `2^n` meaningful bits of an `n`-variable table.
const LENGTH_MASK: [u64; 7] = [
    0x0000000000000001,
    0x0000000000000003,
    0x000000000000000f,
    0x00000000000000ff,
    0x000000000000ffff,
    0x00000000ffffffff,
    0xffffffffffffffff,
];

/// Bits where variable `k` is 1.
const VAR_MASK_POS: [u64; 6] = [
    0xaaaaaaaaaaaaaaaa,
    0xcccccccccccccccc,
    0xf0f0f0f0f0f0f0f0,
    0xff00ff00ff00ff00,
    0xffff0000ffff0000,
    0xffffffff00000000,
];

/// Bits where variable `k` is 0.
const VAR_MASK_NEG: [u64; 6] = [
    0x5555555555555555,
    0x3333333333333333,
    0x0f0f0f0f0f0f0f0f,
    0x00ff00ff00ff00ff,
    0x0000ffff0000ffff,
    0x00000000ffffffff,
];

/// A complete truth table of a function of up to [`TruthTable::MAX_VARS`] variables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    bits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTruthTableError {
    #[error("truth table length {0} is not a power of two between 1 and 64")]
    BadLength(usize),
    #[error("invalid character {character:?} at position {position}")]
    BadCharacter { character: char, position: usize },
}

impl TruthTable {
    pub const MAX_VARS: u32 = 6;

    fn check_num_vars(num_vars: u32) {
        assert!(
            num_vars <= Self::MAX_VARS,
            "Truth tables support at most {} variables, got {}",
            Self::MAX_VARS,
            num_vars
        );
    }

    /// The constant false function of `num_vars` variables.
    pub fn new(num_vars: u32) -> Self {
        Self::from_bits(num_vars, 0)
    }

    /// The constant true function of `num_vars` variables.
    pub fn ones(num_vars: u32) -> Self {
        Self::from_bits(num_vars, u64::MAX)
    }

    /// Build a table from raw bits; bits above `2^num_vars` are dropped.
    pub fn from_bits(num_vars: u32, bits: u64) -> Self {
        Self::check_num_vars(num_vars);
        Self {
            num_vars,
            bits: bits & LENGTH_MASK[num_vars as usize],
        }
    }

    /// The function `x_var` (or `~x_var` when `polarity` is false).
    pub fn nth_var(num_vars: u32, var: u32, polarity: bool) -> Self {
        Self::check_num_vars(num_vars);
        assert!(var < num_vars, "Variable x{} is out of range 0..{}", var, num_vars);
        let mask = if polarity {
            VAR_MASK_POS[var as usize]
        } else {
            VAR_MASK_NEG[var as usize]
        };
        Self::from_bits(num_vars, mask)
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of assignments, `2^num_vars`.
    pub fn num_bits(&self) -> usize {
        1 << self.num_vars
    }

    /// Whether this is the constant false function.
    pub fn is_zero(&self) -> bool {
        self.bits == 0
    }

    fn check_position(&self, position: usize) {
        assert!(
            position < self.num_bits(),
            "Bit {} is out of range for {} variables",
            position,
            self.num_vars
        );
    }

    pub fn get_bit(&self, position: usize) -> bool {
        self.check_position(position);
        (self.bits >> position) & 1 == 1
    }

    pub fn set_bit(&mut self, position: usize) {
        self.check_position(position);
        self.bits |= 1 << position;
    }

    /// Number of satisfying assignments.
    pub fn count_ones(&self) -> u32 {
        self.bits.count_ones()
    }

    fn check_var(&self, var: u32) {
        assert!(
            var < self.num_vars,
            "Variable x{} is out of range 0..{}",
            var,
            self.num_vars
        );
    }

    /// `f|x=1`, as a function of the same variables.
    pub fn positive_cofactor(&self, var: u32) -> Self {
        self.check_var(var);
        let f = self.bits & VAR_MASK_POS[var as usize];
        Self::from_bits(self.num_vars, f | (f >> (1 << var)))
    }

    /// `f|x=0`, as a function of the same variables.
    pub fn negative_cofactor(&self, var: u32) -> Self {
        self.check_var(var);
        let f = self.bits & VAR_MASK_NEG[var as usize];
        Self::from_bits(self.num_vars, f | (f << (1 << var)))
    }

    /// Boolean difference `f|x=1 ^ f|x=0`.
    pub fn derivative(&self, var: u32) -> Self {
        self.positive_cofactor(var) ^ self.negative_cofactor(var)
    }

    /// Universal quantification `f|x=1 & f|x=0`.
    pub fn consensus(&self, var: u32) -> Self {
        self.positive_cofactor(var) & self.negative_cofactor(var)
    }

    /// Existential quantification `f|x=1 | f|x=0`.
    pub fn smoothing(&self, var: u32) -> Self {
        self.positive_cofactor(var) | self.negative_cofactor(var)
    }

    fn check_compatible(&self, other: &Self) {
        assert_eq!(
            self.num_vars, other.num_vars,
            "Truth tables over {} and {} variables cannot be combined",
            self.num_vars, other.num_vars
        );
    }
}

impl Not for TruthTable {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(self.num_vars, !self.bits)
    }
}

impl BitAnd for TruthTable {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.check_compatible(&rhs);
        Self::from_bits(self.num_vars, self.bits & rhs.bits)
    }
}

impl BitOr for TruthTable {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.check_compatible(&rhs);
        Self::from_bits(self.num_vars, self.bits | rhs.bits)
    }
}

impl BitXor for TruthTable {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.check_compatible(&rhs);
        Self::from_bits(self.num_vars, self.bits ^ rhs.bits)
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for position in (0..self.num_bits()).rev() {
            write!(f, "{}", if self.get_bit(position) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for TruthTable {
    type Err = ParseTruthTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if !len.is_power_of_two() || len > 64 {
            return Err(ParseTruthTableError::BadLength(len));
        }

        let mut table = TruthTable::new(len.trailing_zeros());
        for (i, c) in s.chars().enumerate() {
            match c {
                '1' => table.set_bit(len - 1 - i),
                '0' => {}
                character => {
                    return Err(ParseTruthTableError::BadCharacter { character, position: i });
                }
            }
        }
        Ok(table)
    }
}

impl Bdd {
    /// Truth table of the function rooted at `f`, by Shannon expansion:
    ///
    /// ```text
    /// tt(f) = (x & tt(f_x)) | (~x & tt(f_~x))
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the manager has more than [`TruthTable::MAX_VARS`] variables.
    pub fn to_truth_table(&self, f: Ref) -> TruthTable {
        let num_vars = self.num_vars();
        assert!(
            num_vars <= TruthTable::MAX_VARS,
            "Truth tables support at most {} variables, the manager has {}",
            TruthTable::MAX_VARS,
            num_vars
        );

        match self.node(f) {
            Node::Terminal(false) => TruthTable::new(num_vars),
            Node::Terminal(true) => TruthTable::ones(num_vars),
            Node::Decision { variable, high, low } => {
                let x = variable.id();
                let tt_x = TruthTable::nth_var(num_vars, x, true);
                let tt_nx = TruthTable::nth_var(num_vars, x, false);
                (tt_x & self.to_truth_table(high)) | (tt_nx & self.to_truth_table(low))
            }
        }
    }
}
