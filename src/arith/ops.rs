//! Opcode names.
//!
//! Names are matched case-sensitively through compile-time perfect hash maps.
//! Most binary operators also answer to a symbol (`+`, `<=`, ..).

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::table_bail;

/// Cell-wise operator applied to a cell value `a` and an operand `b`. Unary
/// operators ignore `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarOp {
    Noop,
    Real,
    Imag,
    Conj,
    Neg,
    Sqr,
    Abs,
    Angle,
    Sqrt,
    Sign,
    /// Integer part, truncated toward zero.
    Ent,
    Floor,
    Ceil,
    Inc,
    Dec,
    Inv,
    Log,
    Log2,
    Ln,
    Exp,
    Sin,
    Asin,
    Sinh,
    Asinh,
    Cos,
    Acos,
    Cosh,
    Acosh,
    Tan,
    Atan,
    Tanh,
    Atanh,
    Sinc,
    Add,
    /// Log-semiring addition, `-ln(e^-a + e^-b)`.
    LsAdd,
    /// `ln(e^a + e^b)`.
    ExpAdd,
    Diff,
    AbsDiff,
    QDiff,
    QAbsDiff,
    Mult,
    Div,
    Mod,
    Set,
    Factorial,
    /// `ln(a)`, floored at `b`.
    Lnl,
    Pow,
    /// Binomial coefficient `a over b`.
    Over,
    Gauss,
    Sigmoid,
    Or,
    BitOr,
    And,
    BitAnd,
    Not,
    Eq,
    Neq,
    Less,
    Greater,
    Leq,
    Geq,
    IsNan,
    Max,
    /// Larger magnitude.
    AMax,
    /// Operand with the larger magnitude, sign kept.
    SMax,
    Min,
    AMin,
    SMin,
    Round,
}

static SCALAR_OPS: phf::Map<&'static str, ScalarOp> = phf_map! {
    "noop" => ScalarOp::Noop,
    "real" => ScalarOp::Real,
    "imag" => ScalarOp::Imag,
    "conj" => ScalarOp::Conj,
    "neg" => ScalarOp::Neg,
    "sqr" => ScalarOp::Sqr,
    "abs" => ScalarOp::Abs,
    "angle" => ScalarOp::Angle,
    "sqrt" => ScalarOp::Sqrt,
    "sign" => ScalarOp::Sign,
    "ent" => ScalarOp::Ent,
    "floor" => ScalarOp::Floor,
    "ceil" => ScalarOp::Ceil,
    "inc" => ScalarOp::Inc,
    "++" => ScalarOp::Inc,
    "dec" => ScalarOp::Dec,
    "--" => ScalarOp::Dec,
    "inv" => ScalarOp::Inv,
    "log" => ScalarOp::Log,
    "log2" => ScalarOp::Log2,
    "ln" => ScalarOp::Ln,
    "exp" => ScalarOp::Exp,
    "sin" => ScalarOp::Sin,
    "asin" => ScalarOp::Asin,
    "sinh" => ScalarOp::Sinh,
    "asinh" => ScalarOp::Asinh,
    "cos" => ScalarOp::Cos,
    "acos" => ScalarOp::Acos,
    "cosh" => ScalarOp::Cosh,
    "acosh" => ScalarOp::Acosh,
    "tan" => ScalarOp::Tan,
    "atan" => ScalarOp::Atan,
    "tanh" => ScalarOp::Tanh,
    "atanh" => ScalarOp::Atanh,
    "sinc" => ScalarOp::Sinc,
    "add" => ScalarOp::Add,
    "+" => ScalarOp::Add,
    "lsadd" => ScalarOp::LsAdd,
    "expadd" => ScalarOp::ExpAdd,
    "diff" => ScalarOp::Diff,
    "-" => ScalarOp::Diff,
    "absdiff" => ScalarOp::AbsDiff,
    "qdiff" => ScalarOp::QDiff,
    "qabsdiff" => ScalarOp::QAbsDiff,
    "mult" => ScalarOp::Mult,
    "*" => ScalarOp::Mult,
    "div" => ScalarOp::Div,
    "/" => ScalarOp::Div,
    "mod" => ScalarOp::Mod,
    "%" => ScalarOp::Mod,
    "set" => ScalarOp::Set,
    "=" => ScalarOp::Set,
    "factorial" => ScalarOp::Factorial,
    "!" => ScalarOp::Factorial,
    "lnl" => ScalarOp::Lnl,
    "pow" => ScalarOp::Pow,
    "^" => ScalarOp::Pow,
    "over" => ScalarOp::Over,
    "gauss" => ScalarOp::Gauss,
    "sigmoid" => ScalarOp::Sigmoid,
    "or" => ScalarOp::Or,
    "||" => ScalarOp::Or,
    "bitor" => ScalarOp::BitOr,
    "|" => ScalarOp::BitOr,
    "and" => ScalarOp::And,
    "&&" => ScalarOp::And,
    "bitand" => ScalarOp::BitAnd,
    "&" => ScalarOp::BitAnd,
    "not" => ScalarOp::Not,
    "eq" => ScalarOp::Eq,
    "==" => ScalarOp::Eq,
    "neq" => ScalarOp::Neq,
    "!=" => ScalarOp::Neq,
    "less" => ScalarOp::Less,
    "<" => ScalarOp::Less,
    "greater" => ScalarOp::Greater,
    ">" => ScalarOp::Greater,
    "leq" => ScalarOp::Leq,
    "<=" => ScalarOp::Leq,
    "geq" => ScalarOp::Geq,
    ">=" => ScalarOp::Geq,
    "isnan" => ScalarOp::IsNan,
    "max" => ScalarOp::Max,
    "amax" => ScalarOp::AMax,
    "smax" => ScalarOp::SMax,
    "min" => ScalarOp::Min,
    "amin" => ScalarOp::AMin,
    "smin" => ScalarOp::SMin,
    "round" => ScalarOp::Round,
};

impl ScalarOp {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarOp::Noop => "noop",
            ScalarOp::Real => "real",
            ScalarOp::Imag => "imag",
            ScalarOp::Conj => "conj",
            ScalarOp::Neg => "neg",
            ScalarOp::Sqr => "sqr",
            ScalarOp::Abs => "abs",
            ScalarOp::Angle => "angle",
            ScalarOp::Sqrt => "sqrt",
            ScalarOp::Sign => "sign",
            ScalarOp::Ent => "ent",
            ScalarOp::Floor => "floor",
            ScalarOp::Ceil => "ceil",
            ScalarOp::Inc => "inc",
            ScalarOp::Dec => "dec",
            ScalarOp::Inv => "inv",
            ScalarOp::Log => "log",
            ScalarOp::Log2 => "log2",
            ScalarOp::Ln => "ln",
            ScalarOp::Exp => "exp",
            ScalarOp::Sin => "sin",
            ScalarOp::Asin => "asin",
            ScalarOp::Sinh => "sinh",
            ScalarOp::Asinh => "asinh",
            ScalarOp::Cos => "cos",
            ScalarOp::Acos => "acos",
            ScalarOp::Cosh => "cosh",
            ScalarOp::Acosh => "acosh",
            ScalarOp::Tan => "tan",
            ScalarOp::Atan => "atan",
            ScalarOp::Tanh => "tanh",
            ScalarOp::Atanh => "atanh",
            ScalarOp::Sinc => "sinc",
            ScalarOp::Add => "add",
            ScalarOp::LsAdd => "lsadd",
            ScalarOp::ExpAdd => "expadd",
            ScalarOp::Diff => "diff",
            ScalarOp::AbsDiff => "absdiff",
            ScalarOp::QDiff => "qdiff",
            ScalarOp::QAbsDiff => "qabsdiff",
            ScalarOp::Mult => "mult",
            ScalarOp::Div => "div",
            ScalarOp::Mod => "mod",
            ScalarOp::Set => "set",
            ScalarOp::Factorial => "factorial",
            ScalarOp::Lnl => "lnl",
            ScalarOp::Pow => "pow",
            ScalarOp::Over => "over",
            ScalarOp::Gauss => "gauss",
            ScalarOp::Sigmoid => "sigmoid",
            ScalarOp::Or => "or",
            ScalarOp::BitOr => "bitor",
            ScalarOp::And => "and",
            ScalarOp::BitAnd => "bitand",
            ScalarOp::Not => "not",
            ScalarOp::Eq => "eq",
            ScalarOp::Neq => "neq",
            ScalarOp::Less => "less",
            ScalarOp::Greater => "greater",
            ScalarOp::Leq => "leq",
            ScalarOp::Geq => "geq",
            ScalarOp::IsNan => "isnan",
            ScalarOp::Max => "max",
            ScalarOp::AMax => "amax",
            ScalarOp::SMax => "smax",
            ScalarOp::Min => "min",
            ScalarOp::AMin => "amin",
            ScalarOp::SMin => "smin",
            ScalarOp::Round => "round",
        }
    }
}

impl FromStr for ScalarOp {
    type Err = eyre::Report;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match SCALAR_OPS.get(s) {
            Some(&op) => Ok(op),
            None => table_bail!(BadOpcode, "unknown scalar operation '{}'", s),
        }
    }
}

impl fmt::Display for ScalarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduction of a window of values to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Sum,
    /// Log-semiring sum.
    LsSum,
    LsMean,
    Prod,
    Max,
    /// Position of the maximum within the window.
    IMax,
    Min,
    IMin,
    /// `max - min`.
    Span,
    Mean,
    /// Mean of magnitudes.
    AMean,
    /// Mean of squares.
    QMean,
    /// `param`-th moment.
    Moment,
    /// `param`-th central moment.
    CMoment,
    GMean,
    HMean,
    /// Value at sorted position `param`.
    Rank,
    Median,
    /// Value at sorted position `n * param`.
    Quantile,
    Quartile,
    Var,
    Sdev,
    Skew,
    /// Excess kurtosis.
    Exc,
    /// Minkowski norm of order `param`.
    Mink,
    /// Minkowski norm raised to `param`.
    MinkPow,
    /// First minus last value.
    Diff,
}

static AGGREGATE_OPS: phf::Map<&'static str, AggregateOp> = phf_map! {
    "sum" => AggregateOp::Sum,
    "lssum" => AggregateOp::LsSum,
    "lsmean" => AggregateOp::LsMean,
    "prod" => AggregateOp::Prod,
    "max" => AggregateOp::Max,
    "imax" => AggregateOp::IMax,
    "min" => AggregateOp::Min,
    "imin" => AggregateOp::IMin,
    "span" => AggregateOp::Span,
    "mean" => AggregateOp::Mean,
    "amean" => AggregateOp::AMean,
    "qmean" => AggregateOp::QMean,
    "mom" => AggregateOp::Moment,
    "cmom" => AggregateOp::CMoment,
    "gmean" => AggregateOp::GMean,
    "hmean" => AggregateOp::HMean,
    "rank" => AggregateOp::Rank,
    "med" => AggregateOp::Median,
    "quantil" => AggregateOp::Quantile,
    "quartil" => AggregateOp::Quartile,
    "var" => AggregateOp::Var,
    "sdev" => AggregateOp::Sdev,
    "skew" => AggregateOp::Skew,
    "exc" => AggregateOp::Exc,
    "mink" => AggregateOp::Mink,
    "minkpow" => AggregateOp::MinkPow,
    "diff" => AggregateOp::Diff,
};

impl AggregateOp {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::LsSum => "lssum",
            AggregateOp::LsMean => "lsmean",
            AggregateOp::Prod => "prod",
            AggregateOp::Max => "max",
            AggregateOp::IMax => "imax",
            AggregateOp::Min => "min",
            AggregateOp::IMin => "imin",
            AggregateOp::Span => "span",
            AggregateOp::Mean => "mean",
            AggregateOp::AMean => "amean",
            AggregateOp::QMean => "qmean",
            AggregateOp::Moment => "mom",
            AggregateOp::CMoment => "cmom",
            AggregateOp::GMean => "gmean",
            AggregateOp::HMean => "hmean",
            AggregateOp::Rank => "rank",
            AggregateOp::Median => "med",
            AggregateOp::Quantile => "quantil",
            AggregateOp::Quartile => "quartil",
            AggregateOp::Var => "var",
            AggregateOp::Sdev => "sdev",
            AggregateOp::Skew => "skew",
            AggregateOp::Exc => "exc",
            AggregateOp::Mink => "mink",
            AggregateOp::MinkPow => "minkpow",
            AggregateOp::Diff => "diff",
        }
    }
}

impl FromStr for AggregateOp {
    type Err = eyre::Report;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match AGGREGATE_OPS.get(s) {
            Some(&op) => Ok(op),
            None => table_bail!(NoSupport, "unknown aggregation '{}'", s),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
