use std::fmt;
use std::str::FromStr;


/// A probability strictly inside (0,1).
///
/// Artifact names embed only the fractional digits of the value, which is
/// unambiguous as long as the integer part is always zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fraction(f64);

impl Fraction {

    pub fn new(value: f64) -> Result<Fraction, String> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Fraction(value))
        } else {
            Err(format!("{value} is not strictly between 0 and 1"))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Digits after the decimal point of the shortest representation: 0.15 => "15"
    pub fn digits(&self) -> String {
        let repr = self.0.to_string();
        match repr.split_once('.') {
            Some((_, digits)) => digits.to_string(),
            None => repr,
        }
    }
}

impl FromStr for Fraction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>()
            .map_err(|_| format!("\"{s}\" is not a decimal number"))?;
        Fraction::new(value)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// Extraction mode, decided by the presence of a reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Realignment {
    Raw,
    Realigned,
}

impl Realignment {
    pub fn name(&self) -> &'static str {
        match self {
            Realignment::Raw => "raw",
            Realignment::Realigned => "realigned",
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeParams {
    pub error_rate: Fraction,
    pub max_error_rate: Fraction,
    pub thr: u32,
    pub neg_thr: u32,
}

impl MergeParams {

    pub fn threshold(&self) -> u64 {
        10u64.pow(self.thr)
    }

    pub fn neg_threshold(&self) -> u64 {
        10u64.pow(self.neg_thr)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownsampleParams {
    pub seed: u64,
    pub max_coverage: u32,
}


/// Immutable once the run starts; determines every derived artifact name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub merge: MergeParams,
    pub downsample: DownsampleParams,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            merge: MergeParams {
                error_rate: Fraction(0.15),
                max_error_rate: Fraction(0.25),
                thr: 6,
                neg_thr: 3,
            },
            downsample: DownsampleParams {
                seed: 1,
                max_coverage: 15,
            },
        }
    }
}
