//! Form values that arrive either as JSON numbers or as numeric strings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// The value as a finite number. Blank or unparsable text is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().replace(',', ".").parse().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// The value as a non-negative whole number
    pub fn as_u32(&self) -> Option<u32> {
        let n = self.as_f64()?;
        if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
            return None;
        }
        Some(n as u32)
    }
}

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Numeric::Number(n)
    }
}
