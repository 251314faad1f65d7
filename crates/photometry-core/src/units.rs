//! Physical units and unit-carrying quantities.
//!
//! Units are compared for exact equality only. There is no
//! conversion machinery: a column declared in `deg` must be in `deg`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A physical unit as used by the photometry schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Unit {
    Degree,
    Pixel,
    Second,
    Minute,
    Hour,
    Day,
    Adu,
    Electron,
    Count,
    Photon,
    Dimensionless,
    /// `numerator / denominator`, e.g. `electron / adu`.
    Ratio(Box<Unit>, Box<Unit>),
    /// `base ** power`, e.g. `pix2`.
    Power(Box<Unit>, i32),
    Other(String),
}

impl Unit {
    pub fn per(numerator: Unit, denominator: Unit) -> Self {
        Unit::Ratio(Box::new(numerator), Box::new(denominator))
    }

    pub fn squared(self) -> Self {
        Unit::Power(Box::new(self), 2)
    }

    pub fn is_dimensionless(&self) -> bool {
        matches!(self, Unit::Dimensionless)
    }

    fn parse_atom(s: &str) -> Unit {
        match s {
            "" => Unit::Dimensionless,
            "deg" | "degree" | "degrees" => Unit::Degree,
            "pix" | "pixel" | "pixels" => Unit::Pixel,
            "s" | "sec" | "second" | "seconds" => Unit::Second,
            "min" | "minute" | "minutes" => Unit::Minute,
            "h" | "hr" | "hour" | "hours" => Unit::Hour,
            "d" | "day" | "days" => Unit::Day,
            "adu" | "ADU" => Unit::Adu,
            "electron" | "electrons" | "e-" => Unit::Electron,
            "ct" | "count" | "counts" => Unit::Count,
            "ph" | "photon" | "photons" => Unit::Photon,
            other => {
                // `pix2`, `pix**2`, `pix^2`
                let split = other
                    .split_once("**")
                    .or_else(|| other.split_once('^'))
                    .or_else(|| {
                        let idx = other.find(|c: char| c.is_ascii_digit())?;
                        (idx > 0).then(|| other.split_at(idx))
                    });
                if let Some((base, power)) = split {
                    if let Ok(p) = power.parse::<i32>() {
                        let base = Unit::parse_atom(base);
                        if !matches!(base, Unit::Other(_) | Unit::Dimensionless) {
                            return Unit::Power(Box::new(base), p);
                        }
                    }
                }
                Unit::Other(other.to_string())
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degree => write!(f, "deg"),
            Self::Pixel => write!(f, "pix"),
            Self::Second => write!(f, "s"),
            Self::Minute => write!(f, "min"),
            Self::Hour => write!(f, "h"),
            Self::Day => write!(f, "d"),
            Self::Adu => write!(f, "adu"),
            Self::Electron => write!(f, "electron"),
            Self::Count => write!(f, "ct"),
            Self::Photon => write!(f, "ph"),
            Self::Dimensionless => write!(f, ""),
            Self::Ratio(n, d) => write!(f, "{n} / {d}"),
            Self::Power(b, p) => write!(f, "{b}{p}"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for Unit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((num, den)) => {
                let num = Unit::parse_atom(num.trim());
                let den = Unit::parse_atom(den.trim());
                Ok(Unit::per(num, den))
            }
            None => Ok(Unit::parse_atom(s)),
        }
    }
}

impl From<Unit> for String {
    fn from(u: Unit) -> Self {
        u.to_string()
    }
}

impl TryFrom<String> for Unit {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A magnitude paired with its unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Parse `"<number> <unit>"`, rejecting bare numbers.
    ///
    /// `parameter` names the quantity in the error message.
    pub fn parse_with_units(parameter: &str, s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (num, unit) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(s.to_string()))?;
        let unit: Unit = unit.parse()?;
        if unit.is_dimensionless() {
            return Err(ConfigError::MissingUnit {
                parameter: parameter.to_string(),
                value,
            });
        }
        Ok(Self { value, unit })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

impl FromStr for Quantity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse_with_units("quantity", s)
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.to_string()
    }
}

impl TryFrom<String> for Quantity {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_unit() {
        let u: Unit = "electron / adu".parse().unwrap();
        assert_eq!(u, Unit::per(Unit::Electron, Unit::Adu));
        assert_eq!(u.to_string(), "electron / adu");
    }

    #[test]
    fn test_parse_power_unit() {
        assert_eq!("pix2".parse::<Unit>().unwrap(), Unit::Pixel.squared());
        assert_eq!("pix**2".parse::<Unit>().unwrap(), Unit::Pixel.squared());
    }

    #[test]
    fn test_unknown_unit_is_other() {
        assert_eq!(
            "furlong".parse::<Unit>().unwrap(),
            Unit::Other("furlong".into())
        );
    }

    #[test]
    fn test_parse_quantity() {
        let q: Quantity = "0.01 electron / s".parse().unwrap();
        assert!((q.value - 0.01).abs() < 1e-12);
        assert_eq!(q.unit, Unit::per(Unit::Electron, Unit::Second));
    }

    #[test]
    fn test_parse_quantity_exponent() {
        let q: Quantity = "1e-2 electron".parse().unwrap();
        assert!((q.value - 0.01).abs() < 1e-12);
        assert_eq!(q.unit, Unit::Electron);
    }

    #[test]
    fn test_bare_number_rejected() {
        let err = Quantity::parse_with_units("gain", "1.5").unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingUnit {
                parameter: "gain".into(),
                value: 1.5
            }
        );
    }
}
