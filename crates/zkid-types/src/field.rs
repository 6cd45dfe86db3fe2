use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An unsigned field element of arbitrary width.
///
/// Proving backends hand values back as hex strings, sometimes with a `0x`
/// prefix and sometimes without. [`FromStr`] is the one place both forms are
/// accepted; everything downstream works on the parsed integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldElement(pub BigUint);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFieldError(String);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid field element {:?}", self.0)
    }
}

impl std::error::Error for ParseFieldError {}

impl FieldElement {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// `0x`-prefixed lowercase hex, no leading zeros (`0x0` for zero).
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl FromStr for FieldElement {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseFieldError(s.to_string()));
        }
        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

impl From<u64> for FieldElement {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<BigUint> for FieldElement {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        let a: FieldElement = "0x2a".parse().unwrap();
        let b: FieldElement = "2a".parse().unwrap();
        let c: FieldElement = "0X2A".parse().unwrap();
        assert_eq!(a, FieldElement::from(42));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn parses_full_width_words() {
        let word = format!("0x{}", "ff".repeat(32));
        let fe: FieldElement = word.parse().unwrap();
        assert_eq!(fe.0.to_bytes_be(), vec![0xff; 32]);
    }

    #[test]
    fn leading_zeros_ignored() {
        let fe: FieldElement = "0x000000000000000000000000000001".parse().unwrap();
        assert_eq!(fe, FieldElement::from(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<FieldElement>().is_err());
        assert!("0x".parse::<FieldElement>().is_err());
        assert!("0xzz".parse::<FieldElement>().is_err());
        assert!("+12".parse::<FieldElement>().is_err());
        assert!("1_0".parse::<FieldElement>().is_err());
    }

    #[test]
    fn hex_display() {
        assert_eq!(FieldElement::zero().to_hex(), "0x0");
        assert_eq!(FieldElement::from(255).to_string(), "0xff");
    }

    #[test]
    fn serde_as_hex_string() {
        let fe = FieldElement::from(0xdead_beef);
        let json = serde_json::to_string(&fe).unwrap();
        assert_eq!(json, "\"0xdeadbeef\"");
        let back: FieldElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fe);
        let unprefixed: FieldElement = serde_json::from_str("\"deadbeef\"").unwrap();
        assert_eq!(unprefixed, fe);
    }
}
