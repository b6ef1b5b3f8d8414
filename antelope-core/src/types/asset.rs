use super::{Decoder, Encoder, Pack, PackError, Unpack};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Largest precision a symbol may carry
pub const MAX_PRECISION: u8 = 18;

/// Error thrown when parsing an [`Asset`] or a [`Symbol`]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("invalid symbol code `{0}`: expected 1 to 7 uppercase letters")]
    InvalidSymbolCode(String),
    #[error("precision {0} exceeds the maximum of 18")]
    PrecisionTooLarge(u8),
    #[error("invalid asset `{0}`: expected `<amount> <SYMBOL>`")]
    InvalidFormat(String),
    #[error("asset amount `{0}` is out of range")]
    AmountOutOfRange(String),
}

/// A token symbol: a code of 1 to 7 uppercase letters plus a decimal precision.
///
/// The binary form packs the precision in the low byte followed by the code characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u64);

impl Symbol {
    /// Creates a symbol from a precision and a code such as `EOS`
    pub fn new(precision: u8, code: &str) -> Result<Self, AssetError> {
        if precision > MAX_PRECISION {
            return Err(AssetError::PrecisionTooLarge(precision))
        }
        if code.is_empty() || code.len() > 7 || !code.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(AssetError::InvalidSymbolCode(code.to_owned()))
        }
        let mut value = 0u64;
        for (i, c) in code.bytes().enumerate() {
            value |= (c as u64) << (8 * (i + 1));
        }
        Ok(Self(value | precision as u64))
    }

    /// Number of decimal places
    pub fn precision(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// The symbol code, e.g. `EOS`
    pub fn code(&self) -> String {
        let mut tmp = self.0 >> 8;
        let mut code = String::new();
        while tmp > 0 {
            code.push((tmp & 0xff) as u8 as char);
            tmp >>= 8;
        }
        code
    }

    /// Returns the raw 64-bit value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision(), self.code())
    }
}

impl FromStr for Symbol {
    type Err = AssetError;

    /// Parses the `4,EOS` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) =
            s.split_once(',').ok_or_else(|| AssetError::InvalidFormat(s.to_owned()))?;
        let precision =
            precision.trim().parse().map_err(|_| AssetError::InvalidFormat(s.to_owned()))?;
        Symbol::new(precision, code.trim())
    }
}

/// A quantity of tokens, e.g. `10.0000 EOS`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Creates an asset from its raw integer amount (in units of the smallest fraction)
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Creates an asset from a decimal amount, rounding to the symbol's precision
    pub fn from_decimal(amount: f64, symbol: Symbol) -> Result<Self, AssetError> {
        let scaled = (amount * 10f64.powi(symbol.precision() as i32)).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(AssetError::AmountOutOfRange(amount.to_string()))
        }
        Ok(Self { amount: scaled as i64, symbol })
    }

    /// Raw amount in units of the smallest fraction
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The amount as a float, e.g. `10.0` for `10.0000 EOS`
    pub fn to_decimal(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.symbol.precision() as i32)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as u32;
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let unit = 10u64.pow(precision);
        if precision == 0 {
            write!(f, "{sign}{abs} {}", self.symbol.code())
        } else {
            write!(
                f,
                "{sign}{}.{:0width$} {}",
                abs / unit,
                abs % unit,
                self.symbol.code(),
                width = precision as usize
            )
        }
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AssetError::InvalidFormat(s.to_owned());
        let (amount, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let code = code.trim();

        let (negative, digits) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (digits, ""),
        };
        if int_part.is_empty() ||
            !int_part.bytes().all(|c| c.is_ascii_digit()) ||
            !frac_part.bytes().all(|c| c.is_ascii_digit()) ||
            (digits.contains('.') && frac_part.is_empty())
        {
            return Err(invalid())
        }

        let precision =
            u8::try_from(frac_part.len()).map_err(|_| AssetError::PrecisionTooLarge(u8::MAX))?;
        let symbol = Symbol::new(precision, code)?;

        let magnitude: i64 = format!("{int_part}{frac_part}")
            .parse()
            .map_err(|_| AssetError::AmountOutOfRange(amount.to_owned()))?;
        let amount = if negative { -magnitude } else { magnitude };
        Ok(Asset { amount, symbol })
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Pack for Symbol {
    fn pack(&self, enc: &mut Encoder) {
        self.0.pack(enc)
    }
}

impl Unpack for Symbol {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Symbol(u64::unpack(dec)?))
    }
}

impl Pack for Asset {
    fn pack(&self, enc: &mut Encoder) {
        self.amount.pack(enc);
        self.symbol.pack(enc);
    }
}

impl Unpack for Asset {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, PackError> {
        Ok(Asset { amount: i64::unpack(dec)?, symbol: Symbol::unpack(dec)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let asset: Asset = "10.0000 EOS".parse().unwrap();
        assert_eq!(asset.amount(), 100_000);
        assert_eq!(asset.symbol().precision(), 4);
        assert_eq!(asset.symbol().code(), "EOS");
        assert_eq!(asset.to_string(), "10.0000 EOS");
        assert_eq!(asset.to_decimal(), 10.0);

        let negative: Asset = "-0.0001 SYS".parse().unwrap();
        assert_eq!(negative.amount(), -1);
        assert_eq!(negative.to_string(), "-0.0001 SYS");

        let whole: Asset = "42 TKN".parse().unwrap();
        assert_eq!(whole.to_string(), "42 TKN");
    }

    #[test]
    fn rejects_malformed() {
        assert!("10.0000".parse::<Asset>().is_err());
        assert!("10. EOS".parse::<Asset>().is_err());
        assert!("1x.00 EOS".parse::<Asset>().is_err());
        assert!(matches!("1.0 eos".parse::<Asset>(), Err(AssetError::InvalidSymbolCode(_))));
        assert!(matches!("1.0 TOOLONGX".parse::<Asset>(), Err(AssetError::InvalidSymbolCode(_))));
    }

    #[test]
    fn from_decimal_rounds_to_precision() {
        let symbol = Symbol::new(4, "EOS").unwrap();
        let asset = Asset::from_decimal(1.5, symbol).unwrap();
        assert_eq!(asset.to_string(), "1.5000 EOS");
    }

    #[test]
    fn packs_like_the_node() {
        // 1.0000 EOS
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        let mut enc = Encoder::new();
        asset.pack(&mut enc);
        assert_eq!(hex::encode(enc.into_bytes()), "102700000000000004454f5300000000");
    }

    #[test]
    fn symbol_text_form() {
        let symbol: Symbol = "4,EOS".parse().unwrap();
        assert_eq!(symbol.to_string(), "4,EOS");
        assert_eq!(symbol, Symbol::new(4, "EOS").unwrap());
    }
}
