//! Shared value types for central fill lookups

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Newtype wrapper for facility IDs to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl FacilityId {
    /// Sequential display id: 1-based index zero-padded to three digits ("001")
    pub fn numbered(n: usize) -> Self {
        Self(format!("{:03}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FacilityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FacilityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors from parsing price text such as "12.30"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error("price is empty")]
    Empty,
    #[error("price {0:?} is negative")]
    Negative(String),
    #[error("price {0:?} is not a decimal number")]
    Invalid(String),
    #[error("price {0:?} has more than two decimal places")]
    TooPrecise(String),
    #[error("price {0:?} is too large")]
    Overflow(String),
}

/// Non-negative fixed-point money amount, stored in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Price of `tenths` tenths of a unit (e.g. 123 -> 12.30)
    #[inline]
    pub const fn from_tenths(tenths: u64) -> Self {
        Self(tenths * 10)
    }

    #[inline]
    pub const fn cents(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(PriceParseError::Empty);
        }
        if text.starts_with('-') {
            return Err(PriceParseError::Negative(text.to_string()));
        }

        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (text, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(PriceParseError::Invalid(text.to_string()));
        }
        if text.ends_with('.') {
            return Err(PriceParseError::Invalid(text.to_string()));
        }
        if frac.len() > 2 {
            return Err(PriceParseError::TooPrecise(text.to_string()));
        }

        let overflow = || PriceParseError::Overflow(text.to_string());
        let whole: u64 = whole.parse().map_err(|_| overflow())?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse::<u64>().map_err(|_| overflow())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Price)
            .ok_or_else(overflow)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    /// Accepts "12.30", 12.3 or 12 so hand-written TOML can use either form
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};

        struct PriceVisitor;

        impl<'de> Visitor<'de> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a non-negative price as a string or number")
            }

            fn visit_str<E>(self, value: &str) -> Result<Price, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Price, E>
            where
                E: de::Error,
            {
                value
                    .checked_mul(100)
                    .map(Price)
                    .ok_or_else(|| E::custom(PriceParseError::Overflow(value.to_string())))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Price, E>
            where
                E: de::Error,
            {
                let value = u64::try_from(value)
                    .map_err(|_| E::custom(PriceParseError::Negative(value.to_string())))?;
                self.visit_u64(value)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Price, E>
            where
                E: de::Error,
            {
                // Route through the text parser so 0.1 + float noise is judged on its
                // shortest decimal representation
                value.to_string().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Item name to price mapping for one facility. Ordered by name.
pub type Catalog = BTreeMap<String, Price>;

/// A point on the integer grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The coordinate a lookup is evaluated against
pub type QueryPoint = GridPoint;

/// A central fill facility at a fixed grid coordinate
///
/// Immutable after construction. A facility with an empty catalog is valid to
/// build but never appears in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    id: FacilityId,
    location: GridPoint,
    catalog: Catalog,
}

impl Facility {
    pub fn new(id: impl Into<FacilityId>, x: i32, y: i32, catalog: Catalog) -> Self {
        Self { id: id.into(), location: GridPoint::new(x, y), catalog }
    }

    #[inline]
    pub fn id(&self) -> &FacilityId {
        &self.id
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.location.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.location.y
    }

    #[inline]
    pub fn location(&self) -> GridPoint {
        self.location
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// One ranked row of a lookup, computed per query and then discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub facility_id: FacilityId,
    pub distance: u64,
    pub cheapest_item_name: String,
    pub cheapest_item_price: Price,
}
