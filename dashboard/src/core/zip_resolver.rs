//! ZIP code to state resolution
//!
//! A static table of inclusive ZIP ranges, built once per process and shared
//! read-only. Lookup is a binary search over the ranges sorted by their low
//! bound. A table with overlapping ranges is a data error: it is still served,
//! but by a linear scan that returns the first match in authored order, and
//! the overlaps are exposed through [`ZipStateResolver::overlaps`].

use std::sync::OnceLock;
use thiserror::Error;

use shared::{StateCode, ZipValue};

/// Lowest assigned ZIP (Holtsville, NY)
pub const MIN_ZIP: u32 = 501;
/// Highest assigned ZIP (Ketchikan, AK)
pub const MAX_ZIP: u32 = 99950;

/// Inclusive ZIP range owned by one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipRange {
    low: u32,
    high: u32,
    state: StateCode,
}

impl ZipRange {
    /// # Panics
    ///
    /// Panics if `low > high` or `state` is not two uppercase ASCII letters.
    /// In a `static` table this is a compile-time error instead.
    pub const fn new(low: u32, high: u32, state: &'static str) -> Self {
        assert!(low <= high, "ZIP range bounds are inverted");
        Self {
            low,
            high,
            state: StateCode::from_static(state),
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn state(&self) -> StateCode {
        self.state
    }

    pub fn contains(&self, zip: u32) -> bool {
        self.low <= zip && zip <= self.high
    }
}

/// US ZIP allocation by three-digit prefix, refined where a prefix is split
/// between states. Military (AA/AE/AP) prefixes are deliberately absent.
static US_ZIP_RANGES: &[ZipRange] = &[
    ZipRange::new(501, 544, "NY"),
    ZipRange::new(600, 799, "PR"),
    ZipRange::new(800, 899, "VI"),
    ZipRange::new(900, 999, "PR"),
    ZipRange::new(1000, 2799, "MA"),
    ZipRange::new(2800, 2999, "RI"),
    ZipRange::new(3000, 3899, "NH"),
    ZipRange::new(3900, 4999, "ME"),
    ZipRange::new(5000, 5999, "VT"),
    ZipRange::new(6000, 6999, "CT"),
    ZipRange::new(7000, 8999, "NJ"),
    ZipRange::new(10000, 14999, "NY"),
    ZipRange::new(15000, 19699, "PA"),
    ZipRange::new(19700, 19999, "DE"),
    ZipRange::new(20000, 20099, "DC"),
    ZipRange::new(20100, 20199, "VA"),
    ZipRange::new(20200, 20599, "DC"),
    ZipRange::new(20600, 21999, "MD"),
    ZipRange::new(22000, 24699, "VA"),
    ZipRange::new(24700, 26899, "WV"),
    ZipRange::new(27000, 28999, "NC"),
    ZipRange::new(29000, 29999, "SC"),
    ZipRange::new(30000, 31999, "GA"),
    ZipRange::new(32000, 33999, "FL"),
    ZipRange::new(34100, 34999, "FL"),
    ZipRange::new(35000, 36999, "AL"),
    ZipRange::new(37000, 38599, "TN"),
    ZipRange::new(38600, 39799, "MS"),
    ZipRange::new(39800, 39999, "GA"),
    ZipRange::new(40000, 42799, "KY"),
    ZipRange::new(43000, 45999, "OH"),
    ZipRange::new(46000, 47999, "IN"),
    ZipRange::new(48000, 49999, "MI"),
    ZipRange::new(50000, 52899, "IA"),
    ZipRange::new(53000, 54999, "WI"),
    ZipRange::new(55000, 56799, "MN"),
    ZipRange::new(57000, 57799, "SD"),
    ZipRange::new(58000, 58899, "ND"),
    ZipRange::new(59000, 59999, "MT"),
    ZipRange::new(60000, 62999, "IL"),
    ZipRange::new(63000, 65899, "MO"),
    ZipRange::new(66000, 67999, "KS"),
    ZipRange::new(68000, 69399, "NE"),
    ZipRange::new(70000, 71499, "LA"),
    ZipRange::new(71600, 72999, "AR"),
    ZipRange::new(73000, 73199, "OK"),
    ZipRange::new(73300, 73399, "TX"),
    ZipRange::new(73400, 74999, "OK"),
    ZipRange::new(75000, 79999, "TX"),
    ZipRange::new(80000, 81699, "CO"),
    ZipRange::new(82000, 83199, "WY"),
    ZipRange::new(83200, 83899, "ID"),
    ZipRange::new(84000, 84799, "UT"),
    ZipRange::new(85000, 86599, "AZ"),
    ZipRange::new(87000, 88499, "NM"),
    ZipRange::new(88500, 88599, "TX"),
    ZipRange::new(88900, 89899, "NV"),
    ZipRange::new(90000, 96199, "CA"),
    ZipRange::new(96700, 96798, "HI"),
    ZipRange::new(96799, 96799, "AS"),
    ZipRange::new(96800, 96899, "HI"),
    ZipRange::new(96910, 96932, "GU"),
    ZipRange::new(96950, 96952, "MP"),
    ZipRange::new(97000, 97999, "OR"),
    ZipRange::new(98000, 99499, "WA"),
    ZipRange::new(99500, 99950, "AK"),
];

static US_RESOLVER: OnceLock<ZipStateResolver> = OnceLock::new();

/// Shared resolver over the built-in US table
pub fn us_zip_resolver() -> &'static ZipStateResolver {
    US_RESOLVER.get_or_init(|| ZipStateResolver::new(US_ZIP_RANGES.to_vec()))
}

/// Why a ZIP did not resolve to a state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZipLookupError {
    #[error("ZIP code is missing")]
    Missing,

    #[error("ZIP code is not numeric: {0}")]
    Malformed(String),

    #[error("ZIP code {0} is outside 00501..=99950")]
    OutOfRange(i64),

    #[error("ZIP code {0:05} is not covered by any state range")]
    NotFound(u32),
}

/// Two ranges in the table that claim the same ZIP codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipOverlap {
    pub first: ZipRange,
    pub second: ZipRange,
}

/// Range table lookup from ZIP code to state code
#[derive(Debug, Clone)]
pub struct ZipStateResolver {
    /// Authored order, used for first-match resolution when ranges overlap
    authored: Vec<ZipRange>,
    /// Stable-sorted by low bound for binary search
    sorted: Vec<ZipRange>,
    overlaps: Vec<ZipOverlap>,
}

impl ZipStateResolver {
    pub fn new(ranges: Vec<ZipRange>) -> Self {
        let mut sorted = ranges.clone();
        sorted.sort_by_key(|r| r.low);
        let overlaps = find_overlaps(&sorted);

        Self {
            authored: ranges,
            sorted,
            overlaps,
        }
    }

    pub fn ranges(&self) -> &[ZipRange] {
        &self.authored
    }

    /// Overlapping range pairs; empty for a well-formed table
    pub fn overlaps(&self) -> &[ZipOverlap] {
        &self.overlaps
    }

    /// Resolve a numeric ZIP
    pub fn resolve(&self, zip: u32) -> Result<StateCode, ZipLookupError> {
        if !(MIN_ZIP..=MAX_ZIP).contains(&zip) {
            return Err(ZipLookupError::OutOfRange(i64::from(zip)));
        }

        let found = if self.overlaps.is_empty() {
            let idx = self.sorted.partition_point(|r| r.low <= zip);
            idx.checked_sub(1)
                .map(|i| self.sorted[i])
                .filter(|r| zip <= r.high)
        } else {
            // Known limitation: overlapping tables resolve to the first authored match
            self.authored.iter().copied().find(|r| r.contains(zip))
        };

        found.map(|r| r.state).ok_or(ZipLookupError::NotFound(zip))
    }

    /// Resolve a ZIP field as stored on a device record
    pub fn resolve_value(&self, zip: Option<&ZipValue>) -> Result<StateCode, ZipLookupError> {
        let zip = zip.ok_or(ZipLookupError::Missing)?;
        self.resolve(parse_zip(zip)?)
    }
}

impl Default for ZipStateResolver {
    fn default() -> Self {
        us_zip_resolver().clone()
    }
}

/// Coerce a stored ZIP into its numeric form.
///
/// Accepts integers and digit strings (leading zeros and surrounding
/// whitespace allowed, at most five digits) plus the ZIP+4 form `12345-6789`.
pub fn parse_zip(zip: &ZipValue) -> Result<u32, ZipLookupError> {
    match zip {
        ZipValue::Integer(n) => u32::try_from(*n).map_err(|_| ZipLookupError::OutOfRange(*n)),
        ZipValue::Text(text) => parse_zip_text(text),
        ZipValue::Other(value) => Err(ZipLookupError::Malformed(value.to_string())),
    }
}

fn parse_zip_text(text: &str) -> Result<u32, ZipLookupError> {
    let trimmed = text.trim();
    let malformed = || ZipLookupError::Malformed(text.to_string());

    let digits = match trimmed.split_once('-') {
        Some((head, plus4)) if head.len() == 5 && plus4.len() == 4 && is_digits(plus4) => head,
        Some(_) => return Err(malformed()),
        None => trimmed,
    };

    if digits.is_empty() || digits.len() > 5 || !is_digits(digits) {
        return Err(malformed());
    }

    digits.parse().map_err(|_| malformed())
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn find_overlaps(sorted: &[ZipRange]) -> Vec<ZipOverlap> {
    let mut overlaps = Vec::new();
    let mut widest: Option<ZipRange> = None;

    for range in sorted {
        if let Some(prev) = widest {
            if range.low <= prev.high {
                overlaps.push(ZipOverlap {
                    first: prev,
                    second: *range,
                });
            }
        }
        if widest.map_or(true, |prev| range.high > prev.high) {
            widest = Some(*range);
        }
    }

    overlaps
}
