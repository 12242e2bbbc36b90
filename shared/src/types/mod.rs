//! Core types used throughout the dashboard workspace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Process identifier for every binary in the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Long-running HTTP dashboard
    Dashboard,
    /// One-shot aggregation report
    Report,
}

impl ProcessId {
    /// Initialize the global process ID for the dashboard server
    pub fn init_dashboard() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Dashboard)
    }

    /// Initialize the global process ID for the report CLI
    pub fn init_report() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Report)
    }

    /// Get the global process ID, falling back to the dashboard when a
    /// library consumer (tests included) never called an `init_*` function
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Dashboard)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Dashboard => write!(f, "dashboard"),
            ProcessId::Report => write!(f, "report"),
        }
    }
}

/// Two-letter USPS state code, always stored upper case.
///
/// This is the single key space shared by ZIP resolution, aggregation output
/// and the map page's per-state lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode([u8; 2]);

impl StateCode {
    /// Build a code from a literal, rejecting anything that is not two
    /// upper case ASCII letters at compile time when used in a const context
    ///
    /// # Panics
    ///
    /// Panics at runtime when called outside a const context with anything
    /// other than two upper case ASCII letters. Use [`StateCode::parse`] for
    /// untrusted input.
    pub const fn from_static(code: &'static str) -> Self {
        let bytes = code.as_bytes();
        assert!(bytes.len() == 2, "state code must be two letters");
        assert!(bytes[0].is_ascii_uppercase() && bytes[1].is_ascii_uppercase(), "state code must be upper case ASCII");
        Self([bytes[0], bytes[1]])
    }

    /// Parse user input, accepting either case
    pub fn parse(input: &str) -> SharedResult<Self> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(SharedError::InvalidStateCode {
                input: input.to_string(),
            });
        }
        Ok(Self([bytes[0].to_ascii_uppercase(), bytes[1].to_ascii_uppercase()]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("")
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateCode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StateCode {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_code_parse_normalizes_case() {
        assert_eq!(StateCode::parse("ny").unwrap(), StateCode::from_static("NY"));
        assert_eq!(StateCode::parse(" Ca ").unwrap().as_str(), "CA");
    }

    #[test]
    fn test_state_code_rejects_bad_input() {
        for input in ["", "N", "NYC", "1A", "N-", "é"] {
            assert!(StateCode::parse(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_state_code_serializes_as_string() {
        let code = StateCode::from_static("TX");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"TX\"");

        let parsed: StateCode = serde_json::from_str("\"wa\"").unwrap();
        assert_eq!(parsed.as_str(), "WA");
        assert!(serde_json::from_str::<StateCode>("\"WAS\"").is_err());
    }

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::Dashboard.to_string(), "dashboard");
        assert_eq!(ProcessId::Report.to_string(), "report");
    }

    #[test]
    #[should_panic]
    fn test_from_static_panics_on_lowercase_at_runtime() {
        let input = String::from("ca");
        let leaked: &'static str = Box::leak(input.into_boxed_str());
        let _ = StateCode::from_static(leaked);
    }
}
