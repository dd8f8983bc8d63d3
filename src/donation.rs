use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable donor identity, built by the caller from the donor's name and
/// five-digit ZIP prefix.
///
/// The key is opaque here: no case folding or whitespace normalization
/// happens on this side, so two spellings of the same donor are two donors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonorKey(pub String);

impl DonorKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for DonorKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for DonorKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for DonorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One validated contribution record.
///
/// Produced by an upstream parsing and validation stage; fields arrive here
/// already checked, and `amount` passes through as-is, zero or negative
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub recipient_id: String,
    pub donor_key: DonorKey,
    pub zip_prefix: String,
    pub year: i32,
    pub amount: i64,
}

impl Donation {
    pub fn new(
        recipient_id: impl Into<String>,
        donor_key: impl Into<DonorKey>,
        zip_prefix: impl Into<String>,
        year: i32,
        amount: i64,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            donor_key: donor_key.into(),
            zip_prefix: zip_prefix.into(),
            year,
            amount,
        }
    }

    /// The aggregation group this donation falls into.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            recipient_id: self.recipient_id.clone(),
            zip_prefix: self.zip_prefix.clone(),
            year: self.year,
        }
    }
}

/// Aggregation unit: one recipient, one ZIP prefix, one calendar year.
///
/// Donor identity is deliberately absent; contributions from different
/// repeat donors to the same recipient, area, and year share a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub recipient_id: String,
    pub zip_prefix: String,
    pub year: i32,
}

impl GroupKey {
    pub fn new(recipient_id: impl Into<String>, zip_prefix: impl Into<String>, year: i32) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            zip_prefix: zip_prefix.into(),
            year,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.recipient_id, self.zip_prefix, self.year)
    }
}
