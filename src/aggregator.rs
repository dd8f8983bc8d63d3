use crate::donation::{Donation, GroupKey};
use crate::multiset::OrderedMultiset;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Reasons a group summary cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// The requested percentile lies outside `0..=100`.
    #[error("percentile {0} is outside 0..=100")]
    InvalidPercentile(i32),

    /// No contributions are recorded under the group key.
    #[error("no contribution group for {0}")]
    KeyNotFound(GroupKey),
}

/// Running summary of one contribution group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub recipient_id: String,
    pub zip_prefix: String,
    pub year: i32,
    /// Amount at the requested nearest-rank percentile.
    pub percentile_value: i64,
    /// Sum of the group's repeat-donor contribution amounts.
    pub total: i64,
    /// Number of repeat-donor contributions in the group.
    pub count: usize,
}

impl fmt::Display for GroupSummary {
    /// The pipe-delimited line consumed downstream. Field order and the
    /// bare `|` delimiter are a compatibility contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.recipient_id,
            self.zip_prefix,
            self.year,
            self.percentile_value,
            self.total,
            self.count
        )
    }
}

/// Repeat-donor contribution amounts, grouped by recipient, ZIP prefix, and
/// calendar year.
///
/// Each group is an [`OrderedMultiset`], so recording an amount and pulling
/// a percentile are both logarithmic in the group size.
#[derive(Debug, Clone, Default)]
pub struct RecipientAggregator {
    groups: HashMap<GroupKey, OrderedMultiset>,
}

impl RecipientAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of groups holding at least one contribution.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The amounts recorded under `key`, if that group exists.
    pub fn group(&self, key: &GroupKey) -> Option<&OrderedMultiset> {
        self.groups.get(key)
    }

    /// Records `donation.amount` under the donation's group when `repeat`
    /// holds, returning the group key it landed in. Non-repeat donations
    /// leave the aggregator untouched and return `None`.
    pub fn add_if_repeat(&mut self, repeat: bool, donation: &Donation) -> Option<GroupKey> {
        if !repeat {
            return None;
        }
        let key = donation.group_key();
        let group = self.groups.entry(key.clone()).or_insert_with(|| {
            debug!("new contribution group {key}");
            OrderedMultiset::new()
        });
        group.insert(donation.amount);
        Some(key)
    }

    /// Nearest-rank percentile summary of the group at `key`.
    ///
    /// For `percentile` in `1..=100` the value is the group's element at
    /// index `ceil(percentile / 100 × count) − 1` in ascending order, the
    /// [nearest-rank method]. `percentile == 0` answers the group minimum;
    /// that special case is resolved before range validation.
    ///
    /// [nearest-rank method]: https://en.wikipedia.org/wiki/Percentile#The_nearest-rank_method
    pub fn summarize(&self, percentile: i32, key: &GroupKey) -> Result<GroupSummary, SummaryError> {
        let group = self
            .groups
            .get(key)
            .ok_or_else(|| SummaryError::KeyNotFound(key.clone()))?;
        let count = group.len();
        let selected = if percentile == 0 {
            group.min()
        } else if !(0..=100).contains(&percentile) {
            return Err(SummaryError::InvalidPercentile(percentile));
        } else {
            let rank = (percentile as usize * count).div_ceil(100).saturating_sub(1);
            group.select(rank)
        };
        let percentile_value =
            selected.ok_or_else(|| SummaryError::KeyNotFound(key.clone()))?;
        Ok(GroupSummary {
            recipient_id: key.recipient_id.clone(),
            zip_prefix: key.zip_prefix.clone(),
            year: key.year,
            percentile_value,
            total: group.sum(),
            count,
        })
    }
}
