use crate::donation::DonorKey;
use log::trace;
use std::collections::HashMap;

/// Earliest contribution year on record for every donor seen so far.
///
/// Feeding in a donation classifies it in the same call: it is a repeat
/// donation exactly when the donor already has an earlier year on record.
/// Classification uses only what is known at call time and is never
/// revisited, so replaying the same donations in a different order can
/// classify them differently. The stored year itself is order-independent;
/// it always converges to the minimum year fed in.
#[derive(Debug, Clone, Default)]
pub struct DonorLedger {
    earliest: HashMap<DonorKey, i32>,
}

impl DonorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct donors observed.
    #[inline]
    pub fn len(&self) -> usize {
        self.earliest.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.earliest.is_empty()
    }

    /// Earliest year on record for `donor_key`.
    pub fn earliest_year(&self, donor_key: &DonorKey) -> Option<i32> {
        self.earliest.get(donor_key).copied()
    }

    /// Records one donation and reports whether it came from a repeat donor.
    ///
    /// Returns `true` when `year` is strictly later than the donor's earliest
    /// known year. A first-seen donor is never a repeat, whatever the year.
    /// A donation at or before the stored year is not a repeat either; it
    /// lowers the stored minimum instead.
    pub fn record_donation(&mut self, donor_key: &DonorKey, year: i32) -> bool {
        match self.earliest.get_mut(donor_key) {
            Some(earliest) if year > *earliest => {
                trace!("repeat donor {donor_key}: {year} after {earliest}");
                true
            }
            Some(earliest) => {
                *earliest = year;
                false
            }
            None => {
                self.earliest.insert(donor_key.clone(), year);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> DonorKey {
        DonorKey::new(raw)
    }

    #[test]
    fn first_donation_is_never_repeat() {
        let mut ledger = DonorLedger::new();
        assert!(!ledger.record_donation(&key("WURST, HANS30034"), 2017));
        assert_eq!(ledger.earliest_year(&key("WURST, HANS30034")), Some(2017));
    }

    #[test]
    fn later_year_is_repeat_and_keeps_minimum() {
        let mut ledger = DonorLedger::new();
        ledger.record_donation(&key("HAASE, BASTIAN30033"), 2017);
        assert!(ledger.record_donation(&key("HAASE, BASTIAN30033"), 2018));
        assert_eq!(ledger.earliest_year(&key("HAASE, BASTIAN30033")), Some(2017));
    }

    #[test]
    fn earlier_year_lowers_minimum_without_repeat() {
        let mut ledger = DonorLedger::new();
        ledger.record_donation(&key("DOE, JANE30033"), 2018);
        assert!(!ledger.record_donation(&key("DOE, JANE30033"), 2015));
        assert_eq!(ledger.earliest_year(&key("DOE, JANE30033")), Some(2015));
    }

    #[test]
    fn same_year_is_not_repeat() {
        let mut ledger = DonorLedger::new();
        ledger.record_donation(&key("DOE, JANE30033"), 2017);
        assert!(!ledger.record_donation(&key("DOE, JANE30033"), 2017));
        assert_eq!(ledger.earliest_year(&key("DOE, JANE30033")), Some(2017));
    }

    // The same two donations classify differently depending on arrival
    // order; only the stored minimum is order-independent.
    #[test]
    fn classification_depends_on_arrival_order() {
        let mut forward = DonorLedger::new();
        let first = forward.record_donation(&key("DOE, JANE30033"), 2015);
        let second = forward.record_donation(&key("DOE, JANE30033"), 2016);
        assert_eq!((first, second), (false, true));

        let mut reversed = DonorLedger::new();
        let first = reversed.record_donation(&key("DOE, JANE30033"), 2016);
        let second = reversed.record_donation(&key("DOE, JANE30033"), 2015);
        assert_eq!((first, second), (false, false));

        assert_eq!(forward.earliest_year(&key("DOE, JANE30033")), Some(2015));
        assert_eq!(reversed.earliest_year(&key("DOE, JANE30033")), Some(2015));
    }

    #[test]
    fn distinct_donors_do_not_interact() {
        let mut ledger = DonorLedger::new();
        ledger.record_donation(&key("ABBOTT, COSTELLO30033"), 2016);
        assert!(!ledger.record_donation(&key("BUD, LOU30033"), 2017));
        assert_eq!(ledger.len(), 2);
    }
}
