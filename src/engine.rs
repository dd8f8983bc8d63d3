use crate::aggregator::{GroupSummary, RecipientAggregator, SummaryError};
use crate::donation::Donation;
use crate::ledger::DonorLedger;
use log::warn;

/// All mutable state for one pass over a donation stream: the donor ledger,
/// the per-group aggregates, and the run-constant percentile.
///
/// Construct one per run and drop it afterwards; nothing persists between
/// runs. Donations must be fed in input order, since repeat classification
/// is order-sensitive (see [`DonorLedger::record_donation`]).
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    percentile: i32,
    ledger: DonorLedger,
    aggregator: RecipientAggregator,
}

impl AggregationEngine {
    /// A fresh engine producing summaries at `percentile`.
    ///
    /// The percentile is range-checked at query time, not here; an
    /// out-of-range value builds an engine whose summaries all fail with
    /// [`SummaryError::InvalidPercentile`].
    pub fn new(percentile: i32) -> Self {
        Self {
            percentile,
            ledger: DonorLedger::new(),
            aggregator: RecipientAggregator::new(),
        }
    }

    /// The run-constant percentile.
    #[inline]
    pub fn percentile(&self) -> i32 {
        self.percentile
    }

    /// Read access to the donor ledger.
    pub fn ledger(&self) -> &DonorLedger {
        &self.ledger
    }

    /// Read access to the per-group aggregates.
    pub fn aggregator(&self) -> &RecipientAggregator {
        &self.aggregator
    }

    /// Processes one donation: the ledger update comes first, then, for
    /// repeat-donor donations only, aggregation and a summary of the group
    /// just updated.
    ///
    /// `Ok(None)` means the donation did not come from a repeat donor and no
    /// group changed. On `Err` the amount has still been recorded; only the
    /// summary is withheld.
    pub fn process(&mut self, donation: &Donation) -> Result<Option<GroupSummary>, SummaryError> {
        let repeat = self
            .ledger
            .record_donation(&donation.donor_key, donation.year);
        match self.aggregator.add_if_repeat(repeat, donation) {
            Some(key) => self.aggregator.summarize(self.percentile, &key).map(Some),
            None => Ok(None),
        }
    }

    /// Processes a whole stream, returning one formatted summary line per
    /// repeat-donor donation, in input order.
    ///
    /// A failed summary is logged and skipped rather than aborting the run;
    /// ledger and aggregation state still advance for every donation.
    pub fn run<I>(&mut self, donations: I) -> Vec<String>
    where
        I: IntoIterator<Item = Donation>,
    {
        let mut lines = Vec::new();
        for donation in donations {
            match self.process(&donation) {
                Ok(Some(summary)) => lines.push(summary.to_string()),
                Ok(None) => {}
                Err(err) => warn!("summary withheld: {err}"),
            }
        }
        lines
    }
}
