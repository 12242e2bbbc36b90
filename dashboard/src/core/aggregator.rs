//! Per-state aggregation of device records
//!
//! Pure and synchronous: records are borrowed for one pass, never mutated,
//! and every call builds a fresh report. Records that cannot be attributed to
//! a state are counted in the report's skip summary and announced to the
//! injected [`AggregationObserver`]; they never abort the pass.

use shared::{AggregationReport, DeviceRecord, DeviceSnapshot, SkipReason};

use crate::core::zip_resolver::{us_zip_resolver, ZipStateResolver};
use crate::traits::AggregationObserver;

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AggregationObserver for NoopObserver {}

/// Folds device records into per-state device and interaction counts
#[derive(Debug, Clone, Copy)]
pub struct StateAggregator<'r> {
    resolver: &'r ZipStateResolver,
}

impl StateAggregator<'static> {
    /// Aggregator over the built-in US ZIP table
    pub fn us() -> Self {
        Self::new(us_zip_resolver())
    }
}

impl Default for StateAggregator<'static> {
    fn default() -> Self {
        Self::us()
    }
}

impl<'r> StateAggregator<'r> {
    pub fn new(resolver: &'r ZipStateResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &'r ZipStateResolver {
        self.resolver
    }

    pub fn aggregate<'a, I>(&self, records: I) -> AggregationReport
    where
        I: IntoIterator<Item = &'a DeviceRecord>,
    {
        self.aggregate_observed(records, &NoopObserver)
    }

    pub fn aggregate_observed<'a, I>(&self, records: I, observer: &dyn AggregationObserver) -> AggregationReport
    where
        I: IntoIterator<Item = &'a DeviceRecord>,
    {
        let report = self.fold(records, observer);
        observer.aggregated(&report);
        report
    }

    /// Aggregate a decoded store snapshot, counting the entries the decoder
    /// rejected as malformed records
    pub fn aggregate_snapshot(&self, snapshot: &DeviceSnapshot, observer: &dyn AggregationObserver) -> AggregationReport {
        for entry in &snapshot.malformed {
            observer.malformed_record(entry);
        }

        let mut report = self.fold(&snapshot.records, observer);
        report.add_malformed(snapshot.malformed.len() as u64);
        observer.aggregated(&report);
        report
    }

    fn fold<'a, I>(&self, records: I, observer: &dyn AggregationObserver) -> AggregationReport
    where
        I: IntoIterator<Item = &'a DeviceRecord>,
    {
        let mut report = AggregationReport::default();

        for record in records {
            report.total_records += 1;

            match self.resolver.resolve_value(record.zip.as_ref()) {
                Ok(state) => {
                    report.states.entry(state).or_default().record(record.interactions());
                    if record.interactions_invalid {
                        report.invalid_interactions += 1;
                        observer.invalid_interactions(record);
                    }
                }
                Err(error) => {
                    report.skipped.record(SkipReason::UnresolvableZip);
                    observer.unresolvable_zip(record, &error);
                }
            }
        }

        report
    }
}
