//! Aggregation observer that reports through tracing

use shared::{AggregationReport, DeviceRecord, MalformedEntry, ProcessId, process_debug, process_info, process_warn};

use crate::core::ZipLookupError;
use crate::traits::AggregationObserver;

/// Logs dropped records at debug level and a summary per pass
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    process_id: ProcessId,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            process_id: *ProcessId::current(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationObserver for TracingObserver {
    fn unresolvable_zip(&self, record: &DeviceRecord, error: &ZipLookupError) {
        process_debug!(
            self.process_id,
            device_id = %record.device_id,
            "⏭️ Skipping device: {}",
            error
        );
    }

    fn malformed_record(&self, entry: &MalformedEntry) {
        process_debug!(
            self.process_id,
            device_id = %entry.key,
            "⏭️ Skipping malformed entry: {}",
            entry.reason
        );
    }

    fn invalid_interactions(&self, record: &DeviceRecord) {
        process_debug!(
            self.process_id,
            device_id = %record.device_id,
            "🔢 Unreadable relayInteractions, counting the device with zero"
        );
    }

    fn aggregated(&self, report: &AggregationReport) {
        process_info!(
            self.process_id,
            "📊 Aggregated {} records into {} states ({} unresolvable ZIP, {} malformed, {} unreadable counters)",
            report.total_records,
            report.states.len(),
            report.skipped.unresolvable_zip,
            report.skipped.malformed_record,
            report.invalid_interactions
        );

        if report.total_records > 0 && report.skipped.total() * 2 > report.total_records {
            process_warn!(
                self.process_id,
                "⚠️ More than half of the device records could not be attributed to a state"
            );
        }
    }
}
