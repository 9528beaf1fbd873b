//! Scan lifecycle state.

use serde::Serialize;

use crate::mode::CheckMode;

/// Progress of the current (or most recent) batch scan.
///
/// Created at scan start and updated by workers as each domain completes.
/// `processed` only ever grows during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanState {
    pub is_scanning: bool,
    pub should_stop: bool,
    pub processed: usize,
    pub total: usize,
}

impl ScanState {
    pub(crate) fn begin(&mut self, total: usize) {
        *self = ScanState {
            is_scanning: true,
            should_stop: false,
            processed: 0,
            total,
        };
    }

    /// Counts one completed unit and returns `(processed, total)`.
    pub(crate) fn complete_one(&mut self) -> (usize, usize) {
        self.processed += 1;
        (self.processed, self.total)
    }
}

/// Snapshot returned by [`super::ScanClient::scan_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatus {
    #[serde(flatten)]
    pub state: ScanState,
    pub mode: CheckMode,
}

impl ScanStatus {
    pub fn is_scanning(&self) -> bool {
        self.state.is_scanning
    }

    /// Completion in percent, 0 when nothing was queued.
    pub fn percent_complete(&self) -> f64 {
        if self.state.total == 0 {
            0.0
        } else {
            self.state.processed as f64 * 100.0 / self.state.total as f64
        }
    }
}
