//! Everything the page shows, as plain data.

use crate::detail::DetailView;
use crate::render::{FindingsTable, SummaryTable};

/// Where the import workflow is.
///
/// `Success` and `Error` only last until the trigger is re-enabled; between
/// submissions the controller is always `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPanel {
    pub visible: bool,
    pub message: String,
}

/// Page state owned by the controller.
///
/// After a completed submission exactly one of `error.visible` and
/// `result_visible` is set. The detail modal is independent of both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageView {
    /// Submit button disabled while a submission is in flight.
    pub trigger_disabled: bool,
    pub error: ErrorPanel,
    pub result_visible: bool,
    /// "N processos encontrados." headline.
    pub total_line: String,
    pub summary: SummaryTable,
    pub findings: FindingsTable,
    pub detail: DetailView,
}
