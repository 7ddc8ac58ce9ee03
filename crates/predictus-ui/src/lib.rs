//! Lookup page logic: view model, table rendering, detail modal, and the
//! import workflow controller.

pub mod controller;
pub mod detail;
mod error;
pub mod render;
pub mod view;

pub use controller::{Controller, SubmitOutcome, UiEvent};
pub use detail::{ClickTarget, DetailSlot, DetailView};
pub use error::{IMPORT_FALLBACK, QUERY_FALLBACK, WorkflowError};
pub use render::{
    FINDINGS_HEADERS, FindingsTable, FindingsTableRow, SUMMARY_HEADERS, SummaryTable,
    SummaryTableRow, render_findings, render_summary, render_total,
};
pub use view::{ErrorPanel, PageView, Phase};
