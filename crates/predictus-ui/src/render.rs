//! Builders for the summary and findings tables.
//!
//! These shape response payloads into rows of display cells. How the cells
//! reach the screen (HTML, terminal, GUI) is up to the front-end.

use predictus_core::format::{display_text, format_currency_opt, verbatim_text};
use predictus_core::{FindingRecord, SummaryRow};
use serde_json::Value;

pub const SUMMARY_HEADERS: [&str; 4] = ["Classe Processual", "Status", "Quantidade", "Valor Total"];

pub const FINDINGS_HEADERS: [&str; 5] = [
    "N° Processo",
    "Partes Ativas",
    "Partes Passivas",
    "Classe Processual",
    "Valor da Causa",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTableRow {
    /// Empty when the previous row has the same class.
    pub procedural_class: String,
    pub status: String,
    pub count: String,
    pub total_value: String,
}

impl SummaryTableRow {
    /// Cell texts in header order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.procedural_class.as_str(),
            self.status.as_str(),
            self.count.as_str(),
            self.total_value.as_str(),
        ]
    }
}

/// The aggregated table. When `visible` is false the title and the table
/// are both hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTable {
    pub visible: bool,
    pub rows: Vec<SummaryTableRow>,
}

/// Build the summary table from rows in response order.
///
/// The class cell is left empty when it equals the class of the row
/// directly above it. This is a run-length collapse, not a group-by: input
/// must already be sorted by class for the result to read as groups, and
/// `A, B, A` renders all three classes.
pub fn render_summary(rows: &[SummaryRow]) -> SummaryTable {
    let mut previous: Option<&Value> = None;
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let class = row.procedural_class.as_ref();
        let procedural_class = if previous.is_some() && previous == class {
            String::new()
        } else {
            verbatim_text(class)
        };
        out.push(SummaryTableRow {
            procedural_class,
            status: verbatim_text(row.status.as_ref()),
            count: verbatim_text(row.quantidade.as_ref()),
            total_value: format_currency_opt(row.valor_total.as_ref()),
        });
        previous = class;
    }

    SummaryTable {
        visible: !out.is_empty(),
        rows: out,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingsTableRow {
    pub process_number: String,
    pub active_parties: String,
    pub passive_parties: String,
    pub procedural_class: String,
    pub claim_value: String,
}

impl FindingsTableRow {
    fn from_record(record: &FindingRecord) -> Self {
        Self {
            process_number: display_text(record.process_number.as_ref()),
            active_parties: display_text(record.active_parties.as_ref()),
            passive_parties: display_text(record.passive_parties.as_ref()),
            procedural_class: display_text(record.procedural_class.as_ref()),
            claim_value: format_currency_opt(record.claim_value.as_ref()),
        }
    }

    /// Cell texts in header order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.process_number.as_str(),
            self.active_parties.as_str(),
            self.passive_parties.as_str(),
            self.procedural_class.as_str(),
            self.claim_value.as_str(),
        ]
    }
}

/// The findings table together with the records it was built from.
///
/// Row `i` always shows record `i`: both vectors are built in one pass and
/// only ever replaced together, which is what lets a row click find its
/// record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingsTable {
    rows: Vec<FindingsTableRow>,
    records: Vec<FindingRecord>,
}

impl FindingsTable {
    /// Rendered rows, one per record.
    pub fn rows(&self) -> &[FindingsTableRow] {
        &self.rows
    }

    /// Records behind the rows, same order.
    pub fn records(&self) -> &[FindingRecord] {
        &self.records
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The record behind data row `row` (zero-based, header excluded).
    pub fn resolve(&self, row: usize) -> Option<&FindingRecord> {
        self.records.get(row)
    }

    /// Drop rows and records together.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.records.clear();
    }
}

/// Build the findings table, taking ownership of the records.
pub fn render_findings(records: Vec<FindingRecord>) -> FindingsTable {
    let rows = records.iter().map(FindingsTableRow::from_record).collect();
    FindingsTable { rows, records }
}

/// Headline shown above the summary.
pub fn render_total(total: u64) -> String {
    format!("{total} processos encontrados.")
}
