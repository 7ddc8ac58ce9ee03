//! Terminal rendering of the lookup page.
//!
//! Prints the same view model a browser page would show: headline, summary
//! table, findings table, and the detail card for a selected finding.

use predictus_ui::{
    DetailView, FINDINGS_HEADERS, FindingsTable, PageView, SUMMARY_HEADERS, SummaryTable,
};

const MAX_CELL_CHARS: usize = 40;

// ── Public API ──

/// Print the result panel: headline, summary (when visible) and findings.
pub fn print_results(view: &PageView) {
    println!("{}", view.total_line);
    println!();

    print_summary(&view.summary);
    print_findings(&view.findings);
}

/// Print the detail card for the open finding.
pub fn print_detail_card(row: usize, detail: &DetailView) {
    println!("=== Processo #{row} ===");
    for (slot, text) in detail.fields() {
        if text.is_empty() {
            continue;
        }
        println!("  {:<26} {}", slot.label(), text);
    }
    println!();
}

// ── Tables ──

fn print_summary(summary: &SummaryTable) {
    if !summary.visible {
        return;
    }
    println!("Resumo por Classe Processual");
    let rows: Vec<Vec<String>> = summary
        .rows
        .iter()
        .map(|r| r.cells().iter().map(|c| shorten(c)).collect())
        .collect();
    print_table(&SUMMARY_HEADERS, &rows);
    println!();
}

fn print_findings(findings: &FindingsTable) {
    if findings.is_empty() {
        println!("Nenhum achado.");
        return;
    }
    println!("Achados");
    let rows: Vec<Vec<String>> = findings
        .rows()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut cells = vec![i.to_string()];
            cells.extend(r.cells().iter().map(|c| shorten(c)));
            cells
        })
        .collect();
    let mut headers = vec!["#"];
    headers.extend(FINDINGS_HEADERS);
    print_table(&headers, &rows);
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_row(headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("  {}", rule.join("-+-"));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        print_row(&cells, &widths);
    }
}

fn print_row(cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    println!("  {}", padded.join(" | ").trim_end());
}

// ── Helpers ──

fn shorten(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_CHARS {
        let head: String = cell.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{head}...")
    } else {
        cell.to_string()
    }
}
