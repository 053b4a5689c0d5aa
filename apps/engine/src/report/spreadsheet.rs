//! Spreadsheet export payload: a two-column table of non-empty fields, plus
//! the row list behind the live share view.

use serde::Serialize;

use crate::models::form::{FormState, SPIN_QUESTIONS};
use crate::report::EXPORT_FILE_STEM;

pub const SHEET_NAME: &str = "Report";
pub const HEADER: (&str, &str) = ("Campo", "Valore");

const CONTEXT_LABEL: &str = "Contesto Strategico";

/// One label/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub label: String,
    pub value: String,
}

/// What the spreadsheet writer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetTable {
    pub file_stem: &'static str,
    pub sheet_name: &'static str,
    pub header: (&'static str, &'static str),
    pub rows: Vec<ExportRow>,
}

/// Builds the export table: the strategic context when present, then every
/// answered question. Blank fields never produce a row.
pub fn build_table(form: &FormState) -> SpreadsheetTable {
    let mut rows = Vec::new();

    if !form.strategic_context.trim().is_empty() {
        rows.push(ExportRow {
            label: CONTEXT_LABEL.to_string(),
            value: form.strategic_context.clone(),
        });
    }
    rows.extend(answered_rows(form));

    SpreadsheetTable {
        file_stem: EXPORT_FILE_STEM,
        sheet_name: SHEET_NAME,
        header: HEADER,
        rows,
    }
}

/// Rows behind the live share view: answered questions only, no context.
pub fn share_rows(form: &FormState) -> Vec<ExportRow> {
    answered_rows(form).collect()
}

fn answered_rows(form: &FormState) -> impl Iterator<Item = ExportRow> + '_ {
    SPIN_QUESTIONS
        .iter()
        .enumerate()
        .filter(|(i, _)| form.answered(*i))
        .map(|(i, question)| ExportRow {
            label: question.prompt.to_string(),
            value: form.answer(i).to_string(),
        })
}
