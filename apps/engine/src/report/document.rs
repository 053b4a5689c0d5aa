//! Document export payload: a positioned-operation layout the PDF writer
//! replays verbatim, plus a plain-text rendition for hosts without one.
//! The geometry is fixed, so regenerated files line up with previously
//! exported ones.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::form::{FormState, SPIN_QUESTIONS};
use crate::report::EXPORT_FILE_STEM;
use crate::smartmatch::recommendation::Recommendation;

pub const DOC_TITLE: &str = "QPWONSpin Report";

const TITLE_SIZE: u8 = 16;
const BODY_SIZE: u8 = 12;
const LEFT_MARGIN: f32 = 10.0;
const TOP_START: f32 = 20.0;
/// Vertical advance after the title and after the context line.
const BLOCK_STEP: f32 = 10.0;
/// Vertical advance per body line.
const LINE_STEP: f32 = 8.0;
/// Extra advance the logo box claims.
const LOGO_STEP: f32 = 20.0;
const LOGO_X: f32 = 150.0;
const LOGO_Y: f32 = 10.0;
const LOGO_WIDTH: f32 = 40.0;
const LOGO_HEIGHT: f32 = 20.0;

/// PNG logo the clinic can stamp on its reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoImage {
    pub png: Vec<u8>,
}

/// One drawing operation, in page units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocOp {
    Text {
        x: f32,
        y: f32,
        size: u8,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        png: Vec<u8>,
    },
}

/// What the document writer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentLayout {
    pub file_stem: &'static str,
    pub generated_at: DateTime<Utc>,
    pub ops: Vec<DocOp>,
}

/// Lays out the full report: title, optional logo, context line, every
/// question with its answer (blank ones included, matching the printed
/// form), then the optional recommendation block and the generation date.
pub fn layout_document(
    form: &FormState,
    recommendation: Option<&Recommendation>,
    logo: Option<&LogoImage>,
) -> DocumentLayout {
    let generated_at = Utc::now();
    let mut ops = Vec::new();
    let mut y = TOP_START;

    ops.push(DocOp::Text {
        x: LEFT_MARGIN,
        y,
        size: TITLE_SIZE,
        text: DOC_TITLE.to_string(),
    });
    y += BLOCK_STEP;

    if let Some(logo) = logo {
        ops.push(DocOp::Image {
            x: LOGO_X,
            y: LOGO_Y,
            width: LOGO_WIDTH,
            height: LOGO_HEIGHT,
            png: logo.png.clone(),
        });
        y += LOGO_STEP;
    }

    ops.push(DocOp::Text {
        x: LEFT_MARGIN,
        y,
        size: BODY_SIZE,
        text: format!("Contesto: {}", form.strategic_context),
    });
    y += BLOCK_STEP;

    for (i, question) in SPIN_QUESTIONS.iter().enumerate() {
        ops.push(DocOp::Text {
            x: LEFT_MARGIN,
            y,
            size: BODY_SIZE,
            text: format!("{}: {}", question.prompt, form.answer(i)),
        });
        y += LINE_STEP;
    }

    if let Some(rec) = recommendation {
        y += LINE_STEP;
        push_body_line(&mut ops, &mut y, format!("Soluzione consigliata: {}", rec.solution));
        push_body_line(&mut ops, &mut y, format!("Uplift stimato: +{}%", rec.uplift_pct));
        push_body_line(
            &mut ops,
            &mut y,
            format!(
                "Volume pazienti: da {} a {} al mese",
                rec.volume.baseline, rec.volume.projected
            ),
        );
        let names: Vec<&str> = rec.top_cases.iter().map(|e| e.case.name).collect();
        if !names.is_empty() {
            push_body_line(&mut ops, &mut y, format!("Casi studio: {}", names.join(", ")));
        }
    }

    y += LINE_STEP;
    ops.push(DocOp::Text {
        x: LEFT_MARGIN,
        y,
        size: BODY_SIZE,
        text: format!("Generato il {}", generated_at.format("%d/%m/%Y")),
    });

    DocumentLayout {
        file_stem: EXPORT_FILE_STEM,
        generated_at,
        ops,
    }
}

fn push_body_line(ops: &mut Vec<DocOp>, y: &mut f32, text: String) {
    ops.push(DocOp::Text {
        x: LEFT_MARGIN,
        y: *y,
        size: BODY_SIZE,
        text,
    });
    *y += LINE_STEP;
}

/// Plain-text rendition of a layout, one operation per line.
pub fn render_text(layout: &DocumentLayout) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for op in &layout.ops {
        match op {
            DocOp::Text { text, .. } => {
                let _ = writeln!(output, "{text}");
            }
            DocOp::Image { width, height, .. } => {
                let _ = writeln!(output, "[logo {width}x{height}]");
            }
        }
    }
    output
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
