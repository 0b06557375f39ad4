//! Terminal rendering of result panels.

use std::fmt::Write;
use vf_core::{SubScores, Verdict};

use super::page::excerpt;
use crate::state::ResultPanel;
use crate::style::{image_tone, text_tone, Tone};

pub fn render_panel(panel: &ResultPanel) -> String {
    let mut out = String::new();
    match panel {
        ResultPanel::Hidden => {}
        ResultPanel::Loading => out.push_str("Analyzing..."),
        ResultPanel::Failed(message) => {
            let _ = write!(out, "❌ {}", message);
        }
        ResultPanel::Text(result) => {
            headline(&mut out, result.credibility, &result.verdict, text_tone(&result.verdict));
            scores(&mut out, &result.scores);
        }
        ResultPanel::Image(result) => {
            headline(&mut out, result.credibility, &result.verdict, image_tone(&result.verdict));
            if !result.alert.trim().is_empty() {
                let _ = writeln!(out, "{}", result.alert);
            }
            if let Some(extracted) = result.extracted_text.as_deref().filter(|t| !t.trim().is_empty()) {
                let _ = writeln!(out, "Extracted text: \"{}\"", excerpt(extracted));
            }
            scores(&mut out, &result.scores);
            let _ = writeln!(out, "  {:<13}{:>6.1}%", "Manipulation", result.image_manipulation_score * 100.0);
            if let Some(concerns) = result.concerns.as_deref().filter(|c| *c != "None" && !c.trim().is_empty()) {
                let _ = writeln!(out, "Concerns: {}", concerns);
            }
        }
    }
    out.trim_end().to_string()
}

fn headline(out: &mut String, credibility: u8, verdict: &Verdict, tone: Tone) {
    let _ = writeln!(out, "{} {}  (credibility {}%)", tone.icon().glyph(), verdict, credibility);
}

fn scores(out: &mut String, scores: &SubScores) {
    for (label, value) in [
        ("ML", scores.ml_score),
        ("BERT", scores.bert_score),
        ("LLM", scores.llm_score),
        ("Web", scores.web_score),
    ] {
        let _ = writeln!(out, "  {:<13}{:>6.1}%", label, value * 100.0);
    }
}
