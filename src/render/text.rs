//! Character-level greedy line wrapping.
//!
//! Text is split on `\n` into paragraphs. Each paragraph is filled one character at a time; when
//! appending a character pushes the measured width past the limit, the line so far is emitted
//! and the character starts the next line. Every paragraph emits at least one line, so an empty
//! value yields a single empty line. A character wider than the limit still gets placed, alone.

use std::convert::Infallible;

use serde::Serialize;

/// A wrapped line and the top of its line box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionedLine {
    /// Line content.
    pub text: String,
    /// Top edge in canvas space.
    pub y: f64,
}

/// Wrap `text` to `max_width` using a fallible width measurement.
pub fn try_wrap_text<E>(
    text: &str,
    max_width: f64,
    mut measure: impl FnMut(&str) -> Result<f64, E>,
) -> Result<Vec<String>, E> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for c in paragraph.chars() {
            let mut candidate = String::with_capacity(line.len() + c.len_utf8());
            candidate.push_str(&line);
            candidate.push(c);
            if measure(&candidate)? > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line.push(c);
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Wrap `text` to `max_width`.
pub fn wrap_text(text: &str, max_width: f64, mut measure: impl FnMut(&str) -> f64) -> Vec<String> {
    let res: Result<_, Infallible> = try_wrap_text(text, max_width, |s| Ok(measure(s)));
    match res {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// Assign a top edge to each line, `line_height` apart, starting at `top`.
pub fn position_lines(lines: Vec<String>, top: f64, line_height: f64) -> Vec<PositionedLine> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| PositionedLine {
            text,
            y: top + (i as f64) * line_height,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
