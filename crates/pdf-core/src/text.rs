//! Text rendering utilities

use crate::document::Color;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Encode text as a WinAnsi PDF literal string, including the parentheses
///
/// Characters outside Latin-1 are replaced by `?`; `(`, `)` and `\` are escaped.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        let code = c as u32;
        let byte = if code < 256 { code as u8 } else { b'?' };
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            _ => out.push(byte),
        }
    }
    out.push(b')');
    out
}

/// Generate PDF operators for text insertion
///
/// Creates the text operators (BT, Tf, Td, Tj, ET) to render a single run
/// with its baseline at `x`, `y` (PDF coordinates, from bottom-left). The
/// colour change is wrapped in `q`/`Q` so the fill colour survives.
pub fn generate_text_operators(encoded: &[u8], x: f64, y: f64, ctx: &TextRenderContext) -> Vec<u8> {
    let mut ops = Vec::new();

    ops.extend_from_slice(b"q\n");
    ops.extend_from_slice(
        format!(
            "{} {} {} rg\n",
            fmt_num(ctx.color.r as f64),
            fmt_num(ctx.color.g as f64),
            fmt_num(ctx.color.b as f64)
        )
        .as_bytes(),
    );
    ops.extend_from_slice(b"BT\n");
    ops.extend_from_slice(
        format!("/{} {} Tf\n", ctx.font_name, fmt_num(ctx.font_size)).as_bytes(),
    );
    ops.extend_from_slice(format!("{} {} Td\n", fmt_num(x), fmt_num(y)).as_bytes());
    ops.extend_from_slice(encoded);
    ops.extend_from_slice(b" Tj\nET\nQ\n");

    ops
}

/// Format a number for a content stream: at most three decimals, no trailing zeros
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Split text into lines no wider than `max_width`
///
/// Breaks on whitespace and honours explicit newlines. A word wider than
/// the line on its own is split between characters.
///
/// # Arguments
/// * `text` - Text to split
/// * `max_width` - Available width, in the same unit `measure` returns
/// * `measure` - Width of a string
pub fn wrap_text_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{current_line} {word}")
            };

            if measure(&candidate) <= max_width {
                current_line = candidate;
                continue;
            }

            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }

            if measure(word) <= max_width {
                current_line = word.to_string();
            } else {
                let mut pieces = split_word(word, max_width, &measure);
                current_line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current_line);
    }

    lines
}

/// Break a single word into chunks that fit, keeping at least one char per chunk
fn split_word<F>(word: &str, max_width: f64, measure: &F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut pieces = Vec::new();
    let mut current = String::new();

    for c in word.chars() {
        current.push(c);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}
