//! Text rendering utilities

use crate::document::Color;
use crate::graphics::fmt_num;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the text operators (BT, rg, Tf, Td, Tj, ET) that paint a literal
/// string with its anchor at `x`, shifted left by the alignment.
///
/// # Arguments
/// * `text_literal` - Escaped literal string body (see `font::encode_literal`)
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_literal: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };
    let final_x = x + x_offset;

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        fmt_num(ctx.color.r as f64),
        fmt_num(ctx.color.g as f64),
        fmt_num(ctx.color.b as f64)
    ));
    ops.push_str(&format!(
        "/{} {} Tf\n",
        ctx.font_name,
        fmt_num(ctx.font_size as f64)
    ));
    ops.push_str(&format!("{} {} Td\n", fmt_num(final_x), fmt_num(y)));
    ops.push_str(&format!("({text_literal}) Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Split text into lines no wider than `max_width`
///
/// Mirrors how form-filling PDF libraries size text to a box: explicit
/// newlines always break, words are packed greedily with single spaces, and a
/// word wider than the box is split between characters. `measure` returns the
/// width of a candidate line in the same unit as `max_width`.
///
/// # Example
/// ```
/// use pdf_core::wrap_text_to_width;
/// let lines = wrap_text_to_width("aa bb cc", 5.0, |s| s.chars().count() as f64);
/// assert_eq!(lines, vec!["aa bb", "cc"]);
/// ```
pub fn wrap_text_to_width<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && measure(&next) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn char_count(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn test_generate_text_operators_left() {
        let ctx = TextRenderContext {
            font_name: "F1".to_string(),
            font_size: 12.0,
            text_width: 100.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("Hello", 100.0, 700.0, Align::Left, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("BT\n"));
        assert!(ops_str.contains("0 0 0 rg"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("(Hello) Tj"));
        assert!(ops_str.ends_with("ET\n"));
    }

    #[test]
    fn test_generate_text_operators_center() {
        let ctx = TextRenderContext {
            font_name: "F2".to_string(),
            font_size: 14.0,
            text_width: 100.0,
            color: Color::black(),
        };

        let ops = generate_text_operators("Test", 200.0, 600.0, Align::Center, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F2 14 Tf"));
        assert!(ops_str.contains("150 600 Td"));
    }

    #[test]
    fn test_generate_text_operators_right() {
        let ctx = TextRenderContext {
            font_name: "F3".to_string(),
            font_size: 7.5,
            text_width: 80.0,
            color: Color::red(),
        };

        let ops = generate_text_operators("Right", 300.0, 500.0, Align::Right, &ctx);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("/F3 7.5 Tf"));
        assert!(ops_str.contains("220 500 Td"));
        assert!(ops_str.contains("1 0 0 rg"));
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(wrap_text_to_width("Short", 100.0, char_count), vec!["Short"]);
    }

    #[test]
    fn test_wrap_greedy_words() {
        let lines = wrap_text_to_width("Hello world this is a test", 12.0, char_count);
        assert_eq!(lines, vec!["Hello world", "this is a", "test"]);
    }

    #[test]
    fn test_wrap_exact_fit() {
        assert_eq!(
            wrap_text_to_width("Hello world", 11.0, char_count),
            vec!["Hello world"]
        );
        assert_eq!(
            wrap_text_to_width("Hello world", 10.0, char_count),
            vec!["Hello", "world"]
        );
    }

    #[test]
    fn test_wrap_collapses_spaces() {
        assert_eq!(
            wrap_text_to_width("Hello    world", 20.0, char_count),
            vec!["Hello world"]
        );
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = wrap_text_to_width("uno\n\ndos tres", 100.0, char_count);
        assert_eq!(lines, vec!["uno", "", "dos tres"]);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let lines = wrap_text_to_width("ab abcdefghij", 4.0, char_count);
        assert_eq!(lines, vec!["ab", "abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_text_to_width("", 10.0, char_count), vec![""]);
    }
}
