//! Path painting operators (lines and rectangles)

use crate::document::Color;

/// How a closed path is painted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaintMode {
    /// Outline only (`S`)
    #[default]
    Stroke,
    /// Interior only (`f`)
    Fill,
    /// Interior then outline (`B`)
    FillStroke,
}

impl PaintMode {
    fn operator(&self) -> &'static str {
        match self {
            PaintMode::Stroke => "S",
            PaintMode::Fill => "f",
            PaintMode::FillStroke => "B",
        }
    }
}

/// Stroke and fill state applied to a path
#[derive(Debug, Clone, Copy)]
pub struct PathStyle {
    pub stroke: Color,
    pub fill: Color,
    pub line_width: f64,
}

/// Bezier control distance for a quarter circle of radius 1
const KAPPA: f64 = 0.552_284_749_831;

/// Format a coordinate for a content stream (at most 3 decimals, no trailing zeros)
pub(crate) fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn push_style(ops: &mut String, style: &PathStyle, mode: PaintMode) {
    if mode != PaintMode::Fill {
        let c = style.stroke;
        ops.push_str(&format!(
            "{} {} {} RG\n{} w\n",
            fmt_num(c.r as f64),
            fmt_num(c.g as f64),
            fmt_num(c.b as f64),
            fmt_num(style.line_width)
        ));
    }
    if mode != PaintMode::Stroke {
        let c = style.fill;
        ops.push_str(&format!(
            "{} {} {} rg\n",
            fmt_num(c.r as f64),
            fmt_num(c.g as f64),
            fmt_num(c.b as f64)
        ));
    }
}

/// Generate operators for a straight line between two points (PDF coordinates)
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    let mut ops = String::from("q\n");
    push_style(
        &mut ops,
        &PathStyle {
            stroke: color,
            fill: color,
            line_width,
        },
        PaintMode::Stroke,
    );
    ops.push_str(&format!("{} {} m\n", fmt_num(x1), fmt_num(y1)));
    ops.push_str(&format!("{} {} l\n", fmt_num(x2), fmt_num(y2)));
    ops.push_str("S\nQ\n");
    ops.into_bytes()
}

/// Generate operators for an axis-aligned rectangle
///
/// `(x, y)` is the bottom-left corner in PDF coordinates.
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: &PathStyle,
    mode: PaintMode,
) -> Vec<u8> {
    let mut ops = String::from("q\n");
    push_style(&mut ops, style, mode);
    ops.push_str(&format!(
        "{} {} {} {} re\n",
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    ));
    ops.push_str(mode.operator());
    ops.push_str("\nQ\n");
    ops.into_bytes()
}

/// Generate operators for a rectangle with circular corners
///
/// `(x, y)` is the bottom-left corner in PDF coordinates. The radius is
/// clamped to half of the shorter side.
pub fn generate_rounded_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    style: &PathStyle,
    mode: PaintMode,
) -> Vec<u8> {
    let r = radius.max(0.0).min(width.abs() / 2.0).min(height.abs() / 2.0);
    if r == 0.0 {
        return generate_rect_operators(x, y, width, height, style, mode);
    }
    let k = r * KAPPA;
    let (x0, y0, x1, y1) = (x, y, x + width, y + height);

    let mut ops = String::from("q\n");
    push_style(&mut ops, style, mode);
    let mut seg = |s: String| {
        ops.push_str(&s);
        ops.push('\n');
    };
    seg(format!("{} {} m", fmt_num(x0 + r), fmt_num(y0)));
    seg(format!("{} {} l", fmt_num(x1 - r), fmt_num(y0)));
    seg(format!(
        "{} {} {} {} {} {} c",
        fmt_num(x1 - r + k),
        fmt_num(y0),
        fmt_num(x1),
        fmt_num(y0 + r - k),
        fmt_num(x1),
        fmt_num(y0 + r)
    ));
    seg(format!("{} {} l", fmt_num(x1), fmt_num(y1 - r)));
    seg(format!(
        "{} {} {} {} {} {} c",
        fmt_num(x1),
        fmt_num(y1 - r + k),
        fmt_num(x1 - r + k),
        fmt_num(y1),
        fmt_num(x1 - r),
        fmt_num(y1)
    ));
    seg(format!("{} {} l", fmt_num(x0 + r), fmt_num(y1)));
    seg(format!(
        "{} {} {} {} {} {} c",
        fmt_num(x0 + r - k),
        fmt_num(y1),
        fmt_num(x0),
        fmt_num(y1 - r + k),
        fmt_num(x0),
        fmt_num(y1 - r)
    ));
    seg(format!("{} {} l", fmt_num(x0), fmt_num(y0 + r)));
    seg(format!(
        "{} {} {} {} {} {} c",
        fmt_num(x0),
        fmt_num(y0 + r - k),
        fmt_num(x0 + r - k),
        fmt_num(y0),
        fmt_num(x0 + r),
        fmt_num(y0)
    ));
    seg("h".to_string());
    seg(mode.operator().to_string());
    seg("Q".to_string());
    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> PathStyle {
        PathStyle {
            stroke: Color::red(),
            fill: Color::white(),
            line_width: 0.5,
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(7.5), "7.5");
        assert_eq!(fmt_num(39.685039), "39.685");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-12.25), "-12.25");
    }

    #[test]
    fn test_line_operators() {
        let ops = String::from_utf8(generate_line_operators(
            10.0,
            20.0,
            110.0,
            20.0,
            Color::black(),
            0.85,
        ))
        .unwrap();
        assert!(ops.contains("0 0 0 RG"));
        assert!(ops.contains("0.85 w"));
        assert!(ops.contains("10 20 m\n110 20 l\nS"));
        assert!(ops.starts_with("q\n"));
        assert!(ops.ends_with("Q\n"));
    }

    #[test]
    fn test_rect_stroke_skips_fill_color() {
        let ops = String::from_utf8(generate_rect_operators(
            1.0,
            2.0,
            3.0,
            4.0,
            &style(),
            PaintMode::Stroke,
        ))
        .unwrap();
        assert!(ops.contains("1 0 0 RG"));
        assert!(!ops.contains(" rg"));
        assert!(ops.contains("1 2 3 4 re\nS"));
    }

    #[test]
    fn test_rect_fill_skips_stroke_color() {
        let ops = String::from_utf8(generate_rect_operators(
            1.0,
            2.0,
            3.0,
            4.0,
            &style(),
            PaintMode::Fill,
        ))
        .unwrap();
        assert!(!ops.contains("RG"));
        assert!(ops.contains("1 1 1 rg"));
        assert!(ops.contains("re\nf\n"));
    }

    #[test]
    fn test_rounded_rect_fill_stroke() {
        let ops = String::from_utf8(generate_rounded_rect_operators(
            0.0,
            0.0,
            100.0,
            40.0,
            5.0,
            &style(),
            PaintMode::FillStroke,
        ))
        .unwrap();
        assert!(ops.contains("5 0 m"));
        assert!(ops.contains("95 0 l"));
        assert_eq!(ops.matches(" c\n").count(), 4);
        assert!(ops.contains("h\nB\nQ\n"));
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_plain_rect() {
        let ops = String::from_utf8(generate_rounded_rect_operators(
            0.0,
            0.0,
            10.0,
            10.0,
            0.0,
            &style(),
            PaintMode::Stroke,
        ))
        .unwrap();
        assert!(ops.contains("0 0 10 10 re"));
    }
}
