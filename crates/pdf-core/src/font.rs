//! Built-in Helvetica fonts and their metrics

use lopdf::{Dictionary, Object};

/// Standard 14 fonts used by the receipt layout
///
/// These are never embedded: every PDF viewer ships them, so only the
/// metrics below are needed to measure and align text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BuiltinFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

/// Helvetica advance widths for U+0020..=U+007E (1/1000 em)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold advance widths for U+0020..=U+007E (1/1000 em)
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Byte written in place of characters WinAnsiEncoding cannot represent
pub const REPLACEMENT_BYTE: u8 = b'?';

impl BuiltinFont {
    /// PostScript name used as `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            // Oblique shares the upright metrics
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => &HELVETICA_WIDTHS,
        }
    }

    fn is_bold(&self) -> bool {
        matches!(self, BuiltinFont::HelveticaBold)
    }

    /// Advance width of a single character in 1/1000 em
    pub fn char_width(&self, c: char) -> u16 {
        let c = fold_accent(c);
        if (' '..='~').contains(&c) {
            return self.ascii_widths()[c as usize - 0x20];
        }

        let bold = self.is_bold();
        match c {
            '°' => 400,
            '¡' => 333,
            '¿' => 611,
            'ª' => 370,
            'º' => 365,
            '«' | '»' => 556,
            '·' => 278,
            '€' => 556,
            '–' => 556,
            '—' | '…' | '™' => 1000,
            '•' => 350,
            '\u{2018}' | '\u{2019}' | '\u{201A}' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '\u{201C}' | '\u{201D}' | '\u{201E}' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            // Unencodable characters are written as '?'
            _ => self.ascii_widths()[(REPLACEMENT_BYTE - 0x20) as usize],
        }
    }

    /// Text width in 1/1000 em units, i.e. the string unit width × 1000
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }

    /// Text width in points at the given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f64 {
        self.text_width(text) as f64 * font_size as f64 / 1000.0
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(self.base_font().as_bytes().to_vec()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        dict
    }
}

/// Map accented Latin letters onto the letter whose metrics they share
fn fold_accent(c: char) -> char {
    match c {
        '\u{A0}' => ' ',
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        'Ý' => 'Y',
        _ => c,
    }
}

/// Encode a character as a WinAnsiEncoding byte
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '\u{201A}' => Some(0x82),
        '\u{201E}' => Some(0x84),
        '…' => Some(0x85),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201C}' => Some(0x93),
        '\u{201D}' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '™' => Some(0x99),
        _ => None,
    }
}

/// Encode text as a PDF literal string body (without the parentheses)
///
/// Delimiters are escaped and bytes above 0x7E are written as octal escapes
/// so content streams stay 7-bit.
pub fn encode_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let byte = win_ansi_byte(c).unwrap_or(REPLACEMENT_BYTE);
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.char_width(' '), 278);
        assert_eq!(font.char_width('0'), 556);
        assert_eq!(font.char_width('W'), 944);
        assert_eq!(font.char_width('i'), 222);
        assert_eq!(font.char_width('~'), 584);
    }

    #[test]
    fn test_bold_widths_differ() {
        assert_eq!(BuiltinFont::HelveticaBold.char_width('b'), 611);
        assert_eq!(BuiltinFont::Helvetica.char_width('b'), 556);
        assert_eq!(BuiltinFont::HelveticaOblique.char_width('b'), 556);
    }

    #[test]
    fn test_accented_widths_follow_base_letter() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.char_width('á'), font.char_width('a'));
        assert_eq!(font.char_width('Ñ'), font.char_width('N'));
        assert_eq!(font.char_width('í'), 222);
        assert_eq!(font.char_width('°'), 400);
    }

    #[test]
    fn test_unknown_char_width_is_replacement() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.char_width('漢'), font.char_width('?'));
    }

    #[test]
    fn test_text_width() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("Hi"), 722 + 222);
        assert!((font.text_width_points("Hi", 10.0) - 9.44).abs() < 1e-9);
    }

    #[test]
    fn test_win_ansi_byte() {
        assert_eq!(win_ansi_byte('A'), Some(0x41));
        assert_eq!(win_ansi_byte('ñ'), Some(0xF1));
        assert_eq!(win_ansi_byte('°'), Some(0xB0));
        assert_eq!(win_ansi_byte('€'), Some(0x80));
        assert_eq!(win_ansi_byte('漢'), None);
        assert_eq!(win_ansi_byte('\n'), None);
    }

    #[test]
    fn test_encode_literal() {
        assert_eq!(encode_literal("Folio N\u{B0} 1532"), "Folio N\\260 1532");
        assert_eq!(encode_literal("(a\\b)"), "\\(a\\\\b\\)");
        assert_eq!(encode_literal("SEÑOR"), "SE\\321OR");
        assert_eq!(encode_literal("漢"), "?");
    }

    #[test]
    fn test_to_pdf_dictionary() {
        let dict = BuiltinFont::HelveticaBold.to_pdf_dictionary();
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }
}
