//! Spanish amount-in-words for Chilean peso totals

/// Unit names (0-9); index 0 is never spelled
const UNIDADES: [&str; 10] = [
    "", "UN", "DOS", "TRES", "CUATRO", "CINCO", "SEIS", "SIETE", "OCHO", "NUEVE",
];

/// Tens names (0-90). Index 1 is only reachable for an exact 10 and that case
/// is already taken by `ESPECIALES`.
const DECENAS: [&str; 10] = [
    "", "DIEZ", "VEINTE", "TREINTA", "CUARENTA", "CINCUENTA", "SESENTA", "SETENTA", "OCHENTA",
    "NOVENTA",
];

/// Irregular 10-19
const ESPECIALES: [&str; 10] = [
    "DIEZ",
    "ONCE",
    "DOCE",
    "TRECE",
    "CATORCE",
    "QUINCE",
    "DIECISEIS",
    "DIECISIETE",
    "DIECIOCHO",
    "DIECINUEVE",
];

/// Hundreds names (0-900); an exact 100 is `CIEN` instead
const CENTENAS: [&str; 10] = [
    "",
    "CIENTO",
    "DOSCIENTOS",
    "TRESCIENTOS",
    "CUATROCIENTOS",
    "QUINIENTOS",
    "SEISCIENTOS",
    "SETECIENTOS",
    "OCHOCIENTOS",
    "NOVECIENTOS",
];

const CURRENCY_WORD: &str = "PESOS";

/// Spell an amount of Chilean pesos in upper-case Spanish
///
/// Zero yields an empty string so callers can skip the words line.
///
/// # Examples
/// ```
/// use chile_text::number_to_words;
/// assert_eq!(number_to_words(0), "");
/// assert_eq!(number_to_words(121), "CIENTO VEINTIUN PESOS");
/// assert_eq!(number_to_words(1_000_000), "UN MILLON PESOS");
/// assert_eq!(number_to_words(-50), "MENOS CINCUENTA PESOS");
/// ```
pub fn number_to_words(amount: i64) -> String {
    if amount == 0 {
        return String::new();
    }
    if amount < 0 {
        return format!("MENOS {}", spell_positive(amount.unsigned_abs()));
    }
    spell_positive(amount as u64)
}

fn spell_positive(n: u64) -> String {
    format!("{} {}", spell_magnitude(n).trim(), CURRENCY_WORD)
        .trim()
        .to_string()
}

/// Words for `n` without the currency suffix
fn spell_magnitude(n: u64) -> String {
    let millones = n / 1_000_000;
    let miles = (n % 1_000_000) / 1000;
    let resto = n % 1000;

    let mut words = String::new();

    match millones {
        0 => {}
        1 => words.push_str("UN MILLON "),
        2..=999 => {
            words.push_str(&convert_group(millones as u16));
            words.push_str(" MILLONES ");
        }
        // Past the group tables: spell the count of millions itself
        _ => {
            words.push_str(spell_magnitude(millones).trim());
            words.push_str(" MILLONES ");
        }
    }

    match miles {
        0 => {}
        1 => words.push_str("MIL "),
        _ => {
            words.push_str(&convert_group(miles as u16));
            words.push_str(" MIL ");
        }
    }

    if resto > 0 {
        words.push_str(&convert_group(resto as u16));
    }

    words.trim().to_string()
}

/// Spell a 0-999 group
pub(crate) fn convert_group(num: u16) -> String {
    if num == 0 {
        return String::new();
    }
    if num == 100 {
        return "CIEN".to_string();
    }

    let c = (num / 100) as usize;
    let remainder = (num % 100) as usize;
    let d = remainder / 10;
    let u = remainder % 10;

    let mut result = String::new();
    if c > 0 {
        result.push_str(CENTENAS[c]);
        result.push(' ');
    }

    match remainder {
        10..=19 => result.push_str(ESPECIALES[remainder - 10]),
        21 => result.push_str("VEINTIUN"),
        22..=29 => {
            result.push_str("VEINTI");
            result.push_str(UNIDADES[u]);
        }
        _ => {
            if d > 0 {
                result.push_str(DECENAS[d]);
                if u > 0 {
                    result.push_str(" Y ");
                }
            }
            if u > 0 {
                result.push_str(UNIDADES[u]);
            }
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(number_to_words(0), "");
    }

    #[test]
    fn test_units_and_teens() {
        assert_eq!(number_to_words(1), "UN PESOS");
        assert_eq!(number_to_words(9), "NUEVE PESOS");
        assert_eq!(number_to_words(10), "DIEZ PESOS");
        assert_eq!(number_to_words(15), "QUINCE PESOS");
        assert_eq!(number_to_words(19), "DIECINUEVE PESOS");
    }

    #[test]
    fn test_twenties_irregular() {
        assert_eq!(number_to_words(20), "VEINTE PESOS");
        assert_eq!(number_to_words(21), "VEINTIUN PESOS");
        assert_eq!(number_to_words(22), "VEINTIDOS PESOS");
        assert_eq!(number_to_words(29), "VEINTINUEVE PESOS");
    }

    #[test]
    fn test_tens_with_units() {
        assert_eq!(number_to_words(30), "TREINTA PESOS");
        assert_eq!(number_to_words(31), "TREINTA Y UN PESOS");
        assert_eq!(number_to_words(99), "NOVENTA Y NUEVE PESOS");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(number_to_words(100), "CIEN PESOS");
        assert_eq!(number_to_words(101), "CIENTO UN PESOS");
        assert_eq!(number_to_words(121), "CIENTO VEINTIUN PESOS");
        assert_eq!(number_to_words(200), "DOSCIENTOS PESOS");
        assert_eq!(number_to_words(515), "QUINIENTOS QUINCE PESOS");
        assert_eq!(number_to_words(999), "NOVECIENTOS NOVENTA Y NUEVE PESOS");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(number_to_words(1000), "MIL PESOS");
        assert_eq!(number_to_words(1001), "MIL UN PESOS");
        assert_eq!(number_to_words(2000), "DOS MIL PESOS");
        assert_eq!(number_to_words(21_000), "VEINTIUN MIL PESOS");
        assert_eq!(number_to_words(100_000), "CIEN MIL PESOS");
        assert_eq!(number_to_words(24_500), "VEINTICUATRO MIL QUINIENTOS PESOS");
    }

    #[test]
    fn test_millions() {
        assert_eq!(number_to_words(1_000_000), "UN MILLON PESOS");
        assert_eq!(number_to_words(2_000_000), "DOS MILLONES PESOS");
        assert_eq!(
            number_to_words(1_234_567),
            "UN MILLON DOSCIENTOS TREINTA Y CUATRO MIL QUINIENTOS SESENTA Y SIETE PESOS"
        );
        assert_eq!(number_to_words(1_001_000), "UN MILLON MIL PESOS");
    }

    #[test]
    fn test_beyond_group_tables() {
        assert_eq!(number_to_words(1_000_000_000), "MIL MILLONES PESOS");
        assert_eq!(
            number_to_words(2_500_000_000),
            "DOS MIL QUINIENTOS MILLONES PESOS"
        );
    }

    #[test]
    fn test_negative() {
        assert_eq!(number_to_words(-50), "MENOS CINCUENTA PESOS");
        assert_eq!(number_to_words(-1000), "MENOS MIL PESOS");
        assert!(number_to_words(i64::MIN).starts_with("MENOS "));
    }

    #[test]
    fn test_convert_group() {
        assert_eq!(convert_group(0), "");
        assert_eq!(convert_group(100), "CIEN");
        assert_eq!(convert_group(110), "CIENTO DIEZ");
        assert_eq!(convert_group(300), "TRESCIENTOS");
        assert_eq!(convert_group(321), "TRESCIENTOS VEINTIUN");
    }
}
