//! Parsing of BRL amounts and the `VALOR DESCRIÇÃO` argument shapes

/// Parse a Brazilian-style money amount
///
/// Accepts `50`, `50,5`, `12.90`, `1.250,00`, `1.250` (thousands), `R$ 12,90`.
/// Zero, negative and non-numeric input yields `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let without_symbol = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("r$") => &trimmed[2..],
        _ => trimmed,
    };
    let cleaned: String = without_symbol.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        // Comma is the decimal separator, dots group thousands
        if cleaned.matches(',').count() > 1 {
            return None;
        }
        cleaned.replace('.', "").replace(',', ".")
    } else if is_thousands_grouped(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    let value: f64 = normalized.parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// `1.250` or `1.250.000`: every dot followed by exactly three digits
fn is_thousands_grouped(s: &str) -> bool {
    let mut groups = s.split('.');
    let head = match groups.next() {
        Some(head) => head,
        None => return false,
    };
    let rest: Vec<&str> = groups.collect();
    !rest.is_empty()
        && !head.is_empty()
        && !head.starts_with('0')
        && head.len() <= 3
        && rest.iter().all(|g| g.len() == 3)
}

/// Split `VALOR resto` or `resto VALOR` into the amount and the remaining text
pub fn split_amount(args: &str) -> Option<(f64, String)> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (first, rest) = words.split_first()?;

    // "R$ 50 pizza" arrives as two tokens for the amount
    if first.eq_ignore_ascii_case("r$") {
        let (amount, rest) = rest.split_first()?;
        return parse_amount(amount).map(|value| (value, rest.join(" ")));
    }

    if let Some(value) = parse_amount(first) {
        return Some((value, rest.join(" ")));
    }

    let (last, init) = words.split_last()?;
    parse_amount(last).map(|value| (value, init.join(" ")))
}

/// Parse `/fixa DIA VALOR DESCRIÇÃO` arguments
pub fn parse_bill(args: &str) -> Option<(u32, f64, String)> {
    let mut words = args.split_whitespace();
    let day: u32 = words.next()?.parse().ok()?;
    let amount = parse_amount(words.next()?)?;
    let description = words.collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        return None;
    }
    Some((day, amount, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("50"), Some(50.0));
        assert_eq!(parse_amount("50,5"), Some(50.5));
        assert_eq!(parse_amount("12.90"), Some(12.9));
        assert_eq!(parse_amount("1.250,00"), Some(1250.0));
        assert_eq!(parse_amount("1.250"), Some(1250.0));
        assert_eq!(parse_amount("1.250.000"), Some(1_250_000.0));
        assert_eq!(parse_amount("R$ 12,90"), Some(12.9));
        assert_eq!(parse_amount("r$7"), Some(7.0));
        assert_eq!(parse_amount("0.500"), Some(0.5));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-50"), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("0,00"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("50reais"), None);
    }

    #[test]
    fn test_split_amount_first_or_last() {
        assert_eq!(split_amount("50.00 Pizza de Calabresa"), Some((50.0, "Pizza de Calabresa".into())));
        assert_eq!(split_amount("Viagem Japão 20000"), Some((20000.0, "Viagem Japão".into())));
        assert_eq!(split_amount("R$ 35 cinema"), Some((35.0, "cinema".into())));
        assert_eq!(split_amount("1500"), Some((1500.0, String::new())));
    }

    #[test]
    fn test_split_amount_without_number() {
        assert_eq!(split_amount(""), None);
        assert_eq!(split_amount("pizza grande"), None);
        assert_eq!(split_amount("R$"), None);
    }

    #[test]
    fn test_parse_bill() {
        assert_eq!(parse_bill("05 150.90 Internet Fibra"), Some((5, 150.9, "Internet Fibra".into())));
        assert_eq!(parse_bill("10   1.200,00   Aluguel"), Some((10, 1200.0, "Aluguel".into())));
        assert_eq!(parse_bill("10 150"), None);
        assert_eq!(parse_bill("dez 150 Luz"), None);
        assert_eq!(parse_bill("10 abc Luz"), None);
        assert_eq!(parse_bill(""), None);
    }
}
