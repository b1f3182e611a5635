//! Utility functions for formatting and parsing

use chrono::{Datelike, NaiveDate};

/// Format a BRL amount the pt-BR way: `R$ 1.250,00`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// `dd/mm`
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Portuguese month name, lower case
pub fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
        "setembro", "outubro", "novembro", "dezembro",
    ];
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Month name of `date`, for headers like "Balanço de outubro"
pub fn month_of(date: NaiveDate) -> &'static str {
    month_name(date.month())
}

/// Shorten a label to at most `max` characters
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(12.9), "R$ 12,90");
        assert_eq!(format_currency(1250.0), "R$ 1.250,00");
        assert_eq!(format_currency(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_currency(-50.5), "-R$ 50,50");
        assert_eq!(format_currency(-0.001), "R$ 0,00");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
    }

    #[test]
    fn test_format_day_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_day_month(date), "05/03");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "janeiro");
        assert_eq!(month_name(3), "março");
        assert_eq!(month_name(12), "dezembro");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Alimentação", 20), "Alimentação");
        assert_eq!(truncate("Viagem para o Japão em 2026", 10), "Viagem pa…");
    }
}
