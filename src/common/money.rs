// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

// Arredondamento SÓ na hora de exibir. Os totais são sempre somados sem arredondar.

/// Arredonda para centavos (meio para longe do zero).
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formata um valor em euro no padrão italiano: `1.234,56 €`.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // Sempre duas casas, mesmo para valores inteiros
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{} €", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separator() {
        assert_eq!(format_eur(Decimal::new(123456, 2)), "1.234,56 €");
        assert_eq!(format_eur(Decimal::new(255000, 2)), "2.550,00 €");
        assert_eq!(format_eur(Decimal::new(1_000_000_00, 2)), "1.000.000,00 €");
    }

    #[test]
    fn rounds_only_for_display() {
        // 38.725 -> 38,73 (meio para longe do zero)
        assert_eq!(format_eur(Decimal::new(38725, 3)), "38,73 €");
        assert_eq!(round_cents(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
    }

    #[test]
    fn zero_and_negative_values() {
        assert_eq!(format_eur(Decimal::ZERO), "0,00 €");
        assert_eq!(format_eur(Decimal::new(-5, 1)), "-0,50 €");
    }
}
