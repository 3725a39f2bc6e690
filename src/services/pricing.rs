// src/services/pricing.rs

use rust_decimal::Decimal;

use crate::models::quote::{PricedQuote, QuoteItem};

// Funções puras: nada de IO, nada de arredondamento (isso é só na exibição).
// Ricarico e sconto negativos passam direto; validar é papel de quem chama.

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Os passos do cálculo de uma linha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreakdown {
    pub base: Decimal,       // prezzo com ricarico
    pub discounted: Decimal, // depois do sconto
    pub net: Decimal,        // × quantidade (imponibile da linha)
    pub vat: Decimal,        // IVA da linha
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub vat_total: Decimal,
    pub total: Decimal,
    // Soma das porcentagens de sconto de cada linha. Não é valor em euro e não é média:
    // é assim que os orçamentos antigos mostram esse campo.
    pub total_discount: Decimal,
}

pub fn price_line(item: &QuoteItem) -> LineBreakdown {
    let base = item.product.price * (Decimal::ONE + item.markup / HUNDRED);
    let discounted = base * (Decimal::ONE - item.discount / HUNDRED);
    let net = discounted * Decimal::from(item.quantity);
    let vat = net * (Decimal::from(item.product.vat_rate) / HUNDRED);

    LineBreakdown { base, discounted, net, vat }
}

pub fn compute_totals(items: &[QuoteItem]) -> QuoteTotals {
    let mut totals = items.iter().fold(QuoteTotals::default(), |mut acc, item| {
        let line = price_line(item);
        acc.subtotal += line.net;
        acc.vat_total += line.vat;
        acc.total_discount += item.discount;
        acc
    });
    totals.total = totals.subtotal + totals.vat_total;
    totals
}

/// Junta as linhas com os totais calculados. É o único jeito de montar um `PricedQuote`.
pub fn price_quote(items: Vec<QuoteItem>) -> PricedQuote {
    let totals = compute_totals(&items);
    PricedQuote {
        items,
        total: totals.total,
        subtotal: totals.subtotal,
        vat_total: totals.vat_total,
        total_discount: totals.total_discount,
    }
}
