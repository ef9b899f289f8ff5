use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::CUSTOM_FEE_SELECTOR;
use crate::rates::ExchangeRateTable;
use crate::registry::CurrencyRegistry;
use crate::settings::FeeConfig;

/// Marker rendered when a rate lookup misses. Non-fatal; it surfaces in the
/// annotated text itself.
pub const UNAVAILABLE: &str = "N/A";

/// Converts an amount through the pivot currency and formats the result.
///
/// `amount / rates[source] * rates[target]`, then the resolved surcharge,
/// rounded to the nearest whole unit and grouped, prefixed with the target's
/// display symbol (the code itself when none is registered). A missing rate
/// on either side yields `"N/A"`; this function never fails. Arithmetic
/// overflow on an extreme amount is treated like a rate miss, since page
/// text can carry any number of digits the normalizer accepts. Skipping the
/// conversion when source equals target is the annotator's job, not ours.
pub fn convert(
    amount: Decimal,
    source_code: &str,
    target_code: &str,
    rates: &ExchangeRateTable,
    fees: &FeeConfig,
    registry: &CurrencyRegistry,
) -> String {
    let source_rate = match rates.rate(source_code) {
        Some(rate) => rate,
        None => return UNAVAILABLE.to_string(),
    };
    let target_rate = match rates.rate(target_code) {
        Some(rate) => rate,
        None => return UNAVAILABLE.to_string(),
    };

    let converted = match amount
        .checked_div(source_rate)
        .and_then(|in_pivot| in_pivot.checked_mul(target_rate))
    {
        Some(converted) => converted,
        None => return UNAVAILABLE.to_string(),
    };

    let fee_percent = resolve_fee_percent(fees, target_code, registry);
    let converted = if fee_percent > Decimal::ZERO {
        match converted.checked_mul(Decimal::ONE + fee_percent / dec!(100)) {
            Some(with_fee) => with_fee,
            None => return UNAVAILABLE.to_string(),
        }
    } else {
        converted
    };

    let rounded = converted.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let symbol = registry.symbol_for(target_code).unwrap_or(target_code);

    format!("{}{}", symbol, group_thousands(&rounded))
}

/// Surcharge resolution order: the custom selector short-circuits to the
/// configured percent; otherwise a per-target override for the issuer, the
/// issuer's default, a named preset matching the selector, then zero.
fn resolve_fee_percent(fees: &FeeConfig, target_code: &str, registry: &CurrencyRegistry) -> Decimal {
    if fees.selector == CUSTOM_FEE_SELECTOR {
        return fees.custom_percent;
    }

    registry
        .fee_override(&fees.selector, target_code)
        .or_else(|| registry.fee_default(&fees.selector))
        .or_else(|| registry.fee_preset(&fees.selector))
        .unwrap_or(Decimal::ZERO)
}

fn group_thousands(value: &Decimal) -> String {
    let digits = value.trunc().abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
