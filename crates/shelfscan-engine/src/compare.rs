//! Ranks per-store quotes for one product: cheapest first, with savings
//! relative to the cheapest option.

use rust_decimal::Decimal;

use shelfscan_core::{CompareResult, CompareSummary, PriceRow, ProductSummary};

use crate::error::EngineError;
use crate::geo;
use crate::providers::PriceQuote;

fn validate_shopper(lat: f64, lng: f64) -> Result<(), EngineError> {
    if !lat.is_finite() || lat.abs() > 90.0 {
        return Err(EngineError::InvalidInput(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if !lng.is_finite() || lng.abs() > 180.0 {
        return Err(EngineError::InvalidInput(format!(
            "longitude {lng} is outside [-180, 180]"
        )));
    }
    Ok(())
}

/// Turn raw quotes into the ordered, flagged comparison result.
///
/// Rows are sorted ascending by price, ties ascending by store name. Every
/// row priced at the minimum is flagged cheapest; savings are rounded to
/// two fractional digits. Distance is only computed when shopper
/// coordinates are supplied, and never participates in ranking.
pub(crate) fn rank_quotes(
    product: ProductSummary,
    quotes: Vec<PriceQuote>,
    shopper: Option<(f64, f64)>,
) -> Result<CompareResult, EngineError> {
    if let Some((lat, lng)) = shopper {
        validate_shopper(lat, lng)?;
    }

    let mut rows = Vec::with_capacity(quotes.len());
    for quote in quotes {
        let distance_km = match shopper {
            Some((lat, lng)) => geo::distance_km(lat, lng, quote.latitude, quote.longitude)?,
            None => 0.0,
        };
        rows.push(PriceRow {
            store_id: quote.store_id,
            store_name: quote.store_name,
            chain: quote.chain,
            distance_km,
            price: quote.price,
            currency: quote.currency,
            is_cheapest: false,
            savings_vs_cheapest: Decimal::ZERO,
            updated_at: quote.updated_at,
        });
    }

    rows.sort_by(|a, b| {
        a.price
            .cmp(&b.price)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });

    let cheapest = rows.first().map(|row| row.price);
    if let Some(floor) = cheapest {
        for row in &mut rows {
            row.is_cheapest = row.price == floor;
            row.savings_vs_cheapest = (row.price - floor).round_dp(2);
        }
    }
    let max_savings = rows
        .iter()
        .map(|row| row.savings_vs_cheapest)
        .max();

    Ok(CompareResult {
        product,
        prices: rows,
        summary: CompareSummary {
            cheapest,
            max_savings,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn summary() -> ProductSummary {
        ProductSummary {
            id: 1,
            name: "Butter".to_string(),
        }
    }

    fn make_quote(store_id: i64, store_name: &str, price: &str) -> PriceQuote {
        PriceQuote {
            store_id,
            store_name: store_name.to_string(),
            chain: store_name.split(' ').next().unwrap_or("").to_string(),
            latitude: -36.91,
            longitude: 174.77,
            price: Decimal::from_str(price).unwrap(),
            currency: "NZD".to_string(),
            updated_at: Utc::now(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn rows_are_sorted_ascending_by_price() {
        let result = rank_quotes(
            summary(),
            vec![
                make_quote(2, "Woolworths Ponsonby", "6.99"),
                make_quote(3, "NewWorld Victoria Park", "7.29"),
                make_quote(1, "PaknSave Royal Oak", "6.49"),
            ],
            None,
        )
        .unwrap();
        let prices: Vec<Decimal> = result.prices.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![dec("6.49"), dec("6.99"), dec("7.29")]);
    }

    #[test]
    fn cheapest_flags_and_savings_match_the_floor() {
        let result = rank_quotes(
            summary(),
            vec![
                make_quote(1, "PaknSave Royal Oak", "6.49"),
                make_quote(2, "Woolworths Ponsonby", "6.99"),
                make_quote(3, "NewWorld Victoria Park", "7.29"),
            ],
            None,
        )
        .unwrap();
        let flags: Vec<bool> = result.prices.iter().map(|r| r.is_cheapest).collect();
        assert_eq!(flags, vec![true, false, false]);
        let savings: Vec<Decimal> = result
            .prices
            .iter()
            .map(|r| r.savings_vs_cheapest)
            .collect();
        assert_eq!(savings, vec![dec("0.00"), dec("0.50"), dec("0.80")]);
        assert_eq!(result.summary.cheapest, Some(dec("6.49")));
        assert_eq!(result.summary.max_savings, Some(dec("0.80")));
    }

    #[test]
    fn tied_minimum_prices_all_flag_cheapest() {
        let result = rank_quotes(
            summary(),
            vec![
                make_quote(1, "PaknSave Royal Oak", "6.49"),
                make_quote(2, "Woolworths Ponsonby", "6.49"),
                make_quote(3, "NewWorld Victoria Park", "7.29"),
            ],
            None,
        )
        .unwrap();
        assert!(result.prices[0].is_cheapest);
        assert!(result.prices[1].is_cheapest);
        assert!(!result.prices[2].is_cheapest);
        assert_eq!(result.prices[0].savings_vs_cheapest, dec("0.00"));
        assert_eq!(result.prices[1].savings_vs_cheapest, dec("0.00"));
    }

    #[test]
    fn price_ties_break_by_store_name() {
        let result = rank_quotes(
            summary(),
            vec![
                make_quote(2, "Woolworths Ponsonby", "6.49"),
                make_quote(1, "PaknSave Royal Oak", "6.49"),
            ],
            None,
        )
        .unwrap();
        assert_eq!(result.prices[0].store_name, "PaknSave Royal Oak");
        assert_eq!(result.prices[1].store_name, "Woolworths Ponsonby");
    }

    #[test]
    fn empty_quotes_yield_empty_rows_and_null_summary() {
        let result = rank_quotes(summary(), vec![], None).unwrap();
        assert!(result.prices.is_empty());
        assert!(result.summary.cheapest.is_none());
        assert!(result.summary.max_savings.is_none());
    }

    #[test]
    fn distance_is_zero_without_shopper_coordinates() {
        let result = rank_quotes(summary(), vec![make_quote(1, "PaknSave Royal Oak", "6.49")], None)
            .unwrap();
        assert_eq!(result.prices[0].distance_km, 0.0);
    }

    #[test]
    fn distance_is_computed_with_shopper_coordinates() {
        let result = rank_quotes(
            summary(),
            vec![make_quote(1, "PaknSave Royal Oak", "6.49")],
            Some((-36.8485, 174.7633)),
        )
        .unwrap();
        assert!(result.prices[0].distance_km > 0.0);
        assert!(result.prices[0].distance_km < 20.0);
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let result = rank_quotes(
            summary(),
            vec![make_quote(1, "PaknSave Royal Oak", "6.49")],
            Some((91.0, 174.0)),
        );
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn non_finite_longitude_is_rejected() {
        let result = rank_quotes(summary(), vec![], Some((0.0, f64::NAN)));
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn savings_are_never_negative() {
        let result = rank_quotes(
            summary(),
            vec![
                make_quote(1, "PaknSave Royal Oak", "6.49"),
                make_quote(2, "Woolworths Ponsonby", "9.99"),
            ],
            None,
        )
        .unwrap();
        assert!(result
            .prices
            .iter()
            .all(|r| r.savings_vs_cheapest >= Decimal::ZERO));
    }
}
