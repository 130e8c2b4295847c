// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::error::FinanceError;
use purse::rates::{RateTable, round2};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn setup() -> RateTable {
    RateTable::new([
        ("EUR", dec!(1.0)),
        ("USD", dec!(1.1)),
        ("GBP", dec!(0.86)),
        ("CHF", dec!(0.96)),
    ])
    .unwrap()
}

#[test]
fn converts_through_the_base_rates() {
    let rates = setup();
    // 100 USD -> EUR = 100 * 1.0 / 1.1
    assert_eq!(rates.convert("USD", "EUR", dec!(100)).unwrap(), dec!(90.91));
    // 90 EUR -> GBP = 90 * 0.86
    assert_eq!(rates.convert("EUR", "GBP", dec!(90)).unwrap(), dec!(77.40));
    // 10 GBP -> USD = 10 * 1.1 / 0.86 = 12.7906...
    assert_eq!(rates.convert("GBP", "USD", dec!(10)).unwrap(), dec!(12.79));
}

#[test]
fn half_cents_round_away_from_zero() {
    let rates = setup();
    assert_eq!(rates.convert("EUR", "EUR", dec!(1.005)).unwrap(), dec!(1.01));
    assert_eq!(rates.convert("EUR", "EUR", dec!(-1.005)).unwrap(), dec!(-1.01));
    assert_eq!(round2(dec!(2.675)), dec!(2.68));
    assert_eq!(round2(dec!(2.674999)), dec!(2.67));
}

#[test]
fn same_currency_is_rounding_only() {
    let rates = setup();
    for a in [dec!(0), dec!(0.004), dec!(12.345), dec!(-7.777), dec!(1000000.1)] {
        for c in ["EUR", "USD", "GBP", "CHF"] {
            assert_eq!(rates.convert(c, c, a).unwrap(), round2(a), "{} {}", a, c);
        }
    }
}

#[test]
fn chained_conversion_stays_within_a_cent() {
    let rates = setup();
    let codes = ["EUR", "USD", "GBP", "CHF"];
    let amounts = [dec!(0.01), dec!(1.005), dec!(19.99), dec!(250), dec!(1234.56), dec!(-42.42)];
    for a in amounts {
        for c1 in codes {
            for c2 in codes {
                for c3 in codes {
                    let via = rates
                        .convert(c2, c3, rates.convert(c1, c2, a).unwrap())
                        .unwrap();
                    let direct = rates.convert(c1, c3, a).unwrap();
                    assert!(
                        (via - direct).abs() <= dec!(0.01),
                        "{} {}->{}->{}: {} vs {}",
                        a,
                        c1,
                        c2,
                        c3,
                        via,
                        direct
                    );
                }
            }
        }
    }
}

#[test]
fn unknown_currency_is_reported() {
    let rates = setup();
    assert_eq!(
        rates.convert("XYZ", "EUR", dec!(1)),
        Err(FinanceError::UnknownCurrency("XYZ".into()))
    );
    assert_eq!(
        rates.convert("EUR", "ABC", dec!(1)),
        Err(FinanceError::UnknownCurrency("ABC".into()))
    );
    assert!(rates.rate("usd").is_err());
}

#[test]
fn rate_table_rejects_non_positive_rates() {
    assert!(matches!(
        RateTable::new([("EUR", dec!(1)), ("USD", Decimal::ZERO)]),
        Err(FinanceError::InvalidInput(_))
    ));
    assert!(matches!(
        RateTable::new([("EUR", dec!(-1))]),
        Err(FinanceError::InvalidInput(_))
    ));
}

#[test]
fn codes_are_normalized_and_sorted() {
    let rates = RateTable::new([("usd", dec!(1.1)), (" eur ", dec!(1))]).unwrap();
    assert_eq!(rates.codes(), vec!["EUR", "USD"]);
    assert_eq!(rates.len(), 2);
    assert!(rates.contains("USD"));
}
