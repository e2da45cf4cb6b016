//! Integration tests pricing and padding readings for a selected period.

mod common;

use chrono::{TimeDelta, Utc};
use meterdash::money::Money;
use meterdash::padding::{pad_data, pad_period};
use meterdash::period::{DayDescription, MonthDescription, PeriodDescription, UnitSize};
use meterdash::price::{Category, PriceCalculator};
use meterdash::readings::{parse_rows, ValueWithTimestamp};

#[test]
fn costs_for_matches_rate_table() {
    let calculator = PriceCalculator::new(common::TZ).unwrap();
    let date = common::local(2022, 1, 1, 0, 0);
    let rate = calculator.unit_price(Category::Gas, date).unwrap();
    assert_eq!(calculator.costs_for(10.0, Category::Gas, date).euros(), rate.euros() * 10.0);
}

#[test]
fn costs_for_multiple_prices_same_day_batch() {
    let calculator = PriceCalculator::new(common::TZ).unwrap();
    let start = common::local(2019, 6, 1, 8, 0);
    let readings: Vec<ValueWithTimestamp> = [10.0, 11.0, 12.0, 13.0].iter().enumerate()
        .map(|(i, v)| ValueWithTimestamp::new(start + TimeDelta::hours(i as i64), *v))
        .collect();
    let costs = calculator.costs_for_multiple(&readings, Category::Gas);
    assert!((costs.euros() - (10.0 + 11.0 + 12.0 + 13.0) * 0.75336).abs() < 1e-9);
}

#[test]
fn custom_rate_table_with_gap() {
    let toml = r#"
        [[energy]]
        gas = 1.0
        stroom = 0.5
        valid_from = "2022-01-01"
        valid_until = "2022-02-01"

        [[energy]]
        gas = 2.0
        stroom = 0.6
        valid_from = "2022-03-01"
        valid_until = "2022-04-01"

        [[water]]
        price = 1.5
        valid_from = "2022-01-01"
        valid_until = "2023-01-01"
    "#;
    let calculator = PriceCalculator::from_toml(common::TZ, toml).unwrap();
    assert_eq!(calculator.costs_for(4.0, Category::Stroom, common::local(2022, 1, 31, 23, 0)), Money::new(2.0));
    assert_eq!(calculator.costs_for(4.0, Category::Stroom, common::local(2022, 2, 15, 12, 0)), Money::zero());
    assert_eq!(calculator.costs_for(4.0, Category::Water, common::local(2022, 2, 15, 12, 0)), Money::new(6.0));
    assert!(calculator.try_costs_for(4.0, Category::Gas, common::local(2022, 2, 15, 12, 0)).is_err());
}

#[test]
fn wire_rows_to_padded_day() {
    let period: PeriodDescription = DayDescription::new(common::TZ, 2022, 6, 18).into();
    let start = period.start_of_period();
    let readings: Vec<ValueWithTimestamp> = (0..24)
        .filter(|h| h % 3 != 0)
        .map(|h| ValueWithTimestamp::new(start + TimeDelta::hours(h), 0.5))
        .collect();

    let parsed = parse_rows(&common::wire_rows(&readings), &common::TZ).unwrap();
    assert_eq!(parsed, readings);

    let padded = pad_period(&parsed, &period);
    assert_eq!(padded.len(), 24);
    assert_eq!(padded.iter().filter(|r| r.value == 0.0).count(), 8);
    assert_eq!(padded.iter().map(|r| r.timestamp).collect::<Vec<_>>(), period.expected_domain_values());
}

#[test]
fn full_day_is_unchanged_and_empty_day_is_zero() {
    let start = common::local(2022, 7, 18, 0, 0).with_timezone(&common::TZ);
    let readings: Vec<ValueWithTimestamp> = (0..24)
        .map(|h| ValueWithTimestamp::new(start.with_timezone(&Utc) + TimeDelta::hours(h), h as f64))
        .collect();
    assert_eq!(pad_data(&readings, start, UnitSize::Hour), readings);

    let padded = pad_data(&[], start, UnitSize::Hour);
    assert_eq!(padded.len(), 24);
    assert!(padded.iter().all(|r| r.value == 0.0));
}

#[test]
fn month_padding_and_summary() {
    let period: PeriodDescription = MonthDescription::new(common::TZ, 2022, 1).into();
    let readings = vec![
        ValueWithTimestamp::new(common::local(2022, 2, 3, 0, 0), 4.0),
        ValueWithTimestamp::new(common::local(2022, 2, 20, 0, 0), 6.0),
    ];
    let padded = pad_period(&readings, &period);
    assert_eq!(padded.len(), 28);
    assert_eq!(padded[2], readings[0]);
    assert_eq!(padded[19], readings[1]);

    let calculator = PriceCalculator::new(common::TZ).unwrap();
    let summary = calculator.cost_summary(&readings, Category::Stroom);
    assert_eq!(summary.units, 10.0);
    assert!((summary.costs.euros() - 10.0 * 0.45368).abs() < 1e-9);
}
