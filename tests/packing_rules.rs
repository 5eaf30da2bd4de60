//! Packing rule engine scenarios and invariants

use chrono::NaiveDate;
use packwise::units::TempUnit;
use packwise::{DailyWeather, PackingCategory, WeatherSummary, suggest};
use rstest::rstest;

const BAND_NAMES: [&str; 6] = [
    "Freezing Cold Essentials",
    "Cold Weather Gear",
    "Cool Weather Layers",
    "Mild Weather Clothing",
    "Warm Weather Essentials",
    "Hot Weather Must-Haves",
];

fn summary(avg_high: f64, avg_low: f64, total_precip_days: u32) -> WeatherSummary {
    WeatherSummary {
        daily: Vec::new(),
        avg_high,
        avg_low,
        avg_mean: (avg_high + avg_low) / 2.0,
        avg_precipitation: 0.0,
        total_precip_days,
    }
}

fn names(categories: &[PackingCategory]) -> Vec<&str> {
    categories.iter().map(|c| c.name.as_str()).collect()
}

fn find<'a>(categories: &'a [PackingCategory], name: &str) -> &'a PackingCategory {
    categories
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("missing category {name}"))
}

#[test]
fn scenario_freezing_dry_trip() {
    let categories = suggest(&summary(20.0, 10.0, 0));

    assert_eq!(
        names(&categories),
        vec!["Freezing Cold Essentials", "Always Pack"]
    );
    assert_eq!(categories[0].icon, "🥶");
    assert_eq!(
        categories[0].reason.to_string(),
        "Highs around 20°F — bundle up for freezing conditions"
    );
    assert_eq!(categories[0].items.len(), 7);
}

#[test]
fn scenario_warm_rainy_trip_with_big_swing() {
    let categories = suggest(&summary(85.0, 55.0, 3));

    assert_eq!(
        names(&categories),
        vec![
            "Warm Weather Essentials",
            "Rain Gear",
            "Layering Essentials",
            "Always Pack"
        ]
    );
    assert_eq!(
        categories[0].reason.to_string(),
        "Highs around 85°F — pack light and stay cool"
    );
    assert_eq!(categories[1].reason.to_string(), "3 days with rain expected");
    assert_eq!(categories[1].icon, "☔");
    assert_eq!(
        categories[2].reason.to_string(),
        "Temperature swings of 30°F — layers are key"
    );
    assert_eq!(categories[2].icon, "🔄");
}

#[test]
fn scenario_hot_trip_quotes_fixed_threshold() {
    let categories = suggest(&summary(95.0, 90.0, 0));

    assert_eq!(
        names(&categories),
        vec!["Hot Weather Must-Haves", "Always Pack"]
    );
    assert_eq!(
        categories[0].reason.to_string(),
        "Highs above 90°F — protect yourself from the heat"
    );
}

#[test]
fn scenario_cool_boundary_single_rainy_day() {
    let categories = suggest(&summary(50.0, 48.0, 1));

    assert_eq!(
        names(&categories),
        vec!["Cool Weather Layers", "Rain Gear", "Always Pack"]
    );
    assert_eq!(
        find(&categories, "Rain Gear").reason.to_string(),
        "1 day with rain expected"
    );
}

#[rstest]
#[case(-10.0, "Freezing Cold Essentials")]
#[case(31.9, "Freezing Cold Essentials")]
#[case(32.0, "Cold Weather Gear")]
#[case(49.9, "Cold Weather Gear")]
#[case(50.0, "Cool Weather Layers")]
#[case(64.9, "Cool Weather Layers")]
#[case(65.0, "Mild Weather Clothing")]
#[case(77.9, "Mild Weather Clothing")]
#[case(78.0, "Warm Weather Essentials")]
#[case(89.9, "Warm Weather Essentials")]
#[case(90.0, "Hot Weather Must-Haves")]
#[case(120.0, "Hot Weather Must-Haves")]
fn band_selected_by_average_high(#[case] avg_high: f64, #[case] expected: &str) {
    let categories = suggest(&summary(avg_high, avg_high - 5.0, 0));

    let bands: Vec<&str> = names(&categories)
        .into_iter()
        .filter(|name| BAND_NAMES.contains(name))
        .collect();
    assert_eq!(bands, vec![expected]);
    assert_eq!(categories[0].name, expected);
}

#[rstest]
#[case(0, false)]
#[case(1, true)]
#[case(7, true)]
fn rain_gear_iff_rainy_days(#[case] rainy_days: u32, #[case] expected: bool) {
    let categories = suggest(&summary(70.0, 60.0, rainy_days));
    assert_eq!(categories.iter().any(|c| c.name == "Rain Gear"), expected);
}

#[rstest]
#[case(70.0, 60.0, false)]
#[case(70.0, 45.0, false)]
#[case(70.0, 44.9, true)]
#[case(40.0, 0.0, true)]
fn layering_iff_swing_above_25(#[case] high: f64, #[case] low: f64, #[case] expected: bool) {
    let categories = suggest(&summary(high, low, 0));
    assert_eq!(
        categories.iter().any(|c| c.name == "Layering Essentials"),
        expected
    );
}

#[rstest]
#[case(2, "2 days with rain expected")]
#[case(1, "1 day with rain expected")]
#[case(16, "16 days with rain expected")]
fn rain_reason_pluralization(#[case] rainy_days: u32, #[case] expected: &str) {
    let categories = suggest(&summary(60.0, 50.0, rainy_days));
    assert_eq!(
        find(&categories, "Rain Gear").reason.to_string(),
        expected
    );
}

#[test]
fn always_pack_is_last_and_names_are_unique() {
    for high in [-5.0, 33.0, 55.0, 70.0, 80.0, 99.0] {
        for rainy in [0, 2] {
            for low in [high - 40.0, high - 5.0] {
                let categories = suggest(&summary(high, low, rainy));
                let last = categories.last().unwrap();
                assert_eq!(last.name, "Always Pack");
                assert_eq!(last.reason.to_string(), "Essential items for any trip");
                assert_eq!(last.items.len(), 5);

                let mut seen = names(&categories);
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), categories.len());
            }
        }
    }
}

#[test]
fn suggestions_are_deterministic() {
    let weather = summary(72.4, 41.0, 2);
    assert_eq!(suggest(&weather), suggest(&weather));
}

#[test]
fn embedded_temperatures_match_display_contract() {
    let categories = suggest(&summary(85.0, 55.0, 3));
    for category in &categories {
        let reason = category.reason.to_string();
        if let Some(pos) = reason.find('°') {
            assert!(reason[..pos].ends_with(|c: char| c.is_ascii_digit()));
            assert!(reason[pos..].starts_with("°F"));
        }
    }
}

#[test]
fn celsius_rendering_keeps_order_and_items() {
    let categories = suggest(&summary(85.0, 55.0, 3));
    let rendered: Vec<_> = categories
        .iter()
        .map(|c| c.render(TempUnit::Celsius))
        .collect();

    assert_eq!(rendered.len(), categories.len());
    assert_eq!(
        rendered[0].reason,
        "Highs around 29°C — pack light and stay cool"
    );
    assert_eq!(rendered[1].reason, "3 days with rain expected");
    assert_eq!(
        rendered[2].reason,
        "Temperature swings of 17°C — layers are key"
    );
    assert_eq!(rendered[0].items, categories[0].items);
}

#[test]
fn summary_from_forecast_days_feeds_engine() {
    let start = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
    let days = (0..4)
        .map(|offset| {
            DailyWeather::new(
                start + chrono::Days::new(offset),
                28.0 + offset as f64,
                12.0,
                0.5,
                if offset == 2 { 70 } else { 20 },
            )
        })
        .collect();
    let weather = WeatherSummary::from_daily(days);

    assert_eq!(weather.avg_high, 29.5);
    assert_eq!(weather.total_precip_days, 1);
    assert_eq!(
        names(&suggest(&weather)),
        vec!["Freezing Cold Essentials", "Rain Gear", "Always Pack"]
    );
}
