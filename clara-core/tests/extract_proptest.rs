use chrono::{Datelike, NaiveDate};
use clara_core::extract;
use proptest::prelude::*;

fn valid_date() -> impl Strategy<Value = NaiveDate> {
    (1000i32..=9999, 1u32..=12, 1u32..=31)
        .prop_filter_map("not a calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

proptest! {
    #[test]
    fn matching_names_yield_embedded_date_and_page(
        prefix in "[A-Za-z][A-Za-z0-9 _-]{0,20}",
        date in valid_date(),
        page in 0u64..100_000,
        ext in "[a-zA-Z0-9]{1,5}",
    ) {
        let name = format!(
            "{prefix} {:02}-{:02}-{:04}.p.{page}.{ext}",
            date.day(),
            date.month(),
            date.year()
        );

        let info = extract(&name).expect("name should match");
        prop_assert_eq!(info.date.date_naive(), date);
        prop_assert_eq!(info.page, page);
    }

    #[test]
    fn impossible_days_are_rejected(
        year in 1000i32..=9999,
        month in 1u32..=12,
        day in 29u32..=99,
    ) {
        prop_assume!(NaiveDate::from_ymd_opt(year, month, day).is_none());
        let name = format!("X {day:02}-{month:02}-{year:04}.p.1.jpg");
        prop_assert!(extract(&name).is_none());
    }

    #[test]
    fn names_without_the_page_marker_never_match(name in "[^.]*(\\.[a-z]{1,4})?") {
        prop_assert!(extract(&name).is_none());
    }

    #[test]
    fn multi_segment_extensions_never_match(
        date in valid_date(),
        page in 0u64..1000,
    ) {
        let name = format!(
            "A {:02}-{:02}-{:04}.p.{page}.tar.gz",
            date.day(),
            date.month(),
            date.year()
        );
        prop_assert!(extract(&name).is_none());
    }
}
