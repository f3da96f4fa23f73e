use hotelrevlib::{
    aggregate::{group, revenue_by_month, revenue_by_room_type, Aggregate, GroupBy, GroupKey, Kpis},
    filter::{parse_room_selector, FilterSpec, StayType},
    formats::csv::Csv,
    model::{Dataset, RoomType},
    traits::ReadFormat,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

fn dataset() -> Dataset {
    let input = r#"Booking_id,Total_bill,Checkin_month,Is_weekend,Room_type_Executive,Room_type_Standard,Room_type_Suite
B1,1000,3,0,0,1,0
B2,2500,1,1,0,1,0
B3,4000,3,1,1,0,0
B4,1500,2,0,1,0,0
B5,900.50,1,0,0,1,0
B5,100.25,1,0,0,1,0
"#;
    Csv::read(Cursor::new(input)).expect("read csv")
}

#[test]
fn room_group_sums_add_up_to_total() {
    let ds = dataset();
    let view = ds.view();
    let total: Decimal = ds.records().iter().map(|r| r.total_bill).sum();
    let by_room: Decimal = revenue_by_room_type(&view).iter().map(|(_, v)| *v).sum();
    assert_eq!(by_room, total);
    assert_eq!(total, dec!(10000.75));
}

#[test]
fn room_series_sorted_descending_month_series_ascending() {
    let ds = dataset();
    let view = ds.view();

    let rooms = revenue_by_room_type(&view);
    assert_eq!(
        rooms,
        vec![
            (GroupKey::Room(RoomType::Executive), dec!(5500)),
            (GroupKey::Room(RoomType::Standard), dec!(4500.75)),
        ]
    );

    let months: Vec<GroupKey> = revenue_by_month(&view).into_iter().map(|(k, _)| k).collect();
    assert_eq!(months, vec![GroupKey::Month(1), GroupKey::Month(2), GroupKey::Month(3)]);
}

#[test]
fn group_mean_and_distinct_bookings() {
    let ds = dataset();
    let view = ds.view();

    let counts = group(&view, GroupBy::CheckinMonth, Aggregate::DistinctBookings);
    // B5 встречается дважды, считается один раз
    assert_eq!(counts[0], (GroupKey::Month(1), dec!(2)));

    let means = group(&view, GroupBy::CheckinMonth, Aggregate::Mean);
    assert_eq!(means[2], (GroupKey::Month(3), dec!(2500)));
}

#[test]
fn kpis_over_full_dataset() {
    let ds = dataset();
    let k = Kpis::compute(&ds.view());
    assert_eq!(k.total_revenue, dec!(10000.75));
    assert_eq!(k.bookings, 5);
    assert_eq!(k.rows, 6);
    // среднее хранится без округления, округляет только вывод
    let avg = k.average_revenue.expect("non-empty view");
    assert_eq!(avg.round_dp(2), dec!(1666.79));
    assert!(avg.scale() > 2);
}

#[test]
fn filters_compose_with_and() {
    let ds = dataset();
    let spec = FilterSpec::new(Some(RoomType::Standard), StayType::Weekday);
    let view = spec.apply(&ds);
    let ids: Vec<&str> = view.iter().map(|r| r.booking_id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B5", "B5"]);

    let weekend = FilterSpec::new(None, StayType::Weekend).apply(&ds);
    assert!(weekend.iter().all(|r| r.is_weekend));
    assert_eq!(weekend.len(), 2);
}

#[test]
fn filtering_is_idempotent() {
    let ds = dataset();
    for spec in [
        FilterSpec::new(Some(RoomType::Executive), StayType::All),
        FilterSpec::new(None, StayType::Weekday),
        FilterSpec::new(Some(RoomType::Standard), StayType::Weekend),
    ] {
        let once = spec.apply(&ds);
        let twice = once.refine(&spec);
        assert_eq!(once, twice);
    }
}

#[test]
fn all_all_filter_equals_unfiltered_dataset() {
    let ds = dataset();
    let spec = FilterSpec::default();
    assert!(spec.is_unfiltered());
    let view = spec.apply(&ds);
    assert_eq!(view.len(), ds.len());
    assert_eq!(view, ds.view());
    assert_eq!(Kpis::compute(&view), Kpis::compute(&ds.view()));
}

#[test]
fn empty_view_reports_no_data() {
    let ds = dataset();
    let view = FilterSpec::new(Some(RoomType::Suite), StayType::All).apply(&ds);
    assert!(view.is_empty());

    let k = Kpis::compute(&view);
    assert_eq!(k.total_revenue, Decimal::ZERO);
    assert_eq!(k.bookings, 0);
    assert_eq!(k.average_revenue, None);
    assert!(revenue_by_room_type(&view).is_empty());
    assert!(revenue_by_month(&view).is_empty());
}

#[test]
fn selectors_parse_from_form_values() {
    assert_eq!(parse_room_selector("All").unwrap(), None);
    assert_eq!(parse_room_selector("suite").unwrap(), Some(RoomType::Suite));
    assert_eq!(
        parse_room_selector("Room_type_Executive").unwrap(),
        Some(RoomType::Executive)
    );
    assert!(parse_room_selector("Penthouse").is_err());
    assert_eq!("Weekend".parse::<StayType>().unwrap(), StayType::Weekend);
    assert!("sometimes".parse::<StayType>().is_err());
}
