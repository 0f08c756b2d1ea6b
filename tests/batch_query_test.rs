// ==========================================
// Read-side query integration tests
// ==========================================
// Dashboard aggregation, period-to-id lookups and reference-date
// resolution.
// ==========================================


use chrono::NaiveDate;

use survey_calendar::api::{ApiError, BatchIdApi, DashboardApi};
use survey_calendar::BatchStatus;

#[test]
fn test_dashboard_concatenates_monthly_quarterly_annual() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);
    let conn = test_helpers::open_test_connection(&db_path).expect("Failed to open db");

    test_helpers::seed_complete_calendar(&api, &conn, 2020);
    api.create_annual(2020, "2020 close-out")
        .expect("annual creation should succeed");

    let dashboard = DashboardApi::new(test_helpers::create_store(&db_path));
    let rows = dashboard
        .get_dashboard_info()
        .expect("dashboard query should succeed");

    // 12 monthly + 4 quarterly + 1 annual, in that order
    assert_eq!(rows.len(), 17);
    assert!(rows[..12].iter().all(|r| r.batch_type == "Monthly"));
    assert!(rows[12..16].iter().all(|r| r.batch_type == "Quarterly"));
    assert_eq!(rows[16].batch_type, "Annually");

    // read-time period projections
    assert_eq!(rows[0].period, "M1");
    assert_eq!(rows[12].period, "Q1");
    assert_eq!(rows[16].period, "2020");
    assert_eq!(rows[16].year, 2020);

    // the annual batch was just created and never closed out
    assert_eq!(rows[16].status, BatchStatus::Draft);
    assert_eq!(rows[0].status, BatchStatus::Complete);
}

#[test]
fn test_dashboard_is_empty_on_a_fresh_calendar() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");

    let dashboard = DashboardApi::new(test_helpers::create_store(&db_path));
    let rows = dashboard
        .get_dashboard_info()
        .expect("dashboard query should succeed");
    assert!(rows.is_empty());
}

#[test]
fn test_monthly_id_lookup_round_trips_the_description() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);

    api.create_monthly(7, 2019, "July field collection")
        .expect("creation should succeed");

    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));
    let rows = ids
        .get_ids_for_month(2019, 7)
        .expect("lookup should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].year, 2019);
    assert_eq!(rows[0].month, 7);
    assert_eq!(rows[0].description, "July field collection");
    assert_eq!(rows[0].status, BatchStatus::Draft);
    assert!(rows[0].id > 0);
}

#[test]
fn test_quarter_and_year_id_lookups() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);
    let conn = test_helpers::open_test_connection(&db_path).expect("Failed to open db");

    test_helpers::seed_complete_calendar(&api, &conn, 2018);
    api.create_annual(2018, "2018 close-out")
        .expect("annual creation should succeed");

    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));

    let quarters = ids
        .get_ids_for_quarter(2018, 2)
        .expect("quarter lookup should succeed");
    assert_eq!(quarters.len(), 1);
    assert_eq!(quarters[0].quarter, 2);
    assert_eq!(quarters[0].year, 2018);

    let years = ids.get_ids_for_year(2018).expect("year lookup should succeed");
    assert_eq!(years.len(), 1);
    assert_eq!(years[0].year, 2018);
    assert_eq!(years[0].description, "2018 close-out");

    // a different period resolves to nothing
    assert!(ids.get_ids_for_year(2019).unwrap().is_empty());
    assert!(ids.get_ids_for_quarter(2019, 1).unwrap().is_empty());
}

#[test]
fn test_ni_id_lookup_shares_the_monthly_id() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);

    api.create_monthly(2, 2021, "February collection")
        .expect("creation should succeed");

    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));
    let monthly = ids.get_ids_for_month(2021, 2).unwrap();
    let ni = ids.get_ids_for_ni(2021, 2).unwrap();

    assert_eq!(ni.len(), 1);
    assert_eq!(ni[0].id, monthly[0].id);
    assert_eq!(ni[0].month, 2);
}

#[test]
fn test_id_lookup_rejects_out_of_range_periods() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));

    let err = ids.get_ids_for_month(2019, 13).expect_err("month 13");
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert_eq!(err.to_string(), "the month value is 13, must be between 1 and 12");

    let err = ids.get_ids_for_quarter(2019, 0).expect_err("quarter 0");
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let err = ids.get_ids_for_ni(2019, 0).expect_err("month 0");
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_reference_date_resolves_to_gb_week_and_ni_month() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);

    api.create_monthly(5, 2014, "May collection")
        .expect("creation should succeed");

    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));

    // 15 May falls in the third collection week of May: cumulative
    // week 20
    let date = NaiveDate::from_ymd_opt(2014, 5, 15).unwrap();
    let gb = ids
        .find_gb_batch_for_date(date)
        .expect("GB resolution should succeed");
    assert_eq!(gb.week, 20);
    assert_eq!(gb.month, 5);
    assert_eq!(gb.year, 2014);

    let ni = ids
        .find_ni_batch_for_date(date)
        .expect("NI resolution should succeed");
    assert_eq!(ni.month, 5);
    assert_eq!(ni.year, 2014);
    assert_eq!(ni.batch_id, gb.batch_id);
}

#[test]
fn test_reference_date_in_an_unprovisioned_month_is_not_found() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let api = test_helpers::create_batch_api(&db_path);

    api.create_monthly(5, 2014, "May collection")
        .expect("creation should succeed");

    let ids = BatchIdApi::new(test_helpers::create_store(&db_path));
    let date = NaiveDate::from_ymd_opt(2014, 9, 1).unwrap();

    let err = ids.find_gb_batch_for_date(date).expect_err("September has no batches");
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = ids.find_ni_batch_for_date(date).expect_err("September has no batches");
    assert!(matches!(err, ApiError::NotFound(_)));
}
