// ==========================================
// Survey calendar - period arithmetic
// ==========================================
// The survey year follows a 4-4-5 week pattern: quarter-end months
// (March, June, September, December) carry 5 GB collection weeks,
// every other month carries 4. Week numbers are cumulative across
// the calendar year, starting at week 1 in January, so a year spans
// weeks 1..52.
// ==========================================

use chrono::{Datelike, NaiveDate};

/// Number of GB collection weeks in a month (5 at quarter end, else 4).
pub fn gb_week_count(month: i32) -> i32 {
    if month % 3 == 0 {
        5
    } else {
        4
    }
}

/// First cumulative week number of a month.
///
/// January starts at week 1; each preceding month contributes its own
/// week count.
pub fn first_week_of_month(month: i32) -> i32 {
    1 + (1..month).map(gb_week_count).sum::<i32>()
}

/// Calendar months belonging to a quarter.
pub fn months_in_quarter(quarter: i32) -> [i32; 3] {
    match quarter {
        1 => [1, 2, 3],
        2 => [4, 5, 6],
        3 => [7, 8, 9],
        _ => [10, 11, 12],
    }
}

/// Cumulative survey week containing a reference date.
///
/// The nth seven-day slice of the month maps to the nth week of that
/// month; days beyond the last slice fold into the month's final week.
pub fn week_for_date(date: NaiveDate) -> i32 {
    let month = date.month() as i32;
    let index = ((date.day() as i32 - 1) / 7).min(gb_week_count(month) - 1);
    first_week_of_month(month) + index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_end_months_have_five_weeks() {
        assert_eq!(gb_week_count(3), 5);
        assert_eq!(gb_week_count(6), 5);
        assert_eq!(gb_week_count(9), 5);
        assert_eq!(gb_week_count(12), 5);
        assert_eq!(gb_week_count(5), 4);
        assert_eq!(gb_week_count(1), 4);
    }

    #[test]
    fn test_first_week_is_cumulative() {
        assert_eq!(first_week_of_month(1), 1);
        assert_eq!(first_week_of_month(2), 5);
        assert_eq!(first_week_of_month(3), 9);
        assert_eq!(first_week_of_month(4), 14);
        // May: Jan 4 + Feb 4 + Mar 5 + Apr 4 = 17 weeks before it
        assert_eq!(first_week_of_month(5), 18);
        assert_eq!(first_week_of_month(12), 48);
    }

    #[test]
    fn test_year_spans_52_weeks() {
        let last = first_week_of_month(12) + gb_week_count(12) - 1;
        assert_eq!(last, 52);
    }

    #[test]
    fn test_months_in_quarter() {
        assert_eq!(months_in_quarter(1), [1, 2, 3]);
        assert_eq!(months_in_quarter(4), [10, 11, 12]);
    }

    #[test]
    fn test_week_for_date() {
        // first week of January
        let d = NaiveDate::from_ymd_opt(2014, 1, 3).unwrap();
        assert_eq!(week_for_date(d), 1);
        // third seven-day slice of May
        let d = NaiveDate::from_ymd_opt(2014, 5, 15).unwrap();
        assert_eq!(week_for_date(d), 20);
        // day 29+ folds into the month's final week
        let d = NaiveDate::from_ymd_opt(2014, 5, 31).unwrap();
        assert_eq!(week_for_date(d), 21);
        // quarter-end month keeps its fifth week
        let d = NaiveDate::from_ymd_opt(2014, 3, 30).unwrap();
        assert_eq!(week_for_date(d), 13);
    }
}
