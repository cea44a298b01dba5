/// Calendar date part of an ISO-8601 timestamp (`2024-05-01T10:00:00.000Z` -> `2024-05-01`).
pub fn iso_date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    let iso: String = now.to_iso_string().into();
    iso_date_part(&iso).to_string()
}

/// Current `(year, month)` in local time, month 1-based.
pub fn current_year_month() -> (i32, u32) {
    let now = js_sys::Date::new_0();
    (now.get_full_year() as i32, now.get_month() + 1)
}

/// Years offered by the analytics year selector, newest first.
pub fn selectable_years(current: i32, span: i32) -> Vec<i32> {
    (0..span).map(|offset| current - offset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_time_component() {
        assert_eq!(iso_date_part("2024-05-01T10:00:00.000Z"), "2024-05-01");
        assert_eq!(iso_date_part("2024-05-01"), "2024-05-01");
    }

    #[test]
    fn year_range_counts_down() {
        assert_eq!(selectable_years(2024, 3), vec![2024, 2023, 2022]);
    }
}
