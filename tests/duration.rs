#[cfg(test)]
mod tests {
    use timecard::libs::duration::{
        format_for_display, is_valid_duration, is_valid_or_clear, normalize, round_for_storage, to_decimal_hours,
        DurationError,
    };
    use timecard::libs::entry::{plan_change, EntryChange, TimeEntry};
    use timecard::libs::messages::Message;

    #[test]
    fn test_single_digit_minutes_in_grid_cell() {
        let canonical = normalize("2:3").unwrap();
        assert_eq!(canonical.to_string(), "2:30");
        let decimal = to_decimal_hours(&canonical.to_string()).unwrap();
        assert_eq!(decimal, 2.5);
        assert_eq!(round_for_storage(decimal), 2.5);
    }

    #[test]
    fn test_decimal_input_displays_as_clock() {
        let decimal = to_decimal_hours("8.75").unwrap();
        assert_eq!(decimal, 8.75);
        assert_eq!(format_for_display(decimal), "8:45");
        assert_eq!(round_for_storage(decimal), 8.75);
    }

    #[test]
    fn test_zero_or_cleared_cell_is_a_deletion() {
        let mut existing = TimeEntry::new(
            "alice",
            "Apollo",
            None,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            3.0,
        );
        existing.id = Some(1);

        for raw in ["0", "", "  ", "0:00", "0.0"] {
            assert_eq!(plan_change(Some(&existing), raw).unwrap(), EntryChange::Delete { id: 1 }, "{:?}", raw);
        }
        assert!(is_valid_or_clear("0"));
        assert!(is_valid_or_clear(""));
        assert!(!is_valid_duration("0"));
    }

    #[test]
    fn test_whole_clock_values_survive_display() {
        for h in 0..=24u32 {
            for m in 0..60u32 {
                if h == 24 && m > 0 {
                    continue;
                }
                let hours = h as f64 + m as f64 / 60.0;
                let back = to_decimal_hours(&format_for_display(hours)).unwrap();
                assert!((back - hours).abs() < 1.0 / 60.0, "{}:{:02}", h, m);
            }
        }
    }

    #[test]
    fn test_rejections_have_user_text() {
        let err = normalize("1:2:3").unwrap_err();
        assert!(matches!(err, DurationError::SyntaxInvalid(_)));
        assert!(Message::from(&err).to_string().contains("2:30"));

        let err = normalize("24:01").unwrap_err();
        assert!(matches!(err, DurationError::RangeInvalid(_)));
        assert!(Message::from(&err).to_string().contains("24:00"));

        assert_eq!(normalize("   "), Err(DurationError::Empty));
    }
}
