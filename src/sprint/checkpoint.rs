use jiff::civil::Date;

/// Whole days between the sprint start and today. Negative before the
/// sprint starts.
pub fn days_since_start(start: Date, today: Date) -> i64 {
    (today - start).get_days() as i64
}

/// Whether today is the designated checkpoint day of the sprint.
///
/// Exact equality: a sprint with no recorded start date never fires, and a
/// process that is down on the checkpoint day misses it for that sprint.
/// There is deliberately no catch-up logic here.
pub fn is_checkpoint_day(start: Option<Date>, today: Date, checkpoint: i64) -> bool {
    match start {
        Some(start) => days_since_start(start, today) == checkpoint,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_fires_only_on_exact_day() {
        let start = Some(date(2026, 3, 2));

        assert!(!is_checkpoint_day(start, date(2026, 3, 6), 5));
        assert!(is_checkpoint_day(start, date(2026, 3, 7), 5));
        assert!(!is_checkpoint_day(start, date(2026, 3, 8), 5));
    }

    #[test]
    fn test_undated_sprint_never_fires() {
        assert!(!is_checkpoint_day(None, date(2026, 3, 7), 5));
    }

    #[test]
    fn test_sprint_start_day_with_zero_checkpoint() {
        let start = Some(date(2026, 3, 2));
        assert!(is_checkpoint_day(start, date(2026, 3, 2), 0));
    }

    #[test]
    fn test_days_since_start_can_be_negative() {
        assert_eq!(days_since_start(date(2026, 3, 2), date(2026, 3, 1)), -1);
    }
}
