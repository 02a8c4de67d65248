#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use timecard::db::{db::Db, entries::Entries, timers::Timers};
    use timecard::libs::entry::{add_hours, EntryKey, EntryStore, TimeEntry};
    use timecard::libs::timer::Timer;
    use timecard::libs::week::WeekRow;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TimerTestContext {
        temp_dir: TempDir,
    }

    impl TimerTestContext {
        fn timers(&self) -> Timers {
            Timers::with_db(Db::open(self.temp_dir.path().join("timecard.db")).unwrap())
        }

        fn entries(&self) -> Entries {
            Entries::with_db(Db::open(self.temp_dir.path().join("timecard.db")).unwrap())
        }
    }

    impl TestContext for TimerTestContext {
        fn setup() -> Self {
            TimerTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_timer_roundtrip(ctx: &mut TimerTestContext) {
        let mut timers = ctx.timers();
        assert!(timers.get("alice").unwrap().is_none());

        let timer = Timer::start("alice", WeekRow::new("Apollo", Some("Design")), at(9, 0));
        timers.save(&timer).unwrap();
        assert_eq!(timers.get("alice").unwrap(), Some(timer));
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_paused_timer_persists_accumulated_time(ctx: &mut TimerTestContext) {
        let mut timer = Timer::start("alice", WeekRow::new("Apollo", None), at(9, 0));
        timer.pause(at(10, 30)).unwrap();
        ctx.timers().save(&timer).unwrap();

        // A later invocation picks up where the previous one left off
        let mut restored = ctx.timers().get("alice").unwrap().unwrap();
        assert!(!restored.running);
        assert_eq!(restored.elapsed_hours(at(12, 0)), 1.5);

        restored.resume(at(13, 0)).unwrap();
        ctx.timers().save(&restored).unwrap();
        let restored = ctx.timers().get("alice").unwrap().unwrap();
        assert_eq!(restored.stop(at(13, 45)).unwrap(), 2.25);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_one_timer_per_user(ctx: &mut TimerTestContext) {
        let mut timers = ctx.timers();
        timers.save(&Timer::start("alice", WeekRow::new("Apollo", None), at(9, 0))).unwrap();
        timers.save(&Timer::start("alice", WeekRow::new("Zephyr", None), at(11, 0))).unwrap();
        timers.save(&Timer::start("bob", WeekRow::new("Apollo", None), at(9, 0))).unwrap();

        let alice = timers.get("alice").unwrap().unwrap();
        assert_eq!(alice.row, WeekRow::new("Zephyr", None));
        assert_eq!(alice.started_at, at(11, 0));

        assert!(timers.remove("alice").unwrap());
        assert!(!timers.remove("alice").unwrap());
        assert!(timers.get("alice").unwrap().is_none());
        assert!(timers.get("bob").unwrap().is_some());
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_stopped_timer_reports_only_hours_that_fit(ctx: &mut TimerTestContext) {
        let row = WeekRow::new("Apollo", None);
        let day = at(0, 0).date();
        let key = EntryKey::new("alice", &row.project, None, day);
        let mut entries = ctx.entries();
        entries.create(&TimeEntry::new("alice", "Apollo", None, day, 23.0)).unwrap();

        let timer = Timer::start("alice", row, at(9, 0));
        let hours = timer.stop(at(12, 0)).unwrap();
        assert_eq!(hours, 3.0);

        let result = add_hours(&mut entries, &key, hours).unwrap().unwrap();
        let stored = entries.find_by_key(&key).unwrap().unwrap();
        assert_eq!(stored.hours, 24.0);
        assert_eq!(result.added, stored.hours - 23.0);
        assert_eq!(result.dropped, 2.0);

        // A full cell takes nothing more
        let again = Timer::start("alice", WeekRow::new("Apollo", None), at(13, 0));
        assert!(add_hours(&mut entries, &key, again.stop(at(14, 0)).unwrap()).unwrap().is_none());
        assert_eq!(entries.find_by_key(&key).unwrap().unwrap().hours, 24.0);
    }

    #[test_context(TimerTestContext)]
    #[test]
    fn test_stopped_timer_adds_to_existing_cell(ctx: &mut TimerTestContext) {
        let day = at(0, 0).date();
        let key = EntryKey::new("alice", "Apollo", Some("Design"), day);
        let mut entries = ctx.entries();
        let existing = entries.create(&TimeEntry::new("alice", "Apollo", Some("Design"), day, 1.5)).unwrap();

        let timer = Timer::start("alice", WeekRow::new("Apollo", Some("Design")), at(9, 0));
        let result = add_hours(&mut entries, &key, timer.stop(at(9, 45)).unwrap()).unwrap().unwrap();

        assert_eq!(result.added, 0.75);
        assert_eq!(result.dropped, 0.0);
        assert_eq!(result.entry.id, existing.id);
        assert_eq!(entries.find_by_key(&key).unwrap().unwrap().hours, 2.25);
    }
}
