use chrono::{Datelike, Days, Months, NaiveDate};

/// Month-grid date picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub open: bool,
    /// First day of the month on display.
    pub month: NaiveDate,
    /// Day under the keyboard cursor. Always on or before `today`.
    pub cursor: NaiveDate,
}

/// One week row, Sunday first. `None` pads days outside the month.
pub type Week = [Option<NaiveDate>; 7];

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

impl CalendarState {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            open: false,
            month: first_of_month(day),
            cursor: day,
        }
    }

    /// Show the picker with the cursor on `day`.
    pub fn open_at(&mut self, day: NaiveDate) {
        self.open = true;
        self.cursor = day;
        self.month = first_of_month(day);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Future days cannot be picked.
    pub fn is_selectable(day: NaiveDate, today: NaiveDate) -> bool {
        day <= today
    }

    /// Move the cursor by whole days, never past `today`.
    pub fn move_by(&mut self, days: i64, today: NaiveDate) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(day) = moved {
            self.cursor = day.min(today);
            self.month = first_of_month(self.cursor);
        }
    }

    /// Flip to the previous/next month. The cursor keeps its day of month
    /// where possible and is pulled back to `today` if it lands in the future.
    pub fn shift_month(&mut self, delta: i32, today: NaiveDate) {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.cursor.checked_add_months(months)
        } else {
            self.cursor.checked_sub_months(months)
        };
        if let Some(day) = shifted {
            self.cursor = day.min(today);
            self.month = first_of_month(self.cursor);
        }
    }

    /// Week rows of the displayed month.
    pub fn weeks(&self) -> Vec<Week> {
        let lead = self.month.weekday().num_days_from_sunday() as usize;
        let mut weeks = Vec::new();
        let mut week: Week = [None; 7];
        let mut slot = lead;
        let mut day = self.month;
        while day.month() == self.month.month() {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_2025_layout() {
        // 2025-03-01 is a Saturday.
        let cal = CalendarState::new(date(2025, 3, 14));
        let weeks = cal.weeks();
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][6], Some(date(2025, 3, 1)));
        assert!(weeks[0][..6].iter().all(Option::is_none));
        assert_eq!(weeks[5][1], Some(date(2025, 3, 31)));
    }

    #[test]
    fn cursor_cannot_pass_today() {
        let today = date(2025, 3, 14);
        let mut cal = CalendarState::new(date(2025, 3, 10));
        cal.move_by(7, today);
        assert_eq!(cal.cursor, today);
        cal.shift_month(1, today);
        assert_eq!(cal.cursor, today);
        assert_eq!(cal.month, date(2025, 3, 1));
    }

    #[test]
    fn month_shift_clamps_day_of_month() {
        let today = date(2025, 6, 1);
        let mut cal = CalendarState::new(date(2025, 3, 31));
        cal.shift_month(-1, today);
        assert_eq!(cal.cursor, date(2025, 2, 28));
        assert_eq!(cal.month, date(2025, 2, 1));
    }

    #[test]
    fn moving_across_month_boundary_follows_cursor() {
        let today = date(2025, 6, 1);
        let mut cal = CalendarState::new(date(2025, 3, 1));
        cal.move_by(-1, today);
        assert_eq!(cal.cursor, date(2025, 2, 28));
        assert_eq!(cal.month, date(2025, 2, 1));
    }

    #[test]
    fn future_days_are_not_selectable() {
        let today = date(2025, 3, 14);
        assert!(CalendarState::is_selectable(today, today));
        assert!(!CalendarState::is_selectable(date(2025, 3, 15), today));
    }
}
