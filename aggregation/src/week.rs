use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// The calendar week (Monday 00:00 through Sunday 23:59:59.999) containing
/// a reference instant, evaluated in that instant's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeekWindow {
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let days_since_monday = i64::from(now.weekday().num_days_from_monday());
        let monday = now.date_naive() - Duration::days(days_since_monday);
        let next_monday = monday + Duration::days(7);

        Self {
            start: local_midnight(&tz, monday),
            end: local_midnight(&tz, next_monday) - Duration::milliseconds(1),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Check a ClickUp millisecond timestamp. Absent or unparseable input is
    /// simply outside the window.
    pub fn contains_timestamp(&self, timestamp: Option<&str>) -> bool {
        timestamp
            .and_then(parse_millis)
            .map_or(false, |instant| self.contains(instant))
    }
}

/// Read the leading integer of a timestamp string. Anything after the digits
/// (a fractional part, a unit suffix) is ignored.
pub fn parse_millis(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }

    let millis = trimmed[..sign_len + digits_len].parse::<i64>().ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // midnight skipped by a DST jump
        LocalResult::None => naive.and_utc(),
    }
}
