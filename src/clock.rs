use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for anything that needs today's date.
///
/// The picker never reads the system time directly, so a fixed clock can be
/// swapped in for tests or for previewing the calendar as of another day.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Fixed clock when `simulated` is set, system clock otherwise.
pub fn clock_for(simulated: Option<NaiveDateTime>) -> Box<dyn Clock> {
    match simulated {
        Some(now) => {
            tracing::info!(%now, "using simulated clock");
            Box::new(FixedClock(now))
        }
        None => Box::new(SystemClock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 9, 7)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn fixed_clock_returns_given_instant() {
        let clock = FixedClock(instant());
        assert_eq!(clock.now(), instant());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2023, 9, 7).unwrap());
    }

    #[test]
    fn clock_for_prefers_simulated_time() {
        let clock = clock_for(Some(instant()));
        assert_eq!(clock.now(), instant());
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
