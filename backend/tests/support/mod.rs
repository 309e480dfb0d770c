//! Fixtures shared by the service-level integration tests.

use std::sync::Arc;

use backend::ServiceRegistry;
use backend::registry::InMemoryStorage;
use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a Monday morning so bookings can be placed later that day.
pub struct PinnedClock(pub DateTime<Utc>);

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 3, 3, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// `days` after [`now`] at `hour:00` UTC.
pub fn at(days: i64, hour: u32) -> DateTime<Utc> {
    let date = now().date_naive() + TimeDelta::days(days);
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
        .and_utc()
}

pub fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour")
}

pub fn registry() -> ServiceRegistry<InMemoryStorage> {
    ServiceRegistry::in_memory(Arc::new(PinnedClock(now())))
}
