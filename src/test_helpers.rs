use std::{cell::Cell, rc::Rc};

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::{AlarmEnv, AlarmId, AlarmItem};

pub fn date(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn id(n: u128) -> AlarmId {
    Uuid::from_u128(n).into()
}

pub fn item(n: u128, is_on: bool) -> AlarmItem {
    AlarmItem::new(id(n), date("2015-01-01T07:30:00+00:00"), is_on)
}

/// Fixed clock, identities counting up from `first_id`.
pub fn env(first_id: u128) -> AlarmEnv {
    let next = Rc::new(Cell::new(first_id));
    AlarmEnv::new(
        || date("2021-12-24T09:15:00+01:00"),
        move || {
            let n = next.get();
            next.set(n + 1);
            id(n)
        },
    )
}
