#![allow(dead_code)]

use std::{cell::Cell, rc::Rc};

use alarm_routing::{AlarmEnv, AlarmId, AlarmItem, AlarmsList, Tab, TabBar};
use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

pub const NOW: &str = "2021-12-24T09:15:00+01:00";

pub fn date(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn id(n: u128) -> AlarmId {
    Uuid::from_u128(n).into()
}

pub fn item(n: u128, is_on: bool) -> AlarmItem {
    AlarmItem::new(id(n), date("2015-01-01T07:30:00+00:00"), is_on)
}

pub fn env(first_id: u128) -> AlarmEnv {
    let next = Rc::new(Cell::new(first_id));
    AlarmEnv::new(
        || date(NOW),
        move || {
            let n = next.get();
            next.set(n + 1);
            id(n)
        },
    )
}

pub fn tab_bar(selected_tab: Tab, ids: impl IntoIterator<Item = u128>) -> TabBar {
    let items = ids.into_iter().map(|n| item(n, false));
    TabBar::new(selected_tab, AlarmsList::new(items, env(1000)))
}
