use std::{
    hash::{Hash, Hasher},
    rc::Rc,
};

use chrono::{DateTime, FixedOffset, Local};
use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;


/// Identity of an [`AlarmItem`].
#[derive(Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(Serialize, Deserialize)]
#[display("{0}")]
#[serde(transparent)]
pub struct AlarmId(Uuid);

impl AlarmId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}
impl From<Uuid> for AlarmId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// An alarm: a point in time and whether it rings.
///
/// Equality and hashing only look at [`id`](Self::id).
/// Use [`same_value`](Self::same_value) to compare every field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmItem {
    pub id: AlarmId,
    pub date: DateTime<FixedOffset>,
    pub is_on: bool,
}

impl AlarmItem {
    pub fn new(id: AlarmId, date: DateTime<FixedOffset>, is_on: bool) -> Self {
        Self { id, date, is_on }
    }

    /// A fresh, enabled item set to the current time.
    pub fn draft(env: &AlarmEnv) -> Self {
        Self::new(env.new_id(), env.now(), true)
    }

    pub fn same_value(&self, other: &Self) -> bool {
        self.id == other.id && self.date == other.date && self.is_on == other.is_on
    }

    pub fn toggle(&mut self) {
        self.is_on = !self.is_on;
    }

    /// Label of the action that flips [`is_on`](Self::is_on).
    pub fn status(&self) -> &'static str {
        if self.is_on {
            "Disable"
        } else {
            "Enable"
        }
    }

    /// Time of day, e.g. `07:30`.
    pub fn name(&self) -> String {
        self.date.format("%H:%M").to_string()
    }

    /// Long form date, e.g. `Thursday, 1 January, 2015`.
    pub fn description(&self) -> String {
        self.date.format("%A, %-d %B, %Y").to_string()
    }
}
impl PartialEq for AlarmItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for AlarmItem {}
impl Hash for AlarmItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Sources of time and identity used when creating draft items.
#[derive(Clone)]
pub struct AlarmEnv {
    now: Rc<dyn Fn() -> DateTime<FixedOffset>>,
    new_id: Rc<dyn Fn() -> AlarmId>,
}

impl AlarmEnv {
    pub fn new(
        now: impl Fn() -> DateTime<FixedOffset> + 'static,
        new_id: impl Fn() -> AlarmId + 'static,
    ) -> Self {
        Self {
            now: Rc::new(now),
            new_id: Rc::new(new_id),
        }
    }

    /// System clock and random identities.
    pub fn live() -> Self {
        Self::new(|| Local::now().fixed_offset(), AlarmId::new_v4)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.now)()
    }
    pub fn new_id(&self) -> AlarmId {
        (self.new_id)()
    }
}
impl Default for AlarmEnv {
    fn default() -> Self {
        Self::live()
    }
}
impl std::fmt::Debug for AlarmEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmEnv").finish_non_exhaustive()
    }
}
