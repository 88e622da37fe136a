use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use derive_ex::derive_ex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{AlarmEnv, AlarmId, AlarmItem, AlarmRow, RowRoute, RowState, Store, Subscription};


/// The affordance currently open for the whole list.
#[derive(Clone, Debug, Serialize)]
pub enum ListRoute {
    /// Adding a new draft item.
    Add(AlarmItem),
    /// The route of the row identified by `id`.
    Items { id: AlarmId, route: RowRoute },
}

impl ListRoute {
    /// Returns the id of the row this route relays, if any.
    pub fn row_id(&self) -> Option<AlarmId> {
        match self {
            Self::Add(_) => None,
            Self::Items { id, .. } => Some(*id),
        }
    }
}
impl PartialEq for ListRoute {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Add(lhs), Self::Add(rhs)) => lhs.same_value(rhs),
            (
                Self::Items { id, route },
                Self::Items {
                    id: other_id,
                    route: other_route,
                },
            ) => id == other_id && route == other_route,
            (Self::Add(_) | Self::Items { .. }, _) => false,
        }
    }
}
impl Eq for ListRoute {}

/// Value snapshot of the list.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ListState {
    pub rows: Vec<RowState>,
    pub route: Option<ListRoute>,
}

/// Controller of the alarm list.
///
/// The list route and the route of every row are kept in sync:
/// a row route is relayed to the list as [`ListRoute::Items`], and the list route is projected back
/// onto each row. Both directions only write values that differ from the current one.
#[derive_ex(Clone)]
pub struct AlarmsList(Rc<ListNode>);

struct ListNode {
    env: AlarmEnv,
    rows: Store<Vec<AlarmRow>>,
    route: Store<Option<ListRoute>>,
    row_bindings: RefCell<HashMap<AlarmId, Subscription>>,
    route_binding: RefCell<Subscription>,
}

impl AlarmsList {
    /// Creates a list holding `items` in order. Items with an id already in the list are skipped.
    pub fn new(items: impl IntoIterator<Item = AlarmItem>, env: AlarmEnv) -> Self {
        let this = Self(Rc::new(ListNode {
            env,
            rows: Store::new(Vec::new()),
            route: Store::new(None),
            row_bindings: RefCell::new(HashMap::new()),
            route_binding: RefCell::new(Subscription::empty()),
        }));
        let weak = this.downgrade();
        let binding = this.0.route.subscribe(move |route| {
            if let Some(this) = Self::upgrade(&weak) {
                this.project_to_rows(route);
            }
        });
        *this.0.route_binding.borrow_mut() = binding;
        for item in items {
            this.insert_row(item);
        }
        this
    }

    fn downgrade(&self) -> Weak<ListNode> {
        Rc::downgrade(&self.0)
    }
    fn upgrade(weak: &Weak<ListNode>) -> Option<Self> {
        weak.upgrade().map(Self)
    }

    pub fn env(&self) -> &AlarmEnv {
        &self.0.env
    }

    /// Returns handles to the rows in display order.
    pub fn rows(&self) -> Vec<AlarmRow> {
        self.0.rows.get()
    }
    pub fn row(&self, id: AlarmId) -> Option<AlarmRow> {
        self.0.rows.with(|rows| rows.iter().find(|row| row.id() == id).cloned())
    }
    pub fn ids(&self) -> Vec<AlarmId> {
        self.0.rows.with(|rows| rows.iter().map(AlarmRow::id).collect())
    }
    pub fn len(&self) -> usize {
        self.0.rows.with(|rows| rows.len())
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn route(&self) -> Option<ListRoute> {
        self.0.route.get()
    }
    pub fn snapshot(&self) -> ListState {
        ListState {
            rows: self.0.rows.with(|rows| rows.iter().map(AlarmRow::snapshot).collect()),
            route: self.0.route.get(),
        }
    }

    /// Observes rows being added or removed.
    pub fn subscribe_rows(&self, f: impl Fn(&[AlarmRow]) + 'static) -> Subscription {
        self.0.rows.subscribe(move |rows| f(rows.as_slice()))
    }
    /// Observes changes of the list route.
    pub fn subscribe_route(&self, f: impl Fn(Option<&ListRoute>) + 'static) -> Subscription {
        self.0.route.subscribe(move |route| f(route.as_ref()))
    }

    /// Opens the add screen with a fresh draft.
    pub fn add_button_tapped(&self) {
        self.present_add(AlarmItem::draft(&self.0.env));
    }

    /// Opens the add screen with the given draft.
    pub fn present_add(&self, draft: AlarmItem) {
        self.0.route.set_dedup(Some(ListRoute::Add(draft)));
    }

    /// Mutates the draft of the open add screen. Does nothing if no add screen is open.
    pub fn update_draft(&self, f: impl FnOnce(&mut AlarmItem)) {
        self.0.route.update_dedup(|route| {
            if let Some(ListRoute::Add(draft)) = route {
                let id = draft.id;
                f(draft);
                draft.id = id;
            }
        });
    }

    /// Appends a row for `item` and closes any open affordance.
    pub fn add(&self, item: AlarmItem) {
        self.insert_row(item);
        self.0.route.set_dedup(None);
    }

    /// Commits the draft of the open add screen.
    pub fn save_draft(&self) {
        let draft = match &*self.0.route.borrow() {
            Some(ListRoute::Add(draft)) => draft.clone(),
            _ => return,
        };
        self.add(draft);
    }

    pub fn cancel_button_tapped(&self) {
        self.0.route.set_dedup(None);
    }

    /// Removes the row with the given id. Does nothing if there is no such row.
    pub fn delete(&self, id: AlarmId) {
        if self.index_of(id).is_none() {
            trace!(%id, "delete ignored, no such alarm");
            return;
        }
        if self.route_targets(id) {
            self.0.route.set_dedup(None);
        }
        let Some(index) = self.index_of(id) else {
            return;
        };
        let binding = self.0.row_bindings.borrow_mut().remove(&id);
        drop(binding);
        let row = self.0.rows.update(|rows| rows.remove(index));
        row.set_on_delete(|| {});
        row.set_on_toggle(|| {});
        debug!(%id, "alarm deleted");
    }

    /// Flips the enabled flag of the row with the given id. Does nothing if there is no such row.
    pub fn toggle(&self, id: AlarmId) {
        let Some(row) = self.row(id) else {
            trace!(%id, "toggle ignored, no such alarm");
            return;
        };
        let is_on = row.item().update(|item| {
            item.toggle();
            item.is_on
        });
        debug!(%id, is_on, "alarm toggled");
    }

    /// Opens `route` on the row with the given id. Does nothing if there is no such row.
    pub fn open_row_route(&self, id: AlarmId, route: RowRoute) {
        if self.index_of(id).is_none() {
            trace!(%id, "route ignored, no such alarm");
            return;
        }
        self.0.route.set_dedup(Some(ListRoute::Items { id, route }));
    }

    fn index_of(&self, id: AlarmId) -> Option<usize> {
        self.0.rows.with(|rows| rows.iter().position(|row| row.id() == id))
    }

    fn route_targets(&self, id: AlarmId) -> bool {
        self.0
            .route
            .with(|route| route.as_ref().and_then(ListRoute::row_id) == Some(id))
    }

    fn insert_row(&self, item: AlarmItem) {
        let id = item.id;
        if self.index_of(id).is_some() {
            debug!(%id, "duplicate alarm id ignored");
            return;
        }
        let row = AlarmRow::new(item);
        self.bind_row(&row);
        self.0.rows.update(|rows| rows.push(row));
        debug!(%id, "alarm added");
    }

    fn bind_row(&self, row: &AlarmRow) {
        let id = row.id();
        let weak = self.downgrade();
        row.set_on_delete(move || {
            if let Some(this) = Self::upgrade(&weak) {
                this.delete(id);
            }
        });
        let weak = self.downgrade();
        row.set_on_toggle(move || {
            if let Some(this) = Self::upgrade(&weak) {
                this.toggle(id);
            }
        });
        let weak = self.downgrade();
        let binding = row.route().subscribe(move |route| {
            if let Some(this) = Self::upgrade(&weak) {
                this.project_from_row(id, route.as_ref());
            }
        });
        self.0.row_bindings.borrow_mut().insert(id, binding);
    }

    fn project_from_row(&self, id: AlarmId, route: Option<&RowRoute>) {
        match route {
            Some(route) => {
                let route = ListRoute::Items {
                    id,
                    route: route.clone(),
                };
                if self.0.route.set_dedup(Some(route)) {
                    trace!(%id, "row route relayed to list");
                }
            }
            None => {
                if self.route_targets(id) && self.0.route.set_dedup(None) {
                    trace!(%id, "row route cleared on list");
                }
            }
        }
    }

    fn project_to_rows(&self, route: &Option<ListRoute>) {
        for row in self.rows() {
            let derived = match route {
                Some(ListRoute::Items { id, route }) if *id == row.id() => Some(route.clone()),
                _ => None,
            };
            if row.route().set_dedup(derived) {
                trace!(id = %row.id(), "list route projected onto row");
            }
        }
    }
}
impl std::fmt::Debug for AlarmsList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmsList")
            .field("rows", &self.0.rows)
            .field("route", &self.0.route)
            .finish()
    }
}
