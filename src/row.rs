use std::{cell::RefCell, rc::Rc};

use derive_ex::derive_ex;
use serde::Serialize;

use crate::{AlarmId, AlarmItem, Store};


/// The affordance currently open for a single row.
#[derive(Clone, Debug, Serialize)]
pub enum RowRoute {
    DeleteAlert,
    ToggleConfirmationDialog,
    /// Editing a draft copy of the row's item.
    Edit(AlarmItem),
}

impl PartialEq for RowRoute {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DeleteAlert, Self::DeleteAlert) => true,
            (Self::ToggleConfirmationDialog, Self::ToggleConfirmationDialog) => true,
            (Self::Edit(lhs), Self::Edit(rhs)) => lhs.same_value(rhs),
            (Self::DeleteAlert | Self::ToggleConfirmationDialog | Self::Edit(_), _) => false,
        }
    }
}
impl Eq for RowRoute {}

/// Value snapshot of a row.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct RowState {
    pub item: AlarmItem,
    pub route: Option<RowRoute>,
}

type Callback = Rc<dyn Fn()>;

/// Controller of a single alarm row.
///
/// Cloning yields another handle to the same row.
#[derive_ex(Clone)]
pub struct AlarmRow(Rc<RowNode>);

struct RowNode {
    item: Store<AlarmItem>,
    route: Store<Option<RowRoute>>,
    on_delete: RefCell<Callback>,
    on_toggle: RefCell<Callback>,
}

impl AlarmRow {
    pub fn new(item: AlarmItem) -> Self {
        Self(Rc::new(RowNode {
            item: Store::new(item),
            route: Store::new(None),
            on_delete: RefCell::new(Rc::new(|| {})),
            on_toggle: RefCell::new(Rc::new(|| {})),
        }))
    }

    pub fn id(&self) -> AlarmId {
        self.0.item.borrow().id
    }
    pub fn item(&self) -> &Store<AlarmItem> {
        &self.0.item
    }
    pub fn route(&self) -> &Store<Option<RowRoute>> {
        &self.0.route
    }
    pub fn snapshot(&self) -> RowState {
        RowState {
            item: self.0.item.get(),
            route: self.0.route.get(),
        }
    }

    pub fn set_on_delete(&self, f: impl Fn() + 'static) {
        *self.0.on_delete.borrow_mut() = Rc::new(f);
    }
    pub fn set_on_toggle(&self, f: impl Fn() + 'static) {
        *self.0.on_toggle.borrow_mut() = Rc::new(f);
    }

    pub fn delete_button_tapped(&self) {
        self.0.route.set_dedup(Some(RowRoute::DeleteAlert));
    }

    pub fn delete_confirmation_button_tapped(&self) {
        let on_delete = self.0.on_delete.borrow().clone();
        on_delete();
        self.0.route.set_dedup(None);
    }

    pub fn cancel_button_tapped(&self) {
        self.0.route.set_dedup(None);
    }

    pub fn toggle_button_tapped(&self) {
        self.0.route.set_dedup(Some(RowRoute::ToggleConfirmationDialog));
    }

    pub fn toggle_confirmation_button_tapped(&self) {
        let on_toggle = self.0.on_toggle.borrow().clone();
        on_toggle();
        self.0.route.set_dedup(None);
    }

    /// Opens the edit screen with a copy of the current item, or closes it.
    pub fn set_edit_navigation(&self, is_active: bool) {
        let route = is_active.then(|| RowRoute::Edit(self.0.item.get()));
        self.0.route.set_dedup(route);
    }

    /// Mutates the draft of the open edit screen. Does nothing if no edit screen is open.
    pub fn update_draft(&self, f: impl FnOnce(&mut AlarmItem)) {
        self.0.route.update_dedup(|route| {
            if let Some(RowRoute::Edit(draft)) = route {
                let id = draft.id;
                f(draft);
                draft.id = id;
            }
        });
    }

    /// Replaces the item and closes any open affordance.
    pub fn edit(&self, item: AlarmItem) {
        let id = self.id();
        self.0.item.set(AlarmItem { id, ..item });
        self.0.route.set_dedup(None);
    }

    /// Commits the draft of the open edit screen.
    pub fn save_draft(&self) {
        let draft = match &*self.0.route.borrow() {
            Some(RowRoute::Edit(draft)) => draft.clone(),
            _ => return,
        };
        self.edit(draft);
    }
}
impl std::fmt::Debug for AlarmRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmRow")
            .field("item", &self.0.item)
            .field("route", &self.0.route)
            .finish()
    }
}
