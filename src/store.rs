use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use derive_ex::derive_ex;
use serde::{Serialize, Serializer};
use slabmap::SlabMap;

use crate::Subscription;


type Observer<T> = Rc<dyn Fn(&T)>;

/// Similar to `Rc<RefCell<T>>`, but with added functionality to observe changes.
///
/// Observers are called synchronously after each change with a snapshot of the new value,
/// so an observer may write to this store or any other store while it runs.
#[derive(Default)]
#[derive_ex(Clone, bound())]
pub struct Store<T: 'static>(Rc<StoreNode<T>>);

impl<T: Clone + 'static> Store<T> {
    /// Create a new `Store` with the given initial value.
    pub fn new(value: T) -> Self {
        Self(Rc::new(StoreNode {
            value: RefCell::new(value),
            observers: RefCell::new(SlabMap::new()),
        }))
    }

    /// Gets a clone of the current value.
    pub fn get(&self) -> T {
        self.0.value.borrow().clone()
    }

    /// Borrows the current value.
    ///
    /// Writing to this store while the returned reference is alive panics.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.value.borrow()
    }

    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.0.value.borrow())
    }

    /// Sets the value and notifies the observers.
    pub fn set(&self, value: T) {
        *self.0.value.borrow_mut() = value;
        self.0.notify();
    }

    /// Sets the value and notifies the observers only if the current value is different from the specified value.
    ///
    /// Returns `true` if the value has changed.
    pub fn set_dedup(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut this_value = self.0.value.borrow_mut();
            if *this_value == value {
                return false;
            }
            *this_value = value;
        }
        self.0.notify();
        true
    }

    /// Mutates the value in place and notifies the observers.
    pub fn update<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        let ret = f(&mut self.0.value.borrow_mut());
        self.0.notify();
        ret
    }

    /// Mutates the value in place and notifies the observers only if the value has changed.
    pub fn update_dedup<U>(&self, f: impl FnOnce(&mut T) -> U) -> U
    where
        T: PartialEq,
    {
        let (ret, is_dirty) = {
            let mut value = self.0.value.borrow_mut();
            let old = value.clone();
            let ret = f(&mut value);
            (ret, *value != old)
        };
        if is_dirty {
            self.0.notify();
        }
        ret
    }

    /// Registers an observer called after every notification.
    ///
    /// The observer is not called with the current value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let key = self.0.observers.borrow_mut().insert(Rc::new(f));
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |node| {
            let observer = node.observers.borrow_mut().remove(key);
            drop(observer);
        })
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.0.observers.borrow().len()
    }

    /// Returns `true` if both stores share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.value.try_borrow() {
            Ok(value) => std::fmt::Debug::fmt(&*value, f),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}
impl<T: Serialize> Serialize for Store<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.value.try_borrow() {
            Ok(value) => T::serialize(&*value, serializer),
            Err(_) => Err(serde::ser::Error::custom("borrowed")),
        }
    }
}

#[derive(Default)]
struct StoreNode<T: 'static> {
    value: RefCell<T>,
    observers: RefCell<SlabMap<Observer<T>>>,
}
impl<T: Clone + 'static> StoreNode<T> {
    fn notify(&self) {
        let observers: Vec<Observer<T>> = self.observers.borrow().values().cloned().collect();
        if observers.is_empty() {
            return;
        }
        let snapshot = self.value.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }
}
