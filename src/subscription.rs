use std::{
    mem::take,
    rc::{Rc, Weak},
};

#[cfg(test)]
mod tests;

/// Handle that keeps an observer registered.
///
/// Dropping the handle unregisters the observer.
#[derive(Default)]
#[must_use]
pub struct Subscription(RawSubscription);

impl Subscription {
    pub fn empty() -> Self {
        Subscription(RawSubscription::Empty)
    }
    pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
        Subscription(RawSubscription::Fn(Box::new(f)))
    }
    pub(crate) fn from_weak_fn<T: 'static>(
        this: Weak<T>,
        unsubscribe: impl FnOnce(Rc<T>) + 'static,
    ) -> Self {
        Subscription(RawSubscription::Fn(Box::new(move || {
            if let Some(this) = this.upgrade() {
                unsubscribe(this)
            }
        })))
    }

    /// Combines several subscriptions into one that releases all of them on drop.
    pub fn from_many(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let subscriptions: Vec<_> = subscriptions.into_iter().collect();
        Subscription(RawSubscription::Many(subscriptions))
    }

    /// Keeps the observer registered for as long as its source lives.
    pub fn detach(mut self) {
        if let RawSubscription::Many(subscriptions) = take(&mut self.0) {
            for s in subscriptions {
                s.detach();
            }
        }
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        match take(&mut self.0) {
            RawSubscription::Empty => {}
            RawSubscription::Fn(f) => f(),
            RawSubscription::Many(subscriptions) => drop(subscriptions),
        }
    }
}
impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.0 {
            RawSubscription::Empty => "empty",
            RawSubscription::Fn(_) => "fn",
            RawSubscription::Many(_) => "many",
        };
        f.debug_tuple("Subscription").field(&kind).finish()
    }
}

#[derive(Default)]
enum RawSubscription {
    #[default]
    Empty,
    Fn(Box<dyn FnOnce() + 'static>),
    Many(Vec<Subscription>),
}
