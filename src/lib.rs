//! State and route binding for an alarm list screen.
//!
//! - [`Store`] is an observable cell; views subscribe to it and re-render on notification.
//! - [`AlarmRow`] and [`AlarmsList`] are the row and list controllers. The list keeps its route and
//!   the route of every row in sync, so at most one affordance is open across the whole list.
//! - [`DeepLink`] turns external links into tab selections and routes, ignoring anything malformed.

mod alarm;
mod config;
mod deep_link;
mod list;
mod row;
mod store;
mod subscription;
mod tab;

#[cfg(test)]
mod test_helpers;

pub use alarm::*;
pub use config::*;
pub use deep_link::*;
pub use list::*;
pub use row::*;
pub use store::*;
pub use subscription::*;
pub use tab::*;
