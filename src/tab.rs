use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AlarmEnv, AlarmsList, AppConfig, DeepLink, Store, Subscription};


#[derive(Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Clock,
    #[default]
    Alarms,
    Crono,
}

/// Root of the screen state: the selected tab and the alarm list it hosts.
#[derive(Clone, Debug)]
pub struct TabBar {
    selected_tab: Store<Tab>,
    alarms: AlarmsList,
}

impl TabBar {
    pub fn new(selected_tab: Tab, alarms: AlarmsList) -> Self {
        Self {
            selected_tab: Store::new(selected_tab),
            alarms,
        }
    }

    pub fn from_config(config: &AppConfig, env: AlarmEnv) -> Self {
        let items: Vec<_> = config.alarms.iter().map(|seed| seed.to_item(&env)).collect();
        Self::new(config.selected_tab, AlarmsList::new(items, env))
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab.get()
    }
    pub fn select(&self, tab: Tab) {
        self.selected_tab.set_dedup(tab);
    }
    pub fn subscribe_selected_tab(&self, f: impl Fn(Tab) + 'static) -> Subscription {
        self.selected_tab.subscribe(move |&tab| f(tab))
    }

    pub fn alarms(&self) -> &AlarmsList {
        &self.alarms
    }

    /// Handles an incoming deep link.
    ///
    /// Links that cannot be parsed are ignored.
    pub fn open_url(&self, url: &str) {
        match DeepLink::parse(url) {
            Ok(link) => link.apply(self),
            Err(e) => debug!(url, error = %e, "deep link ignored"),
        }
    }
}
