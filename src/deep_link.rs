use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use parse_display::{Display, FromStr};
use percent_encoding::percent_decode_str;
use tracing::trace;
use url::Url;

use crate::{AlarmId, AlarmItem, RowRoute, Tab, TabBar};


/// Format of the `date` query parameter, e.g. `2015-01-01T00:00:00.000+01:00`.
///
/// A trailing `Z` is accepted in place of `+00:00`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

const DATE_LEN: usize = "0000-00-00T00:00:00.000+00:00".len();

const BASE_URL: &str = "deeplink:///";

/// A navigation request parsed from an external link.
///
/// Only the path and the query of the link are significant.
/// Segment counts below include the root segment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DeepLink {
    /// `/<tab>`
    Tab(Tab),
    /// `/<tab>/add?isOn=<bool>&date=<date>`
    Add {
        tab: Tab,
        is_on: bool,
        date: Option<DateTime<FixedOffset>>,
    },
    /// `/<tab>/<id>/<action>`
    ///
    /// `id` is `None` if the segment is not a valid alarm id.
    Row {
        tab: Tab,
        id: Option<AlarmId>,
        action: RowAction,
    },
}

#[derive(Display, FromStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[display(style = "lowercase")]
pub enum RowAction {
    Delete,
    Toggle,
}

impl RowAction {
    pub fn route(self) -> RowRoute {
        match self {
            Self::Delete => RowRoute::DeleteAlert,
            Self::Toggle => RowRoute::ToggleConfirmationDialog,
        }
    }
}

#[non_exhaustive]
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    #[display("invalid url: {0}")]
    InvalidUrl(url::ParseError),
    #[display("expected 2, 3 or 4 path segments, found {0}")]
    SegmentCount(usize),
    #[display("unknown tab `{0}`")]
    UnknownTab(String),
    #[display("unknown action `{0}`")]
    UnknownAction(String),
    #[display("unknown path `{0}`")]
    UnknownPath(String),
}

impl std::error::Error for DeepLinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUrl(e) => Some(e),
            _ => None,
        }
    }
}

impl DeepLink {
    pub fn parse(s: &str) -> Result<Self, DeepLinkError> {
        let url = parse_url(s)?;
        let segments = path_segments(&url).ok_or_else(|| DeepLinkError::UnknownPath(s.into()))?;
        let tab_of = |segment: &str| {
            segment
                .parse::<Tab>()
                .map_err(|_| DeepLinkError::UnknownTab(segment.into()))
        };
        match segments.as_slice() {
            [tab] => Ok(Self::Tab(tab_of(tab.as_str())?)),
            [tab, add] => {
                let tab = tab_of(tab.as_str())?;
                if add.as_str() != "add" {
                    return Err(DeepLinkError::UnknownPath(url.path().into()));
                }
                let query = Query::new(&url);
                Ok(Self::Add {
                    tab,
                    is_on: query
                        .get("isOn")
                        .is_some_and(|v| v.eq_ignore_ascii_case("true")),
                    date: query.get("date").and_then(|v| parse_date(&v)),
                })
            }
            [tab, id, action] => {
                let tab = tab_of(tab.as_str())?;
                let action = action
                    .parse::<RowAction>()
                    .map_err(|_| DeepLinkError::UnknownAction(action.to_string()))?;
                Ok(Self::Row {
                    tab,
                    id: id.parse::<AlarmId>().ok(),
                    action,
                })
            }
            _ => Err(DeepLinkError::SegmentCount(segments.len() + 1)),
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            Self::Tab(tab) | Self::Add { tab, .. } | Self::Row { tab, .. } => *tab,
        }
    }

    /// Selects the tab of this link and opens the requested route.
    ///
    /// Routes only exist on the alarms tab; on other tabs only the selection changes.
    /// A row link naming an alarm that does not exist only selects the tab.
    pub fn apply(self, tab_bar: &TabBar) {
        let tab = self.tab();
        tab_bar.select(tab);
        if tab != Tab::Alarms {
            if !matches!(self, Self::Tab(_)) {
                trace!(%tab, "no route on this tab");
            }
            return;
        }
        let alarms = tab_bar.alarms();
        match self {
            Self::Tab(_) => {}
            Self::Add { is_on, date, .. } => {
                let env = alarms.env();
                let date = date.unwrap_or_else(|| env.now());
                alarms.present_add(AlarmItem::new(env.new_id(), date, is_on));
            }
            Self::Row {
                id: Some(id),
                action,
                ..
            } => alarms.open_row_route(id, action.route()),
            Self::Row { id: None, .. } => trace!("row link without a valid alarm id"),
        }
    }
}
impl std::str::FromStr for DeepLink {
    type Err = DeepLinkError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses a `date` query value. Returns `None` when the value does not match [`DATE_FORMAT`].
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = match s.strip_suffix('Z') {
        Some(local) => Cow::Owned(format!("{local}+00:00")),
        None => Cow::Borrowed(s),
    };
    if s.len() != DATE_LEN {
        return None;
    }
    let date = DateTime::parse_from_str(&s, DATE_FORMAT).ok()?;
    // `%:z` also accepts separators other than `:`.
    (date.format(DATE_FORMAT).to_string() == *s).then_some(date)
}

fn parse_url(s: &str) -> Result<Url, DeepLinkError> {
    match Url::parse(s) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(BASE_URL)
            .and_then(|base| base.join(s))
            .map_err(DeepLinkError::InvalidUrl),
        Err(e) => Err(DeepLinkError::InvalidUrl(e)),
    }
}

fn path_segments(url: &Url) -> Option<Vec<String>> {
    let segments = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(|s| decode(s).into_owned())
        .collect();
    Some(segments)
}

fn decode(s: &str) -> Cow<'_, str> {
    percent_decode_str(s).decode_utf8_lossy()
}

/// Query parameters, decoded without treating `+` as a space.
struct Query<'a>(Vec<(Cow<'a, str>, Cow<'a, str>)>);

impl<'a> Query<'a> {
    fn new(url: &'a Url) -> Self {
        let pairs = url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self(pairs)
    }

    /// Returns the value of the first parameter named `key`.
    fn get(&self, key: &str) -> Option<Cow<'a, str>> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}
