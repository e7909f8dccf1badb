use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// Sections of the book, in reading order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageName {
    Front,
    Map,
    Album,
    Stats,
    Back,
}

impl PageName {
    pub const COUNT: usize = 5;

    pub const ALL: [PageName; Self::COUNT] = [
        PageName::Front,
        PageName::Map,
        PageName::Album,
        PageName::Stats,
        PageName::Back,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageName::Front => "front",
            PageName::Map => "map",
            PageName::Album => "album",
            PageName::Stats => "stats",
            PageName::Back => "back",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageName {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| BookError::UnknownPageName(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Page {
    Named(PageName),
    Content,
    /// Filler with no content, only there to keep the back cover on an odd position.
    Blank,
}

impl Page {
    pub fn name(&self) -> Option<PageName> {
        match self {
            Page::Named(name) => Some(*name),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Page::Blank)
    }
}

impl From<PageName> for Page {
    fn from(name: PageName) -> Self {
        Page::Named(name)
    }
}
