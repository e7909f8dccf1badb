//! # Ribbons
//!
//! Navigation tabs on the left and right edges of the open book.
//!
//! A named page behind the current spread gets a left ribbon, a named page ahead of it gets a
//! right ribbon, and the two pages currently on display get none.
use std::fmt;

use serde::Serialize;

use crate::{page::PageName, sequence::PageSequence};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Left,
    Right,
}

impl Visibility {
    pub fn shows(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Visibility::Left, Side::Left) | (Visibility::Right, Side::Right)
        )
    }
}

/// How the closed book (position 0) treats the page right after the front cover.
///
/// [`CoverRule::FacingHidden`] handles position 0 like any other spread, so page 1 gets no
/// ribbon. [`CoverRule::FacingShown`] drops the one page lookahead while the book is closed and
/// gives page 1 a right ribbon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoverRule {
    #[default]
    FacingHidden,
    FacingShown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ribbons {
    pub position: usize,
    entries: [(PageName, Visibility); PageName::COUNT],
}

impl Ribbons {
    pub fn compute(position: usize, sequence: &PageSequence, rule: CoverRule) -> Self {
        let mut entries = PageName::ALL.map(|name| (name, Visibility::Hidden));

        for (name, page_position) in sequence.named() {
            entries[name.slot()].1 = visibility(position, page_position, rule);
        }

        Self { position, entries }
    }

    pub fn get(&self, name: PageName) -> Visibility {
        self.entries[name.slot()].1
    }

    pub fn entries(&self) -> &[(PageName, Visibility)] {
        &self.entries
    }

    pub fn left(&self) -> Vec<PageName> {
        self.on(Side::Left)
    }

    pub fn right(&self) -> Vec<PageName> {
        self.on(Side::Right)
    }

    pub fn on(&self, side: Side) -> Vec<PageName> {
        self.entries
            .iter()
            .filter(|(_, visibility)| visibility.shows(side))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Where the ribbon of a page at `page` goes while `current` is the left-hand page on display.
pub fn visibility(current: usize, page: usize, rule: CoverRule) -> Visibility {
    let lookahead = match rule {
        CoverRule::FacingShown if current == 0 => 0,
        _ => 1,
    };

    if page < current {
        Visibility::Left
    } else if page > current + lookahead {
        Visibility::Right
    } else {
        Visibility::Hidden
    }
}
