//! # Page Sequence
//!
//! Ordered list of pages plus the registry of where each named page sits.
//!
//! ## Invariants
//! - Every [`PageName`] appears exactly once.
//! - The registry is recomputed after every insertion or removal, so positions never go stale.
//! - Only unnamed pages (content or blank) can be inserted or removed.
//!
//! ## Parity
//! The page-flip renderer pairs pages into spreads. The back cover only renders as a standalone
//! cover when it sits on an odd position, so every structural change is followed by
//! [`PageSequence::offset_last_page`].
use serde::Serialize;
use tracing::debug;

use crate::{
    error::BookError,
    page::{Page, PageName},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSequence {
    pages: Vec<Page>,
    index: [Option<usize>; PageName::COUNT],
}

/// A page inserted at, or removed from, a position. Returned by the parity corrector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "position", rename_all = "lowercase")]
pub enum ParityFix {
    Inserted(usize),
    Removed(usize),
}

impl PageSequence {
    pub fn new(pages: Vec<Page>) -> Result<Self, BookError> {
        let mut index = [None; PageName::COUNT];

        for (position, page) in pages.iter().enumerate() {
            let Some(name) = page.name() else {
                continue;
            };

            if let Some(first) = index[name.slot()] {
                return Err(BookError::DuplicatePage {
                    page: name,
                    first,
                    second: position,
                });
            }

            index[name.slot()] = Some(position);
        }

        let sequence = Self { pages, index };
        for name in PageName::ALL {
            sequence.locate(name)?;
        }

        Ok(sequence)
    }

    pub fn locate(&self, name: PageName) -> Result<usize, BookError> {
        self.index[name.slot()].ok_or(BookError::PageNotFound(name))
    }

    /// Named pages with their positions, in reading order of the names.
    pub fn named(&self) -> impl Iterator<Item = (PageName, usize)> + '_ {
        PageName::ALL
            .into_iter()
            .filter_map(|name| self.index[name.slot()].map(|position| (name, position)))
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn get(&self, position: usize) -> Option<Page> {
        self.pages.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn insert(&mut self, at: usize, page: Page) -> Result<(), BookError> {
        if let Page::Named(name) = page {
            return Err(BookError::NamedPageMutation(name));
        }
        if at > self.pages.len() {
            return Err(BookError::PositionOutOfRange {
                position: at,
                len: self.pages.len(),
            });
        }

        self.pages.insert(at, page);
        self.reindex();

        Ok(())
    }

    pub fn remove(&mut self, at: usize) -> Result<Page, BookError> {
        match self.pages.get(at) {
            None => Err(BookError::PositionOutOfRange {
                position: at,
                len: self.pages.len(),
            }),
            Some(Page::Named(name)) => Err(BookError::NamedPageMutation(*name)),
            Some(_) => {
                let page = self.pages.remove(at);
                self.reindex();

                Ok(page)
            }
        }
    }

    /// Moves the back cover onto an odd position by dropping or adding one blank page in front of it.
    ///
    /// Returns `None` when the back cover already sits on an odd position, which makes a second
    /// call right after a first one a no-op.
    pub fn offset_last_page(&mut self) -> Result<Option<ParityFix>, BookError> {
        let back = self.locate(PageName::Back)?;
        if back % 2 == 1 {
            return Ok(None);
        }

        let fix = match back.checked_sub(1) {
            Some(before) if self.pages[before].is_blank() => {
                self.remove(before)?;
                ParityFix::Removed(before)
            }
            _ => {
                self.insert(back, Page::Blank)?;
                ParityFix::Inserted(back)
            }
        };

        debug!("Back cover was at {back}, applied {fix:?}");

        Ok(Some(fix))
    }

    fn reindex(&mut self) {
        self.index = [None; PageName::COUNT];

        for (position, page) in self.pages.iter().enumerate() {
            if let Some(name) = page.name() {
                self.index[name.slot()] = Some(position);
            }
        }
    }
}
