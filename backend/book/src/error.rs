use thiserror::Error;

use crate::{page::PageName, ribbon::Side};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookError {
    #[error("No page tagged as {0}")]
    PageNotFound(PageName),

    #[error("Page {page} is tagged at both {first} and {second}")]
    DuplicatePage {
        page: PageName,
        first: usize,
        second: usize,
    },

    #[error("Missing {side} ribbon for {page}")]
    RibbonNotFound { side: Side, page: PageName },

    #[error("Position {position} is outside a book of {len} pages")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Named page {0} cannot be added or removed")]
    NamedPageMutation(PageName),

    #[error("Unknown page name: {0}")]
    UnknownPageName(String),

    #[error("Unbalanced markup: {0}")]
    UnbalancedMarkup(String),
}
