//! # Book
//!
//! Page bookkeeping for the travel book flip-book.
//!
//! ## Pages
//! - Front cover, map, album, statistics and back cover are the named pages.
//! - Content pages sit between them, blank pages only exist to keep the back cover on an odd position.
//!
//! ## Ribbons
//! - Every named page has a ribbon on each edge of the book.
//! - Only ribbons of pages behind (left) or ahead of (right) the open spread are shown.
//!
//! ## Surfaces
//! A [`Book`] drives anything implementing [`Surface`]. The server uses [`Document`], which edits
//! the entry HTML document directly.
use std::{fs, path::Path};

use anyhow::{Context, Error};

pub mod book;
pub mod error;
pub mod markup;
pub mod page;
pub mod ribbon;
pub mod sequence;
pub mod surface;
pub mod zoom;

pub use book::{Book, PageTurn};
pub use error::BookError;
pub use markup::Document;
pub use page::{Page, PageName};
pub use ribbon::{CoverRule, Ribbons, Side, Visibility};
pub use sequence::{PageSequence, ParityFix};
pub use surface::Surface;
pub use zoom::{Rect, WheelEvent, Zoom, ZoomTransform};

pub fn load_document(path: impl AsRef<Path>) -> Result<Document, Error> {
    let path = path.as_ref();
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    Document::parse(&source).with_context(|| format!("Invalid book markup in {}", path.display()))
}

pub fn write_document(path: impl AsRef<Path>, document: &Document) -> Result<(), Error> {
    let path = path.as_ref();

    fs::write(path, document.render()).with_context(|| format!("Failed to write {}", path.display()))
}
