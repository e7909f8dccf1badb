//! # Client Routes
//!
//! Paths the client shell navigates to. Every one of them is served the entry document, opened
//! on the matching page so a reload lands where the reader left off.
//!
//! | Path | Opens at |
//! |---|---|
//! | `/` | front cover |
//! | `/index` | first spread after the cover |
//! | `/map` | map |
//! | `/albums` | album |
//! | `/statistics` | statistics |
//! | anything else | front cover |
use book::{Book, BookError, PageName, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientRoute {
    Cover,
    Index,
    Map,
    Albums,
    Statistics,
}

impl ClientRoute {
    /// Unknown paths fall back to the cover, like the shell's catch-all redirect.
    pub fn resolve(path: &str) -> Self {
        match path.trim_matches('/') {
            "index" => ClientRoute::Index,
            "map" => ClientRoute::Map,
            "albums" => ClientRoute::Albums,
            "statistics" => ClientRoute::Statistics,
            _ => ClientRoute::Cover,
        }
    }

    pub fn open<S: Surface>(self, book: &mut Book<S>) -> Result<(), BookError> {
        match self {
            ClientRoute::Cover => book.go_to(PageName::Front),
            ClientRoute::Index => {
                let front = book.sequence().locate(PageName::Front)?;
                book.flip_to(front + 1)
            }
            ClientRoute::Map => book.go_to(PageName::Map),
            ClientRoute::Albums => book.go_to(PageName::Album),
            ClientRoute::Statistics => book.go_to(PageName::Stats),
        }
    }
}

/// Whether `path` is a client navigation rather than a request for an asset or the API.
pub fn is_navigational(path: &str) -> bool {
    if path == "/api" || path.starts_with("/api/") {
        return false;
    }

    let last = path.rsplit('/').next().unwrap_or_default();
    !last.contains('.') || last == "index.html"
}
