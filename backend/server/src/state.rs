use std::sync::Arc;

use anyhow::Error;
use book::{Book, CoverRule, Document, PageSequence, load_document};
use tracing::info;

use super::{config::Config, constants::ClientConfig};

pub struct State {
    pub config: Config,
    pub client_config: ClientConfig,
    pub cover_rule: CoverRule,
    /// Entry document with parity already fixed, opened fresh for every page request.
    pub document: Document,
    pub sequence: PageSequence,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, Error> {
        let path = config.entry_path();
        info!("Loading entry document from {}", path.display());

        let book = Book::open(load_document(&path)?, config.cover_rule)?;
        let sequence = book.sequence().clone();
        let document = book.into_surface();

        Ok(Arc::new(Self {
            client_config: ClientConfig::from_config(&config),
            cover_rule: config.cover_rule,
            config,
            document,
            sequence,
        }))
    }
}
