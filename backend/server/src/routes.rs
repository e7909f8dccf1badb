use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State as AxumState},
    http::Uri,
    response::{Html, IntoResponse},
};
use book::{Book, Page, PageName, Ribbons};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    client::{ClientRoute, is_navigational},
    error::AppError,
    state::State,
};

#[derive(Serialize)]
pub struct BookLayout {
    pub pages: Vec<Page>,
    pub named: BTreeMap<PageName, usize>,
}

#[derive(Deserialize)]
pub struct RibbonQuery {
    position: Option<String>,
}

#[derive(Serialize)]
pub struct RibbonLayout {
    pub position: usize,
    pub left: Vec<PageName>,
    pub right: Vec<PageName>,
}

pub async fn config_handler(AxumState(state): AxumState<Arc<State>>) -> impl IntoResponse {
    Json(&state.client_config).into_response()
}

pub async fn book_handler(AxumState(state): AxumState<Arc<State>>) -> Json<BookLayout> {
    Json(BookLayout {
        pages: state.sequence.pages().to_vec(),
        named: state.sequence.named().collect(),
    })
}

pub async fn ribbons_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(query): Query<RibbonQuery>,
) -> Result<Json<RibbonLayout>, AppError> {
    let position = match query.position {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| AppError::InvalidPosition(raw.clone()))?,
        None => 0,
    };

    if position >= state.sequence.len() {
        return Err(AppError::InvalidPosition(format!(
            "{position} is past the last page ({})",
            state.sequence.len() - 1
        )));
    }

    let ribbons = Ribbons::compute(position, &state.sequence, state.cover_rule);

    Ok(Json(RibbonLayout {
        position,
        left: ribbons.left(),
        right: ribbons.right(),
    }))
}

pub async fn api_not_found_handler() -> AppError {
    AppError::NotFound
}

/// Entry document for every client navigation, opened on the page the path points at.
pub async fn page_handler(
    AxumState(state): AxumState<Arc<State>>,
    uri: Uri,
) -> Result<Html<String>, AppError> {
    let path = uri.path();
    if !is_navigational(path) {
        debug!("No asset at {path}");
        return Err(AppError::NotFound);
    }

    let route = ClientRoute::resolve(path);
    debug!("Serving {path} as {route:?}");

    let mut book = Book::open(state.document.clone(), state.cover_rule)?;
    route.open(&mut book)?;

    Ok(Html(book.into_surface().render()))
}
