//! # Markup Surface
//!
//! [`Document`] drives the entry HTML document of the client bundle.
//!
//! ## Conventions
//! - A page is a `div` whose class list contains `page`.
//! - `data-page="map"` tags a named page, class `blank` marks a filler page, anything else is content.
//! - Ribbons are elements with a `ribbon-<name>` class inside `#left-ribbons` and `#right-ribbons`.
//! - The start page is written as `data-start-page` on `#book`, where the page-flip script picks it up.
//!
//! ## Implementation
//! - The source is split into text and page segments once. Page extents are found by balancing
//!   `div` tags, so nested markup inside a page is carried over untouched.
//! - Ribbons and the start page are applied on [`Document::render`], only rewriting the affected start tags.
//! - Tags inside comments and `script` or `style` bodies are not markup and are never matched.
use std::{collections::HashMap, ops::Range, sync::LazyLock};

use regex::{Captures, Regex};
use tracing::debug;

use crate::{
    error::BookError,
    page::{Page, PageName},
    ribbon::Side,
    surface::Surface,
};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)\b[^>]*>").unwrap());

static OPAQUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
});

static START_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<([a-zA-Z][a-zA-Z0-9-]*)(.*?)(/?)>$").unwrap());

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

const BOOK_ID: &str = "book";
const START_PAGE: &str = "data-start-page";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Text(String),
    Page { page: Page, markup: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
    ribbons: HashMap<(Side, PageName), bool>,
    start_page: Option<usize>,
}

struct OpenPage {
    start: usize,
    depth: usize,
    page: Page,
}

impl Document {
    pub fn parse(source: &str) -> Result<Self, BookError> {
        let mut spans = Vec::new();
        let mut open: Option<OpenPage> = None;

        for tag in tags(source) {
            if &tag[2] != "div" {
                continue;
            }
            let whole = &tag[0];
            let closing = !tag[1].is_empty();

            match open.take() {
                Some(mut current) => {
                    if closing {
                        current.depth -= 1;
                    } else if !whole.ends_with("/>") {
                        current.depth += 1;
                    }

                    if current.depth == 0 {
                        spans.push((current.start, end_of(&tag), current.page));
                    } else {
                        open = Some(current);
                    }
                }
                None if !closing => {
                    open = classify(whole)?.map(|page| OpenPage {
                        start: start_of(&tag),
                        depth: 1,
                        page,
                    });
                }
                None => {}
            }
        }

        if let Some(current) = open {
            return Err(BookError::UnbalancedMarkup(format!(
                "page starting at byte {} is never closed",
                current.start
            )));
        }

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut cursor = 0;
        for (start, end, page) in spans {
            if start > cursor {
                segments.push(Segment::Text(source[cursor..start].to_string()));
            }
            segments.push(Segment::Page {
                page,
                markup: source[start..end].to_string(),
            });
            cursor = end;
        }
        if cursor < source.len() {
            segments.push(Segment::Text(source[cursor..].to_string()));
        }

        let mut ribbons = HashMap::new();
        for side in Side::BOTH {
            let Some((start, end)) = container(source, side) else {
                debug!("No {side} ribbon container in document");
                continue;
            };

            for tag in tags(&source[start..end]) {
                if let Some(name) = ribbon_name(&tag) {
                    ribbons.insert((side, name), attribute(&tag[0], "hidden").is_some());
                }
            }
        }

        Ok(Self {
            segments,
            ribbons,
            start_page: None,
        })
    }

    pub fn start_page(&self) -> Option<usize> {
        self.start_page
    }

    pub fn ribbon_hidden(&self, side: Side, page: PageName) -> Option<bool> {
        self.ribbons.get(&(side, page)).copied()
    }

    pub fn render(&self) -> String {
        let mut html: String = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.as_str(),
                Segment::Page { markup, .. } => markup.as_str(),
            })
            .collect();

        for side in Side::BOTH {
            let Some((start, end)) = container(&html, side) else {
                continue;
            };

            let section = &html[start..end];
            let opaque = opaque_spans(section);
            let rewritten = TAG
                .replace_all(section, |tag: &Captures| {
                    if inside(&opaque, start_of(tag)) {
                        return tag[0].to_string();
                    }
                    match ribbon_name(tag).and_then(|name| self.ribbons.get(&(side, name))) {
                        Some(&hidden) => with_attribute(&tag[0], "hidden", hidden.then_some("")),
                        None => tag[0].to_string(),
                    }
                })
                .into_owned();

            html.replace_range(start..end, &rewritten);
        }

        if let Some(position) = self.start_page {
            if let Some((start, end)) = find_start_tag(&html, |tag| attribute(tag, "id") == Some(BOOK_ID)) {
                let tag = with_attribute(&html[start..end], START_PAGE, Some(&position.to_string()));
                html.replace_range(start..end, &tag);
            }
        }

        html
    }

    fn page_segment(&self, at: usize) -> Option<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| matches!(segment, Segment::Page { .. }))
            .nth(at)
            .map(|(index, _)| index)
    }

    /// Whitespace in front of the page segment at `index`, used to indent new pages alike.
    fn indent_before(&self, index: usize) -> String {
        match index.checked_sub(1).map(|before| &self.segments[before]) {
            Some(Segment::Text(text)) => {
                let trimmed = text.trim_end_matches([' ', '\t']);
                match trimmed.strip_suffix('\n') {
                    Some(_) => text[trimmed.len() - 1..].to_string(),
                    None => "\n".to_string(),
                }
            }
            _ => "\n".to_string(),
        }
    }

    fn merge_text(&mut self) {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());

        for segment in self.segments.drain(..) {
            if let (Some(Segment::Text(previous)), Segment::Text(text)) = (merged.last_mut(), &segment) {
                previous.push_str(text);
                continue;
            }
            merged.push(segment);
        }

        merged.retain(|segment| !matches!(segment, Segment::Text(text) if text.is_empty()));
        self.segments = merged;
    }
}

impl Surface for Document {
    fn pages(&self) -> Vec<Page> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Page { page, .. } => Some(*page),
                Segment::Text(_) => None,
            })
            .collect()
    }

    fn has_ribbon(&self, side: Side, page: PageName) -> bool {
        self.ribbons.contains_key(&(side, page))
    }

    fn insert_page(&mut self, at: usize, page: Page) -> Result<(), BookError> {
        let count = self.pages().len();
        if at > count {
            return Err(BookError::PositionOutOfRange {
                position: at,
                len: count,
            });
        }

        let element = Segment::Page {
            page,
            markup: page_markup(page),
        };

        match self.page_segment(at) {
            Some(index) => {
                let indent = self.indent_before(index);
                self.segments
                    .splice(index..index, [element, Segment::Text(indent)]);
            }
            None => {
                let index = self
                    .page_segment(count.saturating_sub(1))
                    .map_or(self.segments.len(), |last| last + 1);
                let indent = match index.checked_sub(1) {
                    Some(last) => self.indent_before(last),
                    None => String::new(),
                };
                self.segments
                    .splice(index..index, [Segment::Text(indent), element]);
            }
        }

        self.merge_text();

        Ok(())
    }

    fn remove_page(&mut self, at: usize) -> Result<(), BookError> {
        let Some(index) = self.page_segment(at) else {
            return Err(BookError::PositionOutOfRange {
                position: at,
                len: self.pages().len(),
            });
        };

        self.segments.remove(index);
        if let Some(before) = index.checked_sub(1) {
            if let Segment::Text(text) = &mut self.segments[before] {
                let trimmed = text.trim_end_matches([' ', '\t']);
                let keep = trimmed.strip_suffix('\n').unwrap_or(trimmed).len();
                text.truncate(keep);
            }
        }

        self.merge_text();

        Ok(())
    }

    fn set_ribbon_hidden(&mut self, side: Side, page: PageName, hidden: bool) {
        if let Some(state) = self.ribbons.get_mut(&(side, page)) {
            *state = hidden;
        }
    }

    fn flip(&mut self, position: usize) {
        self.start_page = Some(position);
    }
}

/// Tags of `source`, skipping anything inside comments and `script` or `style` bodies.
fn tags(source: &str) -> impl Iterator<Item = Captures<'_>> {
    let opaque = opaque_spans(source);

    TAG.captures_iter(source)
        .filter(move |tag| !inside(&opaque, start_of(tag)))
}

fn opaque_spans(source: &str) -> Vec<Range<usize>> {
    OPAQUE.find_iter(source).map(|span| span.range()).collect()
}

fn inside(spans: &[Range<usize>], at: usize) -> bool {
    spans.iter().any(|span| span.start < at && at < span.end)
}

fn start_of(tag: &Captures) -> usize {
    tag.get(0).map_or(0, |m| m.start())
}

fn end_of(tag: &Captures) -> usize {
    tag.get(0).map_or(0, |m| m.end())
}

fn classify(tag: &str) -> Result<Option<Page>, BookError> {
    let classes = attribute(tag, "class").unwrap_or_default();
    if !classes.split_whitespace().any(|class| class == "page") {
        return Ok(None);
    }

    if let Some(name) = attribute(tag, "data-page") {
        return Ok(Some(Page::Named(name.parse()?)));
    }

    if classes.split_whitespace().any(|class| class == "blank") {
        Ok(Some(Page::Blank))
    } else {
        Ok(Some(Page::Content))
    }
}

fn page_markup(page: Page) -> String {
    match page {
        Page::Named(name) => format!(r#"<div class="page" data-page="{name}"></div>"#),
        Page::Content => r#"<div class="page"></div>"#.to_string(),
        Page::Blank => r#"<div class="page blank"></div>"#.to_string(),
    }
}

fn ribbon_name(tag: &Captures) -> Option<PageName> {
    if !tag[1].is_empty() {
        return None;
    }

    attribute(&tag[0], "class")?
        .split_whitespace()
        .filter_map(|class| class.strip_prefix("ribbon-"))
        .find_map(|name| name.parse().ok())
}

/// Byte range of the first start tag matching `predicate`.
fn find_start_tag(source: &str, predicate: impl Fn(&str) -> bool) -> Option<(usize, usize)> {
    tags(source)
        .filter(|tag| tag[1].is_empty())
        .find(|tag| predicate(&tag[0]))
        .map(|tag| (start_of(&tag), end_of(&tag)))
}

/// Byte range of the ribbon container for `side`, from its start tag to the end of its closing tag.
fn container(source: &str, side: Side) -> Option<(usize, usize)> {
    let id = format!("{side}-ribbons");
    let (start, open_end) = find_start_tag(source, |tag| attribute(tag, "id") == Some(id.as_str()))?;
    let name = TAG.captures(&source[start..open_end])?[2].to_string();

    let mut depth = 1;
    for tag in tags(&source[open_end..]) {
        if &tag[2] != name.as_str() {
            continue;
        }
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
        }
        if depth == 0 {
            return Some((start, open_end + end_of(&tag)));
        }
    }

    None
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let inner = START_TAG.captures(tag)?.get(2)?;

    ATTRIBUTE
        .captures_iter(inner.as_str())
        .find(|attr| attr[1].eq_ignore_ascii_case(name))
        .map(|attr| {
            attr.get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map_or("", |value| value.as_str())
        })
}

/// Rebuilds a start tag with `name` removed, then re-added when `value` is set.
/// An empty value is written as a boolean attribute.
fn with_attribute(tag: &str, name: &str, value: Option<&str>) -> String {
    let Some(parts) = START_TAG.captures(tag) else {
        return tag.to_string();
    };

    let kept: String = ATTRIBUTE
        .captures_iter(&parts[2])
        .filter(|attr| !attr[1].eq_ignore_ascii_case(name))
        .map(|attr| attr[0].to_string())
        .collect();

    let added = match value {
        Some("") => format!(" {name}"),
        Some(value) => format!(r#" {name}="{value}""#),
        None => String::new(),
    };

    format!("<{}{kept}{added}{}>", &parts[1], &parts[3])
}
