//! # Book
//!
//! Owns the page sequence, the current position and the zoom level, and keeps a [`Surface`] in
//! sync with them.
//!
//! ## Flow
//! - Opening scans the surface, validates every named page and ribbon, then fixes parity.
//! - A page turn recomputes the ribbons, applies them to the surface, then notifies subscribers.
//! - Adding or removing a page fixes parity again before the next page turn is handled.
//! - The reader stays on the page they were looking at when pages come or go in front of it. The
//!   new position is flipped to on the surface.
use tracing::{debug, info};

use crate::{
    error::BookError,
    page::{Page, PageName},
    ribbon::{CoverRule, Ribbons, Side},
    sequence::{PageSequence, ParityFix},
    surface::Surface,
    zoom::{Rect, WheelEvent, Zoom, ZoomTransform},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTurn {
    pub position: usize,
    pub ribbons: Ribbons,
}

type Listener = Box<dyn FnMut(&PageTurn) + Send>;

pub struct Book<S> {
    surface: S,
    sequence: PageSequence,
    position: usize,
    rule: CoverRule,
    ribbons: Ribbons,
    zoom: Zoom,
    listeners: Vec<Listener>,
}

impl<S: Surface> Book<S> {
    pub fn open(surface: S, rule: CoverRule) -> Result<Self, BookError> {
        let sequence = PageSequence::new(surface.pages())?;

        for page in PageName::ALL {
            for side in Side::BOTH {
                if !surface.has_ribbon(side, page) {
                    return Err(BookError::RibbonNotFound { side, page });
                }
            }
        }

        let ribbons = Ribbons::compute(0, &sequence, rule);
        let mut book = Self {
            surface,
            sequence,
            position: 0,
            rule,
            ribbons,
            zoom: Zoom::default(),
            listeners: Vec::new(),
        };

        book.fix_parity()?;
        book.refresh();

        info!("Opened book with {} pages", book.sequence.len());

        Ok(book)
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PageTurn) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Flips the surface to `position` and handles the resulting page turn.
    pub fn flip_to(&mut self, position: usize) -> Result<(), BookError> {
        self.check(position)?;
        self.surface.flip(position);

        self.turn(position)
    }

    pub fn go_to(&mut self, name: PageName) -> Result<(), BookError> {
        let position = self.sequence.locate(name)?;

        self.flip_to(position)
    }

    /// Page turn reported by the surface itself, e.g. after the reader dragged a corner.
    pub fn turn(&mut self, position: usize) -> Result<(), BookError> {
        self.check(position)?;
        self.position = position;
        self.refresh();

        Ok(())
    }

    pub fn insert_page(&mut self, at: usize, page: Page) -> Result<(), BookError> {
        self.sequence.insert(at, page)?;
        if let Err(err) = self.surface.insert_page(at, page) {
            self.sequence.remove(at)?;
            return Err(err);
        }

        self.restructure(ParityFix::Inserted(at))
    }

    pub fn remove_page(&mut self, at: usize) -> Result<Page, BookError> {
        let page = self.sequence.remove(at)?;
        if let Err(err) = self.surface.remove_page(at) {
            self.sequence.insert(at, page)?;
            return Err(err);
        }

        self.restructure(ParityFix::Removed(at))?;

        Ok(page)
    }

    /// Zooms on ctrl+wheel and forwards the resulting transform to the surface.
    pub fn wheel(&mut self, event: &WheelEvent, bounds: &Rect) -> Option<ZoomTransform> {
        let transform = self.zoom.wheel(event, bounds)?;
        self.surface.zoom(&transform);

        Some(transform)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn ribbons(&self) -> &Ribbons {
        &self.ribbons
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom.level()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn check(&self, position: usize) -> Result<(), BookError> {
        if position >= self.sequence.len() {
            return Err(BookError::PositionOutOfRange {
                position,
                len: self.sequence.len(),
            });
        }

        Ok(())
    }

    fn restructure(&mut self, change: ParityFix) -> Result<(), BookError> {
        let before = self.position;

        let mut position = shifted(before, change);
        if let Some(fix) = self.fix_parity()? {
            position = shifted(position, fix);
        }
        self.position = position.min(self.sequence.len() - 1);

        if self.position != before {
            debug!("Moved from position {before} to {}", self.position);
            self.surface.flip(self.position);
        }
        self.refresh();

        Ok(())
    }

    fn fix_parity(&mut self) -> Result<Option<ParityFix>, BookError> {
        let fix = self.sequence.offset_last_page()?;
        match fix {
            Some(ParityFix::Inserted(at)) => self.surface.insert_page(at, Page::Blank)?,
            Some(ParityFix::Removed(at)) => self.surface.remove_page(at)?,
            None => {}
        }

        Ok(fix)
    }

    fn refresh(&mut self) {
        self.ribbons = Ribbons::compute(self.position, &self.sequence, self.rule);

        for &(page, visibility) in self.ribbons.entries() {
            for side in Side::BOTH {
                self.surface
                    .set_ribbon_hidden(side, page, !visibility.shows(side));
            }
        }

        debug!(
            "Position {}: left {:?}, right {:?}",
            self.position,
            self.ribbons.left(),
            self.ribbons.right()
        );

        let turn = PageTurn {
            position: self.position,
            ribbons: self.ribbons.clone(),
        };
        for listener in &mut self.listeners {
            listener(&turn);
        }
    }
}

/// Position of the page shown at `position` once `change` has been applied in front of it.
fn shifted(position: usize, change: ParityFix) -> usize {
    match change {
        ParityFix::Inserted(at) if at <= position => position + 1,
        ParityFix::Removed(at) if at < position => position - 1,
        _ => position,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use super::*;
    use crate::ribbon::Visibility;

    #[derive(Default)]
    struct Recorder {
        pages: Vec<Page>,
        hidden: HashMap<(Side, PageName), bool>,
        missing: Option<(Side, PageName)>,
        flips: Vec<usize>,
        zooms: usize,
    }

    impl Recorder {
        fn with(pages: Vec<Page>) -> Self {
            Self {
                pages,
                ..Self::default()
            }
        }
    }

    impl Surface for Recorder {
        fn pages(&self) -> Vec<Page> {
            self.pages.clone()
        }

        fn has_ribbon(&self, side: Side, page: PageName) -> bool {
            self.missing != Some((side, page))
        }

        fn insert_page(&mut self, at: usize, page: Page) -> Result<(), BookError> {
            self.pages.insert(at, page);
            Ok(())
        }

        fn remove_page(&mut self, at: usize) -> Result<(), BookError> {
            self.pages.remove(at);
            Ok(())
        }

        fn set_ribbon_hidden(&mut self, side: Side, page: PageName, hidden: bool) {
            self.hidden.insert((side, page), hidden);
        }

        fn flip(&mut self, position: usize) {
            self.flips.push(position);
        }

        fn zoom(&mut self, _transform: &ZoomTransform) {
            self.zooms += 1;
        }
    }

    fn plain() -> Vec<Page> {
        PageName::ALL.into_iter().map(Page::Named).collect()
    }

    fn open(pages: Vec<Page>) -> Book<Recorder> {
        Book::open(Recorder::with(pages), CoverRule::default()).unwrap()
    }

    #[test]
    fn opening_fixes_parity_on_the_surface_too() {
        let book = open(plain());

        assert_eq!(book.sequence().locate(PageName::Back), Ok(5));
        assert_eq!(book.surface().pages, book.sequence().pages());
        assert_eq!(book.surface().pages[4], Page::Blank);
    }

    #[test]
    fn opening_applies_cover_ribbons() {
        let book = open(plain());
        let hidden = &book.surface().hidden;

        assert_eq!(hidden[&(Side::Left, PageName::Front)], true);
        assert_eq!(hidden[&(Side::Right, PageName::Map)], true);
        assert_eq!(hidden[&(Side::Right, PageName::Album)], false);
        assert_eq!(hidden[&(Side::Right, PageName::Back)], false);
        assert_eq!(hidden.len(), PageName::COUNT * 2);
    }

    #[test]
    fn missing_ribbon_aborts_opening() {
        let mut surface = Recorder::with(plain());
        surface.missing = Some((Side::Right, PageName::Stats));

        assert_eq!(
            Book::open(surface, CoverRule::default()).err(),
            Some(BookError::RibbonNotFound {
                side: Side::Right,
                page: PageName::Stats,
            })
        );
    }

    #[test]
    fn missing_page_aborts_opening() {
        let mut pages = plain();
        pages.remove(2);

        assert_eq!(
            Book::open(Recorder::with(pages), CoverRule::default()).err(),
            Some(BookError::PageNotFound(PageName::Album))
        );
    }

    #[test]
    fn going_to_a_page_flips_and_notifies() {
        let mut book = open(plain());
        let turns = Arc::new(Mutex::new(Vec::new()));
        let seen = turns.clone();
        book.subscribe(move |turn| seen.lock().unwrap().push(turn.position));

        book.go_to(PageName::Stats).unwrap();

        assert_eq!(book.position(), 3);
        assert_eq!(book.surface().flips, vec![3]);
        assert_eq!(*turns.lock().unwrap(), vec![3]);
        assert_eq!(book.ribbons().get(PageName::Map), Visibility::Left);
        assert_eq!(book.ribbons().get(PageName::Back), Visibility::Right);
        assert_eq!(book.surface().hidden[&(Side::Left, PageName::Map)], false);
        assert_eq!(book.surface().hidden[&(Side::Right, PageName::Map)], true);
    }

    #[test]
    fn turn_out_of_range_is_rejected() {
        let mut book = open(plain());

        assert_eq!(
            book.flip_to(6),
            Err(BookError::PositionOutOfRange { position: 6, len: 6 })
        );
        assert!(book.surface().flips.is_empty());
        assert_eq!(book.position(), 0);
    }

    #[test]
    fn adding_a_page_keeps_the_back_cover_odd() {
        let mut book = open(plain());

        book.insert_page(2, Page::Content).unwrap();

        assert_eq!(book.sequence().locate(PageName::Back), Ok(5));
        assert_eq!(book.sequence().len(), 6);
        assert!(!book.sequence().pages().contains(&Page::Blank));
        assert_eq!(book.surface().pages, book.sequence().pages());
    }

    #[test]
    fn removing_a_page_ahead_keeps_the_reader_on_their_page() {
        let mut pages = plain();
        pages.splice(1..1, [Page::Content, Page::Content]);
        pages.insert(6, Page::Blank);
        let mut book = open(pages);
        book.flip_to(7).unwrap();

        assert_eq!(book.remove_page(1), Ok(Page::Content));

        assert_eq!(book.sequence().len(), 6);
        assert_eq!(book.sequence().locate(PageName::Back), Ok(5));
        assert_eq!(book.position(), 5);
        assert_eq!(book.surface().flips.last(), Some(&5));
        assert_eq!(book.surface().pages, book.sequence().pages());
    }

    #[test]
    fn adding_a_page_ahead_keeps_the_reader_on_their_page() {
        let mut book = open(plain());
        book.go_to(PageName::Stats).unwrap();

        book.insert_page(1, Page::Content).unwrap();

        assert_eq!(book.position(), 4);
        assert_eq!(book.sequence().pages()[4], Page::Named(PageName::Stats));
        assert_eq!(book.surface().flips, vec![3, 4]);
        assert_eq!(book.ribbons().get(PageName::Map), Visibility::Left);
    }

    #[test]
    fn adding_a_page_behind_leaves_the_position_alone() {
        let mut book = open(plain());
        book.flip_to(1).unwrap();

        book.insert_page(3, Page::Content).unwrap();

        assert_eq!(book.position(), 1);
        assert_eq!(book.surface().flips, vec![1]);
    }

    #[test]
    fn removing_the_last_page_clamps_the_position() {
        let mut pages = plain();
        pages.push(Page::Content);
        let mut book = open(pages);
        assert_eq!(book.sequence().len(), 7);
        book.flip_to(6).unwrap();

        assert_eq!(book.remove_page(6), Ok(Page::Content));

        assert_eq!(book.sequence().len(), 6);
        assert_eq!(book.position(), 5);
        assert_eq!(book.surface().flips.last(), Some(&5));
    }

    #[test]
    fn shifts_follow_changes_in_front_of_the_reader() {
        assert_eq!(shifted(3, ParityFix::Inserted(3)), 4);
        assert_eq!(shifted(3, ParityFix::Inserted(4)), 3);
        assert_eq!(shifted(3, ParityFix::Removed(2)), 2);
        assert_eq!(shifted(3, ParityFix::Removed(3)), 3);
        assert_eq!(shifted(0, ParityFix::Removed(0)), 0);
    }

    #[test]
    fn named_pages_stay_put() {
        let mut book = open(plain());

        assert_eq!(
            book.remove_page(0),
            Err(BookError::NamedPageMutation(PageName::Front))
        );
        assert_eq!(book.surface().pages, book.sequence().pages());
    }

    #[test]
    fn ctrl_wheel_reaches_the_surface() {
        let mut book = open(plain());
        let bounds = Rect {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let event = WheelEvent {
            delta_y: -40.0,
            ctrl_key: true,
            client_x: 10.0,
            client_y: 90.0,
        };

        assert!(book.wheel(&event, &bounds).is_some());
        assert_eq!(book.surface().zooms, 1);
        assert!(book.zoom_level() > 1.0);
    }
}
