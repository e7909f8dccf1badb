use crate::{
    error::BookError,
    page::{Page, PageName},
    ribbon::Side,
    zoom::ZoomTransform,
};

/// Render target driven by a [`Book`](crate::Book).
///
/// Positions are the same zero-based positions the book uses for its page sequence.
pub trait Surface {
    /// Every page element, in display order.
    fn pages(&self) -> Vec<Page>;

    fn has_ribbon(&self, side: Side, page: PageName) -> bool;

    fn insert_page(&mut self, at: usize, page: Page) -> Result<(), BookError>;

    fn remove_page(&mut self, at: usize) -> Result<(), BookError>;

    fn set_ribbon_hidden(&mut self, side: Side, page: PageName, hidden: bool);

    /// Turns the book so `position` is the left-hand page on display.
    fn flip(&mut self, position: usize);

    fn zoom(&mut self, _transform: &ZoomTransform) {}
}
