use std::sync::{Arc, Mutex};

use book::{Book, CoverRule, Document, Page, PageName, PageSequence, ParityFix, Ribbons, Side, Surface};

const INDEX: &str = r#"<!doctype html>
<html>
  <body>
    <nav id="left-ribbons">
      <button class="ribbon ribbon-front" value="front">Cover</button>
      <button class="ribbon ribbon-map" value="map">Map</button>
      <button class="ribbon ribbon-album" value="album">Album</button>
      <button class="ribbon ribbon-stats" value="stats">Stats</button>
      <button class="ribbon ribbon-back" value="back">Back</button>
    </nav>
    <div id="book">
      <div class="page" data-page="front"><h1>Travel Book</h1></div>
      <div class="page" data-page="map"><div id="world-map"></div></div>
      <div class="page" data-page="album"><img src="album.webp"></div>
      <div class="page" data-page="stats"><table></table></div>
      <div class="page" data-page="back"></div>
    </div>
    <nav id="right-ribbons">
      <button class="ribbon ribbon-front" value="front">Cover</button>
      <button class="ribbon ribbon-map" value="map">Map</button>
      <button class="ribbon ribbon-album" value="album">Album</button>
      <button class="ribbon ribbon-stats" value="stats">Stats</button>
      <button class="ribbon ribbon-back" value="back">Back</button>
    </nav>
  </body>
</html>"#;

fn named(names: &[PageName]) -> Vec<Page> {
    names.iter().copied().map(Page::Named).collect()
}

#[test]
fn five_page_book_gets_a_blank_before_the_back_cover() {
    let mut sequence = PageSequence::new(named(&PageName::ALL)).unwrap();

    assert_eq!(sequence.offset_last_page(), Ok(Some(ParityFix::Inserted(4))));

    let mut expected = named(&PageName::ALL);
    expected.insert(4, Page::Blank);
    assert_eq!(sequence.pages(), expected.as_slice());
    assert_eq!(sequence.locate(PageName::Back), Ok(5));
    assert_eq!(sequence.offset_last_page(), Ok(None));
}

#[test]
fn closed_book_ribbons() {
    let mut pages = named(&PageName::ALL);
    pages.insert(4, Page::Blank);
    let sequence = PageSequence::new(pages).unwrap();

    let ribbons = Ribbons::compute(0, &sequence, CoverRule::default());

    assert!(ribbons.left().is_empty());
    assert_eq!(
        ribbons.right(),
        vec![PageName::Album, PageName::Stats, PageName::Back]
    );
}

#[test]
fn entry_document_is_corrected_on_open() {
    let book = Book::open(Document::parse(INDEX).unwrap(), CoverRule::default()).unwrap();
    let html = book.surface().render();

    assert!(html.contains(
        "<div class=\"page\" data-page=\"stats\"><table></table></div>\n      \
         <div class=\"page blank\"></div>\n      \
         <div class=\"page\" data-page=\"back\"></div>"
    ));
    assert_eq!(book.surface().pages(), book.sequence().pages());
}

#[test]
fn entry_document_tracks_page_turns() {
    let mut book = Book::open(Document::parse(INDEX).unwrap(), CoverRule::default()).unwrap();
    let positions = Arc::new(Mutex::new(Vec::new()));
    let seen = positions.clone();
    book.subscribe(move |turn| seen.lock().unwrap().push(turn.position));

    book.go_to(PageName::Album).unwrap();
    let document = book.into_surface();

    assert_eq!(*positions.lock().unwrap(), vec![2]);
    assert_eq!(document.start_page(), Some(2));
    assert_eq!(document.ribbon_hidden(Side::Left, PageName::Map), Some(false));
    assert_eq!(document.ribbon_hidden(Side::Right, PageName::Map), Some(true));
    assert_eq!(document.ribbon_hidden(Side::Left, PageName::Album), Some(true));
    assert_eq!(document.ribbon_hidden(Side::Right, PageName::Stats), Some(true));
    assert_eq!(document.ribbon_hidden(Side::Right, PageName::Back), Some(false));

    let html = document.render();
    assert!(html.contains(r#"<div id="book" data-start-page="2">"#));
    assert!(html.contains(r#"<button class="ribbon ribbon-back" value="back" hidden>Back</button>"#));
}

#[test]
fn start_page_follows_the_reader_through_page_changes() {
    let mut book = Book::open(Document::parse(INDEX).unwrap(), CoverRule::default()).unwrap();
    book.go_to(PageName::Back).unwrap();

    book.insert_page(1, Page::Content).unwrap();
    book.insert_page(1, Page::Content).unwrap();
    assert_eq!(book.position(), 7);
    assert_eq!(book.surface().start_page(), Some(7));

    book.remove_page(1).unwrap();
    assert_eq!(book.sequence().len(), 6);
    assert_eq!(book.position(), 5);
    assert_eq!(book.surface().start_page(), Some(5));
    assert!(book.surface().render().contains(r#"<div id="book" data-start-page="5">"#));
}

#[test]
fn document_without_right_ribbons_is_rejected() {
    let start = INDEX.find(r#"<nav id="right-ribbons">"#).unwrap();
    let end = INDEX.rfind("</nav>").unwrap() + "</nav>".len();
    let source = format!("{}{}", &INDEX[..start], &INDEX[end..]);

    let err = Book::open(Document::parse(&source).unwrap(), CoverRule::default()).err();

    assert_eq!(
        err,
        Some(book::BookError::RibbonNotFound {
            side: Side::Right,
            page: PageName::Front,
        })
    );
}
