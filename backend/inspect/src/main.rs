use std::path::PathBuf;

use anyhow::Error;
use book::{Book, CoverRule, Page, Surface, load_document, write_document};
use clap::Parser;

/// Scan a book entry document, fix its page parity and print the ribbons for a spread.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    document: PathBuf,

    /// Left-hand page of the spread to report ribbons for.
    #[arg(short, long, default_value_t = 0)]
    position: usize,

    /// Give the page after the front cover a ribbon while the book is closed.
    #[arg(long)]
    facing_shown: bool,

    /// Write the corrected document back in place.
    #[arg(short, long)]
    write: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let rule = if args.facing_shown {
        CoverRule::FacingShown
    } else {
        CoverRule::FacingHidden
    };

    let original = load_document(&args.document)?;
    let before = original.pages().len();

    let mut opened = Book::open(original, rule)?;
    if args.write {
        write_document(&args.document, opened.surface())?;
        println!("Wrote {}", args.document.display());
    }

    opened.flip_to(args.position)?;

    println!("Pages ({before} before correction):");
    for (position, page) in opened.sequence().pages().iter().enumerate() {
        let label = match page {
            Page::Named(name) => name.to_string(),
            Page::Content => "content".to_string(),
            Page::Blank => "blank".to_string(),
        };
        println!("  {position:>3}  {label}");
    }

    let ribbons = opened.ribbons();
    println!("Ribbons at {}:", ribbons.position);
    println!("  left:  {:?}", ribbons.left());
    println!("  right: {:?}", ribbons.right());

    Ok(())
}
