//! Interactive session.
//!
//! Each input line is one UI event, handled to completion before the next
//! line is read. Confirmations read their answer from the following line.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use bazaar_core::{CartAction, ParseEnumError, ProductId, SortMode};
use bazaar_storefront::controller::{Controller, Key, Outcome, UiEvent};
use bazaar_storefront::display::{CategoryFilter, TextSurface};
use thiserror::Error;

use super::CommandError;
use crate::prompt::Terminal;

const HELP: &str = "\
Commands:
  open | close | esc          show or hide the cart panel
  add ID | request ID         add a product to the cart
  inc ID | dec ID | rm ID     change a cart line
  line ID ACTION              apply increase, decrease or remove
  checkout | empty            check out or empty the cart
  theme                       toggle light and dark
  search TEXT                 filter by name (empty clears)
  category NAME               filter by category (`all` clears)
  sort MODE                   default, price-asc, price-desc, name-asc, name-desc
  list | cart                 show products or the cart
  quit";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    List,
    Cart,
    Help,
    Quit,
}

/// A line that does not parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a product id")]
    MissingId(String),
    #[error("invalid product id: {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Action(#[from] ParseEnumError),
}

fn product_id(word: &str, arg: &str) -> Result<ProductId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingId(word.to_owned()));
    }
    arg.parse().map_err(|_| ParseError::InvalidId(arg.to_owned()))
}

fn line_event(word: &str, arg: &str, action: CartAction) -> Result<Command, ParseError> {
    let id = product_id(word, arg)?;
    Ok(Command::Event(UiEvent::CartLine { id, action }))
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns an error for unknown commands, missing or malformed ids and
/// unknown line actions.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, arg)| (word, arg.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "open" => Command::Event(UiEvent::OpenCart),
        "close" => Command::Event(UiEvent::CloseCart),
        "esc" | "escape" => Command::Event(UiEvent::KeyDown(Key::Escape)),
        "add" => Command::Event(UiEvent::AddToCart(product_id(word, arg)?)),
        "request" => Command::Event(UiEvent::AddRequested(product_id(word, arg)?)),
        "inc" | "increase" => line_event(word, arg, CartAction::INCREASE)?,
        "dec" | "decrease" => line_event(word, arg, CartAction::DECREASE)?,
        "rm" | "remove" => line_event(word, arg, CartAction::Remove)?,
        "line" => {
            let (id, action) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
            line_event(word, id, action.parse()?)?
        }
        "checkout" => Command::Event(UiEvent::Checkout),
        "empty" => Command::Event(UiEvent::EmptyCart),
        "theme" => Command::Event(UiEvent::ToggleTheme),
        "search" => Command::Event(UiEvent::Search(arg.to_owned())),
        "category" => Command::Event(UiEvent::FilterCategory(if arg.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::parse(arg)
        })),
        "sort" => Command::Event(UiEvent::Sort(SortMode::parse_lenient(arg))),
        "list" => Command::List,
        "cart" => Command::Cart,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(line.to_owned())),
    };
    Ok(Some(command))
}

/// Run the session until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    ctl: &mut Controller,
    terminal: &mut Terminal<R, W>,
) -> Result<(), CommandError> {
    let changes = Rc::new(Cell::new(0_u64));
    let counter = Rc::clone(&changes);
    let subscription = ctl.cart_mut().subscribe(move |change, entries| {
        counter.set(counter.get() + 1);
        tracing::debug!(?change, lines = entries.len(), "Cart changed");
    });

    let result = event_loop(ctl, terminal);

    ctl.cart_mut().unsubscribe(subscription);
    tracing::info!(cart_changes = changes.get(), "Session ended");
    result
}

fn event_loop<R: BufRead, W: Write>(
    ctl: &mut Controller,
    terminal: &mut Terminal<R, W>,
) -> Result<(), CommandError> {
    writeln!(terminal, "Bazaar session. Type `help` for commands.")?;

    while let Some(line) = terminal.read_line()? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(terminal, "{HELP}")?,
            Ok(Some(Command::List)) => list(ctl, terminal)?,
            Ok(Some(Command::Cart)) => writeln!(terminal, "{}", ctl.summary())?,
            Ok(Some(Command::Event(event))) => {
                let outcome = ctl.handle(event, terminal);
                report(ctl, outcome, terminal)?;
            }
            Err(e) => writeln!(terminal, "{e}")?,
        }
    }
    Ok(())
}

fn list<W: Write>(ctl: &Controller, out: &mut W) -> Result<(), CommandError> {
    let mut surface = TextSurface::new();
    ctl.render_catalog(&mut surface)?;
    writeln!(out, "{}", surface.to_text())?;
    Ok(())
}

fn report<W: Write>(ctl: &Controller, outcome: Outcome, out: &mut W) -> Result<(), CommandError> {
    match outcome {
        Outcome::Unchanged => {}
        Outcome::CartChanged => writeln!(out, "{}", ctl.summary())?,
        Outcome::SidebarChanged if ctl.sidebar().is_open() => {
            writeln!(out, "Cart panel open")?;
            writeln!(out, "{}", ctl.summary())?;
        }
        Outcome::SidebarChanged => writeln!(out, "Cart panel closed")?,
        Outcome::CheckedOut(receipt) => writeln!(out, "Confirmation: {}", receipt.confirmation)?,
        Outcome::ThemeChanged(theme) => {
            writeln!(out, "Theme: {theme} {}", ctl.root().toggle_label())?;
        }
        Outcome::DisplayChanged => list(ctl, out)?,
    }
    Ok(())
}
