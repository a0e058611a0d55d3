//! Cart commands.
//!
//! Mutations go through the controller so the one-shot commands behave
//! exactly like the matching session events.

use std::io::Write;

use bazaar_core::{CartAction, ProductId};
use bazaar_storefront::controller::{Controller, Outcome, UiEvent};

use super::CommandError;
use crate::prompt::Console;

/// Print the cart summary, or its entries as JSON.
pub fn show<W: Write>(ctl: &Controller, json: bool, out: &mut W) -> Result<(), CommandError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, ctl.cart().entries())?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", ctl.summary())?;
    }
    Ok(())
}

/// Add one unit of a catalog product.
pub fn add<C: Console>(
    ctl: &mut Controller,
    id: ProductId,
    console: &mut C,
) -> Result<(), CommandError> {
    let Some(product) = ctl.catalog().find(id) else {
        return Err(CommandError::UnknownProduct(id));
    };
    let name = product.name.clone();

    ctl.handle(UiEvent::AddToCart(id), console);
    writeln!(console, "Added {name}")?;
    writeln!(console, "{}", ctl.summary())?;
    Ok(())
}

/// Apply a line control to an existing cart entry.
pub fn line<C: Console>(
    ctl: &mut Controller,
    id: ProductId,
    action: CartAction,
    console: &mut C,
) -> Result<(), CommandError> {
    match ctl.handle(UiEvent::CartLine { id, action }, console) {
        Outcome::CartChanged => writeln!(console, "{}", ctl.summary())?,
        _ => writeln!(console, "Product {id} is not in the cart")?,
    }
    Ok(())
}

/// Empty the cart after confirmation.
pub fn empty<C: Console>(ctl: &mut Controller, console: &mut C) -> Result<(), CommandError> {
    if ctl.cart().is_empty() {
        writeln!(console, "Cart is already empty")?;
        return Ok(());
    }

    if ctl.handle(UiEvent::EmptyCart, console) == Outcome::CartChanged {
        writeln!(console, "Cart emptied")?;
    } else {
        writeln!(console, "Cart unchanged")?;
    }
    Ok(())
}

/// Check out. Prints the confirmation id on success.
pub fn checkout<C: Console>(ctl: &mut Controller, console: &mut C) -> Result<(), CommandError> {
    if let Outcome::CheckedOut(receipt) = ctl.handle(UiEvent::Checkout, console) {
        writeln!(console, "Confirmation: {}", receipt.confirmation)?;
    }
    Ok(())
}
