//! Integration tests for whole storefront sessions.
//!
//! Each test drives the controller with UI events the way a front end
//! would, then restarts the storefront against the same data directory.

#![allow(clippy::unwrap_used)]

use bazaar_core::{CartAction, ProductId, SortMode, Theme};
use bazaar_integration_tests::{ScriptedPrompt, TestContext};
use bazaar_storefront::controller::{Focus, Key, Outcome, UiEvent};
use bazaar_storefront::display::{CategoryFilter, TextSurface};

fn id(n: u32) -> ProductId {
    ProductId::new(n)
}

// =============================================================================
// Cart Flow Tests
// =============================================================================

#[test]
fn test_shopping_session_survives_restart() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();

    {
        let mut state = ctx.start();
        let ctl = state.controller_mut();
        ctl.handle(UiEvent::AddToCart(id(1)), &mut prompt);
        ctl.handle(UiEvent::AddToCart(id(1)), &mut prompt);
        ctl.handle(UiEvent::AddRequested(id(3)), &mut prompt);
        assert_eq!(ctl.summary().total.amount(), 5699);
    }

    let state = ctx.start();
    let summary = state.controller().summary();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total.amount(), 5699);
    assert_eq!(
        summary.lines.iter().map(|l| l.id).collect::<Vec<_>>(),
        [id(1), id(3)]
    );
}

#[test]
fn test_line_controls_then_checkout() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();
    let mut state = ctx.start();
    let ctl = state.controller_mut();

    ctl.handle(UiEvent::AddToCart(id(6)), &mut prompt);
    ctl.handle(
        UiEvent::CartLine {
            id: id(6),
            action: CartAction::INCREASE,
        },
        &mut prompt,
    );
    ctl.handle(UiEvent::AddToCart(id(7)), &mut prompt);
    ctl.handle(
        UiEvent::CartLine {
            id: id(7),
            action: CartAction::Remove,
        },
        &mut prompt,
    );
    ctl.handle(UiEvent::OpenCart, &mut prompt);

    let Outcome::CheckedOut(receipt) = ctl.handle(UiEvent::Checkout, &mut prompt) else {
        panic!("checkout should succeed");
    };
    assert_eq!(receipt.total.amount(), 31_998);
    assert_eq!(receipt.items, 2);
    assert_eq!(receipt.lines, 1);
    assert_eq!(
        prompt.alerts,
        ["Thank you for your purchase!\nTotal Amount: \u{20b9}31,998"]
    );
    assert!(!ctl.sidebar().is_open());

    drop(state);
    assert!(ctx.start().controller().cart().is_empty());
}

#[test]
fn test_checkout_on_empty_cart_changes_nothing() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();
    let mut state = ctx.start();
    let ctl = state.controller_mut();
    ctl.handle(UiEvent::OpenCart, &mut prompt);

    assert_eq!(ctl.handle(UiEvent::Checkout, &mut prompt), Outcome::Unchanged);
    assert_eq!(prompt.alerts, ["Your cart is empty!"]);
    assert!(ctl.sidebar().is_open());
    assert!(ctx.read_storage().is_none());
}

#[test]
fn test_empty_cart_decline_then_accept() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::new([false, true]);
    let mut state = ctx.start();
    let ctl = state.controller_mut();
    ctl.handle(UiEvent::AddToCart(id(4)), &mut prompt);
    ctl.handle(UiEvent::OpenCart, &mut prompt);

    assert_eq!(ctl.handle(UiEvent::EmptyCart, &mut prompt), Outcome::Unchanged);
    assert_eq!(ctl.summary().count, 1);
    assert!(ctl.sidebar().is_open());

    assert_eq!(ctl.handle(UiEvent::EmptyCart, &mut prompt), Outcome::CartChanged);
    assert!(ctl.cart().is_empty());
    assert!(!ctl.sidebar().is_open());
    assert_eq!(prompt.confirms.len(), 2);
}

#[test]
fn test_unknown_product_is_ignored() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();
    let mut state = ctx.start();
    let ctl = state.controller_mut();

    assert_eq!(
        ctl.handle(UiEvent::AddRequested(id(42)), &mut prompt),
        Outcome::Unchanged
    );
    assert!(ctl.cart().is_empty());
    assert!(ctx.read_storage().is_none());
}

// =============================================================================
// Sidebar Tests
// =============================================================================

#[test]
fn test_escape_closes_open_panel_only() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();
    let mut state = ctx.start();
    let ctl = state.controller_mut();

    assert_eq!(
        ctl.handle(UiEvent::KeyDown(Key::Escape), &mut prompt),
        Outcome::Unchanged
    );
    ctl.handle(UiEvent::OpenCart, &mut prompt);
    assert_eq!(ctl.sidebar().focus(), Focus::CartPanel);
    ctl.handle(UiEvent::KeyDown(Key::Escape), &mut prompt);
    assert!(ctl.sidebar().aria_hidden());
    assert_eq!(ctl.sidebar().focus(), Focus::CartButton);
}

// =============================================================================
// Display and Theme Tests
// =============================================================================

#[test]
fn test_display_events_filter_the_listing() {
    let ctx = TestContext::new();
    let mut prompt = ScriptedPrompt::default();
    let mut state = ctx.start();
    let ctl = state.controller_mut();

    ctl.handle(
        UiEvent::FilterCategory(CategoryFilter::parse("Accessories")),
        &mut prompt,
    );
    ctl.handle(UiEvent::Sort(SortMode::NameDesc), &mut prompt);

    let mut surface = TextSurface::new();
    assert_eq!(ctl.render_catalog(&mut surface).unwrap(), 2);
    let lines = surface.lines();
    assert!(lines.first().unwrap().contains("Sunglasses"));
    assert!(lines.last().unwrap().contains("Leather Wallet"));
}

#[test]
fn test_theme_choice_overrides_system_after_restart() {
    let mut ctx = TestContext::new();
    ctx.config_mut().system_theme = Some(Theme::Dark);

    let mut state = ctx.start();
    assert_eq!(state.controller().theme().theme(), Theme::Dark);
    assert!(state.controller().root().has_class("dark"));

    let mut prompt = ScriptedPrompt::default();
    assert_eq!(
        state.controller_mut().handle(UiEvent::ToggleTheme, &mut prompt),
        Outcome::ThemeChanged(Theme::Light)
    );
    drop(state);

    let state = ctx.start();
    assert_eq!(state.controller().theme().theme(), Theme::Light);
    assert!(state.controller().theme().is_explicit());
    assert!(!state.controller().root().has_class("dark"));
}
