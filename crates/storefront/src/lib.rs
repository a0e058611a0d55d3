//! Bazaar storefront library.
//!
//! Catalog, filter-sort-render, cart store, UI controller and theme
//! preference for the Bazaar storefront. Front ends (the `bazaar` CLI, tests)
//! feed UI events to a [`controller::Controller`] and render the resulting
//! state through a [`display::RenderSurface`] or the static [`page`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod page;
pub mod state;
pub mod storage;
pub mod theme;
pub mod views;
