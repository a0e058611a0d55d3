//! UI controller.
//!
//! Turns discrete UI events into cart mutations, sidebar transitions, theme
//! toggles and display-option changes. Events are handled one at a time and
//! run to completion; the caller re-renders whatever the returned
//! [`Outcome`] says changed.
//!
//! Dialogs go through [`Prompt`] so front ends decide how to ask.

use std::rc::Rc;

use bazaar_core::{CartAction, ProductId, SortMode, Theme};
use tracing::instrument;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{EMPTY_CART_ALERT, Receipt};
use crate::display::{self, CategoryFilter, DisplayOptions, RenderError, RenderSurface};
use crate::theme::{DocumentRoot, ThemePreference};
use crate::views::CartSummary;

/// Confirmation asked before emptying the cart.
pub const CONFIRM_EMPTY: &str = "Are you sure you want to empty the cart?";

/// Blocking user dialogs.
pub trait Prompt {
    /// Show an informational message.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question. `true` means the user accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Where keyboard focus sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Page,
    CartPanel,
    CartButton,
}

/// Cart sidebar state machine: closed ⇄ open, initially closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sidebar {
    open: bool,
    focus: Focus,
}

impl Sidebar {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Value of the panel's `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(&self) -> bool {
        !self.open
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Open the panel and move focus into it. Returns whether it was closed.
    pub const fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.focus = Focus::CartPanel;
        true
    }

    /// Close the panel and return focus to the cart button. Returns whether
    /// it was open.
    pub const fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.focus = Focus::CartButton;
        true
    }
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// A discrete UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An add button on a product card was activated.
    AddToCart(ProductId),
    /// Another widget asked for a product to be added.
    AddRequested(ProductId),
    /// A cart line control was activated.
    CartLine { id: ProductId, action: CartAction },
    OpenCart,
    CloseCart,
    KeyDown(Key),
    Checkout,
    EmptyCart,
    ToggleTheme,
    Search(String),
    FilterCategory(CategoryFilter),
    Sort(SortMode),
}

/// What an event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    CartChanged,
    SidebarChanged,
    CheckedOut(Receipt),
    ThemeChanged(Theme),
    DisplayChanged,
}

impl Outcome {
    const fn cart(changed: bool) -> Self {
        if changed {
            Self::CartChanged
        } else {
            Self::Unchanged
        }
    }

    const fn sidebar(changed: bool) -> Self {
        if changed {
            Self::SidebarChanged
        } else {
            Self::Unchanged
        }
    }
}

/// Owns the storefront session state and applies events to it.
#[derive(Debug)]
pub struct Controller {
    catalog: Rc<Catalog>,
    cart: CartStore,
    theme: ThemePreference,
    root: DocumentRoot,
    sidebar: Sidebar,
    options: DisplayOptions,
}

impl Controller {
    /// Assemble a controller and apply the resolved theme to the page root.
    #[must_use]
    pub fn new(catalog: Rc<Catalog>, cart: CartStore, theme: ThemePreference) -> Self {
        let mut root = DocumentRoot::new();
        theme.apply(&mut root);

        Self {
            catalog,
            cart,
            theme,
            root,
            sidebar: Sidebar::default(),
            options: DisplayOptions::default(),
        }
    }

    /// Apply one event.
    #[instrument(skip(self, prompt))]
    pub fn handle(&mut self, event: UiEvent, prompt: &mut dyn Prompt) -> Outcome {
        match event {
            UiEvent::AddToCart(id) | UiEvent::AddRequested(id) => Outcome::cart(self.cart.add(id)),
            UiEvent::CartLine { id, action } => Outcome::cart(self.cart.apply(id, action)),
            UiEvent::OpenCart => Outcome::sidebar(self.sidebar.open()),
            UiEvent::CloseCart | UiEvent::KeyDown(Key::Escape) => {
                Outcome::sidebar(self.sidebar.close())
            }
            UiEvent::KeyDown(Key::Other) => Outcome::Unchanged,
            UiEvent::Checkout => self
                .checkout(prompt)
                .map_or(Outcome::Unchanged, Outcome::CheckedOut),
            UiEvent::EmptyCart => Outcome::cart(self.empty_cart(prompt)),
            UiEvent::ToggleTheme => Outcome::ThemeChanged(self.toggle_theme()),
            UiEvent::Search(term) => {
                self.options.search_term = term;
                Outcome::DisplayChanged
            }
            UiEvent::FilterCategory(category) => {
                self.options.category = category;
                Outcome::DisplayChanged
            }
            UiEvent::Sort(sort) => {
                self.options.sort = sort;
                Outcome::DisplayChanged
            }
        }
    }

    /// Complete a simulated purchase.
    ///
    /// On an empty cart the shopper is told so and nothing changes.
    /// Otherwise the total is shown, the cart is cleared and the panel closes.
    pub fn checkout(&mut self, prompt: &mut dyn Prompt) -> Option<Receipt> {
        if self.cart.is_empty() {
            prompt.alert(EMPTY_CART_ALERT);
            return None;
        }

        let receipt = Receipt::for_cart(&self.cart);
        prompt.alert(&receipt.message());
        self.cart.clear();
        self.sidebar.close();

        tracing::info!(
            confirmation = %receipt.confirmation,
            total = %receipt.total,
            items = receipt.items,
            "Checkout complete"
        );
        Some(receipt)
    }

    /// Empty the cart after confirmation. Returns whether it was emptied.
    pub fn empty_cart(&mut self, prompt: &mut dyn Prompt) -> bool {
        if self.cart.is_empty() {
            return false;
        }
        if !prompt.confirm(CONFIRM_EMPTY) {
            tracing::debug!("Empty cart declined");
            return false;
        }

        self.cart.clear();
        self.sidebar.close();
        true
    }

    /// Flip the theme and reflect it on the page root.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        self.theme.apply(&mut self.root);
        theme
    }

    /// Render the catalog under the current display options.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to render.
    pub fn render_catalog<S>(&self, surface: &mut S) -> Result<usize, RenderError>
    where
        S: RenderSurface + ?Sized,
    {
        display::render(surface, self.catalog.products(), &self.options)
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart access, for subscribing listeners.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    #[must_use]
    pub const fn root(&self) -> &DocumentRoot {
        &self.root
    }

    #[must_use]
    pub const fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    #[must_use]
    pub const fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Replace the display options wholesale.
    pub fn set_options(&mut self, options: DisplayOptions) {
        self.options = options;
    }
}
