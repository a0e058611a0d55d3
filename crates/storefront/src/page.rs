//! Static storefront page.
//!
//! Renders the whole page: header with cart badge and theme toggle, the
//! search/filter/sort controls, the product grid and the cart sidebar.

use askama::Template;
use bazaar_core::SortMode;

use crate::controller::Controller;
use crate::display::{CategoryFilter, HtmlSurface, RenderError};
use crate::views::{CartSummary, EMPTY_CART};

/// An `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    root_class: String,
    theme_label: &'static str,
    search_term: &'a str,
    categories: Vec<SelectOption>,
    sorts: Vec<SelectOption>,
    grid: &'a str,
    cart: &'a CartSummary,
    empty_message: &'static str,
    sidebar_hidden: bool,
}

#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    cart: &'a CartSummary,
    empty_message: &'static str,
}

fn category_options(controller: &Controller) -> Vec<SelectOption> {
    let current = &controller.options().category;
    let mut options = vec![SelectOption {
        value: CategoryFilter::ALL.to_owned(),
        label: "All Categories".to_owned(),
        selected: *current == CategoryFilter::All,
    }];
    options.extend(controller.catalog().categories().into_iter().map(|name| {
        SelectOption {
            value: name.to_owned(),
            label: name.to_owned(),
            selected: matches!(current, CategoryFilter::Only(c) if c == name),
        }
    }));
    options
}

fn sort_options(current: SortMode) -> Vec<SelectOption> {
    SortMode::ALL
        .iter()
        .map(|mode| SelectOption {
            value: mode.as_str().to_owned(),
            label: mode.label().to_owned(),
            selected: *mode == current,
        })
        .collect()
}

/// Render the cart line list on its own.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_cart_items(cart: &CartSummary) -> Result<String, RenderError> {
    let mut out = String::new();
    CartItemsTemplate {
        cart,
        empty_message: EMPTY_CART,
    }
    .render_into(&mut out)?;
    Ok(out)
}

/// Render the full page for the controller's current state.
///
/// # Errors
///
/// Returns an error if any template fails to render.
pub fn render_page(controller: &Controller) -> Result<String, RenderError> {
    let mut grid = HtmlSurface::new();
    let shown = controller.render_catalog(&mut grid)?;
    let cart = controller.summary();

    let page = PageTemplate {
        root_class: controller.root().class_list(),
        theme_label: controller.root().toggle_label(),
        search_term: &controller.options().search_term,
        categories: category_options(controller),
        sorts: sort_options(controller.options().sort),
        grid: grid.as_html(),
        cart: &cart,
        empty_message: EMPTY_CART,
        sidebar_hidden: controller.sidebar().aria_hidden(),
    };

    let mut out = String::new();
    page.render_into(&mut out)?;
    tracing::debug!(products = shown, bytes = out.len(), "Page rendered");
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use bazaar_core::ProductId;

    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::Catalog;
    use crate::controller::{Prompt, UiEvent};
    use crate::storage::MemoryStore;
    use crate::theme::ThemePreference;

    struct Silent;

    impl Prompt for Silent {
        fn alert(&mut self, _message: &str) {}

        fn confirm(&mut self, _message: &str) -> bool {
            false
        }
    }

    fn controller() -> Controller {
        let catalog = Rc::new(Catalog::builtin());
        let storage = Rc::new(MemoryStore::new());
        let cart = CartStore::load(Rc::clone(&catalog), storage.clone());
        Controller::new(catalog, cart, ThemePreference::resolve(storage, None))
    }

    #[test]
    fn test_page_contains_grid_and_empty_cart() {
        let html = render_page(&controller()).unwrap();
        assert_eq!(html.matches("class=\"add-cart-btn\"").count(), 8);
        assert!(html.contains(EMPTY_CART));
        assert!(html.contains("aria-hidden=\"true\""));
        assert!(html.contains("id=\"checkoutBtn\" disabled"));
    }

    #[test]
    fn test_page_reflects_cart_and_theme() {
        let mut ctl = controller();
        ctl.handle(UiEvent::AddToCart(ProductId::new(1)), &mut Silent);
        ctl.handle(UiEvent::AddToCart(ProductId::new(1)), &mut Silent);
        ctl.handle(UiEvent::ToggleTheme, &mut Silent);
        ctl.handle(UiEvent::OpenCart, &mut Silent);

        let html = render_page(&ctl).unwrap();
        assert!(html.contains("<html lang=\"en\" class=\"dark\">"));
        assert!(html.contains("<span id=\"cartCount\">2</span>"));
        assert!(html.contains("\u{20b9}4,800"));
        assert!(html.contains("aria-hidden=\"false\""));
        assert!(!html.contains("id=\"checkoutBtn\" disabled"));
    }

    #[test]
    fn test_selected_options_follow_display_state() {
        let mut ctl = controller();
        ctl.handle(UiEvent::Sort(SortMode::NameDesc), &mut Silent);
        ctl.handle(
            UiEvent::FilterCategory(CategoryFilter::parse("Bags")),
            &mut Silent,
        );

        let html = render_page(&ctl).unwrap();
        assert!(html.contains("<option value=\"name-desc\" selected>"));
        assert!(html.contains("<option value=\"Bags\" selected>"));
        assert!(!html.contains("<option value=\"all\" selected>"));
    }

    #[test]
    fn test_cart_items_controls() {
        let mut ctl = controller();
        ctl.handle(UiEvent::AddToCart(ProductId::new(3)), &mut Silent);

        let html = render_cart_items(&ctl.summary()).unwrap();
        assert!(html.contains("data-action=\"decrease\" data-id=\"3\""));
        assert!(html.contains("data-action=\"increase\" data-id=\"3\""));
        assert!(html.contains("data-action=\"remove\" data-id=\"3\""));
        assert!(html.contains("\u{20b9}899"));
    }
}
