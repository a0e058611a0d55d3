//! Catalog listing and page rendering commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use bazaar_storefront::controller::Controller;
use bazaar_storefront::display::{DisplayOptions, TextSurface};
use bazaar_storefront::page;

use super::CommandError;

/// Print the products visible under `options`, one per line.
pub fn products<W: Write>(
    ctl: &mut Controller,
    options: DisplayOptions,
    out: &mut W,
) -> Result<(), CommandError> {
    ctl.set_options(options);

    let mut surface = TextSurface::new();
    let shown = ctl.render_catalog(&mut surface)?;
    for line in surface.lines() {
        writeln!(out, "{line}")?;
    }

    tracing::debug!(shown, "Listed products");
    Ok(())
}

/// Print the catalog's categories in first-seen order.
pub fn categories<W: Write>(ctl: &Controller, out: &mut W) -> Result<(), CommandError> {
    for category in ctl.catalog().categories() {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// Render the storefront page under `options` and write it to `path`.
pub fn render<W: Write>(
    ctl: &mut Controller,
    options: DisplayOptions,
    path: &Path,
    out: &mut W,
) -> Result<(), CommandError> {
    ctl.set_options(options);

    let html = page::render_page(ctl)?;
    fs::write(path, &html).map_err(|source| CommandError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = html.len(), "Page written");
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::SortMode;

    use super::*;
    use crate::commands::test_controller;

    fn listing(options: DisplayOptions) -> String {
        let mut out = Vec::new();
        products(&mut test_controller(), options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_products_lists_full_catalog() {
        let text = listing(DisplayOptions::default());
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().next().unwrap().contains("Wireless Headphones"));
    }

    #[test]
    fn test_products_filtered_and_sorted() {
        let text = listing(
            DisplayOptions::default()
                .with_category("Electronics")
                .with_sort(SortMode::PriceDesc),
        );
        let names: Vec<_> = text.lines().collect();
        assert_eq!(names.len(), 2);
        assert!(names.first().unwrap().contains("Smartphone"));
    }

    #[test]
    fn test_products_no_results() {
        assert_eq!(
            listing(DisplayOptions::default().with_search("zzz")),
            "No products found.\n"
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut out = Vec::new();
        categories(&test_controller(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Electronics\nWearables\nAccessories\nFootwear\nBags\n"
        );
    }

    #[test]
    fn test_render_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.html");
        let mut out = Vec::new();

        render(
            &mut test_controller(),
            DisplayOptions::default().with_search("watch"),
            &path,
            &mut out,
        )
        .unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("Sport Watch"));
        assert!(!html.contains("Backpack"));
        assert!(String::from_utf8(out).unwrap().starts_with("Wrote "));
    }

    #[test]
    fn test_render_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("shop.html");
        let err = render(
            &mut test_controller(),
            DisplayOptions::default(),
            &path,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::WriteFile { .. }));
    }
}
