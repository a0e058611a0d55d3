//! Theme commands.

use std::io::Write;

use bazaar_storefront::controller::Controller;

use super::CommandError;

/// Print the active theme and where it came from.
pub fn show<W: Write>(ctl: &Controller, out: &mut W) -> Result<(), CommandError> {
    let theme = ctl.theme();
    let source = if theme.is_explicit() { "chosen" } else { "default" };
    writeln!(out, "{} ({source}) {}", theme.theme(), theme.toggle_label())?;
    Ok(())
}

/// Flip the theme and print the new one.
pub fn toggle<W: Write>(ctl: &mut Controller, out: &mut W) -> Result<(), CommandError> {
    let theme = ctl.toggle_theme();
    writeln!(out, "{theme} {}", ctl.root().toggle_label())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_controller;

    #[test]
    fn test_show_then_toggle() {
        let mut ctl = test_controller();

        let mut out = Vec::new();
        show(&ctl, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "light (default) \u{1f319}\n");

        let mut out = Vec::new();
        toggle(&mut ctl, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "dark \u{2600}\u{fe0f}\n");

        let mut out = Vec::new();
        show(&ctl, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("dark (chosen)"));
    }
}
