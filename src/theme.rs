//! Built-in palettes and their selection from config.

use ratatui::style::Color;

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Files panel
    pub list_fg: Color,
    pub list_selected_bg: Color,
    pub list_selected_fg: Color,
    pub list_dir_fg: Color,
    pub list_index_fg: Color,

    // Info and command panels
    pub text_fg: Color,
    pub title_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border_fg: Color,

    // Semantic colors
    pub error_fg: Color,
    pub success_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        list_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        list_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        list_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        list_index_fg: Color::Rgb(108, 112, 134),    // #6c7086 (overlay0)

        text_fg: Color::Rgb(205, 214, 244),
        title_fg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112),           // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250), // #89b4fa (blue)

        dialog_bg: Color::Rgb(49, 50, 68), // #313244 (surface0)
        dialog_border_fg: Color::Rgb(243, 139, 168),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        accent_fg: Color::Rgb(249, 226, 175),  // #f9e2af (yellow)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086
    }
}

/// Light theme, Catppuccin Latte.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(76, 79, 105),            // #4c4f69 (text)
        list_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        list_selected_fg: Color::Rgb(76, 79, 105),
        list_dir_fg: Color::Rgb(30, 102, 245),      // #1e66f5 (blue)
        list_index_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)

        text_fg: Color::Rgb(76, 79, 105),
        title_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),

        dialog_bg: Color::Rgb(230, 233, 239), // #e6e9ef (surface0)
        dialog_border_fg: Color::Rgb(210, 15, 57),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        accent_fg: Color::Rgb(223, 142, 29),  // #df8e1d (yellow)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

/// Palette for a scheme name; anything unrecognized is dark.
pub fn resolve_theme(scheme: &str) -> ThemeColors {
    match scheme {
        "light" => light_theme(),
        _ => dark_theme(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_light_theme() {
        assert_eq!(resolve_theme("light").list_dir_fg, Color::Rgb(30, 102, 245));
    }

    #[test]
    fn test_resolve_dark_theme() {
        let theme = resolve_theme("dark");
        assert_eq!(theme.list_dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_unknown_scheme_falls_back_to_dark() {
        assert_eq!(resolve_theme("neon").list_dir_fg, Color::Rgb(137, 180, 250));
    }

    #[test]
    fn test_dark_and_light_different() {
        let dark = dark_theme();
        let light = light_theme();
        assert_ne!(dark.list_fg, light.list_fg);
        assert_ne!(dark.list_selected_bg, light.list_selected_bg);
        assert_ne!(dark.error_fg, light.error_fg);
    }
}
