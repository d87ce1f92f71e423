use iced::Color;
use serde::{Deserialize, Serialize};

use crate::aqi::StyleClass;

// ─── THEME VARIANTS ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeVariant {
    /// Light dashboard look with a blue accent.
    #[default]
    Classic,
    CatppuccinLatte,
    CatppuccinMocha,
    GruvboxDark,
}

impl ThemeVariant {
    #[cfg(test)]
    pub const ALL: &[ThemeVariant] = &[
        ThemeVariant::Classic,
        ThemeVariant::CatppuccinLatte,
        ThemeVariant::CatppuccinMocha,
        ThemeVariant::GruvboxDark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeVariant::Classic => "Classic",
            ThemeVariant::CatppuccinLatte => "Latte",
            ThemeVariant::CatppuccinMocha => "Mocha",
            ThemeVariant::GruvboxDark => "Gruvbox",
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self, ThemeVariant::Classic | ThemeVariant::CatppuccinLatte)
    }
}

impl std::fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── PALETTE ────────────────────────────────────────────────────

/// All semantic colors the app uses.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub panel_bg: Color,
    pub sidebar_bg: Color,
    pub border: Color,
    pub label: Color,
    pub text: Color,
    pub accent: Color,
    // Chart canvas
    pub chart_bg: Color,
    pub grid: Color,
    pub axis_label: Color,
    pub line: Color,
    pub value_label: Color,
    pub guide: Color,
    pub marker_fill: Color,
    pub tooltip_bg: Color,
    pub tooltip_text: Color,
    // Status tiers
    pub good: Color,
    pub ok: Color,
    pub bad: Color,
}

impl Palette {
    pub fn tier_color(&self, class: StyleClass) -> Color {
        match class {
            StyleClass::Good => self.good,
            StyleClass::Ok => self.ok,
            StyleClass::Bad => self.bad,
        }
    }
}

pub fn build_palette(theme: ThemeVariant) -> Palette {
    match theme {
        // ── Classic ──
        ThemeVariant::Classic => Palette {
            bg:           hex(0xff, 0xff, 0xff),
            panel_bg:     hex(0xff, 0xff, 0xff),
            sidebar_bg:   hex(0xf8, 0xf9, 0xfa),
            border:       hex(0xde, 0xe2, 0xe6),
            label:        hex(0x6c, 0x75, 0x7d),
            text:         hex(0x21, 0x25, 0x29),
            accent:       hex(0x0d, 0x6e, 0xfd),
            chart_bg:     Color::from_rgb(0.95, 0.95, 0.95),
            grid:         Color::from_rgb(0.8, 0.8, 0.8),
            axis_label:   Color::from_rgb(0.4, 0.4, 0.4),
            line:         Color::from_rgb(0.2, 0.6, 1.0),
            value_label:  Color::from_rgba(0.1, 0.1, 0.1, 0.8),
            guide:        Color::from_rgba(0.5, 0.5, 0.5, 0.8),
            marker_fill:  Color::WHITE,
            tooltip_bg:   Color::from_rgba(0.2, 0.2, 0.2, 0.9),
            tooltip_text: Color::WHITE,
            good:         hex(0x19, 0x87, 0x54),
            ok:           hex(0xfd, 0x7e, 0x14),
            bad:          hex(0xdc, 0x35, 0x45),
        },
        // ── Catppuccin Latte ──
        ThemeVariant::CatppuccinLatte => Palette {
            bg:           hex(0xef, 0xf1, 0xf5),
            panel_bg:     hex(0xe6, 0xe9, 0xef),
            sidebar_bg:   hex(0xdc, 0xe0, 0xe8),
            border:       hex(0xcc, 0xd0, 0xda),
            label:        hex(0x6c, 0x6f, 0x85),
            text:         hex(0x4c, 0x4f, 0x69),
            accent:       hex(0x1e, 0x66, 0xf5),
            chart_bg:     hex(0xe6, 0xe9, 0xef),
            grid:         Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            axis_label:   hex(0x6c, 0x6f, 0x85),
            line:         hex(0x1e, 0x66, 0xf5),
            value_label:  hex(0x4c, 0x4f, 0x69),
            guide:        hex(0x9c, 0xa0, 0xb0),
            marker_fill:  hex(0xef, 0xf1, 0xf5),
            tooltip_bg:   hex(0x4c, 0x4f, 0x69),
            tooltip_text: hex(0xef, 0xf1, 0xf5),
            good:         hex(0x40, 0xa0, 0x2b),
            ok:           hex(0xdf, 0x8e, 0x1d),
            bad:          hex(0xd2, 0x0f, 0x39),
        },
        // ── Catppuccin Mocha ──
        ThemeVariant::CatppuccinMocha => Palette {
            bg:           hex(0x1e, 0x1e, 0x2e),
            panel_bg:     hex(0x18, 0x18, 0x25),
            sidebar_bg:   hex(0x11, 0x11, 0x1b),
            border:       hex(0x31, 0x32, 0x44),
            label:        hex(0xa6, 0xad, 0xc8),
            text:         hex(0xcd, 0xd6, 0xf4),
            accent:       hex(0x89, 0xb4, 0xfa),
            chart_bg:     hex(0x18, 0x18, 0x25),
            grid:         Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            axis_label:   hex(0xa6, 0xad, 0xc8),
            line:         hex(0x89, 0xb4, 0xfa),
            value_label:  hex(0xcd, 0xd6, 0xf4),
            guide:        hex(0x6c, 0x70, 0x86),
            marker_fill:  hex(0x1e, 0x1e, 0x2e),
            tooltip_bg:   hex(0x31, 0x32, 0x44),
            tooltip_text: hex(0xcd, 0xd6, 0xf4),
            good:         hex(0xa6, 0xe3, 0xa1),
            ok:           hex(0xf9, 0xe2, 0xaf),
            bad:          hex(0xf3, 0x8b, 0xa8),
        },
        // ── Gruvbox Dark ──
        ThemeVariant::GruvboxDark => Palette {
            bg:           hex(0x28, 0x28, 0x28),
            panel_bg:     hex(0x1d, 0x20, 0x21),
            sidebar_bg:   hex(0x17, 0x19, 0x1a),
            border:       hex(0x3c, 0x38, 0x36),
            label:        hex(0xa8, 0x99, 0x84),
            text:         hex(0xeb, 0xdb, 0xb2),
            accent:       hex(0x83, 0xa5, 0x98),
            chart_bg:     hex(0x1d, 0x20, 0x21),
            grid:         Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            axis_label:   hex(0xa8, 0x99, 0x84),
            line:         hex(0x83, 0xa5, 0x98),
            value_label:  hex(0xeb, 0xdb, 0xb2),
            guide:        hex(0x92, 0x83, 0x74),
            marker_fill:  hex(0x28, 0x28, 0x28),
            tooltip_bg:   hex(0x3c, 0x38, 0x36),
            tooltip_text: hex(0xeb, 0xdb, 0xb2),
            good:         hex(0xb8, 0xbb, 0x26),
            ok:           hex(0xfa, 0xbd, 0x2f),
            bad:          hex(0xfb, 0x49, 0x34),
        },
    }
}

const fn hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Same color with a new alpha.
pub fn with_alpha(c: Color, a: f32) -> Color {
    Color { a, ..c }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors_are_distinct() {
        for &variant in ThemeVariant::ALL {
            let p = build_palette(variant);
            assert_ne!(p.tier_color(StyleClass::Good), p.tier_color(StyleClass::Bad));
            assert_ne!(p.tier_color(StyleClass::Ok), p.tier_color(StyleClass::Bad));
        }
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = with_alpha(Color::from_rgb(0.2, 0.6, 1.0), 0.4);
        assert_eq!((c.r, c.g, c.b, c.a), (0.2, 0.6, 1.0, 0.4));
    }
}
