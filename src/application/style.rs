//! Style options to inline CSS declarations.
//!
//! Compilation is pure and total: every recognised field yields at most one
//! declaration and unknown scale values pass through as literal CSS.

use std::fmt::Write as _;

use crate::domain::style::{Gap, StyleOptions};

use super::markdown::sanitize_style_attribute;

pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;
pub const DEFAULT_BORDER_STYLE: &str = "solid";
pub const DEFAULT_BORDER_COLOR: &str = "#e0e0e0";
pub const DEFAULT_GAP: &str = "1rem";
pub const ACCENT_PROPERTY: &str = "--a2ui-accent";

type Scale = &'static [(&'static str, &'static str)];

/// Read-only keyword to CSS value tables.
#[derive(Debug, Clone, Copy)]
pub struct ScaleTables {
    pub radius: Scale,
    pub padding: Scale,
    pub font_size: Scale,
    pub font_weight: Scale,
    pub shadow: Scale,
    pub direction: Scale,
    pub gap: Scale,
}

impl ScaleTables {
    pub const STANDARD: ScaleTables = ScaleTables {
        radius: &[
            ("none", "0"),
            ("small", "4px"),
            ("medium", "8px"),
            ("large", "16px"),
            ("full", "9999px"),
        ],
        padding: &[
            ("none", "0"),
            ("small", "0.5rem"),
            ("medium", "1rem"),
            ("large", "2rem"),
        ],
        font_size: &[
            ("small", "0.875rem"),
            ("medium", "1rem"),
            ("large", "1.25rem"),
            ("xlarge", "1.5rem"),
        ],
        font_weight: &[
            ("normal", "400"),
            ("medium", "500"),
            ("semibold", "600"),
            ("bold", "700"),
        ],
        shadow: &[
            ("none", "none"),
            ("small", "0 2px 4px rgba(0, 0, 0, 0.1)"),
            ("medium", "0 4px 12px rgba(0, 0, 0, 0.15)"),
            ("large", "0 8px 24px rgba(0, 0, 0, 0.2)"),
        ],
        direction: &[
            ("to-right", "to right"),
            ("to-left", "to left"),
            ("to-bottom", "to bottom"),
            ("to-top", "to top"),
            ("diagonal", "135deg"),
        ],
        gap: &[
            ("none", "0"),
            ("small", "0.5rem"),
            ("medium", "1rem"),
            ("large", "2rem"),
        ],
    };
}

impl Default for ScaleTables {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn scale_value(scale: Scale, keyword: &str) -> Option<&'static str> {
    scale
        .iter()
        .find(|(key, _)| *key == keyword)
        .map(|(_, value)| *value)
}

/// Looks `keyword` up in `scale`, passing unknown values through verbatim.
fn lookup<'a>(scale: Scale, keyword: &'a str) -> &'a str {
    scale_value(scale, keyword).unwrap_or(keyword)
}

/// Ordered list of `property: value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations(Vec<(&'static str, String)>);

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.0.push((property, value.into()));
    }

    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.push(property, value);
        self
    }

    /// Appends `other` after the current declarations. Later entries win in CSS.
    pub fn extend(&mut self, other: StyleDeclarations) {
        self.0.extend(other.0);
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// `prop: value; prop: value`, without a trailing separator.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (index, (property, value)) in self.0.iter().enumerate() {
            if index > 0 {
                css.push_str("; ");
            }
            let _ = write!(css, "{property}: {value}");
        }
        css
    }

    /// The CSS string with unsafe declarations removed, ready for a `style`
    /// attribute.
    pub fn to_safe_css(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        sanitize_style_attribute(&self.to_css())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleCompiler {
    tables: ScaleTables,
}

impl StyleCompiler {
    pub const fn new(tables: ScaleTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ScaleTables {
        &self.tables
    }

    pub fn compile(&self, options: Option<&StyleOptions>) -> StyleDeclarations {
        let mut out = StyleDeclarations::new();
        let Some(options) = options else {
            return out;
        };
        let tables = &self.tables;

        if let Some(gradient) = &options.gradient {
            let direction = gradient
                .direction
                .as_ref()
                .map(|dir| lookup(tables.direction, dir.as_str()))
                .unwrap_or("135deg");
            out.push(
                "background",
                format!("linear-gradient({direction}, {}, {})", gradient.from, gradient.to),
            );
        } else if let Some(color) = &options.background_color {
            out.push("background-color", color.as_str());
        }

        if let Some(color) = &options.text_color {
            out.push("color", color.as_str());
        }
        if let Some(color) = &options.accent_color {
            out.push(ACCENT_PROPERTY, color.as_str());
        }
        if let Some(radius) = &options.border_radius {
            out.push("border-radius", lookup(tables.radius, radius.as_str()));
        }
        if let Some(padding) = &options.padding {
            out.push("padding", lookup(tables.padding, padding.as_str()));
        }
        if let Some(size) = &options.font_size {
            out.push("font-size", lookup(tables.font_size, size.as_str()));
        }
        if let Some(weight) = &options.font_weight {
            out.push("font-weight", lookup(tables.font_weight, weight.as_str()));
        }
        if let Some(shadow) = &options.shadow {
            out.push("box-shadow", lookup(tables.shadow, shadow.as_str()));
        }
        if let Some(border) = &options.border {
            let width = border.width.unwrap_or(DEFAULT_BORDER_WIDTH);
            let style = border
                .style
                .as_ref()
                .map(|style| style.as_str())
                .unwrap_or(DEFAULT_BORDER_STYLE);
            let color = border.color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR);
            out.push("border", format!("{width}px {style} {color}"));
        }

        out
    }

    /// Spacing for Row/Column children. Unknown values use the default gap.
    pub fn gap(&self, gap: Option<&Gap>) -> &'static str {
        gap.and_then(|gap| scale_value(self.tables.gap, gap.as_str()))
            .unwrap_or(DEFAULT_GAP)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::style::{
        BorderRadius, BorderSpec, FontSize, FontWeight, GradientDirection, GradientSpec, Padding,
        Shadow, StrokeStyle,
    };

    fn compile(options: &StyleOptions) -> StyleDeclarations {
        StyleCompiler::default().compile(Some(options))
    }

    #[test]
    fn absent_options_compile_to_nothing() {
        assert!(StyleCompiler::default().compile(None).is_empty());
        assert!(compile(&StyleOptions::default()).is_empty());
    }

    #[test]
    fn gradient_wins_over_background_color() {
        let options = StyleOptions {
            background_color: Some("#ff0000".into()),
            gradient: Some(GradientSpec {
                from: "#000".into(),
                to: "#fff".into(),
                direction: Some(GradientDirection::ToRight),
            }),
            ..StyleOptions::default()
        };

        let css = compile(&options);
        assert_eq!(
            css.get("background"),
            Some("linear-gradient(to right, #000, #fff)")
        );
        assert!(!css.contains("background-color"));
    }

    #[test]
    fn gradient_direction_defaults_to_diagonal() {
        let options = StyleOptions {
            gradient: Some(GradientSpec {
                from: "red".into(),
                to: "blue".into(),
                direction: None,
            }),
            ..StyleOptions::default()
        };
        assert_eq!(
            compile(&options).get("background"),
            Some("linear-gradient(135deg, red, blue)")
        );
    }

    #[test]
    fn maps_scales_in_declaration_order() {
        let options = StyleOptions {
            background_color: Some("#111".into()),
            text_color: Some("white".into()),
            accent_color: Some("#f59e0b".into()),
            border_radius: Some(BorderRadius::Large),
            padding: Some(Padding::Small),
            font_size: Some(FontSize::XLarge),
            font_weight: Some(FontWeight::Semibold),
            shadow: Some(Shadow::Medium),
            border: None,
            gradient: None,
        };

        assert_eq!(
            compile(&options).to_css(),
            "background-color: #111; color: white; --a2ui-accent: #f59e0b; \
             border-radius: 16px; padding: 0.5rem; font-size: 1.5rem; font-weight: 600; \
             box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15)"
        );
    }

    #[test]
    fn unknown_scale_values_pass_through() {
        let options = StyleOptions {
            padding: Some(Padding::Other("3px 6px".into())),
            border_radius: Some(BorderRadius::Other("50%".into())),
            ..StyleOptions::default()
        };
        let css = compile(&options);
        assert_eq!(css.get("padding"), Some("3px 6px"));
        assert_eq!(css.get("border-radius"), Some("50%"));
    }

    #[test]
    fn border_fills_in_defaults() {
        let options = StyleOptions {
            border: Some(BorderSpec::default()),
            ..StyleOptions::default()
        };
        assert_eq!(compile(&options).get("border"), Some("1px solid #e0e0e0"));

        let options = StyleOptions {
            border: Some(BorderSpec {
                width: Some(0.0),
                color: Some("teal".into()),
                style: Some(StrokeStyle::Dashed),
            }),
            ..StyleOptions::default()
        };
        assert_eq!(compile(&options).get("border"), Some("0px dashed teal"));
    }

    #[test]
    fn compile_is_idempotent() {
        let options = StyleOptions {
            text_color: Some("navy".into()),
            shadow: Some(Shadow::Small),
            ..StyleOptions::default()
        };
        assert_eq!(compile(&options), compile(&options));
    }

    #[test]
    fn safe_css_drops_script_urls() {
        let options = StyleOptions {
            background_color: Some("url(javascript:alert(1))".into()),
            text_color: Some("red".into()),
            ..StyleOptions::default()
        };
        assert_eq!(compile(&options).to_safe_css().as_deref(), Some("color: red"));
    }

    #[test]
    fn gap_falls_back_for_unknown_values() {
        let compiler = StyleCompiler::default();
        assert_eq!(compiler.gap(None), "1rem");
        assert_eq!(compiler.gap(Some(&Gap::None)), "0");
        assert_eq!(compiler.gap(Some(&Gap::Large)), "2rem");
        assert_eq!(compiler.gap(Some(&Gap::Other("huge".into()))), "1rem");
    }
}
