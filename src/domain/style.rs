use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::scale::{lenient_field, lenient_number, lenient_text};

scale!(
    /// Corner rounding scale.
    BorderRadius {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
        Full => "full",
    }
);

scale!(
    /// Inner spacing scale.
    Padding {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
);

scale!(
    FontSize {
        Small => "small",
        Medium => "medium",
        Large => "large",
        XLarge => "xlarge",
    }
);

scale!(
    FontWeight {
        Normal => "normal",
        Medium => "medium",
        Semibold => "semibold",
        Bold => "bold",
    }
);

scale!(
    /// Elevation scale rendered as a box shadow.
    Shadow {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
);

scale!(
    /// Stroke used by borders and dividers.
    StrokeStyle {
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
    }
);

scale!(
    GradientDirection {
        ToRight => "to-right",
        ToLeft => "to-left",
        ToBottom => "to-bottom",
        ToTop => "to-top",
        Diagonal => "diagonal",
    }
);

scale!(
    /// Spacing between the children of a Row or Column.
    Gap {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StrokeStyle>,
}

impl BorderSpec {
    /// `None` unless `value` is an object; unusable fields are left unset.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            width: map.get("width").and_then(lenient_number),
            color: map.get("color").and_then(lenient_text),
            style: lenient_field(map, "style"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientSpec {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<GradientDirection>,
}

impl GradientSpec {
    /// A gradient needs both end colors; anything less is dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            from: map.get("from").and_then(lenient_text)?,
            to: map.get("to").and_then(lenient_text)?,
            direction: lenient_field(map, "direction"),
        })
    }
}

/// Visual styling options accepted by every component type.
///
/// All fields are independent and optional. Colors are raw CSS values and are
/// not validated here. Parsing never fails: a field of the wrong shape is
/// treated as absent, and a non-object `style` yields empty options.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<GradientSpec>,
}

impl StyleOptions {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            background_color: map.get("backgroundColor").and_then(lenient_text),
            text_color: map.get("textColor").and_then(lenient_text),
            accent_color: map.get("accentColor").and_then(lenient_text),
            border_radius: lenient_field(map, "borderRadius"),
            padding: lenient_field(map, "padding"),
            font_size: lenient_field(map, "fontSize"),
            font_weight: lenient_field(map, "fontWeight"),
            shadow: lenient_field(map, "shadow"),
            border: map.get("border").and_then(BorderSpec::from_value),
            gradient: map.get("gradient").and_then(GradientSpec::from_value),
        }
    }
}

impl<'de> Deserialize<'de> for StyleOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_fields() {
        let options: StyleOptions = serde_json::from_str(
            r##"{
                "backgroundColor": "#0f172a",
                "borderRadius": "small",
                "fontWeight": "bold",
                "border": { "width": 2 },
                "gradient": { "from": "#000", "to": "#fff" }
            }"##,
        )
        .unwrap();

        assert_eq!(options.background_color.as_deref(), Some("#0f172a"));
        assert_eq!(options.border_radius, Some(BorderRadius::Small));
        assert_eq!(options.font_weight, Some(FontWeight::Bold));
        assert_eq!(options.border.unwrap().width, Some(2.0));
        assert_eq!(options.gradient.unwrap().direction, None);
    }

    #[test]
    fn unknown_scale_values_survive_parsing() {
        let options: StyleOptions =
            serde_json::from_str(r#"{ "padding": "3px", "shadow": 4 }"#).unwrap();

        assert_eq!(options.padding, Some(Padding::Other("3px".into())));
        assert_eq!(options.shadow, Some(Shadow::Other("4".into())));
    }

    #[test]
    fn malformed_fields_are_dropped_not_fatal() {
        let options: StyleOptions = serde_json::from_value(serde_json::json!({
            "textColor": 5,
            "backgroundColor": ["red"],
            "border": { "width": "2", "color": null, "style": { "bad": true } },
            "gradient": { "from": "#000" },
            "padding": "large"
        }))
        .unwrap();

        assert_eq!(options.text_color.as_deref(), Some("5"));
        assert_eq!(options.background_color, None);
        assert_eq!(
            options.border,
            Some(BorderSpec {
                width: Some(2.0),
                color: None,
                style: None,
            })
        );
        assert_eq!(options.gradient, None);
        assert_eq!(options.padding, Some(Padding::Large));
    }

    #[test]
    fn non_object_style_yields_empty_options() {
        for raw in [r#""red""#, "42", "[1, 2]", "true"] {
            let options: StyleOptions = serde_json::from_str(raw).unwrap();
            assert_eq!(options, StyleOptions::default(), "{raw}");
        }
    }

    #[test]
    fn border_width_accepts_numeric_strings_only() {
        let border = BorderSpec::from_value(&serde_json::json!({ "width": "thick" })).unwrap();
        assert_eq!(border.width, None);
        assert_eq!(BorderSpec::from_value(&serde_json::json!("1px solid")), None);
    }
}
