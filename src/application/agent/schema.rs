use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};

use crate::domain::surface::ComponentKind;

static COMPONENT_SCHEMA: Lazy<Value> = Lazy::new(build_schema);

/// JSON Schema-shaped description of the surface update format.
pub fn component_schema() -> &'static Value {
    &COMPONENT_SCHEMA
}

fn build_schema() -> Value {
    let mut components = Map::new();
    for kind in ComponentKind::ALL {
        components.insert(kind.as_str().to_string(), component_props(kind));
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "A2UI surface update",
        "type": "object",
        "required": ["surfaceUpdate"],
        "properties": {
            "surfaceUpdate": {
                "type": "object",
                "required": ["surfaceId", "components"],
                "properties": {
                    "surfaceId": { "type": "string" },
                    "components": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["id", "component"],
                            "properties": {
                                "id": { "type": "string" },
                                "component": {
                                    "type": "object",
                                    "minProperties": 1,
                                    "maxProperties": 1,
                                    "description": "Single key naming the component type.",
                                },
                            },
                        },
                    },
                },
            },
        },
        "definitions": {
            "StyleOptions": style_options(),
            "components": Value::Object(components),
        },
    })
}

fn enumeration(values: &[&str]) -> Value {
    json!({ "type": "string", "enum": values })
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn style_ref() -> Value {
    json!({ "$ref": "#/definitions/StyleOptions" })
}

fn style_options() -> Value {
    json!({
        "type": "object",
        "properties": {
            "backgroundColor": { "type": "string" },
            "textColor": { "type": "string" },
            "accentColor": { "type": "string" },
            "borderRadius": enumeration(&["none", "small", "medium", "large", "full"]),
            "padding": enumeration(&["none", "small", "medium", "large"]),
            "fontSize": enumeration(&["small", "medium", "large", "xlarge"]),
            "fontWeight": enumeration(&["normal", "medium", "semibold", "bold"]),
            "shadow": enumeration(&["none", "small", "medium", "large"]),
            "border": {
                "type": "object",
                "properties": {
                    "width": { "type": "number" },
                    "color": { "type": "string" },
                    "style": enumeration(&["solid", "dashed", "dotted"]),
                },
            },
            "gradient": {
                "type": "object",
                "required": ["from", "to"],
                "properties": {
                    "from": { "type": "string" },
                    "to": { "type": "string" },
                    "direction": enumeration(&["to-right", "to-left", "to-bottom", "to-top", "diagonal"]),
                },
            },
        },
    })
}

fn component_props(kind: ComponentKind) -> Value {
    let (required, properties): (&[&str], Value) = match kind {
        ComponentKind::HeroSection => (
            &["title"],
            json!({
                "title": { "type": "string" },
                "subtitle": { "type": "string" },
                "imageUrl": { "type": "string" },
                "overlay": { "type": "boolean" },
                "height": enumeration(&["small", "medium", "large", "full"]),
                "style": style_ref(),
            }),
        ),
        ComponentKind::TextBlock => (
            &["content"],
            json!({
                "content": { "type": "string", "description": "Markdown." },
                "variant": enumeration(&["body", "lead", "small"]),
                "style": style_ref(),
            }),
        ),
        ComponentKind::ImageGallery => (
            &["images"],
            json!({
                "images": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["url"],
                        "properties": {
                            "url": { "type": "string" },
                            "caption": { "type": "string" },
                            "alt": { "type": "string" },
                        },
                    },
                },
                "columns": { "type": "integer", "minimum": 1, "maximum": 4 },
                "lightbox": { "type": "boolean" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::CodeBlock => (
            &["code"],
            json!({
                "code": { "type": "string" },
                "language": { "type": "string" },
                "title": { "type": "string" },
                "showLineNumbers": { "type": "boolean" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Card => (
            &[],
            json!({
                "title": { "type": "string" },
                "content": { "type": "string", "description": "Markdown." },
                "imageUrl": { "type": "string" },
                "variant": enumeration(&["elevated", "outlined", "filled"]),
                "style": style_ref(),
            }),
        ),
        ComponentKind::Column => (
            &["children"],
            json!({
                "children": string_array(),
                "gap": enumeration(&["none", "small", "medium", "large"]),
                "align": enumeration(&["start", "center", "end", "stretch"]),
                "style": style_ref(),
            }),
        ),
        ComponentKind::Row => (
            &["children"],
            json!({
                "children": string_array(),
                "gap": enumeration(&["none", "small", "medium", "large"]),
                "wrap": { "type": "boolean" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Callout => (
            &["content"],
            json!({
                "content": { "type": "string", "description": "Markdown." },
                "type": enumeration(&["info", "warning", "success", "tip"]),
                "title": { "type": "string" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::List => (
            &["items"],
            json!({
                "items": string_array(),
                "ordered": { "type": "boolean" },
                "icon": { "type": "string" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Quote => (
            &["text"],
            json!({
                "text": { "type": "string" },
                "author": { "type": "string" },
                "source": { "type": "string" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Table => (
            &["headers", "rows"],
            json!({
                "headers": string_array(),
                "rows": { "type": "array", "items": string_array() },
                "caption": { "type": "string" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Metadata => (
            &[],
            json!({
                "author": { "type": "string" },
                "date": { "type": "string" },
                "tags": string_array(),
                "readTime": { "type": "string" },
                "style": style_ref(),
            }),
        ),
        ComponentKind::Divider => (
            &[],
            json!({
                "style": enumeration(&["solid", "dashed", "dotted"]),
                "styleProps": style_ref(),
            }),
        ),
    };

    json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}
