//! Wire model for A2UI surfaces.
//!
//! A surface update is a flat list of `{ id, component: { <Type>: props } }`
//! entries. Parsing is tolerant per entry: a component whose type is unknown
//! or whose props do not match the type's contract becomes
//! [`ComponentNode::Unknown`] or [`ComponentNode::Invalid`], and an entry that
//! is not shaped like a component at all becomes [`ComponentNode::Malformed`].
//! None of these fail the whole update.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scale::{lenient_number, lenient_text};
use super::style::{Gap, StrokeStyle, StyleOptions};

scale!(
    HeroHeight {
        Small => "small",
        Medium => "medium",
        Large => "large",
        Full => "full",
    }
);

scale!(
    TextVariant {
        Body => "body",
        Lead => "lead",
        Small => "small",
    }
);

scale!(
    CardVariant {
        Elevated => "elevated",
        Outlined => "outlined",
        Filled => "filled",
    }
);

scale!(
    CalloutKind {
        Info => "info",
        Warning => "warning",
        Success => "success",
        Tip => "tip",
    }
);

scale!(
    ColumnAlign {
        Start => "start",
        Center => "center",
        End => "end",
        Stretch => "stretch",
    }
);

/// Top-level message produced by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEnvelope {
    #[serde(rename = "surfaceUpdate")]
    pub surface_update: SurfaceUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceUpdate {
    pub surface_id: String,
    pub components: Vec<ComponentEntry>,
}

impl SurfaceUpdate {
    pub fn new(surface_id: impl Into<String>, components: Vec<ComponentEntry>) -> Self {
        Self {
            surface_id: surface_id.into(),
            components,
        }
    }
}

impl From<SurfaceUpdate> for SurfaceEnvelope {
    fn from(surface_update: SurfaceUpdate) -> Self {
        Self { surface_update }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentEntry {
    pub id: String,
    pub component: ComponentNode,
}

impl ComponentEntry {
    pub fn new(id: impl Into<String>, component: ComponentNode) -> Self {
        Self {
            id: id.into(),
            component,
        }
    }

    /// Builds an entry from raw JSON. A scalar id is kept as text, any other
    /// id becomes empty, and a missing component yields a malformed node.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            let component = ComponentNode::malformed(value, "entry must be an object");
            return Self::new(String::new(), component);
        };
        let id = map.get("id").and_then(lenient_text).unwrap_or_default();
        let component = match map.remove("component") {
            Some(component) => ComponentNode::from_value(component),
            None => ComponentNode::malformed(Value::Null, "entry has no component"),
        };
        Self { id, component }
    }
}

impl<'de> Deserialize<'de> for ComponentEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ComponentEntry::from_value(value))
    }
}

/// The closed set of component types the registry knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    HeroSection,
    TextBlock,
    ImageGallery,
    CodeBlock,
    Card,
    Column,
    Row,
    Callout,
    List,
    Quote,
    Table,
    Metadata,
    Divider,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 13] = [
        ComponentKind::HeroSection,
        ComponentKind::TextBlock,
        ComponentKind::ImageGallery,
        ComponentKind::CodeBlock,
        ComponentKind::Card,
        ComponentKind::Column,
        ComponentKind::Row,
        ComponentKind::Callout,
        ComponentKind::List,
        ComponentKind::Quote,
        ComponentKind::Table,
        ComponentKind::Metadata,
        ComponentKind::Divider,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::HeroSection => "HeroSection",
            ComponentKind::TextBlock => "TextBlock",
            ComponentKind::ImageGallery => "ImageGallery",
            ComponentKind::CodeBlock => "CodeBlock",
            ComponentKind::Card => "Card",
            ComponentKind::Column => "Column",
            ComponentKind::Row => "Row",
            ComponentKind::Callout => "Callout",
            ComponentKind::List => "List",
            ComponentKind::Quote => "Quote",
            ComponentKind::Table => "Table",
            ComponentKind::Metadata => "Metadata",
            ComponentKind::Divider => "Divider",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentNode {
    HeroSection(HeroSectionProps),
    TextBlock(TextBlockProps),
    ImageGallery(ImageGalleryProps),
    CodeBlock(CodeBlockProps),
    Card(CardProps),
    Column(ColumnProps),
    Row(RowProps),
    Callout(CalloutProps),
    List(ListProps),
    Quote(QuoteProps),
    Table(TableProps),
    Metadata(MetadataProps),
    Divider(DividerProps),
    /// Type tag outside the registry.
    Unknown { tag: String, props: Value },
    /// Known type tag whose props failed to parse.
    Invalid {
        tag: String,
        props: Value,
        reason: String,
    },
    /// Component value that is not a single-key object; `raw` is kept as sent.
    Malformed { raw: Value, reason: String },
}

impl ComponentNode {
    pub fn tag(&self) -> &str {
        match self.kind() {
            Some(kind) => kind.as_str(),
            None => match self {
                ComponentNode::Unknown { tag, .. } | ComponentNode::Invalid { tag, .. } => tag,
                _ => "",
            },
        }
    }

    pub fn kind(&self) -> Option<ComponentKind> {
        let kind = match self {
            ComponentNode::HeroSection(_) => ComponentKind::HeroSection,
            ComponentNode::TextBlock(_) => ComponentKind::TextBlock,
            ComponentNode::ImageGallery(_) => ComponentKind::ImageGallery,
            ComponentNode::CodeBlock(_) => ComponentKind::CodeBlock,
            ComponentNode::Card(_) => ComponentKind::Card,
            ComponentNode::Column(_) => ComponentKind::Column,
            ComponentNode::Row(_) => ComponentKind::Row,
            ComponentNode::Callout(_) => ComponentKind::Callout,
            ComponentNode::List(_) => ComponentKind::List,
            ComponentNode::Quote(_) => ComponentKind::Quote,
            ComponentNode::Table(_) => ComponentKind::Table,
            ComponentNode::Metadata(_) => ComponentKind::Metadata,
            ComponentNode::Divider(_) => ComponentKind::Divider,
            ComponentNode::Unknown { .. }
            | ComponentNode::Invalid { .. }
            | ComponentNode::Malformed { .. } => return None,
        };
        Some(kind)
    }

    /// Ids referenced by a layout container, in declared order.
    pub fn child_ids(&self) -> &[String] {
        match self {
            ComponentNode::Column(props) => &props.children,
            ComponentNode::Row(props) => &props.children,
            _ => &[],
        }
    }

    fn malformed(raw: Value, reason: impl Into<String>) -> Self {
        ComponentNode::Malformed {
            raw,
            reason: reason.into(),
        }
    }

    /// Builds a node from the raw `{ <Type>: props }` object.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return ComponentNode::malformed(value, "component must be an object keyed by its type");
        };

        if map.len() > 1 {
            let reason = format!("expected exactly one type key, found {}", map.len());
            return ComponentNode::malformed(Value::Object(map), reason);
        }

        // An empty object carries no type at all.
        let Some((tag, props)) = map.into_iter().next() else {
            return ComponentNode::Unknown {
                tag: String::new(),
                props: Value::Null,
            };
        };

        match ComponentKind::from_tag(&tag) {
            Some(kind) => match parse_props(kind, props.clone()) {
                Ok(node) => node,
                Err(err) => ComponentNode::Invalid {
                    tag,
                    props,
                    reason: err.to_string(),
                },
            },
            None => ComponentNode::Unknown { tag, props },
        }
    }
}

fn parse_props(kind: ComponentKind, props: Value) -> Result<ComponentNode, serde_json::Error> {
    let node = match kind {
        ComponentKind::HeroSection => ComponentNode::HeroSection(serde_json::from_value(props)?),
        ComponentKind::TextBlock => ComponentNode::TextBlock(serde_json::from_value(props)?),
        ComponentKind::ImageGallery => ComponentNode::ImageGallery(serde_json::from_value(props)?),
        ComponentKind::CodeBlock => ComponentNode::CodeBlock(serde_json::from_value(props)?),
        ComponentKind::Card => ComponentNode::Card(serde_json::from_value(props)?),
        ComponentKind::Column => ComponentNode::Column(serde_json::from_value(props)?),
        ComponentKind::Row => ComponentNode::Row(serde_json::from_value(props)?),
        ComponentKind::Callout => ComponentNode::Callout(serde_json::from_value(props)?),
        ComponentKind::List => ComponentNode::List(serde_json::from_value(props)?),
        ComponentKind::Quote => ComponentNode::Quote(serde_json::from_value(props)?),
        ComponentKind::Table => ComponentNode::Table(serde_json::from_value(props)?),
        ComponentKind::Metadata => ComponentNode::Metadata(serde_json::from_value(props)?),
        ComponentKind::Divider => ComponentNode::Divider(serde_json::from_value(props)?),
    };
    Ok(node)
}

impl<'de> Deserialize<'de> for ComponentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ComponentNode::from_value(value))
    }
}

impl Serialize for ComponentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let ComponentNode::Malformed { raw, .. } = self {
            return raw.serialize(serializer);
        }
        let mut map = serializer.serialize_map(Some(1))?;
        let tag = self.tag();
        match self {
            ComponentNode::HeroSection(props) => map.serialize_entry(tag, props)?,
            ComponentNode::TextBlock(props) => map.serialize_entry(tag, props)?,
            ComponentNode::ImageGallery(props) => map.serialize_entry(tag, props)?,
            ComponentNode::CodeBlock(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Card(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Column(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Row(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Callout(props) => map.serialize_entry(tag, props)?,
            ComponentNode::List(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Quote(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Table(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Metadata(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Divider(props) => map.serialize_entry(tag, props)?,
            ComponentNode::Unknown { props, .. } | ComponentNode::Invalid { props, .. } => {
                map.serialize_entry(tag, props)?
            }
            ComponentNode::Malformed { raw, .. } => map.serialize_entry(tag, raw)?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSectionProps {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<HeroHeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlockProps {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<TextVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGalleryProps {
    pub images: Vec<GalleryImage>,
    #[serde(
        default,
        deserialize_with = "lenient_columns",
        skip_serializing_if = "Option::is_none"
    )]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lightbox: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

/// Column counts arrive as integers, floats or numeric strings. Fractions are
/// truncated; anything unusable is treated as unset.
fn lenient_columns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value)
        .filter(|columns| columns.is_finite())
        .map(|columns| columns.trunc().clamp(0.0, f64::from(u32::MAX)) as u32))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlockProps {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_line_numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<CardVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProps {
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Gap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<ColumnAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowProps {
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Gap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutProps {
    pub content: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CalloutKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProps {
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteProps {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

/// Table cell text. Numbers and booleans are kept as text; null, arrays and
/// objects become empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableCell(pub String);

impl TableCell {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableCell {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TableCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(TableCell(lenient_text(&value).unwrap_or_default()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProps {
    pub headers: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOptions>,
}

/// Divider props. The wire format uses `style` for the stroke keyword, so
/// general styling travels under `styleProps`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerProps {
    #[serde(rename = "style", skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeStyle>,
    #[serde(rename = "styleProps", skip_serializing_if = "Option::is_none")]
    pub style_props: Option<StyleOptions>,
}
