//! Recipe JSON schema types

use serde::{Deserialize, Serialize};

/// RGB Color (0-255 per channel)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(213, 213, 213);

    /// Create color from RGB values (0-255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for pdf_core::Color {
    fn from(c: Color) -> Self {
        pdf_core::Color::from_rgb(c.r, c.g, c.b)
    }
}

/// Partially specified colour
///
/// Each channel is optional; an absent or negative channel is unset and
/// inherits from whatever default it is resolved against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorSpec {
    #[serde(rename = "R", alias = "r", default, skip_serializing_if = "Option::is_none")]
    pub r: Option<i32>,

    #[serde(rename = "G", alias = "g", default, skip_serializing_if = "Option::is_none")]
    pub g: Option<i32>,

    #[serde(rename = "B", alias = "b", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<i32>,
}

impl ColorSpec {
    /// Fully specified colour
    pub fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: Some(r),
            g: Some(g),
            b: Some(b),
        }
    }

    /// Whether the red channel is set (used to switch features on)
    pub fn is_set(&self) -> bool {
        matches!(self.r, Some(r) if r >= 0)
    }

    /// Resolve channel by channel against `default`; values above 255 are clamped
    pub fn resolve(&self, default: Color) -> Color {
        fn channel(value: Option<i32>, default: u8) -> u8 {
            match value {
                Some(v) if v >= 0 => v.min(255) as u8,
                _ => default,
            }
        }

        Color {
            r: channel(self.r, default.r),
            g: channel(self.g, default.g),
            b: channel(self.b, default.b),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(c: Color) -> Self {
        ColorSpec::rgb(c.r as i32, c.g as i32, c.b as i32)
    }
}

/// Root recipe structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Page configuration
    #[serde(default)]
    pub pdf_settings: PageSettings,

    /// Content items, drawn in order
    #[serde(default)]
    pub pdf_contents: Vec<ContentItem>,
}

impl Recipe {
    /// Append a content item
    pub fn push(&mut self, item: impl Into<ContentItem>) -> &mut Self {
        self.pdf_contents.push(item.into());
        self
    }
}

/// Page settings as written in the recipe; see [`crate::PageLayout`] for the resolved form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    /// `"P"` (portrait) or `"L"` (landscape)
    #[serde(default)]
    pub page_orientation: Option<String>,

    /// `"pt"`, `"mm"`, `"cm"` or `"in"`
    #[serde(default)]
    pub page_units: Option<String>,

    /// Output file name without extension
    #[serde(default)]
    pub pdf_name: Option<String>,

    /// Output directory, used as a plain prefix
    #[serde(default)]
    pub pdf_location: Option<String>,

    #[serde(default)]
    pub page_height: Option<f64>,

    #[serde(default)]
    pub page_width: Option<f64>,

    #[serde(default)]
    pub page_left_and_right_margins: Option<f64>,

    #[serde(default)]
    pub page_top_margin: Option<f64>,

    /// Page background colour
    #[serde(default)]
    pub watermark: ColorSpec,
}

/// Content item (tagged union on `itemType`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "itemType")]
pub enum ContentItem {
    /// Styled multi-line text
    #[serde(rename = "textBlock")]
    TextBlock(TextBlockItem),

    /// Two-column category/value table
    #[serde(rename = "table")]
    Table(TableItem),

    /// Vertical bar chart
    #[serde(rename = "verticalBar")]
    VerticalBar(VerticalBarItem),

    /// Any other item type; skipped when rendering
    #[serde(other)]
    Unsupported,
}

impl ContentItem {
    /// Name of the item type as written in recipes
    pub fn item_type(&self) -> &'static str {
        match self {
            ContentItem::TextBlock(_) => "textBlock",
            ContentItem::Table(_) => "table",
            ContentItem::VerticalBar(_) => "verticalBar",
            ContentItem::Unsupported => "unsupported",
        }
    }

    /// Data binding, for items that draw from the dataset
    pub fn binding(&self) -> Option<&DataBinding> {
        match self {
            ContentItem::Table(b) => Some(&b.binding),
            ContentItem::VerticalBar(b) => Some(&b.binding),
            ContentItem::TextBlock(_) | ContentItem::Unsupported => None,
        }
    }
}

impl From<TextBlockItem> for ContentItem {
    fn from(item: TextBlockItem) -> Self {
        ContentItem::TextBlock(item)
    }
}

impl From<TableItem> for ContentItem {
    fn from(item: TableItem) -> Self {
        ContentItem::Table(item)
    }
}

impl From<VerticalBarItem> for ContentItem {
    fn from(item: VerticalBarItem) -> Self {
        ContentItem::VerticalBar(item)
    }
}

/// Position and size relative to the printable area
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub x_position: f64,

    #[serde(default)]
    pub y_position: f64,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x_position: x,
            y_position: y,
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Which series and fields of the dataset an item draws from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataBinding {
    /// Name of the data series
    #[serde(default)]
    pub data_source: String,

    /// Field holding the numeric value
    #[serde(default)]
    pub data_series: String,

    /// Field holding the category label
    #[serde(default)]
    pub data_series_category: String,
}

impl DataBinding {
    pub fn new(source: &str, series: &str, category: &str) -> Self {
        Self {
            data_source: source.to_string(),
            data_series: series.to_string(),
            data_series_category: category.to_string(),
        }
    }
}

/// Text block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextBlockItem {
    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub frame: Frame,

    #[serde(default)]
    pub font: FontSpec,
}

impl TextBlockItem {
    pub fn new(text: &str, frame: Frame) -> Self {
        Self {
            text: text.to_string(),
            frame,
            font: FontSpec::default(),
        }
    }
}

/// Table block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TableItem {
    #[serde(flatten)]
    pub binding: DataBinding,

    #[serde(flatten)]
    pub frame: Frame,

    /// Body font; `headerFont` inside it styles the header row
    #[serde(default)]
    pub font: FontSpec,
}

impl TableItem {
    pub fn new(binding: DataBinding, frame: Frame) -> Self {
        Self {
            binding,
            frame,
            font: FontSpec::default(),
        }
    }
}

/// Vertical bar chart block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerticalBarItem {
    #[serde(flatten)]
    pub binding: DataBinding,

    #[serde(flatten)]
    pub frame: Frame,

    #[serde(default)]
    pub chart_settings: ChartSettings,
}

impl VerticalBarItem {
    pub fn new(binding: DataBinding, frame: Frame) -> Self {
        Self {
            binding,
            frame,
            chart_settings: ChartSettings::default(),
        }
    }
}

/// Partial text and cell style
///
/// Every field is optional; unset fields inherit from the defaults they are
/// resolved against (see [`crate::StyleResolver`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    /// Text colour
    #[serde(default)]
    pub colour: ColorSpec,

    /// `""`, `"B"`, `"I"`, `"BI"` or `"IB"`
    #[serde(default)]
    pub style: Option<String>,

    /// Font size in points
    #[serde(default)]
    pub size: Option<f64>,

    #[serde(default)]
    pub family: Option<String>,

    /// Two-letter cell alignment such as `"CM"`
    #[serde(default)]
    pub alignment: Option<String>,

    /// Added to the font size to give the line height
    #[serde(default)]
    pub line_spacing: Option<f64>,

    #[serde(default)]
    pub cell_borders: CellBordersSpec,

    #[serde(default)]
    pub cell_fill: CellFillSpec,
}

/// Item font: a body style plus a separately defaulted header style
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    #[serde(flatten)]
    pub body: StyleSpec,

    /// Used only by table header rows
    #[serde(default)]
    pub header_font: StyleSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CellBordersSpec {
    /// `"0"`, `"1"` or letters from `"LTRB"`
    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub colour: ColorSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CellFillSpec {
    /// Only `true` has an effect; see [`crate::StyleResolver`]
    #[serde(default)]
    pub filled: Option<bool>,

    #[serde(default)]
    pub colour: ColorSpec,
}

/// Chart appearance and geometry settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    /// Chart background box
    #[serde(default)]
    pub watermark_format: ShapeStyleSpec,

    /// Bars
    #[serde(default)]
    pub series_format: ShapeStyleSpec,

    /// Axis lines and tick marks
    #[serde(default)]
    pub axis_format: ShapeStyleSpec,

    /// Tick labels
    #[serde(default)]
    pub chart_text_font: FontSpec,

    #[serde(default)]
    pub chart_title: ChartTitle,

    #[serde(default)]
    pub distance_from_top_of_chart_area: f64,

    #[serde(default)]
    pub distance_from_bottom_of_chart_area: f64,

    /// Also the room left for y-axis labels
    #[serde(default)]
    pub distance_from_sides_of_chart_area: f64,

    /// Number of y-axis ticks including zero and the maximum; fractions are
    /// truncated and anything not above zero means 5
    #[serde(default)]
    pub number_of_y_axis_ticks: Option<f64>,

    /// Inset on each side of every bar
    #[serde(default)]
    pub gap_between_bars: f64,

    #[serde(default)]
    pub tick_mark_length: f64,
}

/// Rectangle and line styling
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyleSpec {
    /// `"D"`, `"F"`, `"FD"` or `"DF"`
    #[serde(default)]
    pub style: Option<String>,

    #[serde(default)]
    pub fill_colour: ColorSpec,

    #[serde(default)]
    pub border_colour: ColorSpec,

    #[serde(default)]
    pub line_width: Option<f64>,

    #[serde(default)]
    pub line_colour: ColorSpec,
}

/// Chart title
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartTitle {
    #[serde(default)]
    pub text: String,

    /// Offset of the title below the top of the chart box
    #[serde(default)]
    pub distance_from_top_of_chart_area: f64,

    #[serde(default)]
    pub font: FontSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_block() {
        let json = r#"{
            "itemType": "textBlock",
            "text": "Hello",
            "xPosition": 10,
            "yPosition": 20,
            "width": 200,
            "font": { "size": 12, "colour": { "R": 255, "G": -1 } }
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();

        match item {
            ContentItem::TextBlock(b) => {
                assert_eq!(b.text, "Hello");
                assert_eq!(b.frame.x_position, 10.0);
                assert_eq!(b.frame.width, Some(200.0));
                assert_eq!(b.frame.height, None);
                assert_eq!(b.font.body.size, Some(12.0));
                assert_eq!(b.font.body.colour.r, Some(255));
                assert_eq!(b.font.body.colour.g, Some(-1));
                assert_eq!(b.font.body.colour.b, None);
            }
            _ => panic!("Expected TextBlock"),
        }
    }

    #[test]
    fn test_parse_table_with_header_font() {
        let json = r#"{
            "itemType": "table",
            "dataSource": "sales",
            "dataSeries": "volume",
            "dataSeriesCategory": "month",
            "xPosition": 0,
            "yPosition": 100,
            "width": 150,
            "height": 80,
            "font": {
                "cellBorders": { "style": "LB" },
                "headerFont": { "style": "I", "cellFill": { "filled": true } }
            }
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type(), "table");
        assert_eq!(
            item.binding(),
            Some(&DataBinding::new("sales", "volume", "month"))
        );

        match item {
            ContentItem::Table(t) => {
                assert_eq!(t.font.body.cell_borders.style.as_deref(), Some("LB"));
                assert_eq!(t.font.header_font.style.as_deref(), Some("I"));
                assert_eq!(t.font.header_font.cell_fill.filled, Some(true));
            }
            _ => panic!("Expected TableItem"),
        }
    }

    #[test]
    fn test_parse_chart_settings() {
        let json = r#"{
            "itemType": "verticalBar",
            "dataSource": "sales",
            "dataSeries": "volume",
            "dataSeriesCategory": "month",
            "width": 300,
            "height": 200,
            "chartSettings": {
                "seriesFormat": { "style": "F", "fillColour": { "R": 10, "G": 20, "B": 30 } },
                "axisFormat": { "lineWidth": 0.5 },
                "chartTitle": { "text": "Volume", "distanceFromTopOfChartArea": 4 },
                "distanceFromSidesOfChartArea": 30,
                "numberOfYAxisTicks": 6,
                "gapBetweenBars": 2,
                "tickMarkLength": 3
            }
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        match item {
            ContentItem::VerticalBar(c) => {
                let s = &c.chart_settings;
                assert_eq!(s.series_format.style.as_deref(), Some("F"));
                assert_eq!(s.series_format.fill_colour, ColorSpec::rgb(10, 20, 30));
                assert_eq!(s.axis_format.line_width, Some(0.5));
                assert_eq!(s.chart_title.text, "Volume");
                assert_eq!(s.distance_from_sides_of_chart_area, 30.0);
                assert_eq!(s.number_of_y_axis_ticks, Some(6.0));
                assert_eq!(s.distance_from_top_of_chart_area, 0.0);
            }
            _ => panic!("Expected VerticalBarItem"),
        }
    }

    #[test]
    fn test_tick_count_accepts_any_number() {
        for (raw, expected) in [("5.0", 5.0), ("-1", -1.0), ("0", 0.0), ("4.7", 4.7)] {
            let json = format!(
                r#"{{ "itemType": "verticalBar", "chartSettings": {{ "numberOfYAxisTicks": {raw} }} }}"#
            );
            let item: ContentItem = serde_json::from_str(&json).unwrap();
            match item {
                ContentItem::VerticalBar(c) => {
                    assert_eq!(c.chart_settings.number_of_y_axis_ticks, Some(expected));
                }
                _ => panic!("Expected VerticalBarItem"),
            }
        }
    }

    #[test]
    fn test_unknown_item_type_is_unsupported() {
        let json = r#"{ "itemType": "pieChart", "xPosition": 1 }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, ContentItem::Unsupported);
        assert!(item.binding().is_none());
    }

    #[test]
    fn test_color_spec_resolve() {
        let spec = ColorSpec {
            r: Some(100),
            g: Some(-1),
            b: Some(999),
        };
        assert_eq!(spec.resolve(Color::rgb(1, 2, 3)), Color::rgb(100, 2, 255));
        assert_eq!(ColorSpec::default().resolve(Color::WHITE), Color::WHITE);
        assert!(spec.is_set());
        assert!(!ColorSpec::default().is_set());
    }

    #[test]
    fn test_recipe_push() {
        let mut recipe = Recipe::default();
        recipe
            .push(TextBlockItem::new("a", Frame::new(0.0, 0.0, 10.0, 10.0)))
            .push(TableItem::new(
                DataBinding::new("s", "v", "c"),
                Frame::default(),
            ));
        assert_eq!(recipe.pdf_contents.len(), 2);
        assert_eq!(recipe.pdf_contents[1].item_type(), "table");
    }
}
