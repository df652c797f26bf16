//! Vertical bar chart rendering

use super::{apply_text_style, RenderContext};
use crate::axis::{AxisScale, DEFAULT_TICK_COUNT};
use crate::parser::format_value;
use crate::{Canvas, Color, PageLayout, RecipeError, Result, ShapeStyleSpec, VerticalBarItem};
use pdf_core::{Align, Border, CellAlign, RectStyle, VAlign};

/// Horizontal padding added to the measured title width
const TITLE_PADDING: f64 = 5.0;

/// Absolute positions of the chart box and its plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    /// Top-left corner of the chart box
    pub box_x: f64,
    pub box_y: f64,
    pub width: f64,
    pub height: f64,
    /// Room left for y-axis labels and, again, on the right
    pub side: f64,
    /// Chart width less one side distance
    pub plot_width: f64,
    pub y_axis_x: f64,
    /// Y of the axis maximum
    pub axis_top: f64,
    /// Y of the zero line
    pub axis_zero: f64,
    pub plot_height: f64,
}

impl ChartGeometry {
    pub fn new(item: &VerticalBarItem, page: &PageLayout) -> Result<Self> {
        let settings = &item.chart_settings;
        let (box_x, box_y) = page.origin(&item.frame);

        let width = item.frame.width.unwrap_or(0.0);
        let height = item.frame.height.unwrap_or(0.0);
        if width <= 0.0 || height <= 0.0 {
            return Err(RecipeError::InvalidInput(format!(
                "chart needs a positive width and height, got {width} x {height}"
            )));
        }

        let side = settings.distance_from_sides_of_chart_area;
        let axis_top = box_y + settings.distance_from_top_of_chart_area;
        let axis_zero = box_y + height - settings.distance_from_bottom_of_chart_area;
        let plot_height = axis_zero - axis_top;
        if plot_height <= 0.0 {
            return Err(RecipeError::InvalidInput(format!(
                "chart top and bottom distances leave no room for the plot ({plot_height})"
            )));
        }

        Ok(Self {
            box_x,
            box_y,
            width,
            height,
            side,
            plot_width: width - side,
            y_axis_x: box_x + side,
            axis_top,
            axis_zero,
            plot_height,
        })
    }

    /// Width of one category slot on the x axis
    pub fn category_width(&self, count: usize) -> Result<f64> {
        if count == 0 {
            return Err(RecipeError::InvalidInput(
                "a bar chart needs at least one record".to_string(),
            ));
        }
        Ok((self.plot_width - self.side) / count as f64)
    }

    /// Right end of the x axis
    pub fn axis_end_x(&self) -> f64 {
        self.box_x + self.plot_width
    }
}

/// Resolved rectangle/line styling
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShapeStyle {
    style: RectStyle,
    fill: Color,
    border: Color,
    line_width: f64,
    line: Color,
}

impl ShapeStyle {
    fn resolve(spec: &ShapeStyleSpec, default_line_width: f64) -> Self {
        let style = match spec.style.as_deref() {
            None | Some("") => RectStyle::default(),
            Some(code) => RectStyle::parse(code).unwrap_or_else(|| {
                log::warn!(
                    "{}; using outline",
                    RecipeError::Configuration(format!("invalid shape style '{code}'"))
                );
                RectStyle::default()
            }),
        };

        Self {
            style,
            fill: spec.fill_colour.resolve(Color::BLACK),
            border: spec.border_colour.resolve(Color::BLACK),
            line_width: spec
                .line_width
                .filter(|w| *w >= 0.0)
                .unwrap_or(default_line_width),
            line: spec.line_colour.resolve(Color::BLACK),
        }
    }

    /// Select this style for stroking axis lines
    fn apply_line(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.set_line_width(self.line_width)?;
        canvas.set_draw_color(self.line)
    }

    /// Select this style for painting rectangles
    fn apply_shape(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.set_line_width(self.line_width)?;
        canvas.set_fill_color(self.fill)?;
        canvas.set_draw_color(self.border)
    }
}

/// Whole number of y-axis ticks from the recipe value
///
/// Fractions are truncated. Unset, zero or negative counts use the default.
fn y_axis_tick_count(raw: Option<f64>) -> u32 {
    match raw {
        Some(n) if n > 0.0 => n as u32,
        Some(n) if n < 0.0 => {
            log::warn!(
                "{}; using {}",
                RecipeError::Configuration(format!("invalid number of y-axis ticks {n}")),
                DEFAULT_TICK_COUNT
            );
            DEFAULT_TICK_COUNT
        }
        _ => DEFAULT_TICK_COUNT,
    }
}

/// Draw a vertical bar chart of the bound series
///
/// The chart is validated in full (records, geometry, tick count) before the
/// first drawing call.
pub fn render_vertical_bar(
    canvas: &mut dyn Canvas,
    item: &VerticalBarItem,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let Some(series) = ctx.series(&item.binding)? else {
        return Ok(());
    };
    let points = series.points(&item.binding)?;
    let settings = &item.chart_settings;

    let g = ChartGeometry::new(item, ctx.page)?;
    let slot = g.category_width(points.len())?;
    let tick_count = y_axis_tick_count(settings.number_of_y_axis_ticks);
    let raw_max = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let axis = AxisScale::new(raw_max, tick_count)?;

    let line_width = ctx.page.default_line_width();
    let watermark = ShapeStyle::resolve(&settings.watermark_format, line_width);
    let bars = ShapeStyle::resolve(&settings.series_format, line_width);
    let axis_style = ShapeStyle::resolve(&settings.axis_format, line_width);
    let font = ctx.styles.resolve_body(&settings.chart_text_font);
    let tick_len = settings.tick_mark_length;

    // Background box
    watermark.apply_shape(canvas)?;
    canvas.draw_rect(g.box_x, g.box_y, g.width, g.height, watermark.style)?;

    // Y axis with ticks and right-aligned labels
    axis_style.apply_line(canvas)?;
    canvas.draw_line(g.y_axis_x, g.axis_top, g.y_axis_x, g.axis_zero)?;
    apply_text_style(canvas, &font)?;
    for tick in axis.ticks(g.plot_height) {
        let tick_y = g.axis_top + tick.offset;
        canvas.draw_line(g.y_axis_x, tick_y, g.y_axis_x - tick_len, tick_y)?;
        canvas.move_to(g.box_x, tick_y - 0.5 * font.size)?;
        canvas.draw_cell(
            g.side - tick_len,
            font.size,
            &format_value(tick.value),
            Border::none(),
            CellAlign::new(Align::Right, VAlign::Middle),
            false,
        )?;
    }

    // One tick, label and bar per category
    let mut tick_x = g.y_axis_x;
    for point in &points {
        axis_style.apply_line(canvas)?;
        canvas.draw_line(tick_x, g.axis_zero, tick_x, g.axis_zero + tick_len)?;
        canvas.move_to(tick_x, g.axis_zero + 0.5 * tick_len)?;
        canvas.draw_cell(
            slot,
            font.size,
            &point.category,
            Border::none(),
            CellAlign::new(Align::Center, VAlign::Middle),
            false,
        )?;

        let bar_height = axis.bar_height(point.value, g.plot_height);
        let (bar_y, bar_h) = if bar_height >= 0.0 {
            (g.axis_zero - bar_height, bar_height)
        } else {
            (g.axis_zero, -bar_height)
        };
        bars.apply_shape(canvas)?;
        canvas.draw_rect(
            tick_x + settings.gap_between_bars,
            bar_y,
            slot - 2.0 * settings.gap_between_bars,
            bar_h,
            bars.style,
        )?;

        tick_x += slot;
    }

    // Closing tick and x axis
    axis_style.apply_line(canvas)?;
    canvas.draw_line(tick_x, g.axis_zero, tick_x, g.axis_zero + tick_len)?;
    canvas.draw_line(g.y_axis_x, g.axis_zero, g.axis_end_x(), g.axis_zero)?;

    let title = &settings.chart_title;
    if !title.text.is_empty() {
        let style = ctx.styles.resolve_body(&title.font);
        apply_text_style(canvas, &style)?;
        let title_width = canvas.measure_text_width(&title.text)?;
        canvas.move_to(
            g.box_x + g.width / 2.0 - title_width / 2.0,
            g.box_y + title.distance_from_top_of_chart_area,
        )?;
        canvas.draw_cell(
            title_width + TITLE_PADDING,
            style.line_height(),
            &title.text,
            style.cell_borders.style,
            style.alignment,
            style.cell_fill.filled,
        )?;
    }

    log::debug!(
        "bar chart '{}': {} bars, axis max {}",
        item.binding.data_source,
        points.len(),
        axis.max
    );
    Ok(())
}
