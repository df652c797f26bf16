//! Two-column table rendering

use super::{apply_text_style, RenderContext};
use crate::parser::format_value;
use crate::{Canvas, Frame, ResolvedFont, Result, TableItem, TextStyle};
use pdf_core::{Align, CellAlign, VAlign};

/// Table width used when the recipe leaves it unset or negative
pub const DEFAULT_TABLE_WIDTH: f64 = 100.0;

/// Row geometry of a table, computed before anything is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    pub table_width: f64,
    pub column_width: f64,
    pub header_height: f64,
    pub row_height: f64,
    /// Height of the "..." row that replaces dropped records
    pub ellipsis_height: f64,
    /// Number of data rows drawn
    pub visible_rows: usize,
    pub show_ellipsis: bool,
}

impl TableLayout {
    /// Fit `record_count` rows under the header within the frame height
    ///
    /// A row is kept only if the ellipsis row would still fit after it, unless
    /// it is the final record. An unset height never truncates.
    pub fn compute(frame: &Frame, font: &ResolvedFont, record_count: usize) -> Self {
        let table_width = frame
            .width
            .filter(|w| *w >= 0.0)
            .unwrap_or(DEFAULT_TABLE_WIDTH);
        let header_height = font.header.line_height();
        let row_height = font.body.line_height();
        let ellipsis_height = 0.5 * row_height;
        let budget = frame.height.unwrap_or(f64::INFINITY);

        let mut used = header_height;
        let mut visible_rows = 0;
        while visible_rows < record_count {
            let is_last = visible_rows + 1 == record_count;
            let reserve = if is_last { 0.0 } else { ellipsis_height };
            if used + row_height + reserve > budget {
                break;
            }
            used += row_height;
            visible_rows += 1;
        }

        let truncated = visible_rows < record_count;

        Self {
            table_width,
            column_width: table_width / 2.0,
            header_height,
            row_height,
            ellipsis_height,
            visible_rows,
            show_ellipsis: truncated && used + ellipsis_height <= budget,
        }
    }

    /// Total height of header, visible rows and ellipsis
    pub fn rendered_height(&self) -> f64 {
        let ellipsis = if self.show_ellipsis {
            self.ellipsis_height
        } else {
            0.0
        };
        self.header_height + self.visible_rows as f64 * self.row_height + ellipsis
    }
}

/// Draw a header row and one row per record of the bound series
///
/// Records are extracted and checked before drawing, so a bad record fails
/// the whole table without leaving half of it on the page.
pub fn render_table(canvas: &mut dyn Canvas, item: &TableItem, ctx: &RenderContext<'_>) -> Result<()> {
    let Some(series) = ctx.series(&item.binding)? else {
        return Ok(());
    };
    let points = series.points(&item.binding)?;
    let font = ctx.styles.resolve(&item.font);
    let layout = TableLayout::compute(&item.frame, &font, points.len());
    let (x, mut y) = ctx.page.origin(&item.frame);

    apply_text_style(canvas, &font.header)?;
    canvas.set_line_width(ctx.page.default_line_width())?;
    draw_row(
        canvas,
        (x, y),
        layout.column_width,
        layout.header_height,
        [
            item.binding.data_series_category.as_str(),
            item.binding.data_series.as_str(),
        ],
        &font.header,
    )?;
    y += layout.header_height;

    apply_text_style(canvas, &font.body)?;
    for point in points.iter().take(layout.visible_rows) {
        let value = format_value(point.value);
        draw_row(
            canvas,
            (x, y),
            layout.column_width,
            layout.row_height,
            [point.category.as_str(), value.as_str()],
            &font.body,
        )?;
        y += layout.row_height;
    }

    if layout.show_ellipsis {
        canvas.move_to(x, y)?;
        canvas.draw_multi_line_text(
            layout.table_width,
            layout.ellipsis_height,
            "...",
            font.body.cell_borders.style,
            CellAlign::new(Align::Center, VAlign::Bottom),
            font.body.cell_fill.filled,
        )?;
    }

    log::debug!(
        "table '{}': {} of {} rows drawn",
        item.binding.data_source,
        layout.visible_rows,
        points.len()
    );
    Ok(())
}

fn draw_row(
    canvas: &mut dyn Canvas,
    (x, y): (f64, f64),
    column_width: f64,
    height: f64,
    cells: [&str; 2],
    style: &TextStyle,
) -> Result<()> {
    for (i, text) in cells.iter().enumerate() {
        canvas.move_to(x + i as f64 * column_width, y)?;
        canvas.draw_multi_line_text(
            column_width,
            height,
            text,
            style.cell_borders.style,
            style.alignment,
            style.cell_fill.filled,
        )?;
    }
    Ok(())
}
