//! Text block rendering

use super::{apply_text_style, RenderContext};
use crate::{Canvas, Result, TextBlockItem};

/// Draw a text block as one wrapped multi-line box
///
/// The box spans the declared width (zero or unset runs to the right
/// margin) and grows downward to fit the text.
pub fn render_text_block(
    canvas: &mut dyn Canvas,
    item: &TextBlockItem,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    let style = ctx.styles.resolve_body(&item.font);
    let (x, y) = ctx.page.origin(&item.frame);
    let width = item.frame.width.filter(|w| *w > 0.0).unwrap_or(0.0);

    apply_text_style(canvas, &style)?;
    canvas.set_line_width(ctx.page.default_line_width())?;

    canvas.move_to(x, y)?;
    canvas.draw_multi_line_text(
        width,
        style.line_height(),
        &item.text,
        style.cell_borders.style,
        style.alignment,
        style.cell_fill.filled,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Color, ColorSpec, Dataset, DrawOp, FontSpec, Frame, PageLayout, RecordingCanvas,
        StyleResolver, StyleSpec,
    };
    use pdf_core::{Align, Border, CellAlign, FontStyle, VAlign};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_block_with_defaults() {
        let page = PageLayout::default();
        let dataset = Dataset::default();
        let styles = StyleResolver::default();
        let ctx = RenderContext::new(&page, &dataset, &styles);

        let item = TextBlockItem::new("Hello", Frame::new(10.0, 20.0, 200.0, 0.0));
        let mut canvas = RecordingCanvas::default();
        render_text_block(&mut canvas, &item, &ctx).unwrap();

        assert_eq!(
            canvas.ops(),
            &[
                DrawOp::SetFont {
                    family: "Helvetica".to_string(),
                    style: FontStyle::Regular,
                    size: 9.0
                },
                DrawOp::SetTextColor(Color::BLACK),
                DrawOp::SetFillColor(Color::WHITE),
                DrawOp::SetDrawColor(Color::BLACK),
                DrawOp::SetLineWidth(0.567),
                DrawOp::MoveTo { x: 10.0 + 28.3, y: 62.5 },
                DrawOp::MultiLineText {
                    width: 200.0,
                    line_height: 12.0,
                    text: "Hello".to_string(),
                    border: Border::all(),
                    align: CellAlign::new(Align::Center, VAlign::Middle),
                    filled: false,
                },
            ]
        );
    }

    #[test]
    fn test_text_block_styling() {
        let page = PageLayout::default();
        let dataset = Dataset::default();
        let styles = StyleResolver::default();
        let ctx = RenderContext::new(&page, &dataset, &styles);

        let mut item = TextBlockItem::new("Styled", Frame::default());
        item.font = FontSpec {
            body: StyleSpec {
                size: Some(14.0),
                line_spacing: Some(2.0),
                colour: ColorSpec::rgb(10, 20, 30),
                ..Default::default()
            },
            ..Default::default()
        };

        let mut canvas = RecordingCanvas::default();
        render_text_block(&mut canvas, &item, &ctx).unwrap();

        let ops = canvas.ops();
        assert_eq!(ops[1], DrawOp::SetTextColor(Color::rgb(10, 20, 30)));
        match ops.last() {
            Some(DrawOp::MultiLineText {
                width, line_height, ..
            }) => {
                assert_eq!(*width, 0.0);
                assert_eq!(*line_height, 16.0);
            }
            other => panic!("Expected MultiLineText, got {other:?}"),
        }
    }

    #[test]
    fn test_text_block_unknown_family() {
        let page = PageLayout::default();
        let dataset = Dataset::default();
        let styles = StyleResolver::default();
        let ctx = RenderContext::new(&page, &dataset, &styles);

        let mut item = TextBlockItem::new("x", Frame::default());
        item.font.body.family = Some("Wingdings 9".to_string());

        let mut canvas = RecordingCanvas::default();
        assert!(render_text_block(&mut canvas, &item, &ctx).is_err());
        assert!(canvas.ops().is_empty());
    }
}
