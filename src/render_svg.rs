use crate::layout::{Drawing, Primitive};
use std::io::{self, Write};
use svg::node::element::{Rectangle, Text};
use svg::Document;

const FONT_SIZE: i32 = 10;
const FONT_FAMILY: &str = "Courier";

/// Serialize a drawing into an SVG document. No layout decisions happen here;
/// primitives are added in list order, so later entries paint on top.
pub fn document_from_drawing(drawing: &Drawing) -> Document {
    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, drawing.width, drawing.height))
        .set("width", drawing.width)
        .set("height", drawing.height);
    for primitive in &drawing.primitives {
        doc = match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => doc.add(
                Rectangle::new()
                    .set("x", *x)
                    .set("y", *y)
                    .set("width", *width)
                    .set("height", *height)
                    .set("fill", fill.as_str()),
            ),
            Primitive::Text { x, y, text } => doc.add(
                Text::new(text.clone())
                    .set("x", *x)
                    .set("y", *y)
                    .set("font-size", FONT_SIZE)
                    .set("font-family", FONT_FAMILY)
                    .set("text-anchor", "middle")
                    .set("fill", "#000000"),
            ),
        };
    }
    doc
}

pub fn svg_string(drawing: &Drawing) -> String {
    document_from_drawing(drawing).to_string()
}

pub fn write_svg<T>(drawing: &Drawing, target: T) -> io::Result<()>
where
    T: Write,
{
    svg::write(target, &document_from_drawing(drawing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing() -> Drawing {
        Drawing {
            width: 220.0,
            height: 60.0,
            primitives: vec![
                Primitive::Rect {
                    x: 60.0,
                    y: 0.0,
                    width: 100.0,
                    height: 20.0,
                    fill: "#F3C300".to_string(),
                },
                Primitive::Text {
                    x: 110.0,
                    y: 17.0,
                    text: "1".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_document_extent() {
        let text = svg_string(&drawing());
        assert!(text.contains(r#"width="220""#));
        assert!(text.contains(r#"height="60""#));
        assert!(text.contains("viewBox"));
    }

    #[test]
    fn test_paint_order_matches_primitive_order() {
        let text = svg_string(&drawing());
        let rect_at = text.find("<rect").unwrap();
        let text_at = text.find("<text").unwrap();
        assert!(rect_at < text_at);
        assert!(text.contains(r##"fill="#F3C300""##));
        assert!(text.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        write_svg(&drawing(), &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("<svg"));
    }
}
