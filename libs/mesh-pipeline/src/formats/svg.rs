//! Polygon outlines from SVG.
//!
//! Only the `points` attribute of the first `<polygon>` element (or, if
//! there is none, the first `<polyline>`) is read. SVG's Y axis points
//! down, so a point `(x, y)` maps to `(x, -y)` on the X/Z plane.

use glam::DVec2;
use mesh_kernel::Polygon2D;

use crate::error::NodeError;

fn parse_error(line: usize, message: impl Into<String>) -> NodeError {
    NodeError::Parse {
        line,
        message: message.into(),
    }
}

/// Byte offset of the first `<tag` element start.
fn find_element(text: &str, tag: &str) -> Option<usize> {
    let open = format!("<{tag}");
    text.match_indices(&open).map(|(i, _)| i).find(|&i| {
        text[i + open.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '/' || c == '>')
    })
}

/// Value of attribute `name` inside the element starting at `start`.
fn attribute<'t>(text: &'t str, start: usize, name: &str) -> Option<&'t str> {
    let tag = &text[start..];
    let tag = &tag[..tag.find('>')?];
    let needle = format!("{name}=");
    let mut search = 0;
    while let Some(found) = tag[search..].find(&needle) {
        let at = search + found;
        let boundary = tag[..at].chars().next_back().is_some_and(char::is_whitespace);
        let rest = &tag[at + needle.len()..];
        if boundary {
            let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'')?;
            let body = &rest[1..];
            return body.find(quote).map(|end| &body[..end]);
        }
        search = at + needle.len();
    }
    None
}

/// Extracts a polygon from SVG text, scaling every coordinate by `scale`.
///
/// # Errors
///
/// [`NodeError::Parse`] when no polygon or polyline with a `points`
/// attribute exists, a coordinate is not a number, or fewer than three
/// points remain.
pub fn parse_svg_polygon(text: &str, scale: f64) -> Result<Polygon2D, NodeError> {
    let start = find_element(text, "polygon")
        .or_else(|| find_element(text, "polyline"))
        .ok_or_else(|| parse_error(0, "no <polygon> or <polyline> element"))?;
    let line = text[..start].matches('\n').count() + 1;
    let points_attr = attribute(text, start, "points")
        .ok_or_else(|| parse_error(line, "points attribute missing"))?;

    let numbers = points_attr
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| parse_error(line, format!("invalid coordinate '{s}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let points: Vec<DVec2> = numbers
        .chunks_exact(2)
        .map(|xy| DVec2::new(xy[0] * scale, -xy[1] * scale))
        .collect();
    if points.len() < 3 {
        return Err(parse_error(line, "polygon needs at least three points"));
    }
    Ok(Polygon2D::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <polyline points="0,0 5,5 0,5" />
  <polygon class="shape" points="0,0 10,0 10,10 0,10"/>
</svg>"#;

    #[test]
    fn test_polygon_preferred_over_polyline() {
        let poly = parse_svg_polygon(DOC, 0.1).unwrap();
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.points[1], DVec2::new(1.0, 0.0));
        assert_eq!(poly.points[2], DVec2::new(1.0, -1.0));
    }

    #[test]
    fn test_polyline_fallback_and_separators() {
        let doc = "<svg><polyline points='1 2, 3 4  5,6'/></svg>";
        let poly = parse_svg_polygon(doc, 1.0).unwrap();
        assert_eq!(
            poly.points,
            vec![DVec2::new(1.0, -2.0), DVec2::new(3.0, -4.0), DVec2::new(5.0, -6.0)]
        );
    }

    #[test]
    fn test_data_points_attribute_is_not_points() {
        let doc = r#"<svg><polygon data-points="9,9" points="0,0 1,0 1,1"/></svg>"#;
        assert_eq!(parse_svg_polygon(doc, 1.0).unwrap().len(), 3);
    }

    #[test]
    fn test_errors() {
        assert!(parse_svg_polygon("<svg><rect/></svg>", 1.0).is_err());
        assert!(parse_svg_polygon("<svg><polygon/></svg>", 1.0).is_err());
        assert!(parse_svg_polygon(r#"<polygon points="0,0 1,0"/>"#, 1.0).is_err());
        assert!(parse_svg_polygon(r#"<polygon points="0,0 a,0 1,1"/>"#, 1.0).is_err());
    }
}
