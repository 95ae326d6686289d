//! Clue card image generation.
//!
//! Renders an SVG card per puzzle: category-colored gradient, title,
//! difficulty, category emoji, and hint lines. Delivered as a base64 data
//! URL so the page can drop it straight into an `<img>`.

use base64::{Engine, engine::general_purpose::STANDARD};

use riddler_common::{Category, PuzzleRecord};

const WIDTH: u32 = 960;
const HEIGHT: u32 = 260;

/// Dark tone the gradient fades into
const BASE_TONE: (u8, u8, u8) = (18, 18, 18);

fn category_color(category: Category) -> (u8, u8, u8) {
    match category {
        Category::General => (99, 102, 241),  // indigo
        Category::Logic => (16, 185, 129),    // emerald
        Category::Math => (245, 158, 11),     // amber
        Category::Wordplay => (236, 72, 153), // pink
    }
}

pub fn category_emoji(category: Category) -> &'static str {
    match category {
        Category::General => "💡",
        Category::Logic => "🧩",
        Category::Math => "➗",
        Category::Wordplay => "🔤",
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({},{},{})", r, g, b)
}

/// Escape text for SVG content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the SVG markup for one card (1-based `index`)
pub fn render_svg(index: usize, puzzle: &PuzzleRecord, hints: &[String]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        WIDTH, HEIGHT, WIDTH, HEIGHT
    );

    svg.push_str(&format!(
        r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient></defs>"#,
        rgb(category_color(puzzle.category)),
        rgb(BASE_TONE)
    ));
    svg.push_str(r#"<rect width="100%" height="100%" fill="url(#bg)"/>"#);

    svg.push_str(&format!(
        r#"<text x="28" y="70" font-family="sans-serif" font-size="44" font-weight="bold" fill="rgb(245,245,255)">Puzzle {}: {}</text>"#,
        index,
        puzzle.category.title()
    ));
    svg.push_str(&format!(
        r#"<text x="28" y="110" font-family="sans-serif" font-size="24" fill="rgb(235,240,240)">Difficulty: {}</text>"#,
        puzzle.difficulty.as_str().to_uppercase()
    ));
    svg.push_str(&format!(
        r#"<text x="820" y="88" font-size="64">{}</text>"#,
        category_emoji(puzzle.category)
    ));

    let mut y = 154;
    for hint in hints {
        svg.push_str(&format!(
            r#"<text x="28" y="{}" font-family="sans-serif" font-size="24" fill="rgb(235,240,240)">• {}</text>"#,
            y,
            escape(hint)
        ));
        y += 28;
    }

    svg.push_str("</svg>");
    svg
}

/// SVG card as a `data:` URL
pub fn render_data_url(index: usize, puzzle: &PuzzleRecord, hints: &[String]) -> String {
    let svg = render_svg(index, puzzle, hints);
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use riddler_common::Difficulty;

    #[test]
    fn test_svg_contents() {
        let puzzle = PuzzleRecord::new("Q", "A", Difficulty::Hard, Category::Math);
        let svg = render_svg(2, &puzzle, &["Starts with: A".to_string()]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Puzzle 2: Math"));
        assert!(svg.contains("Difficulty: HARD"));
        assert!(svg.contains("rgb(245,158,11)"));
        assert!(svg.contains("• Starts with: A"));
    }

    #[test]
    fn test_hints_are_escaped() {
        let puzzle = PuzzleRecord::new("Q", "A", Difficulty::Easy, Category::Logic);
        let svg = render_svg(1, &puzzle, &["Tom & <Jerry>".to_string()]);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    }

    #[test]
    fn test_data_url_round_trip() {
        let puzzle = PuzzleRecord::new("Q", "A", Difficulty::Easy, Category::Wordplay);
        let url = render_data_url(1, &puzzle, &[]);
        let encoded = url.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, render_svg(1, &puzzle, &[]));
    }
}
