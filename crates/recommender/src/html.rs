//! Standalone HTML page for a recommendation.
//!
//! Covers are plain `<img>` tags: the browser fetches them from the cover
//! service and swaps in the placeholder through `onerror` when that fails.

use crate::card::{BookCard, PLACEHOLDER_COVER_URL};
use crate::recommender::Recommendation;
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: sans-serif; background: #185a9d; color: #eee; margin: 2rem; }
h1 { text-align: center; }
.book-card { display: flex; background: rgba(0, 0, 0, 0.85); border-radius: 12px; padding: 20px; margin: 15px 0; }
.book-cover { width: 80px; height: 120px; object-fit: cover; border-radius: 8px; margin-right: 15px; }
.book-title { font-size: 18px; font-weight: bold; margin-bottom: 8px; }
.book-info { color: #ccc; font-size: 14px; margin: 4px 0; }
.book-tag { color: #0066cc; font-weight: bold; }
";

/// Render the selected book and its recommendations as one HTML document
pub fn render_page(recommendation: &Recommendation) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>FRIDAY: Book Recommender</title>\n");
    let _ = writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>");
    html.push_str("<h1>FRIDAY: Book Recommender</h1>\n");

    html.push_str("<h2>Selected Book</h2>\n");
    html.push_str(&render_card(&recommendation.selected));

    html.push_str("<h2>Recommendations</h2>\n");
    for card in &recommendation.recommended {
        html.push_str(&render_card(card));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// One card: cover with fallback, title, author, publisher, year, tag
pub fn render_card(card: &BookCard) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<div class=\"book-card\">");
    let _ = writeln!(
        html,
        "  <img class=\"book-cover\" src=\"{}\" alt=\"Book cover\" onerror=\"this.onerror=null;this.src='{}'\">",
        escape(&card.cover_url()),
        PLACEHOLDER_COVER_URL
    );
    let _ = writeln!(html, "  <div class=\"book-details\">");
    let _ = writeln!(html, "    <div class=\"book-title\">{}</div>", escape(&card.title));
    let _ = writeln!(
        html,
        "    <div class=\"book-info\"><strong>Author:</strong> {}</div>",
        escape(card.author_text())
    );
    let _ = writeln!(
        html,
        "    <div class=\"book-info\"><strong>Publisher:</strong> {}</div>",
        escape(card.publisher_text())
    );
    let _ = writeln!(
        html,
        "    <div class=\"book-info\"><strong>Year:</strong> {}</div>",
        card.year_text()
    );
    let _ = writeln!(html, "    <div class=\"book-info book-tag\">{}</div>", card.tag);
    let _ = writeln!(html, "  </div>\n</div>");
    html
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardTag;

    fn card(title: &str, isbn: Option<&str>, tag: CardTag) -> BookCard {
        BookCard {
            title: title.to_string(),
            author: Some("Ann <Editor>".to_string()),
            publisher: None,
            year: Some(1999),
            isbn: isbn.map(str::to_string),
            tag,
            distance: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Tom & Jerry's <\"Show\">"), "Tom &amp; Jerry&#39;s &lt;&quot;Show&quot;&gt;");
    }

    #[test]
    fn test_render_card() {
        let html = render_card(&card("A & B", Some("111"), CardTag::Recommended));
        assert!(html.contains("src=\"https://covers.openlibrary.org/b/isbn/111-M.jpg\""));
        assert!(html.contains("onerror="));
        assert!(html.contains(PLACEHOLDER_COVER_URL));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("Ann &lt;Editor&gt;"));
        assert!(html.contains("<strong>Publisher:</strong> Unknown"));
        assert!(html.contains("<strong>Year:</strong> 1999"));
        assert!(html.contains("Recommended"));
    }

    #[test]
    fn test_render_page_order() {
        let rec = Recommendation {
            selected: card("Chosen", None, CardTag::Selection),
            recommended: vec![
                card("First", Some("1"), CardTag::Recommended),
                card("Second", Some("2"), CardTag::Recommended),
            ],
        };
        let html = render_page(&rec);
        let chosen = html.find("Chosen").unwrap();
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(chosen < first && first < second);
        assert!(html.contains("Your Selection"));
        assert_eq!(html.matches("class=\"book-card\"").count(), 3);
    }
}
