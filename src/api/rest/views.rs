//! # HTML Views
//!
//! Page rendering for the quotes front-end.
//!
//! Pages are assembled from small functions returning `String`. Every piece
//! of user or remote text goes through [`escape_html`].

use crate::application::services::{SearchOutcome, Severity};
use crate::domain::entities::quote::Quote;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; background-color: #f0f0f0; }
nav { background: #333; padding: 12px 20px; }
nav a { color: #fff; margin-right: 16px; text-decoration: none; }
main { max-width: 720px; margin: 24px auto; padding: 0 16px; }
.quote { background: #fff; border-radius: 8px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); padding: 16px 20px; margin-bottom: 16px; }
.quote blockquote { margin: 0 0 8px 0; font-size: 1.15em; }
.quote .meta { color: #666; font-size: 0.9em; }
.notice { border-radius: 6px; padding: 10px 14px; margin-bottom: 16px; }
.notice.warning { background: #fff4ce; border: 1px solid #e0c060; }
.notice.error { background: #fde2e1; border: 1px solid #e08080; }
form label { display: block; margin-top: 12px; }
form textarea, form input[type=text] { width: 100%; box-sizing: border-box; padding: 6px; }
"#;

/// Escapes text for safe inclusion in HTML content and attributes.
///
/// # Examples
///
/// ```
/// use quote_board::api::rest::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Wraps page content in the shared layout.
#[must_use]
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav>
<a href="/">Quotes</a>
<a href="/random-quote">Random</a>
<a href="/add-quote">Add a quote</a>
<a href="/search">Search the web</a>
</nav>
<main>
{content}
</main>
</body>
</html>"#,
        title = escape_html(title),
    )
}

fn quote_card(quote: &Quote) -> String {
    let mut card = String::from(r#"<div class="quote">"#);
    let _ = write!(
        card,
        "<blockquote>&ldquo;{}&rdquo;</blockquote><div class=\"meta\">&mdash; {}",
        escape_html(quote.text()),
        escape_html(quote.author())
    );
    if let Some(created_at) = quote.created_at() {
        let _ = write!(card, " &middot; added {}", created_at.to_display());
    }
    if let Some(id) = quote.id() {
        let _ = write!(card, r#" &middot; <a href="/quotes/{id}">#{id}</a>"#);
    }
    card.push_str("</div></div>");
    card
}

fn quote_list(quotes: &[Quote], empty_message: &str) -> String {
    if quotes.is_empty() {
        return format!("<p>{}</p>", escape_html(empty_message));
    }
    quotes.iter().map(quote_card).collect()
}

fn notice(kind: &str, message: &str) -> String {
    format!(
        r#"<div class="notice {kind}">{}</div>"#,
        escape_html(message)
    )
}

/// Home page: local quotes, optionally filtered by `filter`.
#[must_use]
pub fn index_page(quotes: &[Quote], filter: Option<&str>) -> String {
    let filter = filter.unwrap_or_default();
    let mut content = format!(
        r#"<h1>Quotes</h1>
<form method="get" action="/">
<input type="text" name="q" value="{}" placeholder="Filter by text or author">
<button type="submit">Filter</button>
</form>"#,
        escape_html(filter)
    );
    let empty = if filter.is_empty() {
        "No quotes yet. Add the first one!"
    } else {
        "No quotes match your filter."
    };
    content.push_str(&quote_list(quotes, empty));
    layout("Quotes", &content)
}

/// Page showing a single quote.
#[must_use]
pub fn quote_page(title: &str, quote: Option<&Quote>) -> String {
    let content = match quote {
        Some(quote) => format!("<h1>{}</h1>{}", escape_html(title), quote_card(quote)),
        None => format!(
            "<h1>{}</h1><p>No quotes yet. <a href=\"/add-quote\">Add one</a>.</p>",
            escape_html(title)
        ),
    };
    layout(title, &content)
}

/// Add-quote form, optionally re-filled after a rejected submission.
#[must_use]
pub fn add_quote_page(error: Option<&str>, text: &str, author: &str) -> String {
    let mut content = String::from("<h1>Add a quote</h1>");
    if let Some(error) = error {
        content.push_str(&notice("error", error));
    }
    let _ = write!(
        content,
        r#"<form method="post" action="/add-quote">
<label for="text">Quote</label>
<textarea id="text" name="text" rows="4" required>{}</textarea>
<label for="author">Author</label>
<input type="text" id="author" name="author" value="{}">
<p><button type="submit">Save</button></p>
</form>"#,
        escape_html(text),
        escape_html(author)
    );
    layout("Add a quote", &content)
}

/// External search page with results and any diagnostic.
#[must_use]
pub fn search_page(query: Option<&str>, outcome: &SearchOutcome) -> String {
    let query = query.unwrap_or_default();
    let mut content = format!(
        r#"<h1>Search quotes</h1>
<form method="get" action="/search">
<input type="text" name="query" value="{}" placeholder="Search the quote library">
<button type="submit">Search</button>
</form>"#,
        escape_html(query)
    );
    if let Some(diagnostic) = outcome.diagnostic() {
        let kind = match outcome.severity() {
            Some(Severity::Warning) => "warning",
            Some(Severity::Error) | None => "error",
        };
        content.push_str(&notice(kind, diagnostic));
    }
    if !query.trim().is_empty() {
        content.push_str(&quote_list(outcome.quotes(), "No quotes found."));
    }
    layout("Search quotes", &content)
}

/// Error page.
#[must_use]
pub fn error_page(title: &str, message: &str) -> String {
    let content = format!(
        "<h1>{}</h1>{}<p><a href=\"/\">Back to quotes</a></p>",
        escape_html(title),
        notice("error", message)
    );
    layout(title, &content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::quote::NewQuote;
    use crate::domain::value_objects::{QuoteId, Timestamp};

    fn stored(text: &str, author: &str) -> Quote {
        NewQuote::new(text, author)
            .unwrap()
            .into_quote(QuoteId::new(5), Timestamp::from_millis(0).unwrap())
    }

    #[test]
    fn escapes_quote_text() {
        let page = index_page(&[stored("<script>alert(1)</script>", "x")], None);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn stored_quotes_link_to_detail() {
        let page = index_page(&[stored("hi", "me")], None);
        assert!(page.contains(r#"href="/quotes/5""#));
        assert!(page.contains("1970-01-01 00:00"));
    }

    #[test]
    fn empty_index_invites_adding() {
        assert!(index_page(&[], None).contains("No quotes yet"));
        assert!(index_page(&[], Some("zzz")).contains("No quotes match"));
    }

    #[test]
    fn add_form_refills_fields() {
        let page = add_quote_page(Some("quote text must not be empty"), "", "Ann \"A\"");
        assert!(page.contains("must not be empty"));
        assert!(page.contains("Ann &quot;A&quot;"));
    }

    #[test]
    fn search_page_shows_warning_with_results() {
        let outcome = SearchOutcome::default();
        let page = search_page(None, &outcome);
        assert!(!page.contains(r#"class="notice"#));

        let failed = SearchOutcome::failed("Network error: refused");
        let page = search_page(Some("x"), &failed);
        assert!(page.contains(r#"class="notice error""#));
        assert!(page.contains("No quotes found."));
    }

    #[test]
    fn insecure_search_without_results_is_a_warning() {
        let outcome = SearchOutcome::with_warning(Vec::new(), Some("verification was disabled".to_string()));
        let page = search_page(Some("nothing"), &outcome);
        assert!(page.contains(r#"class="notice warning""#));
        assert!(!page.contains(r#"class="notice error""#));
        assert!(page.contains("No quotes found."));
    }
}
