//! Shared page chrome: document shell, navigation and HTML escaping

use axum::response::Html;
use recipebox_common::db::User;

use crate::forms::{errors_for, FieldError};

const STYLE: &str = r#"
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 0 20px 40px;
            line-height: 1.6;
            color: #333;
        }
        nav {
            display: flex;
            gap: 16px;
            align-items: center;
            padding: 12px 0;
            border-bottom: 2px solid #c0392b;
            margin-bottom: 24px;
        }
        nav .brand { font-weight: bold; color: #c0392b; }
        nav .user { margin-left: auto; }
        a { color: #0066cc; }
        table { border-collapse: collapse; width: 100%; margin: 16px 0; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #ddd; }
        th { background: #f5f5f5; }
        form p { margin: 10px 0; }
        label { display: inline-block; min-width: 160px; }
        .errors { color: #b00020; margin: 2px 0 0; padding-left: 18px; }
        .chart img { max-width: 100%; border: 1px solid #ddd; }
        .button {
            display: inline-block;
            padding: 6px 16px;
            background: #c0392b;
            color: white;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            cursor: pointer;
        }
        .pager { display: flex; gap: 12px; }
    "#;

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn navigation(user: Option<&User>) -> String {
    let account = match user {
        Some(user) => format!(
            r#"<span class="user">Signed in as <strong>{}</strong> · <a href="/logout/">Log out</a></span>"#,
            escape_html(&user.username)
        ),
        None => r#"<span class="user"><a href="/login/">Log in</a></span>"#.to_string(),
    };

    format!(
        r#"<nav>
    <a class="brand" href="/">Recipebox</a>
    <a href="/recipes/">Recipes</a>
    <a href="/categories/">Categories</a>
    <a href="/recipes/search/">Search</a>
    <a href="/recipes/add/">Add recipe</a>
    <a href="/about/">About</a>
    {}
</nav>"#,
        account
    )
}

/// Wrap page content in the shared document shell
///
/// `title` is escaped here; `body` must already be safe HTML.
pub fn render_page(title: &str, user: Option<&User>, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Recipebox</title>
    <style>{style}</style>
</head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
        style = STYLE,
        nav = navigation(user),
        body = body,
    ))
}

/// `<ul class="errors">` for one field, or nothing when the field is clean
pub fn field_errors(errors: &[FieldError], field: &str) -> String {
    let items: Vec<String> = errors_for(errors, field)
        .map(|message| format!("<li>{}</li>", escape_html(message)))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="errors">{}</ul>"#, items.join(""))
    }
}

/// `<option>` elements with `selected` on the current value
pub fn select_options(options: &[(String, String)], selected: &str) -> String {
    options
        .iter()
        .map(|(value, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(value),
                if value == selected { " selected" } else { "" },
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
