//! HTML rendering of the view descriptions.
//!
//! Any user-visible string interpolated into markup goes through
//! [`escape_html`] first; that applies to titles, platforms, and
//! descriptions. URLs and generated labels pass through as-is.

use crate::models::ReleaseStatus;
use crate::view::{CalendarView, ListView, ModalView};

/// Replace `& < > " '` with their HTML entity equivalents.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn status_class(status: ReleaseStatus) -> &'static str {
    match status {
        ReleaseStatus::Released => "badge released",
        ReleaseStatus::Upcoming => "badge upcoming",
    }
}

/// Render the result list. An empty view renders the no-results indicator
/// and zero rows.
pub fn render_list(view: &ListView) -> String {
    if view.is_empty() {
        return r#"<p class="no-results">No results found.</p>"#.to_string();
    }

    let mut out = String::from("<ul class=\"games\">\n");
    for row in &view.rows {
        out.push_str(&format!(
            concat!(
                "  <li class=\"game-item\" data-id=\"{id}\">\n",
                "    <div class=\"thumb\" style=\"background-image:url('{image}')\"></div>\n",
                "    <div class=\"game-meta\">\n",
                "      <h3 class=\"title\">{title}</h3>\n",
                "      <div class=\"meta-row\">\n",
                "        <span class=\"{badge_class}\">{badge}</span>\n",
                "        <span>{platform}</span>\n",
                "        <span>{date}</span>\n",
                "      </div>\n",
                "      <p class=\"summary\">{summary}</p>\n",
                "    </div>\n",
                "    <a class=\"detail-link\" href=\"{url}\">Read</a>\n",
                "  </li>\n",
            ),
            id = row.id,
            image = row.image_url,
            title = escape_html(&row.title),
            badge_class = status_class(row.status),
            badge = row.status.label(),
            platform = escape_html(&row.platform),
            date = row.date_label,
            summary = escape_html(&row.summary),
            url = row.detail_url,
        ));
    }
    out.push_str("</ul>\n");
    out
}

/// Render the release calendar rows.
pub fn render_calendar(view: &CalendarView) -> String {
    let mut out = String::from("<ul class=\"calendar\">\n");
    for row in &view.rows {
        out.push_str(&format!(
            "  <li><span>{}</span><strong>{}</strong></li>\n",
            row.date_label,
            escape_html(&row.title),
        ));
    }
    out.push_str("</ul>\n");
    out
}

/// Render the expanded details body for one entry.
pub fn render_modal(view: &ModalView) -> String {
    format!(
        concat!(
            "<div class=\"modal-body\">\n",
            "  <h3>{title}</h3>\n",
            "  <div class=\"modal-media\">\n",
            "    <div class=\"cover\" style=\"background-image:url('{image}')\"></div>\n",
            "    <div>\n",
            "      <div class=\"platform\">{platform}</div>\n",
            "      <div><strong>{heading}</strong> {date}</div>\n",
            "    </div>\n",
            "  </div>\n",
            "  <p>{description}</p>\n",
            "  <a class=\"detail-link\" href=\"{url}\">More information</a>\n",
            "</div>\n",
        ),
        title = escape_html(&view.title),
        image = view.image_url,
        platform = escape_html(&view.platform),
        heading = view.date_heading,
        date = view.date_label,
        description = escape_html(&view.description),
        url = view.detail_url,
    )
}

/// Render a standalone page holding the current list and calendar.
pub fn render_page(list: &ListView, calendar: &CalendarView) -> String {
    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "  <meta charset=\"utf-8\">\n",
            "  <title>Game Releases</title>\n",
            "</head>\n",
            "<body>\n",
            "<header><h1>Game Releases</h1></header>\n",
            "<main>\n",
            "<section class=\"list\">\n{list}</section>\n",
            "<aside class=\"sidebar\">\n<h2>Release Calendar</h2>\n{calendar}</aside>\n",
            "</main>\n",
            "</body>\n",
            "</html>\n",
        ),
        list = render_list(list),
        calendar = render_calendar(calendar),
    )
}
