use reqwest::StatusCode;

use crate::models_api::match_summary::MatchSummary;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}li{margin:.5em 0}.status{color:#555}.error{color:#b00}";

pub fn matches_page(matches: &[MatchSummary]) -> String {
    let body = if matches.is_empty() {
        "<p>No live matches right now.</p>".to_string()
    } else {
        let items: String = matches.iter()
            .map(|m| {
                let id = escape(&m.match_id);
                format!(
                    "<li><strong>{} vs {}</strong> <span class=\"status\">{}</span> \
                     <a href=\"/scorecard/{id}\">Scorecard</a> <a href=\"/commentary/{id}\">Commentary</a></li>",
                    escape(&m.team1), escape(&m.team2), escape(&m.status),
                )
            })
            .collect();
        format!("<ul>{items}</ul>")
    };
    page("Live Cricket Matches", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<p class=\"error\">Error {}: {}</p><p><a href=\"/\">Back to live matches</a></p>",
        status.as_u16(),
        escape(message),
    );
    page("Error", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title><style>{STYLE}</style></head>\
         <body><h1>{title}</h1>{body}</body></html>"
    )
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
