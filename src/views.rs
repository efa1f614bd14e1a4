//! Server-rendered pages for the phone punch form and the admin log.

use std::fmt::Write;

use crate::model::punch_card::PunchCardView;

const STYLE: &str = r#"
    body { font-family: sans-serif; margin: 1.5rem; }
    form { display: flex; flex-direction: column; gap: 1rem; max-width: 24rem; }
    input, button { font-size: 1.2rem; padding: 0.6rem; }
    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

pub fn render_index() -> String {
    page(
        "打刻",
        r#"<h1>打刻</h1>
<form method="post" action="/punch">
  <label for="employee_name">名前</label>
  <input id="employee_name" name="employee_name" type="text" required>
  <button type="submit" name="action" value="check_in">出勤</button>
  <button type="submit" name="action" value="check_out">退勤</button>
</form>
<p><a href="/admin">管理画面</a></p>"#,
    )
}

pub fn render_admin(records: &[PunchCardView]) -> String {
    let mut rows = String::new();
    for r in records {
        // writing into a String cannot fail
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.id,
            escape_html(&r.employee_name),
            escape_html(&r.check_in_time),
            escape_html(&r.check_out_time),
        );
    }

    let body = format!(
        r#"<h1>打刻記録</h1>
<table>
<thead><tr><th>ID</th><th>名前</th><th>出勤</th><th>退勤</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    );
    page("管理画面", &body)
}
