//! Deterministic, offline HTML renderer (minijinja, embedded template).
//!
//! • No external assets; inline CSS only.
//! • Auto-escaping is on (template name ends in `.html`).
//! • All numbers arrive pre-formatted in the model.

use minijinja::{context, Environment};

use crate::{ReportError, ReportModel};

static TEMPLATE: &str = r#"<!doctype html>
<html lang="vi"><meta charset="utf-8">
<title>{{ m.title }}</title>
<style>
body{font-family:sans-serif;margin:2rem}
table{border-collapse:collapse}
td,th{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}
.low{color:#b00}
.na{color:#888}
</style>
<h1>{{ m.title }}</h1>
<p>Tổng: <strong>{{ m.total_label }}</strong> · Cách chia: {{ m.policy }} · Bắt đầu: {{ m.start_date }}</p>
{% if m.pets %}
<table>
<tr><th>Bé</th><th>Phần</th><th>Mỗi ngày</th><th>Dự kiến</th><th>Hết vào</th></tr>
{% for p in m.pets %}
<tr{% if p.running_low %} class="low"{% elif p.cannot_estimate %} class="na"{% endif %}>
<td>{{ p.pet_name }}</td>
<td>{{ p.grams_label }}</td>
<td>{% if p.cannot_estimate %}—{% else %}{{ p.daily_intake_grams }} g{% endif %}</td>
<td>{{ p.duration_message }}</td>
<td>{% if p.cannot_estimate %}—{% else %}{{ p.finish_date }}{% endif %}</td>
</tr>
{% endfor %}
</table>
{% else %}
<p class="na">Chưa chia được: chưa có bé nào có đủ dữ liệu.</p>
{% endif %}
{% if m.leftover %}<p>{{ m.leftover.message }}</p>{% endif %}
{% if m.low_stock %}<p class="low">Sắp hết: {{ m.low_stock | join(", ") }}</p>{% endif %}
<footer><small>{{ m.as_of }}</small></footer>
</html>
"#;

/// Render the report as a single self-contained HTML page.
pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", TEMPLATE)
        .map_err(|_| ReportError::Template("add_template"))?;
    let tmpl = env
        .get_template("report.html")
        .map_err(|_| ReportError::Template("get_template"))?;
    tmpl.render(context! { m => model })
        .map_err(|_| ReportError::Template("render"))
}
