use crate::config::Features;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// One-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="toast toast-{}" role="status">{}</div>"#,
            self.kind.as_str(),
            escape(&self.message)
        )
    }
}

pub fn escape(raw: &str) -> String {
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

/// Percent-encodes a query-string value.
pub fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Hub,
    Logs,
    Report,
    Collection,
    Profile,
    Settings,
    /// Signed-out screens show no navigation.
    None,
}

impl NavItem {
    fn entries(features: Features) -> Vec<(NavItem, &'static str, &'static str)> {
        let mut entries = vec![(NavItem::Hub, "/", "홈"), (NavItem::Logs, "/logs", "여행 기록")];
        if features.travel_report {
            entries.push((NavItem::Report, "/report", "여행 리포트"));
        }
        if features.country_collection {
            entries.push((NavItem::Collection, "/collection", "국가 컬렉션"));
        }
        entries.push((NavItem::Profile, "/profile", "프로필"));
        entries.push((NavItem::Settings, "/settings", "설정"));
        entries
    }
}

fn render_nav(active: NavItem, features: Features) -> String {
    if active == NavItem::None {
        return String::new();
    }
    let links: String = NavItem::entries(features)
        .into_iter()
        .map(|(item, href, label)| {
            let class = if item == active { " class=\"active\"" } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect();
    format!(r#"<nav class="nav">{links}</nav>"#)
}

/// Wraps a screen body in the shared page shell.
pub fn render_page(
    title: &str,
    active: NavItem,
    body: &str,
    toast: Option<&Toast>,
    features: Features,
) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &render_nav(active, features))
        .replace("{{TOAST}}", &toast.map(Toast::render).unwrap_or_default())
        .replace("{{BODY}}", body)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl Pagination {
    /// Clamps `requested` into `1..=total_pages`.
    pub fn new(requested: Option<usize>, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let mut pagination = Self {
            page: 1,
            per_page,
            total,
        };
        pagination.page = requested.unwrap_or(1).clamp(1, pagination.total_pages());
        pagination
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    pub fn range(&self) -> Range<usize> {
        let start = self.offset().min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Page numbers around the current one, at most two on either side.
    pub fn window(&self) -> Range<usize> {
        let first = self.page.saturating_sub(2).max(1);
        let last = (self.page + 2).min(self.total_pages());
        first..last + 1
    }

    pub fn render(&self, href: impl Fn(usize) -> String) -> String {
        if self.total_pages() <= 1 {
            return String::new();
        }

        let mut html = String::from(r#"<div class="pagination">"#);
        if self.has_previous() {
            html.push_str(&format!(r#"<a href="{}" class="page-prev">이전</a>"#, href(self.page - 1)));
        }
        for page in self.window() {
            if page == self.page {
                html.push_str(&format!(r#"<span class="page current">{page}</span>"#));
            } else {
                html.push_str(&format!(r#"<a href="{}" class="page">{page}</a>"#, href(page)));
            }
        }
        if self.has_next() {
            html.push_str(&format!(r#"<a href="{}" class="page-next">다음</a>"#, href(self.page + 1)));
        }
        html.push_str("</div>");
        html
    }
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · 여행 일지</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Noto+Sans+KR:wght@400;600&display=swap');

    :root {
      --bg-1: #eef5f3;
      --bg-2: #bfe3da;
      --ink: #21302d;
      --muted: #66736f;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Noto Sans KR", sans-serif;
      padding: 24px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .nav {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .nav a {
      padding: 8px 14px;
      border-radius: 999px;
      color: var(--muted);
      text-decoration: none;
      font-weight: 600;
    }

    .nav a.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 18px;
    }

    h1, h2, h3 {
      margin: 0;
    }

    .subtitle, .hint {
      margin: 0;
      color: var(--muted);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      letter-spacing: 0.08em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .delta-positive { color: #2d7a4b; }
    .delta-negative { color: #c63b2b; }
    .delta-neutral { color: var(--muted); }
    .delta-first { color: var(--accent); }

    .heatmap {
      display: grid;
      grid-template-columns: repeat(12, 1fr);
      gap: 6px;
    }

    .heatmap .month {
      border-radius: 10px;
      padding: 10px 0;
      text-align: center;
      font-size: 0.85rem;
    }

    .activity-none { background: #eef1f0; }
    .activity-low { background: #cde8df; }
    .activity-medium { background: #9fd4c3; }
    .activity-high { background: #5fb59b; color: white; }
    .activity-very-high { background: #2f7f6a; color: white; }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: #eef1f0;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .log-cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 14px;
    }

    .log-list {
      width: 100%;
      border-collapse: collapse;
    }

    .log-list td, .log-list th {
      padding: 10px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      text-align: left;
    }

    .flags {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(120px, 1fr));
      gap: 10px;
    }

    .flag {
      border-radius: 14px;
      padding: 10px;
      background: white;
      text-align: center;
      opacity: 0.35;
    }

    .flag.visited {
      opacity: 1;
      border: 2px solid var(--accent);
    }

    form.stack {
      display: grid;
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    input, select, textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button, .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      display: inline-flex;
      justify-content: center;
    }

    button.secondary, .button.secondary {
      background: var(--accent-2);
    }

    button.danger {
      background: #c63b2b;
    }

    .pagination {
      display: flex;
      gap: 6px;
      justify-content: center;
    }

    .pagination a, .pagination span {
      padding: 6px 12px;
      border-radius: 999px;
      text-decoration: none;
      color: var(--accent-2);
    }

    .pagination .current {
      background: var(--accent-2);
      color: white;
    }

    .toast {
      border-radius: 16px;
      padding: 12px 16px;
      font-weight: 600;
      animation: fade 4s ease forwards;
    }

    .toast-success { background: #dff3e7; color: #2d7a4b; }
    .toast-error { background: #fbe3df; color: #c63b2b; }
    .toast-info { background: #e3edf7; color: var(--accent-2); }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 32px 0;
    }

    @keyframes fade {
      0%, 80% { opacity: 1; }
      100% { opacity: 0; }
    }

    @media (max-width: 600px) {
      .card {
        padding: 20px;
      }
      .heatmap {
        grid-template-columns: repeat(6, 1fr);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    {{NAV}}
    {{TOAST}}
    {{BODY}}
  </main>
  <script>
    document.querySelectorAll('form[data-confirm]').forEach((form) => {
      form.addEventListener('submit', (event) => {
        if (!window.confirm(form.dataset.confirm)) {
          event.preventDefault();
        }
      });
    });
  </script>
</body>
</html>
"#;
