use super::{View, country_label, country_options, date_range, selected, stars};
use crate::countries::CountryStore;
use crate::models::{LogQuery, Purpose, TravelLogEntry, ViewMode, checked_year, parse_tags};
use crate::ui::{NavItem, Pagination, encode_query, escape};
use serde::Deserialize;

/// Filter form of the logs screen, as it arrives in the query string.
/// Blank selects come through as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogFilters {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub view: String,
}

impl LogFilters {
    pub fn to_query(&self) -> LogQuery {
        let year = self.year.trim().parse::<i32>().ok().and_then(checked_year);
        LogQuery {
            country: Some(self.country.trim().to_ascii_uppercase()).filter(|c| !c.is_empty()),
            year_from: year,
            year_to: year,
            purpose: Purpose::parse(&self.purpose),
            tags: parse_tags(&self.tag),
            text: Some(self.q.trim().to_string()).filter(|q| !q.is_empty()),
            limit: None,
            offset: None,
        }
    }

    pub fn page(&self) -> Option<usize> {
        self.page.trim().parse().ok()
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        ViewMode::parse(&self.view)
    }

    pub fn is_active(&self) -> bool {
        [&self.country, &self.year, &self.purpose, &self.tag, &self.q]
            .iter()
            .any(|value| !value.trim().is_empty())
    }

    /// Link to `page` that keeps the current filters.
    pub fn href(&self, page: usize) -> String {
        let mut pairs: Vec<String> = [
            ("country", &self.country),
            ("year", &self.year),
            ("purpose", &self.purpose),
            ("tag", &self.tag),
            ("q", &self.q),
        ]
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{key}={}", encode_query(value.trim())))
        .collect();
        pairs.push(format!("page={page}"));
        format!("/logs?{}", pairs.join("&"))
    }
}

pub struct LogsView<'a> {
    pub store: &'a CountryStore,
    pub filters: LogFilters,
    /// Entries on the current page only.
    pub entries: Vec<TravelLogEntry>,
    pub pagination: Pagination,
    pub mode: ViewMode,
    pub years: Vec<i32>,
}

impl LogsView<'_> {
    fn render_filters(&self) -> String {
        let f = &self.filters;
        let years: String = self
            .years
            .iter()
            .map(|year| {
                format!(
                    r#"<option value="{year}"{}>{year}년</option>"#,
                    selected(f.year.trim() == year.to_string())
                )
            })
            .collect();
        let purposes: String = Purpose::ALL
            .iter()
            .map(|purpose| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    purpose.as_str(),
                    selected(f.purpose.trim() == purpose.as_str()),
                    purpose.label()
                )
            })
            .collect();

        format!(
            r#"<form class="grid" method="get" action="/logs">
  <label>국가<select name="country">{countries}</select></label>
  <label>연도<select name="year"><option value="">전체</option>{years}</select></label>
  <label>목적<select name="purpose"><option value="">전체</option>{purposes}</select></label>
  <label>태그<input name="tag" value="{tag}" placeholder="쉼표로 구분" /></label>
  <label>검색<input name="q" value="{q}" placeholder="도시, 메모" /></label>
  <button type="submit">필터 적용</button>
</form>"#,
            countries = country_options(self.store, &f.country, "전체"),
            tag = escape(&f.tag),
            q = escape(&f.q),
        )
    }

    fn render_cards(&self) -> String {
        let cards: String = self
            .entries
            .iter()
            .map(|entry| {
                let tags: String = entry
                    .tags
                    .iter()
                    .map(|tag| format!("#{} ", escape(tag)))
                    .collect();
                format!(
                    r#"<a class="stat" href="/logs/{id}/edit"><span class="label">{country}</span><strong>{city}</strong><span class="hint">{dates}</span><span>{purpose} · {stars}</span><span class="hint">{tags}</span></a>"#,
                    id = escape(&entry.id),
                    country = country_label(self.store, &entry.country),
                    city = escape(&entry.city),
                    dates = date_range(entry),
                    purpose = entry.purpose.label(),
                    stars = stars(entry.rating),
                )
            })
            .collect();
        format!(r#"<div class="log-cards">{cards}</div>"#)
    }

    fn render_table(&self) -> String {
        let rows: String = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<tr><td>{country}</td><td><a href="/logs/{id}/edit">{city}</a></td><td>{dates}</td><td>{purpose}</td><td>{stars}</td></tr>"#,
                    id = escape(&entry.id),
                    country = country_label(self.store, &entry.country),
                    city = escape(&entry.city),
                    dates = date_range(entry),
                    purpose = entry.purpose.label(),
                    stars = stars(entry.rating),
                )
            })
            .collect();
        format!(
            r#"<table class="log-list"><thead><tr><th>국가</th><th>도시</th><th>기간</th><th>목적</th><th>평점</th></tr></thead><tbody>{rows}</tbody></table>"#
        )
    }
}

impl View for LogsView<'_> {
    fn title(&self) -> String {
        "여행 기록".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Logs
    }

    fn render(&self) -> String {
        let body = if self.entries.is_empty() {
            if self.filters.is_active() {
                r#"<p class="empty">조건에 맞는 여행 기록이 없습니다.</p>"#.to_string()
            } else {
                r#"<p class="empty">아직 여행 기록이 없어요. 첫 여행을 기록해보세요!</p>"#.to_string()
            }
        } else {
            match self.mode {
                ViewMode::Card => self.render_cards(),
                ViewMode::List => self.render_table(),
            }
        };

        let toggle = |mode: ViewMode, label: &str| {
            let class = if mode == self.mode { "button" } else { "button secondary" };
            format!(
                r#"<a class="{class}" href="/logs?view={}">{label}</a>"#,
                mode.as_str()
            )
        };

        format!(
            r#"<section class="card">
  <h1>여행 기록</h1>
  <p class="subtitle">총 {total}개의 기록</p>
  <div class="grid">
    <a class="button" href="/logs/new">새 여행 기록</a>
    {card}{list}
  </div>
  {filters}
  {body}
  {pages}
</section>"#,
            total = self.pagination.total,
            card = toggle(ViewMode::Card, "카드 보기"),
            list = toggle(ViewMode::List, "목록 보기"),
            filters = self.render_filters(),
            pages = self.pagination.render(|page| self.filters.href(page)),
        )
    }
}
