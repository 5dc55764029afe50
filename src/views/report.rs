use super::{View, country_label, one_decimal, stat_card};
use crate::config::Features;
use crate::countries::CountryStore;
use crate::stats::{DeltaKind, MetricDelta, TravelReport};
use crate::ui::{NavItem, escape};

pub struct ReportView<'a> {
    pub store: &'a CountryStore,
    pub report: TravelReport,
    pub features: Features,
}

fn delta_badge(delta: &MetricDelta) -> String {
    let text = match (delta.kind, delta.percent()) {
        (DeltaKind::First, _) => "첫 기록".to_string(),
        (DeltaKind::Neutral, _) => "변화 없음".to_string(),
        (_, Some(percent)) => format!("{:+} ({percent:+}%)", round1(delta.difference)),
        (_, None) => format!("{:+}", round1(delta.difference)),
    };
    format!(r#"<span class="{}">{}</span>"#, delta.kind.css_class(), text)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ReportView<'_> {
    fn year_links(&self) -> String {
        if self.report.years.is_empty() {
            return String::new();
        }
        let links: String = self
            .report
            .years
            .iter()
            .map(|year| {
                let class = if *year == self.report.year { "button" } else { "button secondary" };
                format!(r#"<a class="{class}" href="/report?year={year}">{year}</a>"#)
            })
            .collect();
        format!(r#"<div class="grid">{links}</div>"#)
    }

    fn yearly(&self) -> String {
        let yearly = &self.report.yearly;
        let current = &yearly.current.stats;
        let deltas = &yearly.deltas;
        let rows = [
            ("여행 횟수", current.total_trips.to_string(), &deltas.total_trips),
            ("방문 국가", current.visited_countries.to_string(), &deltas.unique_countries),
            ("방문 도시", current.visited_cities.to_string(), &deltas.unique_cities),
            ("여행한 날", current.total_travel_days.to_string(), &deltas.total_travel_days),
            ("평균 기간", one_decimal(current.average_travel_days), &deltas.average_travel_days),
            ("평균 평점", one_decimal(current.average_rating), &deltas.average_rating),
        ];
        let cards: String = rows
            .iter()
            .map(|(label, value, delta)| {
                format!(
                    r#"<div class="stat"><span class="label">{label}</span><span class="value">{value}</span>{}</div>"#,
                    delta_badge(delta)
                )
            })
            .collect();
        format!(
            r#"<section class="card"><h2>{year}년 vs {prev}년</h2><div class="grid">{cards}</div></section>"#,
            year = yearly.year,
            prev = yearly.previous.year,
        )
    }

    fn heatmap(&self) -> String {
        if !self.features.heatmap {
            return String::new();
        }
        let heatmap = &self.report.heatmap;
        let cells: String = heatmap
            .months
            .iter()
            .map(|bucket| {
                format!(
                    r#"<div class="month {}" title="{}건">{}월</div>"#,
                    bucket.level.css_class(),
                    bucket.count,
                    bucket.month
                )
            })
            .collect();
        format!(
            r#"<section class="card"><h2>월별 여행 활동</h2><p class="hint">{year}년 총 {total}건</p><div class="heatmap">{cells}</div></section>"#,
            year = heatmap.year,
            total = heatmap.total,
        )
    }

    fn favorites(&self) -> String {
        if self.report.favorites.is_empty() {
            return r#"<p class="empty">아직 방문한 나라가 없어요.</p>"#.to_string();
        }
        let items: String = self
            .report
            .favorites
            .iter()
            .enumerate()
            .map(|(rank, summary)| {
                format!(
                    r#"<div class="stat"><span class="label">{rank}위</span><strong>{country}</strong><span class="hint">{visits}회 방문 · {days}일 체류 · 평점 {rating}</span></div>"#,
                    rank = rank + 1,
                    country = country_label(self.store, &summary.code),
                    visits = summary.visit_count,
                    days = summary.total_stay_days,
                    rating = one_decimal(summary.average_rating),
                )
            })
            .collect();
        format!(r#"<div class="grid">{items}</div>"#)
    }

    fn continents(&self) -> String {
        self.report
            .continents
            .iter()
            .map(|progress| {
                format!(
                    r#"<div class="stat"><span class="label">{name}</span><span>{visited} / {total} ({percent}%)</span><div class="bar"><span style="width: {percent}%"></span></div></div>"#,
                    name = progress.name_ko,
                    visited = progress.visited,
                    total = progress.total,
                    percent = progress.percent,
                )
            })
            .collect()
    }

    fn dna(&self) -> String {
        let dna = &self.report.dna;
        if dna.total_trips == 0 {
            return r#"<p class="empty">여행을 기록하면 나만의 여행 DNA를 알려드려요.</p>"#.to_string();
        }
        let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();
        [
            stat_card("주요 목적", &or_dash(dna.dominant_purpose.map(|p| p.label()))),
            stat_card("여행 스타일", &or_dash(dna.dominant_style.map(|s| s.label()))),
            stat_card("좋아하는 대륙", &or_dash(dna.favorite_continent.map(|c| c.name_ko()))),
            stat_card("좋아하는 계절", &or_dash(dna.favorite_season.map(|s| s.label()))),
            stat_card("여행 기간", &or_dash(dna.trip_length.map(|t| t.label()))),
            stat_card("탐험가 지수", &format!("{}%", dna.explorer_ratio)),
        ]
        .concat()
    }
}

impl View for ReportView<'_> {
    fn title(&self) -> String {
        format!("{}년 여행 리포트", self.report.year)
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Report
    }

    fn render(&self) -> String {
        let basic = &self.report.basic;
        format!(
            r#"<section class="card">
  <h1>{title}</h1>
  {years}
  <div class="grid">{trips}{countries}{cities}{days}{average}</div>
</section>
{yearly}
{heatmap}
<section class="card"><h2>가장 많이 방문한 나라</h2>{favorites}</section>
<section class="card"><h2>대륙별 정복률</h2><div class="grid">{continents}</div></section>
<section class="card"><h2>나의 여행 DNA</h2><div class="grid">{dna}</div></section>
<section class="card"><h2>여행 인사이트</h2><p>{insight}</p></section>"#,
            title = escape(&self.title()),
            years = self.year_links(),
            trips = stat_card("전체 여행", &format!("{}회", basic.total_trips)),
            countries = stat_card("방문 국가", &format!("{}개국", basic.visited_countries)),
            cities = stat_card("방문 도시", &format!("{}곳", basic.visited_cities)),
            days = stat_card("여행한 날", &format!("{}일", basic.total_travel_days)),
            average = stat_card("평균 여행 기간", &format!("{}일", one_decimal(basic.average_travel_days))),
            yearly = self.yearly(),
            heatmap = self.heatmap(),
            favorites = self.favorites(),
            continents = self.continents(),
            dna = self.dna(),
            insight = escape(self.report.insight),
        )
    }
}
