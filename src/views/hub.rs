use super::{View, country_label, date_range, one_decimal, stat_card, stars};
use crate::config::Features;
use crate::countries::CountryStore;
use crate::models::{TravelLogEntry, UserProfile, avatar_glyph};
use crate::stats::{BasicStats, completion_percent};
use crate::ui::{NavItem, escape};

pub const RECENT_COUNT: usize = 3;

pub struct HubView<'a> {
    pub store: &'a CountryStore,
    pub profile: UserProfile,
    pub stats: BasicStats,
    /// Newest first, already truncated to [`RECENT_COUNT`].
    pub recent: Vec<TravelLogEntry>,
    pub features: Features,
}

impl View for HubView<'_> {
    fn title(&self) -> String {
        "홈".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Hub
    }

    fn render(&self) -> String {
        let stats = &self.stats;
        let completion = completion_percent(stats.visited_countries, self.store.len());

        let mut shortcuts = vec![
            r#"<a class="button" href="/logs/new">새 여행 기록</a>"#,
            r#"<a class="button secondary" href="/logs">기록 보기</a>"#,
        ];
        if self.features.travel_report {
            shortcuts.push(r#"<a class="button secondary" href="/report">여행 리포트</a>"#);
        }
        if self.features.country_collection {
            shortcuts.push(r#"<a class="button secondary" href="/collection">국가 컬렉션</a>"#);
        }

        let recent = if self.recent.is_empty() {
            r#"<p class="empty">아직 여행 기록이 없어요. 첫 여행을 기록해보세요!</p>"#.to_string()
        } else {
            let cards: String = self
                .recent
                .iter()
                .map(|entry| {
                    format!(
                        r#"<a class="stat" href="/logs/{id}/edit"><span class="label">{country}</span><strong>{city}</strong><span class="hint">{dates}</span><span>{stars}</span></a>"#,
                        id = escape(&entry.id),
                        country = country_label(self.store, &entry.country),
                        city = escape(&entry.city),
                        dates = date_range(entry),
                        stars = stars(entry.rating),
                    )
                })
                .collect();
            format!(r#"<div class="log-cards">{cards}</div>"#)
        };

        format!(
            r#"<section class="card">
  <h1>{avatar} {name}님, 안녕하세요</h1>
  <p class="subtitle">지금까지 {countries}개 나라, 전체의 {completion}%를 여행했어요.</p>
  <div class="grid">{trips}{visited}{cities}{days}{average}</div>
  <div class="grid">{shortcuts}</div>
</section>
<section class="card">
  <h2>최근 여행</h2>
  {recent}
</section>"#,
            avatar = avatar_glyph(&self.profile.avatar),
            name = escape(&self.profile.name),
            countries = stats.visited_countries,
            trips = stat_card("총 여행", &format!("{}회", stats.total_trips)),
            visited = stat_card("방문 국가", &format!("{}개국", stats.visited_countries)),
            cities = stat_card("방문 도시", &format!("{}곳", stats.visited_cities)),
            days = stat_card("여행한 날", &format!("{}일", stats.total_travel_days)),
            average = stat_card("평균 평점", &one_decimal(stats.average_rating)),
            shortcuts = shortcuts.concat(),
        )
    }
}
