use super::View;
use crate::countries::{Continent, CountryStore};
use crate::stats::{ContinentProgress, completion_percent};
use crate::ui::{NavItem, escape};
use std::collections::HashSet;

pub struct CollectionView<'a> {
    pub store: &'a CountryStore,
    pub visited: HashSet<String>,
    pub progress: Vec<ContinentProgress>,
    /// `None` shows every continent.
    pub filter: Option<Continent>,
}

impl CollectionView<'_> {
    fn tabs(&self) -> String {
        let tab = |href: String, label: &str, active: bool| {
            let class = if active { "button" } else { "button secondary" };
            format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
        };
        let mut html = tab("/collection".to_string(), "전체", self.filter.is_none());
        for progress in &self.progress {
            html.push_str(&tab(
                format!("/collection?continent={}", progress.continent.as_str()),
                &format!("{} {}%", progress.name_ko, progress.percent),
                self.filter == Some(progress.continent),
            ));
        }
        html
    }
}

impl View for CollectionView<'_> {
    fn title(&self) -> String {
        "국가 컬렉션".to_string()
    }

    fn active_nav(&self) -> NavItem {
        NavItem::Collection
    }

    fn render(&self) -> String {
        let countries = match self.filter {
            Some(continent) => self.store.by_continent(continent),
            None => self.store.all().iter().collect(),
        };
        let collected = countries
            .iter()
            .filter(|country| self.visited.contains(&country.code))
            .count();

        let flags: String = countries
            .iter()
            .map(|country| {
                let visited = self.visited.contains(&country.code);
                format!(
                    r#"<div class="flag{class}" title="{en}"><div>{flag}</div><div>{name}</div></div>"#,
                    class = if visited { " visited" } else { "" },
                    en = escape(&country.name_en),
                    flag = country.flag,
                    name = escape(&country.name_ko),
                )
            })
            .collect();

        format!(
            r#"<section class="card">
  <h1>국가 컬렉션</h1>
  <p class="subtitle">{collected} / {total} 수집 ({percent}%)</p>
  <div class="bar"><span style="width: {percent}%"></span></div>
  <div class="grid">{tabs}</div>
  <div class="flags">{flags}</div>
</section>"#,
            total = countries.len(),
            percent = completion_percent(collected, countries.len()),
            tabs = self.tabs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::continent_progress;
    use chrono::Utc;

    #[test]
    fn continent_filter_limits_the_grid() {
        let mut store = CountryStore::default();
        store.initialize(&mut None, Utc::now()).unwrap();
        let view = CollectionView {
            store: &store,
            visited: HashSet::from(["AU".to_string(), "JP".to_string()]),
            progress: continent_progress(&[], &store),
            filter: Some(Continent::Oceania),
        };

        let html = view.render();
        let oceania = store.count_in(Continent::Oceania);
        assert!(html.contains(&format!("1 / {oceania} 수집")));
        assert!(html.contains(r#"<div class="flag visited" title="Australia">"#));
        assert!(!html.contains(r#"title="Japan""#));
        assert!(html.contains(r#"<a class="button" href="/collection?continent=oceania">"#));
    }
}
