//! Screens. Each one is a plain struct built from freshly fetched data,
//! rendered once into the page shell and dropped with the request.

pub mod auth;
pub mod collection;
pub mod hub;
pub mod log_form;
pub mod logs;
pub mod profile;
pub mod report;
pub mod settings;

use crate::config::Features;
use crate::countries::{Continent, CountryStore};
use crate::models::TravelLogEntry;
use crate::ui::{NavItem, Toast, escape, render_page};

pub trait View: Send + Sync {
    fn title(&self) -> String;
    fn active_nav(&self) -> NavItem;
    fn render(&self) -> String;
}

pub fn render_view(view: &dyn View, toast: Option<&Toast>, features: Features) -> String {
    render_page(&view.title(), view.active_nav(), &view.render(), toast, features)
}

/// "🇯🇵 일본", or the bare code when it is not in the reference list.
pub(crate) fn country_label(store: &CountryStore, code: &str) -> String {
    match store.by_code(code) {
        Some(country) => format!("{} {}", country.flag, escape(&country.name_ko)),
        None => escape(code),
    }
}

pub(crate) fn stars(rating: Option<u8>) -> String {
    match rating {
        Some(rating) => {
            let filled = usize::from(rating);
            format!("{}{}", "★".repeat(filled), "☆".repeat(5usize.saturating_sub(filled)))
        }
        None => "-".to_string(),
    }
}

pub(crate) fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

pub(crate) fn date_range(entry: &TravelLogEntry) -> String {
    match entry.duration_days() {
        Some(days) => format!("{} ~ {} ({days}일)", entry.start_date, entry.end_date),
        None => format!("{} ~ {}", entry.start_date, entry.end_date),
    }
}

pub(crate) fn selected(flag: bool) -> &'static str {
    if flag { " selected" } else { "" }
}

/// `<option>` list of every country, grouped by continent.
pub(crate) fn country_options(store: &CountryStore, current: &str, blank: &str) -> String {
    let current = current.trim().to_ascii_uppercase();
    let mut html = format!(r#"<option value="">{}</option>"#, escape(blank));
    for continent in Continent::ALL {
        let countries = store.by_continent(continent);
        if countries.is_empty() {
            continue;
        }
        html.push_str(&format!(r#"<optgroup label="{}">"#, continent.name_ko()));
        for country in countries {
            html.push_str(&format!(
                r#"<option value="{code}"{sel}>{flag} {name}</option>"#,
                code = escape(&country.code),
                sel = selected(country.code == current),
                flag = country.flag,
                name = escape(&country.name_ko),
            ));
        }
        html.push_str("</optgroup>");
    }
    html
}

pub(crate) fn stat_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="stat"><span class="label">{}</span><span class="value">{}</span></div>"#,
        escape(label),
        escape(value)
    )
}
