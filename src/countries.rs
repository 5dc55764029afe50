use crate::country_data::COUNTRY_TABLE;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_CACHE_TTL_DAYS: i64 = 30;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 100;
const SLOW_SCAN: std::time::Duration = std::time::Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Africa,
        Continent::Oceania,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Continent::Asia => "asia",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north_america",
            Continent::SouthAmerica => "south_america",
            Continent::Africa => "africa",
            Continent::Oceania => "oceania",
        }
    }

    pub fn name_en(self) -> &'static str {
        match self {
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Africa => "Africa",
            Continent::Oceania => "Oceania",
        }
    }

    pub fn name_ko(self) -> &'static str {
        match self {
            Continent::Asia => "아시아",
            Continent::Europe => "유럽",
            Continent::NorthAmerica => "북아메리카",
            Continent::SouthAmerica => "남아메리카",
            Continent::Africa => "아프리카",
            Continent::Oceania => "오세아니아",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReference {
    pub code: String,
    pub name_en: String,
    pub name_ko: String,
    pub flag: String,
    pub continent: Continent,
    pub continent_ko: String,
    pub popular: bool,
}

impl CountryReference {
    fn matches(&self, query: &str, options: &SearchOptions) -> bool {
        let fields = [
            self.code.as_str(),
            self.name_en.as_str(),
            self.name_ko.as_str(),
            self.continent.name_en(),
            self.continent_ko.as_str(),
        ];

        fields.into_iter().any(|field| {
            let field = fold(field, options.case_sensitive);
            if options.exact_match {
                field == query
            } else {
                field.contains(query)
            }
        })
    }
}

fn fold(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        value.to_lowercase()
    }
}

/// Regional-indicator emoji for a two letter code.
/// Whether a scan took long enough to be worth a warning.
fn is_slow(elapsed: std::time::Duration) -> bool {
    elapsed > SLOW_SCAN
}

pub fn flag_emoji(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| {
            let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(0x1F1E6 + offset)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub case_sensitive: bool,
    pub exact_match: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            case_sensitive: false,
            exact_match: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameLookup {
    pub case_sensitive: bool,
}

/// Copy of the reference list kept in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCache {
    pub cached_at: DateTime<Utc>,
    pub countries: Vec<CountryReference>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CountryError {
    #[error("country record #{index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("country record #{index} has malformed code '{code}'")]
    MalformedCode { index: usize, code: String },
    #[error("duplicate country code '{0}'")]
    DuplicateCode(String),
    #[error("country reference list is empty")]
    Empty,
}

pub fn builtin_countries() -> Vec<CountryReference> {
    COUNTRY_TABLE
        .iter()
        .map(|&(code, name_en, name_ko, continent, popular)| CountryReference {
            code: code.to_string(),
            name_en: name_en.to_string(),
            name_ko: name_ko.to_string(),
            flag: flag_emoji(code),
            continent,
            continent_ko: continent.name_ko().to_string(),
            popular,
        })
        .collect()
}

pub fn validate(countries: &[CountryReference]) -> Result<(), CountryError> {
    if countries.is_empty() {
        return Err(CountryError::Empty);
    }

    let mut seen = HashSet::with_capacity(countries.len());
    for (index, country) in countries.iter().enumerate() {
        let required = [
            ("code", &country.code),
            ("name_en", &country.name_en),
            ("name_ko", &country.name_ko),
            ("flag", &country.flag),
            ("continent_ko", &country.continent_ko),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CountryError::MissingField {
                index,
                field: *field,
            });
        }
        if country.code.len() != 2 || !country.code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CountryError::MalformedCode {
                index,
                code: country.code.clone(),
            });
        }
        if !seen.insert(country.code.as_str()) {
            return Err(CountryError::DuplicateCode(country.code.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CountryStore {
    countries: Vec<CountryReference>,
    ttl: Duration,
}

impl Default for CountryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_DAYS)
    }
}

impl CountryStore {
    pub fn new(ttl_days: i64) -> Self {
        Self {
            countries: Vec::new(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Fills the store from `cache` when it is fresh and valid, otherwise
    /// from the built-in table, writing the result back into `cache`.
    /// Returns whether the cached copy was used.
    pub fn initialize(
        &mut self,
        cache: &mut Option<CountryCache>,
        now: DateTime<Utc>,
    ) -> Result<bool, CountryError> {
        if let Some(cached) = cache.as_ref() {
            let age = now - cached.cached_at;
            if age >= Duration::zero() && age < self.ttl {
                match validate(&cached.countries) {
                    Ok(()) => {
                        debug!(count = cached.countries.len(), "country list loaded from cache");
                        self.countries = cached.countries.clone();
                        return Ok(true);
                    }
                    Err(err) => warn!("discarding invalid country cache: {err}"),
                }
            } else {
                info!("country cache expired, regenerating");
            }
        }

        let countries = builtin_countries();
        validate(&countries)?;
        *cache = Some(CountryCache {
            cached_at: now,
            countries: countries.clone(),
        });
        self.countries = countries;
        info!(count = self.countries.len(), "country list regenerated");
        Ok(false)
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn all(&self) -> &[CountryReference] {
        &self.countries
    }

    pub fn search(&self, query: &str, options: SearchOptions) -> Vec<&CountryReference> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let needle = fold(query, options.case_sensitive);
        let limit = options.limit.min(MAX_SEARCH_LIMIT);
        let results: Vec<&CountryReference> = self
            .countries
            .iter()
            .filter(|country| country.matches(&needle, &options))
            .take(limit)
            .collect();

        let elapsed = started.elapsed();
        if is_slow(elapsed) {
            warn!(query, elapsed_ms = elapsed.as_millis() as u64, "slow country search");
        }
        results
    }

    pub fn by_code(&self, code: &str) -> Option<&CountryReference> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    pub fn by_name(&self, name: &str, lookup: NameLookup) -> Option<&CountryReference> {
        let needle = fold(name.trim(), lookup.case_sensitive);
        self.countries.iter().find(|country| {
            fold(&country.name_en, lookup.case_sensitive) == needle
                || fold(&country.name_ko, lookup.case_sensitive) == needle
        })
    }

    pub fn by_continent(&self, continent: Continent) -> Vec<&CountryReference> {
        self.countries
            .iter()
            .filter(|country| country.continent == continent)
            .collect()
    }

    pub fn popular(&self) -> Vec<&CountryReference> {
        self.countries.iter().filter(|country| country.popular).collect()
    }

    pub fn count_in(&self, continent: Continent) -> usize {
        self.countries
            .iter()
            .filter(|country| country.continent == continent)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scans_past_ten_millis_are_slow() {
        use std::time::Duration as Elapsed;
        assert!(!is_slow(Elapsed::ZERO));
        assert!(!is_slow(Elapsed::from_millis(10)));
        assert!(is_slow(Elapsed::from_millis(11)));
        assert!(is_slow(Elapsed::from_secs(1)));
    }

    fn store() -> CountryStore {
        let mut store = CountryStore::default();
        let mut cache = None;
        store
            .initialize(&mut cache, Utc::now())
            .expect("built-in table is valid");
        store
    }

    #[test]
    fn builtin_table_is_valid_and_complete() {
        let countries = builtin_countries();
        assert!(validate(&countries).is_ok());
        assert!(countries.len() >= 190);
        let japan = countries.iter().find(|c| c.code == "JP").unwrap();
        assert_eq!(japan.flag, "🇯🇵");
        assert_eq!(japan.continent_ko, "아시아");
    }

    #[test]
    fn default_search_is_case_insensitive_substring() {
        let store = store();
        let codes: Vec<&str> = store
            .search("jap", SearchOptions::default())
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert!(codes.contains(&"JP"));

        let korean: Vec<&str> = store
            .search("일본", SearchOptions::default())
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(korean, vec!["JP"]);
    }

    #[test]
    fn exact_match_returns_single_record() {
        let store = store();
        let options = SearchOptions {
            exact_match: true,
            ..SearchOptions::default()
        };
        let results = store.search("Japan", options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "JP");
    }

    #[test]
    fn case_sensitive_search_respects_case() {
        let store = store();
        let options = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };
        assert!(store.search("japan", options).is_empty());
        assert_eq!(store.search("Japan", options).len(), 1);
    }

    #[test]
    fn search_limit_is_capped() {
        let store = store();
        let small = SearchOptions {
            limit: 3,
            ..SearchOptions::default()
        };
        assert_eq!(store.search("a", small).len(), 3);

        let huge = SearchOptions {
            limit: 10_000,
            ..SearchOptions::default()
        };
        assert!(store.search("a", huge).len() <= MAX_SEARCH_LIMIT);
        assert!(store.search("   ", SearchOptions::default()).is_empty());
    }

    #[test]
    fn search_by_continent_name_keeps_table_order() {
        let store = store();
        let options = SearchOptions {
            limit: 2,
            ..SearchOptions::default()
        };
        let results = store.search("oceania", options);
        assert_eq!(results[0].code, "AU");
        assert_eq!(results[1].code, "NZ");
    }

    #[test]
    fn lookups_return_first_match_or_none() {
        let store = store();
        assert_eq!(store.by_code("fr").map(|c| c.name_en.as_str()), Some("France"));
        assert!(store.by_code("ZZ").is_none());
        assert_eq!(
            store
                .by_name("france", NameLookup::default())
                .map(|c| c.code.as_str()),
            Some("FR")
        );
        assert!(
            store
                .by_name("france", NameLookup { case_sensitive: true })
                .is_none()
        );
        assert_eq!(
            store
                .by_name("프랑스", NameLookup::default())
                .map(|c| c.code.as_str()),
            Some("FR")
        );
    }

    #[test]
    fn fresh_cache_reloads_identical_list() {
        let now = Utc::now();
        let mut cache = None;
        let mut first = CountryStore::default();
        assert_eq!(first.initialize(&mut cache, now), Ok(false));

        let mut second = CountryStore::default();
        let later = now + Duration::days(29);
        assert_eq!(second.initialize(&mut cache, later), Ok(true));
        assert_eq!(first.all(), second.all());
        assert_eq!(cache.as_ref().map(|c| c.cached_at), Some(now));
    }

    #[test]
    fn expired_or_invalid_cache_is_regenerated() {
        let now = Utc::now();
        let mut cache = Some(CountryCache {
            cached_at: now - Duration::days(31),
            countries: Vec::new(),
        });
        let mut store = CountryStore::default();
        assert_eq!(store.initialize(&mut cache, now), Ok(false));
        assert_eq!(cache.as_ref().map(|c| c.cached_at), Some(now));

        let mut duplicated = builtin_countries();
        duplicated.push(duplicated[0].clone());
        let mut cache = Some(CountryCache {
            cached_at: now,
            countries: duplicated,
        });
        let mut store = CountryStore::default();
        assert_eq!(store.initialize(&mut cache, now), Ok(false));
        assert_eq!(store.len(), builtin_countries().len());
    }

    #[test]
    fn validation_reports_shape_errors() {
        let mut countries = builtin_countries();
        countries[1].code = countries[0].code.clone();
        assert_eq!(
            validate(&countries),
            Err(CountryError::DuplicateCode("KR".into()))
        );

        let mut countries = builtin_countries();
        countries[2].name_ko.clear();
        assert_eq!(
            validate(&countries),
            Err(CountryError::MissingField {
                index: 2,
                field: "name_ko"
            })
        );
    }

    #[test]
    fn continent_helpers_partition_the_table() {
        let store = store();
        let total: usize = Continent::ALL.iter().map(|c| store.count_in(*c)).sum();
        assert_eq!(total, store.len());
        assert!(store.popular().iter().all(|c| c.popular));
        assert!(
            store
                .by_continent(Continent::Europe)
                .iter()
                .any(|c| c.code == "FR")
        );
    }
}
