use crate::countries::{Continent, CountryStore};
use crate::models::{MAX_RATING, MIN_RATING, Purpose, TravelLogEntry, TravelStyle, inclusive_days};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

pub const FAVORITE_COUNT: usize = 3;

/// Pattern analysis has no defined behaviour yet; every journal gets this.
pub const INSIGHT_PLACEHOLDER: &str =
    "여행 기록이 쌓이면 계절, 목적, 기간별 여행 패턴을 분석해 드릴게요.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("log {id} ends on {end} before it starts on {start}")]
    InvertedRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("log {id} has rating {rating}, expected 1-5")]
    RatingOutOfRange { id: String, rating: u8 },
}

fn checked_days(entry: &TravelLogEntry) -> Result<i64, StatsError> {
    inclusive_days(entry.start_date, entry.end_date).ok_or_else(|| StatsError::InvertedRange {
        id: entry.id.clone(),
        start: entry.start_date,
        end: entry.end_date,
    })
}

fn checked_rating(entry: &TravelLogEntry) -> Result<Option<u8>, StatsError> {
    match entry.rating {
        Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
            Err(StatsError::RatingOutOfRange {
                id: entry.id.clone(),
                rating,
            })
        }
        rating => Ok(rating),
    }
}

fn country_key(entry: &TravelLogEntry) -> String {
    entry.country.trim().to_ascii_uppercase()
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_trips: usize,
    pub visited_countries: usize,
    pub visited_cities: usize,
    pub total_travel_days: i64,
    pub average_travel_days: f64,
    pub average_rating: f64,
}

#[derive(Default)]
struct Totals {
    trips: usize,
    countries: HashSet<String>,
    cities: HashSet<(String, String)>,
    days: i64,
    rating_sum: u32,
    rated: usize,
}

impl Totals {
    fn add(&mut self, entry: &TravelLogEntry) -> Result<(), StatsError> {
        let days = checked_days(entry)?;
        let rating = checked_rating(entry)?;

        self.trips += 1;
        self.days += days;
        let country = country_key(entry);
        let city = entry.city.trim().to_lowercase();
        if !city.is_empty() {
            self.cities.insert((country.clone(), city));
        }
        self.countries.insert(country);
        if let Some(rating) = rating {
            self.rating_sum += u32::from(rating);
            self.rated += 1;
        }
        Ok(())
    }

    fn finish(self) -> BasicStats {
        BasicStats {
            total_trips: self.trips,
            visited_countries: self.countries.len(),
            visited_cities: self.cities.len(),
            total_travel_days: self.days,
            average_travel_days: ratio(self.days as f64, self.trips),
            average_rating: ratio(f64::from(self.rating_sum), self.rated),
        }
    }
}

fn fold<'a>(logs: impl IntoIterator<Item = &'a TravelLogEntry>) -> Result<BasicStats, StatsError> {
    let mut totals = Totals::default();
    for entry in logs {
        totals.add(entry)?;
    }
    Ok(totals.finish())
}

pub fn basic_stats(logs: &[TravelLogEntry]) -> Result<BasicStats, StatsError> {
    fold(logs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Positive,
    Negative,
    Neutral,
    /// No baseline in the previous year.
    First,
}

impl DeltaKind {
    pub fn classify(current: f64, previous: f64) -> Self {
        if previous == 0.0 {
            DeltaKind::First
        } else if current > previous {
            DeltaKind::Positive
        } else if current < previous {
            DeltaKind::Negative
        } else {
            DeltaKind::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DeltaKind::Positive => "delta-positive",
            DeltaKind::Negative => "delta-negative",
            DeltaKind::Neutral => "delta-neutral",
            DeltaKind::First => "delta-first",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub kind: DeltaKind,
    pub current: f64,
    pub previous: f64,
    pub difference: f64,
}

impl MetricDelta {
    pub fn between(current: f64, previous: f64) -> Self {
        Self {
            kind: DeltaKind::classify(current, previous),
            current,
            previous,
            difference: current - previous,
        }
    }

    /// Change against the previous year in whole percent, when there is one.
    pub fn percent(&self) -> Option<i64> {
        match self.kind {
            DeltaKind::First => None,
            _ => Some((self.difference / self.previous * 100.0).round() as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySnapshot {
    pub year: i32,
    #[serde(flatten)]
    pub stats: BasicStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyDeltas {
    pub total_trips: MetricDelta,
    pub unique_countries: MetricDelta,
    pub unique_cities: MetricDelta,
    pub total_travel_days: MetricDelta,
    pub average_travel_days: MetricDelta,
    pub average_rating: MetricDelta,
}

impl YearlyDeltas {
    fn between(current: &BasicStats, previous: &BasicStats) -> Self {
        let delta = |c: f64, p: f64| MetricDelta::between(c, p);
        Self {
            total_trips: delta(current.total_trips as f64, previous.total_trips as f64),
            unique_countries: delta(
                current.visited_countries as f64,
                previous.visited_countries as f64,
            ),
            unique_cities: delta(current.visited_cities as f64, previous.visited_cities as f64),
            total_travel_days: delta(
                current.total_travel_days as f64,
                previous.total_travel_days as f64,
            ),
            average_travel_days: delta(current.average_travel_days, previous.average_travel_days),
            average_rating: delta(current.average_rating, previous.average_rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyStats {
    pub year: i32,
    pub current: YearlySnapshot,
    pub previous: YearlySnapshot,
    pub deltas: YearlyDeltas,
}

impl YearlyStats {
    pub fn empty(year: i32) -> Self {
        let zero = BasicStats::default();
        Self {
            year,
            current: YearlySnapshot {
                year,
                stats: zero.clone(),
            },
            previous: YearlySnapshot {
                year: year.saturating_sub(1),
                stats: zero.clone(),
            },
            deltas: YearlyDeltas::between(&zero, &zero),
        }
    }
}

fn snapshot(logs: &[TravelLogEntry], year: i32) -> Result<YearlySnapshot, StatsError> {
    let stats = fold(logs.iter().filter(|entry| entry.year() == year))?;
    Ok(YearlySnapshot { year, stats })
}

pub fn yearly_stats(logs: &[TravelLogEntry], year: i32) -> Result<YearlyStats, StatsError> {
    let current = snapshot(logs, year)?;
    let previous = snapshot(logs, year.saturating_sub(1))?;
    let deltas = YearlyDeltas::between(&current.stats, &previous.stats);
    Ok(YearlyStats {
        year,
        current,
        previous,
        deltas,
    })
}

/// Distinct start-date years, newest first.
pub fn available_years(logs: &[TravelLogEntry]) -> Vec<i32> {
    let years: BTreeSet<i32> = logs.iter().map(TravelLogEntry::year).collect();
    years.into_iter().rev().collect()
}

/// The year a report opens on: `today`'s year, or the newest logged year
/// when nothing was logged this year.
pub fn default_report_year(logs: &[TravelLogEntry], today: NaiveDate) -> i32 {
    let this_year = today.year();
    if logs.is_empty() || logs.iter().any(|entry| entry.year() == this_year) {
        return this_year;
    }
    available_years(logs).first().copied().unwrap_or(this_year)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitedCountrySummary {
    pub code: String,
    pub visit_count: usize,
    pub total_stay_days: i64,
    pub last_visit_date: NaiveDate,
    pub average_rating: f64,
}

/// Groups logs by country, most visited first. Equal counts keep the order
/// in which the countries first appear in `logs`.
pub fn visited_countries(
    logs: &[TravelLogEntry],
) -> Result<Vec<VisitedCountrySummary>, StatsError> {
    struct Acc {
        summary: VisitedCountrySummary,
        rating_sum: u32,
        rated: usize,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();

    for entry in logs {
        let days = checked_days(entry)?;
        let rating = checked_rating(entry)?;
        let code = country_key(entry);

        let slot = *index.entry(code.clone()).or_insert_with(|| {
            groups.push(Acc {
                summary: VisitedCountrySummary {
                    code,
                    visit_count: 0,
                    total_stay_days: 0,
                    last_visit_date: entry.start_date,
                    average_rating: 0.0,
                },
                rating_sum: 0,
                rated: 0,
            });
            groups.len() - 1
        });

        let acc = &mut groups[slot];
        acc.summary.visit_count += 1;
        acc.summary.total_stay_days += days;
        if entry.start_date > acc.summary.last_visit_date {
            acc.summary.last_visit_date = entry.start_date;
        }
        if let Some(rating) = rating {
            acc.rating_sum += u32::from(rating);
            acc.rated += 1;
        }
    }

    let mut summaries: Vec<VisitedCountrySummary> = groups
        .into_iter()
        .map(|acc| VisitedCountrySummary {
            average_rating: ratio(f64::from(acc.rating_sum), acc.rated),
            ..acc.summary
        })
        .collect();
    summaries.sort_by(|a, b| b.visit_count.cmp(&a.visit_count));
    Ok(summaries)
}

pub fn favorite_countries(
    logs: &[TravelLogEntry],
) -> Result<Vec<VisitedCountrySummary>, StatsError> {
    let mut ranked = visited_countries(logs)?;
    ranked.truncate(FAVORITE_COUNT);
    Ok(ranked)
}

pub fn visited_codes(logs: &[TravelLogEntry]) -> HashSet<String> {
    logs.iter().map(country_key).collect()
}

pub fn completion_percent(visited: usize, total: usize) -> u32 {
    if total == 0 || visited == 0 {
        return 0;
    }
    let percent = (visited as f64 * 100.0 / total as f64).round() as u32;
    percent.min(100)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentProgress {
    pub continent: Continent,
    pub name_ko: &'static str,
    pub visited: usize,
    pub total: usize,
    pub percent: u32,
}

/// Completion per continent. Codes missing from the reference list are
/// not counted anywhere.
pub fn continent_progress(logs: &[TravelLogEntry], store: &CountryStore) -> Vec<ContinentProgress> {
    let visited = visited_codes(logs);
    Continent::ALL
        .into_iter()
        .map(|continent| {
            let total = store.count_in(continent);
            let seen = store
                .by_continent(continent)
                .iter()
                .filter(|country| visited.contains(&country.code))
                .count();
            ContinentProgress {
                continent,
                name_ko: continent.name_ko(),
                visited: seen,
                total,
                percent: completion_percent(seen, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ActivityLevel {
    /// Bands are relative to the busiest month of the same year.
    pub fn classify(count: usize, max: usize) -> Self {
        if count == 0 || max == 0 {
            return ActivityLevel::None;
        }
        let ratio = count as f64 / max as f64;
        if ratio <= 0.2 {
            ActivityLevel::Low
        } else if ratio <= 0.4 {
            ActivityLevel::Medium
        } else if ratio <= 0.7 {
            ActivityLevel::High
        } else {
            ActivityLevel::VeryHigh
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ActivityLevel::None => "activity-none",
            ActivityLevel::Low => "activity-low",
            ActivityLevel::Medium => "activity-medium",
            ActivityLevel::High => "activity-high",
            ActivityLevel::VeryHigh => "activity-very-high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: u32,
    pub count: usize,
    pub level: ActivityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub year: i32,
    pub months: Vec<MonthBucket>,
    pub max: usize,
    pub total: usize,
}

impl Heatmap {
    pub fn empty(year: i32) -> Self {
        monthly_heatmap(&[], year)
    }
}

pub fn monthly_heatmap(logs: &[TravelLogEntry], year: i32) -> Heatmap {
    let mut counts = [0usize; 12];
    for entry in logs.iter().filter(|entry| entry.year() == year) {
        counts[entry.start_date.month0() as usize] += 1;
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    let months = counts
        .iter()
        .enumerate()
        .map(|(index, &count)| MonthBucket {
            month: index as u32 + 1,
            count,
            level: ActivityLevel::classify(count, max),
        })
        .collect();

    Heatmap {
        year,
        months,
        max,
        total: counts.iter().sum(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "봄",
            Season::Summer => "여름",
            Season::Autumn => "가을",
            Season::Winter => "겨울",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripLength {
    Short,
    Medium,
    Long,
}

impl TripLength {
    pub fn from_average(days: f64) -> Self {
        if days <= 3.0 {
            TripLength::Short
        } else if days <= 7.0 {
            TripLength::Medium
        } else {
            TripLength::Long
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TripLength::Short => "짧고 굵은 단기 여행파",
            TripLength::Medium => "일주일 안팎의 균형 여행파",
            TripLength::Long => "느긋한 장기 체류파",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TravelDna {
    pub total_trips: usize,
    pub dominant_purpose: Option<Purpose>,
    pub dominant_style: Option<TravelStyle>,
    pub favorite_continent: Option<Continent>,
    pub favorite_season: Option<Season>,
    pub trip_length: Option<TripLength>,
    pub average_trip_days: f64,
    /// Distinct countries per trip, in percent.
    pub explorer_ratio: u32,
}

/// Most frequent value; ties go to whichever comes first in `order`.
fn dominant<T: Copy + PartialEq>(order: &[T], values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts = vec![0usize; order.len()];
    for value in values {
        if let Some(slot) = order.iter().position(|candidate| *candidate == value) {
            counts[slot] += 1;
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in order.iter().copied().zip(counts) {
        if count > 0 && best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

pub fn travel_dna(logs: &[TravelLogEntry], store: &CountryStore) -> Result<TravelDna, StatsError> {
    let basic = basic_stats(logs)?;
    if basic.total_trips == 0 {
        return Ok(TravelDna::default());
    }

    let continents = logs
        .iter()
        .filter_map(|entry| store.by_code(&entry.country))
        .map(|country| country.continent);

    Ok(TravelDna {
        total_trips: basic.total_trips,
        dominant_purpose: dominant(&Purpose::ALL, logs.iter().map(|entry| entry.purpose)),
        dominant_style: dominant(
            &TravelStyle::ALL,
            logs.iter().filter_map(|entry| entry.travel_style),
        ),
        favorite_continent: dominant(&Continent::ALL, continents),
        favorite_season: dominant(&Season::ALL, logs.iter().map(|e| Season::of(e.start_date))),
        trip_length: Some(TripLength::from_average(basic.average_travel_days)),
        average_trip_days: basic.average_travel_days,
        explorer_ratio: completion_percent(basic.visited_countries, basic.total_trips),
    })
}

/// Canned insight sentence until pattern detection lands.
pub fn insight(_logs: &[TravelLogEntry]) -> &'static str {
    INSIGHT_PLACEHOLDER
}

/// Everything the report screen shows for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelReport {
    pub year: i32,
    pub years: Vec<i32>,
    pub basic: BasicStats,
    pub yearly: YearlyStats,
    pub heatmap: Heatmap,
    pub favorites: Vec<VisitedCountrySummary>,
    pub continents: Vec<ContinentProgress>,
    pub dna: TravelDna,
    pub insight: &'static str,
}

impl TravelReport {
    /// Zeroed report shown when the logs cannot be aggregated.
    pub fn empty(year: i32, store: &CountryStore) -> Self {
        Self {
            year,
            years: Vec::new(),
            basic: BasicStats::default(),
            yearly: YearlyStats::empty(year),
            heatmap: Heatmap::empty(year),
            favorites: Vec::new(),
            continents: continent_progress(&[], store),
            dna: TravelDna::default(),
            insight: INSIGHT_PLACEHOLDER,
        }
    }
}

pub fn build_report(
    logs: &[TravelLogEntry],
    store: &CountryStore,
    year: i32,
) -> Result<TravelReport, StatsError> {
    Ok(TravelReport {
        year,
        years: available_years(logs),
        basic: basic_stats(logs)?,
        yearly: yearly_stats(logs, year)?,
        heatmap: monthly_heatmap(logs, year),
        favorites: favorite_countries(logs)?,
        continents: continent_progress(logs, store),
        dna: travel_dna(logs, store)?,
        insight: insight(logs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn log(
        id: &str,
        country: &str,
        city: &str,
        start: &str,
        end: &str,
        rating: Option<u8>,
    ) -> TravelLogEntry {
        TravelLogEntry {
            id: id.to_string(),
            user_id: None,
            country: country.to_string(),
            city: city.to_string(),
            start_date: date(start),
            end_date: date(end),
            purpose: Purpose::Tourism,
            travel_style: None,
            rating,
            memo: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn store() -> CountryStore {
        let mut store = CountryStore::default();
        store.initialize(&mut None, Utc::now()).unwrap();
        store
    }

    #[test]
    fn single_trip_basic_stats() {
        let logs = vec![log("1", "JP", "Tokyo", "2024-01-05", "2024-01-10", Some(5))];
        let stats = basic_stats(&logs).unwrap();
        assert_eq!(stats.total_trips, 1);
        assert_eq!(stats.visited_countries, 1);
        assert_eq!(stats.visited_cities, 1);
        assert_eq!(stats.total_travel_days, 6);
        assert_eq!(stats.average_rating, 5.0);
    }

    #[test]
    fn basic_stats_counts_distinct_places_and_rated_trips() {
        let logs = vec![
            log("1", "JP", "Tokyo", "2024-01-05", "2024-01-06", Some(4)),
            log("2", "jp", " tokyo ", "2024-03-01", "2024-03-01", None),
            log("3", "FR", "Paris", "2023-07-01", "2023-07-03", Some(2)),
            log("4", "US", "Paris", "2023-08-01", "2023-08-01", None),
        ];
        let stats = basic_stats(&logs).unwrap();
        assert_eq!(stats.visited_countries, 3);
        assert_eq!(stats.visited_cities, 3);
        assert_eq!(stats.total_travel_days, 2 + 1 + 3 + 1);
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.average_travel_days, 7.0 / 4.0);
    }

    #[test]
    fn invalid_entries_are_errors_not_zeroes() {
        let inverted = vec![log("bad", "JP", "Tokyo", "2024-01-10", "2024-01-05", None)];
        assert!(matches!(
            basic_stats(&inverted),
            Err(StatsError::InvertedRange { .. })
        ));

        let rating = vec![log("r", "JP", "Tokyo", "2024-01-01", "2024-01-01", Some(9))];
        assert_eq!(
            visited_countries(&rating),
            Err(StatsError::RatingOutOfRange {
                id: "r".into(),
                rating: 9
            })
        );
    }

    #[test]
    fn empty_journal_yields_zero_stats_and_first_deltas() {
        let yearly = yearly_stats(&[], 2024).unwrap();
        assert_eq!(yearly.current.stats, BasicStats::default());
        assert_eq!(yearly.previous.year, 2023);
        let deltas = &yearly.deltas;
        for delta in [
            deltas.total_trips,
            deltas.unique_countries,
            deltas.unique_cities,
            deltas.total_travel_days,
            deltas.average_travel_days,
            deltas.average_rating,
        ] {
            assert_eq!(delta.kind, DeltaKind::First);
            assert_eq!(delta.percent(), None);
        }
        assert_eq!(yearly, YearlyStats::empty(2024));
    }

    #[test]
    fn delta_classification() {
        assert_eq!(DeltaKind::classify(3.0, 0.0), DeltaKind::First);
        assert_eq!(DeltaKind::classify(0.0, 0.0), DeltaKind::First);
        assert_eq!(DeltaKind::classify(3.0, 2.0), DeltaKind::Positive);
        assert_eq!(DeltaKind::classify(1.0, 2.0), DeltaKind::Negative);
        assert_eq!(DeltaKind::classify(2.0, 2.0), DeltaKind::Neutral);
        assert_eq!(MetricDelta::between(3.0, 2.0).percent(), Some(50));
    }

    #[test]
    fn yearly_stats_compare_against_previous_year() {
        let logs = vec![
            log("1", "JP", "Tokyo", "2024-01-05", "2024-01-10", Some(5)),
            log("2", "TH", "Bangkok", "2024-06-01", "2024-06-04", Some(3)),
            log("3", "JP", "Osaka", "2023-02-01", "2023-02-02", Some(4)),
            log("4", "FR", "Paris", "2021-02-01", "2021-02-02", Some(4)),
        ];
        let yearly = yearly_stats(&logs, 2024).unwrap();
        assert_eq!(yearly.current.stats.total_trips, 2);
        assert_eq!(yearly.previous.stats.total_trips, 1);
        assert_eq!(yearly.deltas.total_trips.kind, DeltaKind::Positive);
        assert_eq!(yearly.deltas.average_rating.kind, DeltaKind::Neutral);
        assert_eq!(yearly.deltas.total_travel_days.difference, 8.0);

        let gap = yearly_stats(&logs, 2022).unwrap();
        assert_eq!(gap.current.stats.total_trips, 0);
        assert_eq!(gap.deltas.total_trips.kind, DeltaKind::Negative);
        assert_eq!(gap.deltas.total_trips.difference, -1.0);
    }

    #[test]
    fn yearly_stats_survive_the_lowest_year() {
        let yearly = yearly_stats(&[], i32::MIN).unwrap();
        assert_eq!(yearly.previous.year, i32::MIN);
        assert_eq!(yearly.current.stats.total_trips, 0);

        let empty = YearlyStats::empty(i32::MIN);
        assert_eq!(empty.previous.year, i32::MIN);
    }

    #[test]
    fn ranking_is_by_visits_and_stable_on_ties() {
        let logs = vec![
            log("1", "FR", "Paris", "2022-01-01", "2022-01-02", Some(4)),
            log("2", "JP", "Tokyo", "2022-02-01", "2022-02-03", Some(5)),
            log("3", "JP", "Kyoto", "2023-02-01", "2023-02-01", Some(3)),
            log("4", "IT", "Rome", "2022-03-01", "2022-03-01", None),
            log("5", "US", "Austin", "2022-04-01", "2022-04-01", None),
        ];
        let ranked = visited_countries(&logs).unwrap();
        let codes: Vec<&str> = ranked.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["JP", "FR", "IT", "US"]);

        let japan = &ranked[0];
        assert_eq!(japan.visit_count, 2);
        assert_eq!(japan.total_stay_days, 4);
        assert_eq!(japan.last_visit_date, date("2023-02-01"));
        assert_eq!(japan.average_rating, 4.0);

        let favorites = favorite_countries(&logs).unwrap();
        assert_eq!(favorites.len(), FAVORITE_COUNT);
        assert_eq!(favorites[2].code, "IT");
    }

    #[test]
    fn continent_completion_never_divides_by_zero() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(0, 51), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);

        let store = store();
        let logs = vec![
            log("1", "AU", "Sydney", "2022-01-01", "2022-01-02", None),
            log("2", "NZ", "Auckland", "2022-02-01", "2022-02-02", None),
            log("3", "ZZ", "Nowhere", "2022-03-01", "2022-03-02", None),
        ];
        let progress = continent_progress(&logs, &store);
        assert_eq!(progress.len(), Continent::ALL.len());
        let oceania = progress
            .iter()
            .find(|p| p.continent == Continent::Oceania)
            .unwrap();
        assert_eq!(oceania.visited, 2);
        assert_eq!(oceania.total, store.count_in(Continent::Oceania));
        let europe = progress
            .iter()
            .find(|p| p.continent == Continent::Europe)
            .unwrap();
        assert_eq!(europe.percent, 0);
    }

    #[test]
    fn heatmap_bands_are_relative_to_the_peak_month() {
        let mut logs = Vec::new();
        for (i, day) in ["01", "02", "03", "04", "05", "06", "07", "08", "09", "10"]
            .iter()
            .enumerate()
        {
            let day = format!("2024-05-{day}");
            logs.push(log(&format!("m{i}"), "JP", "Tokyo", &day, &day, None));
        }
        logs.push(log("a", "JP", "Tokyo", "2024-01-01", "2024-01-01", None));
        for id in ["b1", "b2", "b3"] {
            logs.push(log(id, "JP", "Tokyo", "2024-02-01", "2024-02-01", None));
        }
        for id in ["c1", "c2", "c3", "c4", "c5", "c6"] {
            logs.push(log(id, "JP", "Tokyo", "2024-03-01", "2024-03-01", None));
        }
        logs.push(log("other-year", "JP", "Tokyo", "2023-04-01", "2023-04-01", None));

        let heatmap = monthly_heatmap(&logs, 2024);
        assert_eq!(heatmap.months.len(), 12);
        assert_eq!(heatmap.max, 10);
        assert_eq!(heatmap.total, 20);
        let level = |month: usize| heatmap.months[month - 1].level;
        assert_eq!(level(5), ActivityLevel::VeryHigh);
        assert_eq!(level(1), ActivityLevel::Low);
        assert_eq!(level(2), ActivityLevel::Medium);
        assert_eq!(level(3), ActivityLevel::High);
        assert_eq!(level(4), ActivityLevel::None);
        assert_eq!(heatmap.months[4].level.css_class(), "activity-very-high");
    }

    #[test]
    fn quiet_year_still_peaks_at_very_high() {
        let logs = vec![log("1", "JP", "Tokyo", "2020-09-01", "2020-09-02", None)];
        let heatmap = monthly_heatmap(&logs, 2020);
        assert_eq!(heatmap.months[8].level, ActivityLevel::VeryHigh);
        assert!(
            heatmap
                .months
                .iter()
                .filter(|b| b.month != 9)
                .all(|b| b.level == ActivityLevel::None)
        );
        assert!(Heatmap::empty(2020).months.iter().all(|b| b.level == ActivityLevel::None));
    }

    #[test]
    fn travel_dna_picks_dominant_traits() {
        let store = store();
        let mut logs = vec![
            log("1", "JP", "Tokyo", "2024-07-01", "2024-07-10", Some(5)),
            log("2", "TH", "Bangkok", "2024-08-01", "2024-08-10", Some(4)),
            log("3", "FR", "Paris", "2023-12-01", "2023-12-09", Some(4)),
        ];
        logs[0].travel_style = Some(TravelStyle::Friends);
        logs[1].travel_style = Some(TravelStyle::Solo);
        logs[2].purpose = Purpose::Business;

        let dna = travel_dna(&logs, &store).unwrap();
        assert_eq!(dna.total_trips, 3);
        assert_eq!(dna.dominant_purpose, Some(Purpose::Tourism));
        assert_eq!(dna.dominant_style, Some(TravelStyle::Solo));
        assert_eq!(dna.favorite_continent, Some(Continent::Asia));
        assert_eq!(dna.favorite_season, Some(Season::Summer));
        assert_eq!(dna.trip_length, Some(TripLength::Long));
        assert_eq!(dna.explorer_ratio, 100);

        assert_eq!(travel_dna(&[], &store).unwrap(), TravelDna::default());
    }

    #[test]
    fn insight_is_the_placeholder_sentence() {
        let logs = vec![log("1", "JP", "Tokyo", "2024-01-05", "2024-01-10", Some(5))];
        assert_eq!(insight(&[]), INSIGHT_PLACEHOLDER);
        assert_eq!(insight(&logs), INSIGHT_PLACEHOLDER);
    }

    #[test]
    fn report_year_defaults() {
        let today = date("2026-10-16");
        assert_eq!(default_report_year(&[], today), 2026);
        let logs = vec![
            log("1", "JP", "Tokyo", "2024-01-05", "2024-01-10", None),
            log("2", "JP", "Tokyo", "2022-01-05", "2022-01-10", None),
        ];
        assert_eq!(default_report_year(&logs, today), 2024);
        assert_eq!(available_years(&logs), vec![2024, 2022]);
    }

    #[test]
    fn report_bundles_every_section() {
        let store = store();
        let logs = vec![log("1", "JP", "Tokyo", "2024-01-05", "2024-01-10", Some(5))];
        let report = build_report(&logs, &store, 2024).unwrap();
        assert_eq!(report.basic.total_travel_days, 6);
        assert_eq!(report.yearly.current.stats.total_trips, 1);
        assert_eq!(report.heatmap.months[0].level, ActivityLevel::VeryHigh);
        assert_eq!(report.favorites[0].code, "JP");
        assert_eq!(report.years, vec![2024]);

        let broken = vec![log("x", "JP", "Tokyo", "2024-01-10", "2024-01-01", None)];
        assert!(build_report(&broken, &store, 2024).is_err());
        let fallback = TravelReport::empty(2024, &store);
        assert_eq!(fallback.basic, BasicStats::default());
        assert!(fallback.continents.iter().all(|c| c.percent == 0));
    }
}
