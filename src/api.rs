//! JSON mirror of the read side: reference data, logs and every
//! statistics view-model.

use crate::backend::{AuthSession, BackendError};
use crate::countries::{Continent, CountryReference, NameLookup, SearchOptions};
use crate::errors::AppError;
use crate::models::{
    LogQuery, MAX_YEAR, MIN_YEAR, Purpose, TravelLogEntry, UserProfile, checked_year, parse_tags,
};
use crate::state::AppState;
use crate::stats::{
    self, BasicStats, ContinentProgress, Heatmap, TravelDna, TravelReport, VisitedCountrySummary,
    YearlyStats,
};
use axum::{
    Json, async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Session for API routes; a missing one answers 401 instead of redirecting.
pub struct ApiSession(pub AuthSession);

#[async_trait]
impl FromRequestParts<AppState> for ApiSession {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.session().await.map(ApiSession).ok_or_else(AppError::unauthorized)
    }
}

/// Maps a backend failure, dropping the stored session when it was rejected.
async fn backend_failure(state: &AppState, err: BackendError) -> AppError {
    if err.is_unauthorized() {
        warn!("backend rejected the stored session, signing out");
        if let Err(clear) = state.clear_session().await {
            return clear;
        }
    }
    err.into()
}

async fn all_logs(state: &AppState, session: &AuthSession) -> Result<Vec<TravelLogEntry>, AppError> {
    match state.backend.all_logs(session).await {
        Ok(logs) => Ok(logs),
        Err(err) => Err(backend_failure(state, err).await),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountryParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
    #[serde(default)]
    pub exact: bool,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub popular: bool,
}

pub async fn countries(
    State(state): State<AppState>,
    Query(params): Query<CountryParams>,
) -> Result<Json<Vec<CountryReference>>, AppError> {
    let store = state.countries.read().await;

    let found: Vec<&CountryReference> = if !params.q.trim().is_empty() {
        let options = SearchOptions {
            limit: params.limit.unwrap_or(SearchOptions::default().limit),
            case_sensitive: params.case_sensitive,
            exact_match: params.exact,
        };
        store.search(&params.q, options)
    } else if !params.continent.trim().is_empty() {
        let continent = Continent::parse(&params.continent)
            .ok_or_else(|| AppError::bad_request(format!("unknown continent '{}'", params.continent)))?;
        store.by_continent(continent)
    } else if params.popular {
        store.popular()
    } else {
        store.all().iter().collect()
    };

    Ok(Json(found.into_iter().cloned().collect()))
}

pub async fn country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CountryReference>, AppError> {
    let store = state.countries.read().await;
    store
        .by_code(&code)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("unknown country code '{code}'")))
}

#[derive(Debug, Default, Deserialize)]
pub struct NameParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

pub async fn country_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> Result<Json<CountryReference>, AppError> {
    let store = state.countries.read().await;
    let lookup = NameLookup {
        case_sensitive: params.case_sensitive,
    };
    store
        .by_name(&params.name, lookup)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no country named '{}'", params.name)))
}

/// Rejects years that cannot name a calendar year in a date filter.
fn year_param(year: i32) -> Result<i32, AppError> {
    checked_year(year).ok_or_else(|| {
        AppError::bad_request(format!("year {year} is outside {MIN_YEAR}..={MAX_YEAR}"))
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    pub country: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub purpose: Option<String>,
    pub tags: Option<String>,
    pub q: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl LogParams {
    pub fn to_query(&self) -> Result<LogQuery, AppError> {
        let purpose = match self.purpose.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Purpose::parse(raw)
                    .ok_or_else(|| AppError::bad_request(format!("unknown purpose '{raw}'")))?,
            ),
        };
        Ok(LogQuery {
            country: self.country.clone(),
            year_from: self.year_from.map(year_param).transpose()?,
            year_to: self.year_to.map(year_param).transpose()?,
            purpose,
            tags: self.tags.as_deref().map(parse_tags).unwrap_or_default(),
            text: self.q.clone(),
            limit: self.limit,
            offset: self.offset,
        })
    }
}

pub async fn logs(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Query(params): Query<LogParams>,
) -> Result<Json<Vec<TravelLogEntry>>, AppError> {
    let query = params.to_query()?;
    match state.backend.list_logs(&session, &query).await {
        Ok(logs) => Ok(Json(logs)),
        Err(err) => Err(backend_failure(&state, err).await),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

pub async fn search_logs(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TravelLogEntry>>, AppError> {
    if params.q.trim().is_empty() {
        return Err(AppError::bad_request("q must not be empty"));
    }
    let limit = params.limit.unwrap_or(state.backend.fetch_limit());
    match state.backend.search_logs(&session, &params.q, limit).await {
        Ok(logs) => Ok(Json(logs)),
        Err(err) => Err(backend_failure(&state, err).await),
    }
}

pub async fn log(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Path(id): Path<String>,
) -> Result<Json<TravelLogEntry>, AppError> {
    match state.backend.get_log(&session, &id).await {
        Ok(entry) => Ok(Json(entry)),
        Err(err) => Err(backend_failure(&state, err).await),
    }
}

pub async fn basic_stats(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<BasicStats>, AppError> {
    let logs = all_logs(&state, &session).await?;
    Ok(Json(stats::basic_stats(&logs)?))
}

pub async fn yearly_stats(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Path(year): Path<i32>,
) -> Result<Json<YearlyStats>, AppError> {
    let year = year_param(year)?;
    let logs = all_logs(&state, &session).await?;
    Ok(Json(stats::yearly_stats(&logs, year)?))
}

pub async fn heatmap(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Path(year): Path<i32>,
) -> Result<Json<Heatmap>, AppError> {
    let year = year_param(year)?;
    let logs = all_logs(&state, &session).await?;
    Ok(Json(stats::monthly_heatmap(&logs, year)))
}

pub async fn visited_countries(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<Vec<VisitedCountrySummary>>, AppError> {
    let logs = all_logs(&state, &session).await?;
    Ok(Json(stats::visited_countries(&logs)?))
}

pub async fn favorite_countries(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<Vec<VisitedCountrySummary>>, AppError> {
    let logs = all_logs(&state, &session).await?;
    Ok(Json(stats::favorite_countries(&logs)?))
}

pub async fn continents(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<Vec<ContinentProgress>>, AppError> {
    let logs = all_logs(&state, &session).await?;
    let store = state.countries.read().await;
    Ok(Json(stats::continent_progress(&logs, &store)))
}

pub async fn dna(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<TravelDna>, AppError> {
    let logs = all_logs(&state, &session).await?;
    let store = state.countries.read().await;
    Ok(Json(stats::travel_dna(&logs, &store)?))
}

pub async fn report(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
    Path(year): Path<i32>,
) -> Result<Json<TravelReport>, AppError> {
    let year = year_param(year)?;
    let logs = all_logs(&state, &session).await?;
    let store = state.countries.read().await;
    Ok(Json(stats::build_report(&logs, &store, year)?))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

pub async fn profile(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Result<Json<ProfileResponse>, AppError> {
    let local = state.local.lock().await;
    let profile = UserProfile::merge(Some(&session.user.user_metadata), &local.profile);
    Ok(Json(ProfileResponse {
        id: session.user.id.clone(),
        email: session.user.email.clone(),
        profile,
    }))
}
