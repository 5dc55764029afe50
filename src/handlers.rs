use crate::backend::{AuthSession, BackendError, SignUpOutcome};
use crate::countries::Continent;
use crate::errors::{AppError, backend_status};
use crate::messages::{self, ErrorKind};
use crate::models::{
    LogForm, LogQuery, ProfileForm, ResetForm, SignInForm, SignUpForm, TravelLogEntry,
    UserProfile, ValidationError, ViewMode, checked_year,
};
use crate::state::AppState;
use crate::stats::{
    BasicStats, TravelReport, available_years, basic_stats, build_report, continent_progress,
    default_report_year, visited_codes,
};
use crate::storage::LastKnownUser;
use crate::ui::{Pagination, Toast};
use crate::views::auth::{ResetView, SignInView, SignUpView};
use crate::views::collection::CollectionView;
use crate::views::hub::{HubView, RECENT_COUNT};
use crate::views::log_form::LogFormView;
use crate::views::logs::{LogFilters, LogsView};
use crate::views::profile::{ProfileEditView, ProfileView};
use crate::views::report::ReportView;
use crate::views::settings::SettingsView;
use crate::views::{View, render_view};
use axum::{
    async_trait,
    extract::{Form, FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};

/// Why a screen handler stopped before rendering.
#[derive(Debug)]
pub enum PageError {
    /// No usable session; the browser goes to the sign-in screen.
    SignedOut,
    Failed(AppError),
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError::Failed(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::SignedOut => Redirect::to("/login").into_response(),
            PageError::Failed(err) => {
                error!(status = %err.status, "page failed: {}", err.message);
                err.into_response()
            }
        }
    }
}

type PageResult = Result<Response, PageError>;

/// The stored session, required by every screen behind sign-in.
pub struct SignedIn(pub AuthSession);

#[async_trait]
impl FromRequestParts<AppState> for SignedIn {
    type Rejection = PageError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.session().await.map(SignedIn).ok_or(PageError::SignedOut)
    }
}

async fn page(state: &AppState, view: &dyn View) -> Response {
    let toast = state.take_toast().await;
    Html(render_view(view, toast.as_ref(), state.config.features)).into_response()
}

/// Re-renders a form with the reason it was not accepted.
fn rejected(state: &AppState, view: &dyn View, status: StatusCode, message: String) -> Response {
    let toast = Toast::error(message);
    let html = render_view(view, Some(&toast), state.config.features);
    (status, Html(html)).into_response()
}

async fn redirect_with(state: &AppState, to: &str, toast: Toast) -> Response {
    state.push_toast(toast).await;
    Redirect::to(to).into_response()
}

/// Queues `err` for the next screen. A rejected session is dropped and
/// the caller is sent to sign-in.
async fn recover(state: &AppState, err: BackendError) -> Result<(), PageError> {
    if err.is_unauthorized() {
        warn!("backend rejected the stored session, signing out");
        state.clear_session().await?;
        state
            .push_toast(Toast::error(ErrorKind::SessionExpired.localized()))
            .await;
        return Err(PageError::SignedOut);
    }
    state.push_toast(Toast::error(err.to_string())).await;
    Ok(())
}

async fn fetch_logs(
    state: &AppState,
    session: &AuthSession,
    query: &LogQuery,
) -> Result<Vec<TravelLogEntry>, PageError> {
    match state.backend.list_logs(session, query).await {
        Ok(logs) => Ok(logs),
        Err(err) => {
            recover(state, err).await?;
            Ok(Vec::new())
        }
    }
}

fn stats_or_zero(logs: &[TravelLogEntry]) -> BasicStats {
    basic_stats(logs).unwrap_or_else(|err| {
        warn!("travel stats unavailable: {err}");
        BasicStats::default()
    })
}

async fn profile_of(state: &AppState, session: &AuthSession) -> UserProfile {
    let local = state.local.lock().await;
    UserProfile::merge(Some(&session.user.user_metadata), &local.profile)
}

async fn known_country_check<T>(
    state: &AppState,
    check: impl FnOnce(&dyn Fn(&str) -> bool) -> T,
) -> T {
    let store = state.countries.read().await;
    check(&|code: &str| store.by_code(code).is_some())
}

pub async fn hub(State(state): State<AppState>, SignedIn(session): SignedIn) -> PageResult {
    let logs = fetch_logs(&state, &session, &LogQuery::default()).await?;
    let stats = stats_or_zero(&logs);
    let recent = logs.into_iter().take(RECENT_COUNT).collect();
    let profile = profile_of(&state, &session).await;

    let store = state.countries.read().await;
    let view = HubView {
        store: &store,
        profile,
        stats,
        recent,
        features: state.config.features,
    };
    Ok(page(&state, &view).await)
}

pub async fn logs(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Query(filters): Query<LogFilters>,
) -> PageResult {
    if let Some(mode) = filters.view_mode() {
        state.update_local(|local| local.view_mode = mode).await?;
    }
    let mode = state.local.lock().await.view_mode;

    let logs = fetch_logs(&state, &session, &filters.to_query()).await?;
    // The year choices always span the whole journal.
    let years = if filters.is_active() {
        available_years(&fetch_logs(&state, &session, &LogQuery::default()).await?)
    } else {
        available_years(&logs)
    };
    let pagination = Pagination::new(filters.page(), state.config.page_size, logs.len());
    let entries = logs[pagination.range()].to_vec();

    let store = state.countries.read().await;
    let view = LogsView {
        store: &store,
        filters,
        entries,
        pagination,
        mode,
        years,
    };
    Ok(page(&state, &view).await)
}

pub async fn new_log(State(state): State<AppState>, SignedIn(_): SignedIn) -> PageResult {
    let today = Local::now().date_naive().to_string();
    let form = LogForm {
        start_date: today.clone(),
        end_date: today,
        ..LogForm::default()
    };
    let store = state.countries.read().await;
    let view = LogFormView {
        store: &store,
        form,
        editing: None,
    };
    Ok(page(&state, &view).await)
}

async fn reject_log_form(
    state: &AppState,
    form: LogForm,
    editing: Option<String>,
    status: StatusCode,
    message: String,
) -> Response {
    let store = state.countries.read().await;
    let view = LogFormView {
        store: &store,
        form,
        editing,
    };
    rejected(state, &view, status, message)
}

pub async fn create_log(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Form(form): Form<LogForm>,
) -> PageResult {
    let draft = match known_country_check(&state, |known| form.validate(known)).await {
        Ok(draft) => draft,
        Err(err) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(reject_log_form(&state, form, None, status, err.to_string()).await);
        }
    };

    match state.backend.create_log(&session, &draft).await {
        Ok(entry) => {
            info!(id = %entry.id, country = %entry.country, "travel log created");
            Ok(redirect_with(&state, "/logs", Toast::success(messages::LOG_CREATED)).await)
        }
        Err(err) if err.is_unauthorized() => {
            recover(&state, err).await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(err) => {
            let status = backend_status(&err);
            Ok(reject_log_form(&state, form, None, status, err.to_string()).await)
        }
    }
}

pub async fn edit_log(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Path(id): Path<String>,
) -> PageResult {
    let entry = match state.backend.get_log(&session, &id).await {
        Ok(entry) => entry,
        Err(err) => {
            recover(&state, err).await?;
            return Ok(Redirect::to("/logs").into_response());
        }
    };

    let store = state.countries.read().await;
    let view = LogFormView {
        store: &store,
        form: LogForm::from_entry(&entry),
        editing: Some(entry.id.clone()),
    };
    Ok(page(&state, &view).await)
}

pub async fn update_log(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Path(id): Path<String>,
    Form(form): Form<LogForm>,
) -> PageResult {
    let draft = match known_country_check(&state, |known| form.validate(known)).await {
        Ok(draft) => draft,
        Err(err) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(reject_log_form(&state, form, Some(id), status, err.to_string()).await);
        }
    };

    match state.backend.update_log(&session, &id, &draft).await {
        Ok(entry) => {
            info!(id = %entry.id, "travel log updated");
            Ok(redirect_with(&state, "/logs", Toast::success(messages::LOG_UPDATED)).await)
        }
        Err(err) if err.is_unauthorized() => {
            recover(&state, err).await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(err) => {
            let status = backend_status(&err);
            Ok(reject_log_form(&state, form, Some(id), status, err.to_string()).await)
        }
    }
}

pub async fn delete_log(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Path(id): Path<String>,
) -> PageResult {
    match state.backend.delete_log(&session, &id).await {
        Ok(()) => {
            info!(%id, "travel log deleted");
            state.push_toast(Toast::success(messages::LOG_DELETED)).await;
        }
        Err(err) => recover(&state, err).await?,
    }
    Ok(Redirect::to("/logs").into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub year: String,
}

pub async fn report(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Query(params): Query<ReportParams>,
) -> PageResult {
    let logs = fetch_logs(&state, &session, &LogQuery::default()).await?;
    let year = params
        .year
        .trim()
        .parse()
        .ok()
        .and_then(checked_year)
        .unwrap_or_else(|| default_report_year(&logs, Local::now().date_naive()));

    let store = state.countries.read().await;
    let report = match build_report(&logs, &store, year) {
        Ok(report) => report,
        Err(err) => {
            warn!(year, "travel report unavailable: {err}");
            state
                .push_toast(Toast::error(messages::STATS_UNAVAILABLE))
                .await;
            TravelReport::empty(year, &store)
        }
    };

    let view = ReportView {
        store: &store,
        report,
        features: state.config.features,
    };
    Ok(page(&state, &view).await)
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectionParams {
    #[serde(default)]
    pub continent: String,
}

pub async fn collection(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Query(params): Query<CollectionParams>,
) -> PageResult {
    let logs = fetch_logs(&state, &session, &LogQuery::default()).await?;

    let store = state.countries.read().await;
    let view = CollectionView {
        store: &store,
        visited: visited_codes(&logs),
        progress: continent_progress(&logs, &store),
        filter: Continent::parse(&params.continent),
    };
    Ok(page(&state, &view).await)
}

pub async fn profile(State(state): State<AppState>, SignedIn(session): SignedIn) -> PageResult {
    let session = match state.backend.current_user(&session).await {
        Ok(user) => AuthSession { user, ..session },
        Err(err) => {
            recover(&state, err).await?;
            session
        }
    };
    let logs = fetch_logs(&state, &session, &LogQuery::default()).await?;
    let stats = stats_or_zero(&logs);
    let profile = profile_of(&state, &session).await;

    let store = state.countries.read().await;
    let view = ProfileView {
        store: &store,
        profile,
        email: session.user.email.clone(),
        stats,
    };
    Ok(page(&state, &view).await)
}

pub async fn edit_profile(State(state): State<AppState>, SignedIn(session): SignedIn) -> PageResult {
    let profile = profile_of(&state, &session).await;
    let store = state.countries.read().await;
    let view = ProfileEditView {
        store: &store,
        form: ProfileForm::from_profile(&profile),
    };
    Ok(page(&state, &view).await)
}

async fn reject_profile_form(
    state: &AppState,
    form: ProfileForm,
    status: StatusCode,
    message: String,
) -> Response {
    let store = state.countries.read().await;
    let view = ProfileEditView {
        store: &store,
        form,
    };
    rejected(state, &view, status, message)
}

pub async fn save_profile(
    State(state): State<AppState>,
    SignedIn(session): SignedIn,
    Form(form): Form<ProfileForm>,
) -> PageResult {
    let (metadata, local_profile) =
        match known_country_check(&state, |known| form.validate(known)).await {
            Ok(parts) => parts,
            Err(err) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                return Ok(reject_profile_form(&state, form, status, err.to_string()).await);
            }
        };

    let user = match state.backend.update_metadata(&session, &metadata).await {
        Ok(user) => user,
        Err(err) if err.is_unauthorized() => {
            recover(&state, err).await?;
            return Ok(Redirect::to("/login").into_response());
        }
        Err(err) => {
            let status = backend_status(&err);
            return Ok(reject_profile_form(&state, form, status, err.to_string()).await);
        }
    };

    let last_user = LastKnownUser::from_user(&user, Utc::now());
    state
        .update_local(|local| {
            local.profile = local_profile;
            local.last_user = Some(last_user);
            if let Some(stored) = local.session.as_mut() {
                stored.user = user;
            }
        })
        .await?;
    info!("profile saved");
    Ok(redirect_with(&state, "/profile", Toast::success(messages::PROFILE_SAVED)).await)
}

pub async fn settings(State(state): State<AppState>, SignedIn(session): SignedIn) -> PageResult {
    let (view_mode, cached_at) = {
        let local = state.local.lock().await;
        (
            local.view_mode,
            local.country_cache.as_ref().map(|cache| cache.cached_at),
        )
    };
    let country_count = state.countries.read().await.len();

    let view = SettingsView {
        view_mode,
        email: session.user.email.clone(),
        country_count,
        countries_cached_at: cached_at,
    };
    Ok(page(&state, &view).await)
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewModeForm {
    #[serde(default)]
    pub view_mode: String,
}

pub async fn save_view_mode(
    State(state): State<AppState>,
    SignedIn(_): SignedIn,
    Form(form): Form<ViewModeForm>,
) -> PageResult {
    let Some(mode) = ViewMode::parse(&form.view_mode) else {
        let message = ValidationError::Invalid("보기 방식").to_string();
        return Ok(redirect_with(&state, "/settings", Toast::error(message)).await);
    };
    state.update_local(|local| local.view_mode = mode).await?;
    Ok(redirect_with(&state, "/settings", Toast::success(messages::SETTINGS_SAVED)).await)
}

pub async fn refresh_countries(State(state): State<AppState>, SignedIn(_): SignedIn) -> PageResult {
    state.refresh_countries().await?;
    Ok(redirect_with(&state, "/settings", Toast::success(messages::COUNTRIES_REFRESHED)).await)
}

pub async fn sign_out(State(state): State<AppState>) -> PageResult {
    if let Some(session) = state.session().await {
        if let Err(err) = state.backend.sign_out(&session).await {
            warn!("remote sign-out failed, clearing local session anyway: {err}");
        }
        state.clear_session().await?;
        info!("signed out");
    }
    Ok(redirect_with(&state, "/login", Toast::info(messages::SIGNED_OUT)).await)
}

pub async fn sign_in_page(State(state): State<AppState>) -> Response {
    if state.session().await.is_some() {
        return Redirect::to("/").into_response();
    }
    let email = state
        .local
        .lock()
        .await
        .last_user
        .as_ref()
        .map(|user| user.email.clone())
        .unwrap_or_default();
    page(&state, &SignInView { email }).await
}

pub async fn sign_in(State(state): State<AppState>, Form(form): Form<SignInForm>) -> PageResult {
    let view = SignInView {
        email: form.email.trim().to_string(),
    };
    let (email, password) = match form.validate() {
        Ok(credentials) => credentials,
        Err(err) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(rejected(&state, &view, status, err.to_string()));
        }
    };

    match state.backend.sign_in(&email, &password).await {
        Ok(session) => {
            info!(user = %session.user.id, "signed in");
            state.store_session(session).await?;
            Ok(redirect_with(&state, "/", Toast::success(messages::SIGNED_IN)).await)
        }
        Err(err) => {
            let status = backend_status(&err);
            Ok(rejected(&state, &view, status, err.to_string()))
        }
    }
}

pub async fn sign_up_page(State(state): State<AppState>) -> Response {
    if state.session().await.is_some() {
        return Redirect::to("/").into_response();
    }
    let store = state.countries.read().await;
    let view = SignUpView {
        store: &store,
        name: String::new(),
        email: String::new(),
        residence_country: String::new(),
    };
    page(&state, &view).await
}

async fn reject_sign_up(
    state: &AppState,
    form: &SignUpForm,
    status: StatusCode,
    message: String,
) -> Response {
    let store = state.countries.read().await;
    let view = SignUpView {
        store: &store,
        name: form.name.clone(),
        email: form.email.clone(),
        residence_country: form.residence_country.clone(),
    };
    rejected(state, &view, status, message)
}

pub async fn sign_up(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> PageResult {
    let request = match known_country_check(&state, |known| form.validate(known)).await {
        Ok(request) => request,
        Err(err) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(reject_sign_up(&state, &form, status, err.to_string()).await);
        }
    };

    let outcome = state
        .backend
        .sign_up(&request.email, &request.password, &request.metadata)
        .await;
    match outcome {
        Ok(SignUpOutcome::SignedIn(session)) => {
            info!(user = %session.user.id, "signed up");
            state.store_session(session).await?;
            Ok(redirect_with(&state, "/", Toast::success(messages::SIGNED_UP)).await)
        }
        Ok(SignUpOutcome::ConfirmationRequired(user)) => {
            info!(user = %user.id, "sign-up awaiting e-mail confirmation");
            Ok(redirect_with(&state, "/login", Toast::info(messages::CONFIRM_EMAIL)).await)
        }
        Err(err) => {
            let status = backend_status(&err);
            Ok(reject_sign_up(&state, &form, status, err.to_string()).await)
        }
    }
}

pub async fn reset_page(State(state): State<AppState>) -> Response {
    page(&state, &ResetView { email: String::new() }).await
}

pub async fn reset_password(State(state): State<AppState>, Form(form): Form<ResetForm>) -> PageResult {
    let view = ResetView {
        email: form.email.trim().to_string(),
    };
    let email = match form.validate() {
        Ok(email) => email,
        Err(err) => {
            let status = StatusCode::UNPROCESSABLE_ENTITY;
            return Ok(rejected(&state, &view, status, err.to_string()));
        }
    };

    match state.backend.reset_password(&email).await {
        Ok(()) => Ok(redirect_with(&state, "/login", Toast::success(messages::RESET_SENT)).await),
        Err(err) => {
            let status = backend_status(&err);
            Ok(rejected(&state, &view, status, err.to_string()))
        }
    }
}
