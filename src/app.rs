use crate::state::AppState;
use crate::{api, handlers};
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    let features = state.config.features;

    let mut pages = Router::new()
        .route("/", get(handlers::hub))
        .route("/logs", get(handlers::logs).post(handlers::create_log))
        .route("/logs/new", get(handlers::new_log))
        .route("/logs/:id", post(handlers::update_log))
        .route("/logs/:id/edit", get(handlers::edit_log))
        .route("/logs/:id/delete", post(handlers::delete_log))
        .route("/profile", get(handlers::profile).post(handlers::save_profile))
        .route("/profile/edit", get(handlers::edit_profile))
        .route("/settings", get(handlers::settings))
        .route("/settings/view-mode", post(handlers::save_view_mode))
        .route("/settings/countries/refresh", post(handlers::refresh_countries))
        .route("/login", get(handlers::sign_in_page).post(handlers::sign_in))
        .route("/signup", get(handlers::sign_up_page).post(handlers::sign_up))
        .route("/reset", get(handlers::reset_page).post(handlers::reset_password))
        .route("/logout", post(handlers::sign_out));

    let mut api = Router::new()
        .route("/api/countries", get(api::countries))
        .route("/api/countries/lookup", get(api::country_by_name))
        .route("/api/countries/:code", get(api::country))
        .route("/api/logs", get(api::logs))
        .route("/api/logs/search", get(api::search_logs))
        .route("/api/logs/:id", get(api::log))
        .route("/api/stats", get(api::basic_stats))
        .route("/api/stats/yearly/:year", get(api::yearly_stats))
        .route("/api/stats/countries", get(api::visited_countries))
        .route("/api/stats/favorites", get(api::favorite_countries))
        .route("/api/stats/dna", get(api::dna))
        .route("/api/profile", get(api::profile));

    if features.travel_report {
        pages = pages.route("/report", get(handlers::report));
        api = api.route("/api/report/:year", get(api::report));
    }
    if features.country_collection {
        pages = pages.route("/collection", get(handlers::collection));
        api = api.route("/api/stats/continents", get(api::continents));
    }
    if features.heatmap {
        api = api.route("/api/stats/heatmap/:year", get(api::heatmap));
    }

    pages.merge(api).with_state(state)
}
