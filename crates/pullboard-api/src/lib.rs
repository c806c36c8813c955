pub mod admin;
pub mod catalog;
pub mod leaderboard;
pub mod pulls;
pub mod schedule;
pub mod scores;
pub mod state;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

pub use state::{AppState, AppStateInner};

/// Every route of the service. The wipe route is only mounted when asked for.
pub fn router(state: AppState, enable_wipe: bool) -> Router {
    let mut router = Router::new()
        .route("/items", get(catalog::list_items))
        .route("/items/refresh", post(catalog::refresh))
        .route("/scores", get(scores::report).post(scores::assign))
        .route("/pulls/{uid}", get(pulls::by_date).post(pulls::record))
        .route("/leaderboard/totals", get(leaderboard::totals))
        .route("/leaderboard/daily", get(leaderboard::daily))
        .route("/schedule", get(schedule::get_schedule).put(schedule::update_schedule))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/names", get(users::names));

    if enable_wipe {
        router = router.route("/data", delete(admin::wipe));
    }

    router.with_state(state)
}
