use rocket::{serde::json::Json, Route, State};

use crate::model::{
    auth::{Anyone, AuthToken, Session},
    common::{ContributorProfile, LeaderboardEntry, Navigation, Statistics, CATEGORY_SUGGESTIONS},
    store::Store,
};

pub fn routes() -> Vec<Route> {
    routes![navigation, categories, statistics, leaderboard, my_profile]
}

#[get("/navigation")]
fn navigation(session: Session) -> Json<Navigation> {
    Json(Navigation::for_role(session.role()))
}

/// The suggested categories, followed by any others already in use.
#[get("/categories")]
async fn categories(store: &State<Store>) -> Json<Vec<String>> {
    let mut categories: Vec<String> = CATEGORY_SUGGESTIONS
        .iter()
        .map(|category| category.to_string())
        .collect();
    for category in store.categories().await {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    Json(categories)
}

#[get("/stats")]
async fn statistics(_token: AuthToken<Anyone>, store: &State<Store>) -> Json<Statistics> {
    Json(store.statistics().await)
}

#[get("/leaderboard")]
async fn leaderboard(
    _token: AuthToken<Anyone>,
    store: &State<Store>,
) -> Json<Vec<LeaderboardEntry>> {
    Json(store.leaderboard().await)
}

#[get("/leaderboard/me")]
async fn my_profile(token: AuthToken<Anyone>, store: &State<Store>) -> Json<ContributorProfile> {
    Json(store.profile(token.user()).await)
}
