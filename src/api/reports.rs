use rocket::{serde::json::Json, tokio::time::sleep, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::report::{ReportDetail, ReportSubmission},
        auth::{Anyone, AuthToken, Citizen},
        common::{Poll, Report, ReportFilter, ReportId},
        store::{Store, VoteOutcome},
    },
    Config,
};

/// How many reports the recent list shows unless asked otherwise.
const DEFAULT_RECENT: usize = 3;

pub fn routes() -> Vec<Route> {
    routes![list, recent, report, submit, vote]
}

#[get("/reports?<filter..>")]
async fn list(
    _token: AuthToken<Anyone>,
    filter: ReportFilter,
    store: &State<Store>,
) -> Json<Vec<Report>> {
    Json(store.query(&filter).await)
}

#[get("/reports/recent?<count>")]
async fn recent(
    _token: AuthToken<Anyone>,
    count: Option<usize>,
    store: &State<Store>,
) -> Json<Vec<Report>> {
    Json(store.recent(count.unwrap_or(DEFAULT_RECENT)).await)
}

#[get("/reports/<report_id>")]
async fn report(
    token: AuthToken<Anyone>,
    report_id: ReportId,
    store: &State<Store>,
) -> Result<Json<ReportDetail>> {
    let (report, poll) = store
        .report_with_poll(report_id)
        .await
        .ok_or_else(|| Error::not_found(format!("Report with ID '{report_id}'")))?;
    Ok(Json(ReportDetail::new(report, poll, token.user())))
}

#[post("/reports", data = "<submission>", format = "json")]
async fn submit(
    token: AuthToken<Citizen>,
    submission: Json<ReportSubmission>,
    store: &State<Store>,
    config: &State<Config>,
) -> Result<Json<Report>> {
    let draft = submission.into_inner().into_draft(token.user())?;

    let delay = config.submission_delay();
    if !delay.is_zero() {
        sleep(delay).await;
    }

    Ok(Json(store.submit_report(draft).await))
}

#[post("/reports/<report_id>/vote")]
async fn vote(
    token: AuthToken<Anyone>,
    report_id: ReportId,
    store: &State<Store>,
) -> Result<Json<Poll>> {
    match store.vote(report_id, &token.user().id).await {
        VoteOutcome::Recorded(poll) | VoteOutcome::AlreadyVoted(poll) => Ok(Json(poll)),
        VoteOutcome::UnknownReport => Err(Error::not_found(format!(
            "Poll for report '{report_id}'"
        ))),
    }
}
