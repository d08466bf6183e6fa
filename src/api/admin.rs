use rocket::{http::Status, serde::json::Json, Route, State};

use crate::model::{
    api::report::StatusUpdate,
    auth::{Admin, AuthToken},
    common::ReportId,
    store::Store,
};

pub fn routes() -> Vec<Route> {
    routes![update_status]
}

/// Move a report to any status. Unknown ids are accepted and ignored.
#[put("/reports/<report_id>/status", data = "<update>", format = "json")]
async fn update_status(
    _token: AuthToken<Admin>,
    report_id: ReportId,
    update: Json<StatusUpdate>,
    store: &State<Store>,
) -> Status {
    store.update_status(report_id, update.status).await;
    Status::Ok
}
