use rocket::{
    http::{Cookie, CookieJar},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::Result,
    model::{
        api::auth::{AdminLogin, SessionState, UserLogin},
        auth::{session_cookie, Session, AUTH_TOKEN_COOKIE},
        common::User,
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![admin_login, user_login, logout, session]
}

#[post("/auth/admin", data = "<credentials>", format = "json")]
pub async fn admin_login(
    cookies: &CookieJar<'_>,
    credentials: Json<AdminLogin>,
    mut session: Session,
    config: &State<Config>,
) -> Result<Json<User>> {
    let user = session.login(credentials.into_inner().into(), &config.admin_account())?;
    cookies.add(session_cookie(&user, config));
    Ok(Json(user))
}

#[post("/auth/user", data = "<login>", format = "json")]
pub async fn user_login(
    cookies: &CookieJar<'_>,
    login: Json<UserLogin>,
    mut session: Session,
    config: &State<Config>,
) -> Result<Json<User>> {
    let credentials = login.into_inner().validate()?;
    let user = session.login(credentials, &config.admin_account())?;
    cookies.add(session_cookie(&user, config));
    Ok(Json(user))
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar, mut session: Session) -> Json<SessionState> {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    session.logout();
    Json(session.into())
}

#[get("/auth/session")]
pub fn session(session: Session) -> Json<SessionState> {
    Json(session.into())
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json::json,
    };

    use crate::model::common::Role;

    use super::*;

    async fn session_state(client: &Client) -> SessionState {
        let response = client.get(uri!(session)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        response.into_json().await.unwrap()
    }

    #[backend_test]
    async fn admin_login_valid(client: Client) {
        let response = client
            .post(uri!(admin_login))
            .header(ContentType::JSON)
            .body(json!(AdminLogin::example()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());
        let user: User = response.into_json().await.unwrap();
        assert_eq!(user, User::admin());

        let state = session_state(&client).await;
        assert!(state.is_authenticated);
        assert_eq!(state.role, Some(Role::Admin));
    }

    #[backend_test]
    async fn admin_login_invalid(client: Client) {
        let response = client
            .post(uri!(admin_login))
            .header(ContentType::JSON)
            .body(json!(AdminLogin::empty()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));

        let response = client
            .post(uri!(admin_login))
            .header(ContentType::JSON)
            .body(
                json!({
                    "adminId": &AdminLogin::example().admin_id,
                    "password": "",
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
        assert!(!session_state(&client).await.is_authenticated);
    }

    #[backend_test(user)]
    async fn failed_admin_login_keeps_user_session(client: Client) {
        let response = client
            .post(uri!(admin_login))
            .header(ContentType::JSON)
            .body(json!(AdminLogin::empty()).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Unauthorized, response.status());

        let state = session_state(&client).await;
        assert_eq!(state.role, Some(Role::User));
        assert_eq!(state.user.unwrap().username, UserLogin::example().username);
    }

    #[backend_test]
    async fn user_login_always_succeeds(client: Client) {
        let response = client
            .post(uri!(user_login))
            .header(ContentType::JSON)
            .body(json!(UserLogin::example2()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let user: User = response.into_json().await.unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.username, "bob");
        assert_eq!(user.points, Some(0));

        let state = session_state(&client).await;
        assert_eq!(state.user.map(|user| user.id), Some(user.id));
    }

    #[backend_test]
    async fn user_login_requires_username_and_phone(client: Client) {
        let response = client
            .post(uri!(user_login))
            .header(ContentType::JSON)
            .body(json!({ "username": "", "phone": "555-0100" }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::BadRequest, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
    }

    #[backend_test(admin)]
    async fn logout_clears_session(client: Client) {
        assert!(session_state(&client).await.is_authenticated);

        let response = client.delete(uri!(logout)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
        let state: SessionState = response.into_json().await.unwrap();
        assert!(!state.is_authenticated);

        let state = session_state(&client).await;
        assert!(!state.is_authenticated);
        assert_eq!(state.user, None);
        assert_eq!(state.role, None);
    }
}
