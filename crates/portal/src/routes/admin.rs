//! Admin report handler.
//!
//! Authenticated with `x-admin-user` / `x-admin-pass` headers against the
//! credentials injected at startup. Missing and wrong credentials are
//! indistinguishable in the response.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use secrecy::ExposeSecret;
use serde_json::json;

use crate::config::AdminConfig;
use crate::db::{OrderRepository, VisitorRepository};
use crate::error::AppError;
use crate::services::ReportService;
use crate::state::AppState;

/// GET /api/admin/report
pub async fn report(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    authorize(&state.config().admin, &headers)?;

    let service = ReportService::new(
        OrderRepository::new(state.pool()),
        VisitorRepository::new(state.pool()),
    );
    let report = service.summary().await?;

    Ok(Json(json!({ "success": true, "report": report })))
}

/// Check the admin headers against the injected credentials.
fn authorize(admin: &AdminConfig, headers: &HeaderMap) -> Result<(), AppError> {
    let user = header_value(headers, "x-admin-user");
    let pass = header_value(headers, "x-admin-pass");

    match (user, pass) {
        (Some(user), Some(pass))
            if user == admin.username && pass == admin.password.expose_secret() =>
        {
            Ok(())
        }
        _ => Err(AppError::AdminUnauthorized),
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn admin() -> AdminConfig {
        AdminConfig {
            username: "ranger".to_owned(),
            password: SecretString::from("not-a-real-password"),
        }
    }

    fn headers(user: Option<&str>, pass: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(user) = user {
            headers.insert("x-admin-user", user.parse().unwrap());
        }
        if let Some(pass) = pass {
            headers.insert("x-admin-pass", pass.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_missing_headers_are_unauthorized() {
        let result = authorize(&admin(), &HeaderMap::new());
        assert!(matches!(result, Err(AppError::AdminUnauthorized)));

        let result = authorize(&admin(), &headers(Some("ranger"), None));
        assert!(matches!(result, Err(AppError::AdminUnauthorized)));
    }

    #[test]
    fn test_wrong_credentials_are_unauthorized() {
        let result = authorize(&admin(), &headers(Some("ranger"), Some("wrong")));
        assert!(matches!(result, Err(AppError::AdminUnauthorized)));

        let result = authorize(
            &admin(),
            &headers(Some("intruder"), Some("not-a-real-password")),
        );
        assert!(matches!(result, Err(AppError::AdminUnauthorized)));
    }

    #[test]
    fn test_correct_credentials_pass() {
        let result = authorize(
            &admin(),
            &headers(Some("ranger"), Some("not-a-real-password")),
        );
        assert!(result.is_ok());
    }
}
