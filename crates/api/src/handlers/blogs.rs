//! Blog dashboard and provisioning handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::middleware::context::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub name: String,
    pub year: i32,
}

/// `GET /site`: the owner's blog, for the dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let site = state.blogs().load_blog_from_user(user.0.id).await?;
    Ok(Json(site))
}

/// `GET /site/blog-unverified`: holding page for a blog awaiting manual
/// verification.
pub async fn unverified_notice(user: CurrentUser) -> impl IntoResponse {
    Json(json!({
        "name": user.0.name,
        "message": "Your blog is awaiting verification.",
    }))
}

/// `GET /new-blog`: prompt shown to a logged-in user with no blog yet.
pub async fn new_blog_prompt(user: CurrentUser) -> impl IntoResponse {
    Json(json!({
        "name": user.0.name,
        "message": "Choose a name and year for your blog.",
    }))
}

/// `POST /new-blog`: provision the user's blog.
pub async fn create_blog(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let site = state.blogs().create(user.0.id, &body.name, body.year).await?;
    Ok((StatusCode::CREATED, Json(site)))
}
