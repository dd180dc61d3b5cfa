use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    users::{
        dto::UserForm,
        repo_types::User,
        services::validate_user_form,
    },
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", collection_route())
        .route("/users/", collection_route())
        .route("/users/*rest", any(user_by_id))
}

fn collection_route() -> axum::routing::MethodRouter<AppState> {
    get(list_users)
        .head(collection_method_not_allowed)
        .post(create_user)
        .fallback(collection_method_not_allowed)
}

/// Extracts the id from `/users/{id}`; the path must have exactly two segments.
fn parse_user_path(path: &str) -> ApiResult<Uuid> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if segments.len() != 2 {
        return Err(ApiError::BadRoute("Unknown route".into()));
    }
    Uuid::parse_str(segments[1]).map_err(|_| ApiError::validation("Invalid user ID format"))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

#[instrument(skip(state, form))]
pub async fn create_user(
    State(state): State<AppState>,
    form: ApiResult<UserForm>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let form = form?;
    let fields = validate_user_form(state.users.as_ref(), form, None).await?;
    let user = state.users.insert(User::new(fields)).await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument]
pub async fn collection_method_not_allowed(method: Method) -> ApiError {
    ApiError::not_found(format!("Method {} is not allowed.", method))
}

/// Single-resource dispatch. Path shape and id are checked before the method.
#[instrument(skip(state, form))]
pub async fn user_by_id(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    form: ApiResult<UserForm>,
) -> ApiResult<Response> {
    let id = parse_user_path(uri.path())?;

    match method {
        Method::GET => get_user(&state, id).await.map(IntoResponse::into_response),
        Method::PUT => update_user(&state, id, form)
            .await
            .map(IntoResponse::into_response),
        Method::DELETE => delete_user(&state, id).await.map(IntoResponse::into_response),
        _ => Err(ApiError::not_found("Unknown method.")),
    }
}

async fn get_user(state: &AppState, id: Uuid) -> ApiResult<Json<User>> {
    state
        .users
        .get_by_id(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found"))
}

async fn update_user(
    state: &AppState,
    id: Uuid,
    form: ApiResult<UserForm>,
) -> ApiResult<Json<User>> {
    if state.users.get_by_id(id).await.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let form = form?;
    let fields = validate_user_form(state.users.as_ref(), form, Some(id)).await?;
    let user = state.users.update(id, fields).await?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(user))
}

async fn delete_user(state: &AppState, id: Uuid) -> ApiResult<StatusCode> {
    if !state.users.delete(id).await {
        return Err(ApiError::not_found("User not found"));
    }
    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
