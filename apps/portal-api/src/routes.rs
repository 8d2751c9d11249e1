use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use portal_domain::{OrbitChain, Project};
use portal_service::{CategoryListing, Error as ServiceError, ListingResponse, SearchResponse};

use crate::state::AppState;

type QueryPairs = Query<Vec<(String, String)>>;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/projects", get(projects))
		.route("/v1/projects/{slug}", get(project))
		.route("/v1/orbit-chains", get(orbit_chains))
		.route("/v1/categories", get(categories))
		.route("/v1/search", get(search))
		.route("/v1/selection", get(selection))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn projects(
	State(state): State<AppState>,
	Query(pairs): QueryPairs,
) -> Json<ListingResponse<Project>> {
	Json(state.portal.list_projects(pairs))
}

async fn project(
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> Result<Json<Project>, ApiError> {
	let project = state.portal.project(&slug)?;

	Ok(Json(project))
}

async fn orbit_chains(
	State(state): State<AppState>,
	Query(pairs): QueryPairs,
) -> Json<ListingResponse<OrbitChain>> {
	Json(state.portal.list_orbit_chains(pairs))
}

async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
	Json(CategoriesResponse {
		categories: state.portal.categories(),
		snapshot: state.portal.snapshot().to_string(),
	})
}

async fn search(State(state): State<AppState>, Query(pairs): QueryPairs) -> Json<SearchResponse> {
	Json(state.portal.search(pairs))
}

async fn selection(
	State(state): State<AppState>,
	Query(pairs): QueryPairs,
) -> Json<SelectionResponse> {
	Json(SelectionResponse { params: state.portal.canonical_selection(pairs) })
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
	pub categories: Vec<CategoryListing>,
	pub snapshot: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
	pub params: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::NotFound { message } => {
				Self::new(StatusCode::NOT_FOUND, "not_found", message)
			},
			ServiceError::Storage { message } => {
				tracing::error!(%message, "Request failed on storage.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
