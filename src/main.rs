use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use bolt_props::evaluate::evaluate;
use bolt_props::model::{EvaluateRequest, EvaluateResponse};
use bolt_props::PropsClient;

const LISTEN_ADDR: &str = "0.0.0.0:8000";

type SharedClient = Arc<PropsClient>;

#[derive(Debug, Deserialize)]
struct PropsQuery {
    match_id: Option<String>,
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Bolt backend — live" }))
}

async fn match_props(
    State(client): State<SharedClient>,
    Query(query): Query<PropsQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let match_id = match query.match_id {
        Some(id) => id,
        None => client.todays_first_match_id().await.ok_or_else(|| {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "detail": "could not find today's first match" })),
            )
        })?,
    };

    let props = client.get_match_props(&match_id).await;
    Ok(Json(json!({ "match_id": match_id, "props": props })))
}

async fn evaluate_prop(Json(body): Json<EvaluateRequest>) -> Json<EvaluateResponse> {
    Json(evaluate(&body))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bolt_props=debug,info")),
        )
        .init();

    let client = Arc::new(PropsClient::new()?);

    let app = Router::new()
        .route("/", get(root))
        .route("/match/props", get(match_props))
        .route("/evaluate", post(evaluate_prop))
        .with_state(client);

    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR).await?;
    info!("listening on {LISTEN_ADDR}");
    axum::serve(listener, app).await?;

    Ok(())
}
