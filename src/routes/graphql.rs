use crate::state::ServerState;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{FromRequest, Request, State};
use axum::http::header::ACCEPT;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

/// GraphQL endpoint (GET and POST)
///
/// The request body and query string are decoded by the GraphQL extractor.
/// A browser GET without a `query` parameter gets the GraphiQL page when the
/// playground is enabled.
pub async fn graphql_handler(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    if *request.method() == Method::GET
        && state.config.enable_playground
        && wants_playground(&request)
    {
        return graphiql(&state.config.graphql_path).into_response();
    }

    let gql_request = match <GraphQLRequest as FromRequest<_>>::from_request(request, &state).await
    {
        Ok(req) => req.into_inner(),
        Err(rejection) => {
            tracing::debug!("Rejected GraphQL request");
            return rejection.into_response();
        }
    };

    let operation = gql_request.operation_name.clone().unwrap_or_default();
    let response = state.schema.execute(gql_request).await;
    if response.is_err() {
        tracing::debug!(
            operation = %operation,
            errors = response.errors.len(),
            "GraphQL request finished with errors"
        );
    }

    GraphQLResponse::from(response).into_response()
}

/// CORS pre-flight answer; never touches the schema.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn graphiql(endpoint: &str) -> Html<String> {
    Html(GraphiQLSource::build().endpoint(endpoint).finish())
}

fn wants_playground(request: &Request) -> bool {
    let accepts_html = request
        .headers()
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"));

    let has_query = request.uri().query().is_some_and(|q| {
        q.split('&')
            .any(|pair| pair.split('=').next() == Some("query"))
    });

    accepts_html && !has_query
}
