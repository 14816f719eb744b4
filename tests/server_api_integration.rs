//! Integration tests for the HTTP surface
//!
//! The router is driven in-process; no socket is opened.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pokedex::{build_router, Dataset, ServerConfig, ServerState};
use serde_json::{json, Value};
use tower::ServiceExt;

const GRAPHQL: &str = "/api/graphql";

fn create_app(config: ServerConfig) -> Router {
    let state = Arc::new(ServerState::new(config).expect("Failed to create test state"));
    build_router(state).expect("Failed to build router")
}

fn graphql_post(query: &str, variables: Value) -> Request<Body> {
    let mut body = json!({ "query": query });
    if !variables.is_null() {
        body["variables"] = variables;
    }

    Request::builder()
        .method(Method::POST)
        .uri(GRAPHQL)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

async fn query(app: Router, query: &str, variables: Value) -> Value {
    let response = app.oneshot(graphql_post(query, variables)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn test_post_pokemon_by_id() {
    let app = create_app(ServerConfig::default());
    let data = query(
        app,
        "query($id: Int) { pokemonById(id: $id) { id nombre numero imagen tipos } }",
        json!({ "id": 1 }),
    )
    .await;

    let pokemon = &data["pokemonById"];
    assert_eq!(pokemon["id"], "001");
    assert_eq!(pokemon["nombre"], "Bulbasaur");
    assert_eq!(pokemon["numero"], 1);
    assert!(pokemon["imagen"].as_str().unwrap().ends_with("/001.png"));
    assert_eq!(pokemon["tipos"], json!(["Grass", "Poison"]));
}

#[tokio::test]
async fn test_post_pokemon_by_id_unknown_is_null() {
    let app = create_app(ServerConfig::default());
    let data = query(app, "{ pokemonById(id: 4000) { id } }", Value::Null).await;
    assert_eq!(data["pokemonById"], Value::Null);
}

#[tokio::test]
async fn test_pokemones_limits() {
    let all = query(
        create_app(ServerConfig::default()),
        "{ pokemones { id } }",
        Value::Null,
    )
    .await;
    let all = all["pokemones"].as_array().unwrap().clone();
    assert_eq!(all.len(), 151);

    let limited = query(
        create_app(ServerConfig::default()),
        "query($limit: Int) { pokemones(limit: $limit) { id } }",
        json!({ "limit": 3 }),
    )
    .await;
    assert_eq!(
        limited["pokemones"],
        json!([{ "id": "001" }, { "id": "002" }, { "id": "003" }])
    );

    let oversized = query(
        create_app(ServerConfig::default()),
        "{ pokemones(limit: 500) { id } }",
        Value::Null,
    )
    .await;
    assert_eq!(oversized["pokemones"].as_array().unwrap(), &all);

    // limit 0 is treated as "no limit"
    let zero = query(
        create_app(ServerConfig::default()),
        "{ pokemones(limit: 0) { id } }",
        Value::Null,
    )
    .await;
    assert_eq!(zero["pokemones"].as_array().unwrap(), &all);
}

#[tokio::test]
async fn test_get_with_query_string() {
    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/graphql?query=%7BpokemonById(id%3A25)%7Bnombre%20tipos%7D%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["data"]["pokemonById"],
        json!({ "nombre": "Pikachu", "tipos": ["Electric"] })
    );
}

#[tokio::test]
async fn test_browser_get_serves_graphiql() {
    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri(GRAPHQL)
                .header(header::ACCEPT, "text/html,application/xhtml+xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_preflight_answered_without_engine() {
    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(GRAPHQL)
                .header(header::ORIGIN, "https://pokedex.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    let allowed = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(allowed.contains("POST"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_bare_options_gets_no_content() {
    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(GRAPHQL)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_cors_headers_on_post() {
    let app = create_app(ServerConfig::default());
    let mut request = graphql_post("{ pokemones(limit: 1) { id } }", Value::Null);
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://pokedex.example".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_without_cors() {
    let config = ServerConfig {
        enable_cors: false,
        ..ServerConfig::default()
    };

    let mut request = graphql_post("{ pokemones(limit: 1) { id } }", Value::Null);
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://pokedex.example".parse().unwrap());
    let response = create_app(config.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());

    let response = create_app(config)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(GRAPHQL)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_custom_graphql_path() {
    let config = ServerConfig {
        graphql_path: "/graphql".to_string(),
        ..ServerConfig::default()
    };

    let app = create_app(config);
    let mut request = graphql_post("{ pokemonById(id: 150) { nombre } }", Value::Null);
    *request.uri_mut() = "/graphql".parse().unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["pokemonById"]["nombre"], "Mewtwo");
}

#[tokio::test]
async fn test_custom_provider_and_image_base() {
    let dataset = Dataset::from_json(
        r#"[
            {"id": 1000, "name": {"english": "Gholdengo"}, "type": ["Steel", "Ghost"]},
            {"id": 7, "name": {"english": "Squirtle"}, "type": ["Water"]}
        ]"#,
    )
    .unwrap();
    let config = ServerConfig {
        image_base_url: "https://img.example/thumbs/".to_string(),
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::with_provider(config, Arc::new(dataset)));
    let app = build_router(state).unwrap();

    let data = query(app, "{ pokemones { id numero imagen } }", Value::Null).await;
    assert_eq!(
        data["pokemones"],
        json!([
            { "id": "007", "numero": 7, "imagen": "https://img.example/thumbs/007.png" },
            { "id": "1000", "numero": 1000, "imagen": "https://img.example/thumbs/1000.png" },
        ])
    );
}

#[tokio::test]
async fn test_health_and_ready() {
    let response = create_app(ServerConfig::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");

    let response = create_app(ServerConfig::default())
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["components"]["dataset"]["records"], 151);
}

#[tokio::test]
async fn test_api_info() {
    let response = create_app(ServerConfig::default())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["graphql"], GRAPHQL);
}

#[tokio::test]
async fn test_request_id_round_trip() {
    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let app = create_app(ServerConfig::default());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
