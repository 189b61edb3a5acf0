//! End-to-end tests of the HTTP surface against a migrated in-memory store.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::handlers;
use api_server::middleware::cors::cors_policy;
use api_server::observability::AccessLog;
use api_server::state::AppState;
use blog_infra::{DatabaseConfig, JwtConfig, database};
use migration::{Migrator, MigratorTrait};

async fn state() -> AppState {
    let db = database::connect(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    AppState::from_parts(db, JwtConfig::default())
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(cors_policy())
                .wrap(AccessLog)
                .app_data(web::Data::new(state().await))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn register<S, R, B>(app: &S, req: R) -> i32
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["user_id"].as_i64().unwrap() as i32
}

async fn login<S, R, B>(app: &S, req: R) -> String
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

fn register_req(username: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/register").set_json(json!({
        "username": username,
        "password": "secret123",
        "email": format!("{username}@example.com"),
    }))
}

fn login_req(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }))
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_blog_walkthrough() {
    let app = test_app!();

    let alice_id = register(&app, register_req("alice").to_request()).await;
    assert_eq!(alice_id, 1);
    let alice = login(&app, login_req("alice", "secret123").to_request()).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "Hello", "content": "First post" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["user_id"], 1);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(body["data"]["user"].get("password_hash").is_none());

    // Reads are public.
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/posts/1").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Hello");

    register(&app, register_req("bob").to_request()).await;
    let bob = login(&app, login_req("bob", "secret123").to_request()).await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/posts/1")
            .insert_header(bearer(&bob))
            .set_json(json!({ "title": "Hijacked" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 403);

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/comments?post_id=1")
            .insert_header(bearer(&bob))
            .set_json(json!({ "content": "Nice post" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "bob");
    assert_eq!(body["data"]["post"]["id"], 1);
    assert_eq!(body["data"]["post"]["title"], "Hello");

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/comments?post_id=1").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The post is unchanged by the rejected update.
    let (_, body) = send(
        &app,
        test::TestRequest::get().uri("/api/posts").to_request(),
    )
    .await;
    assert_eq!(body["data"][0]["title"], "Hello");
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;

    let (status, body) = send(&app, register_req("alice").to_request()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[actix_web::test]
async fn test_invalid_registration_is_bad_request() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "al", "password": "secret123", "email": "al@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;

    let (unknown_status, unknown) =
        send(&app, login_req("nobody", "secret123").to_request()).await;
    let (wrong_status, wrong) = send(&app, login_req("alice", "wrong-pass").to_request()).await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
}

#[actix_web::test]
async fn test_auth_gate() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;
    let token = login(&app, login_req("alice", "secret123").to_request()).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "t", "content": "c" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
            .set_json(json!({ "title": "t", "content": "c" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A bare token without the scheme prefix is accepted.
    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({ "title": "t", "content": "c" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/profile")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["user_id"], 1);
}

#[actix_web::test]
async fn test_partial_update_keeps_other_fields() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;
    let token = login(&app, login_req("alice", "secret123").to_request()).await;

    send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Old", "content": "Body" }))
            .to_request(),
    )
    .await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/posts/1")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "New" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "New");
    assert_eq!(body["data"]["content"], "Body");
}

#[actix_web::test]
async fn test_deleted_post_is_gone() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;
    let token = login(&app, login_req("alice", "secret123").to_request()).await;

    send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Bye", "content": "Soon gone" }))
            .to_request(),
    )
    .await;

    let (status, body) = send(
        &app,
        test::TestRequest::delete()
            .uri("/api/posts/1")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, test::TestRequest::get().uri("/api/posts/1").to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri("/api/posts/1")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/posts/1/comments")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "Too late" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_comment_post_id_is_checked() {
    let app = test_app!();
    register(&app, register_req("alice").to_request()).await;
    let token = login(&app, login_req("alice", "secret123").to_request()).await;

    let (status, _) = send(&app, test::TestRequest::get().uri("/api/comments").to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/comments?post_id=abc").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/comments?post_id=99").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/comments?post_id=99")
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "Hello?" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_input_is_bad_request() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .insert_header(header::ContentType::json())
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/posts/abc").to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn test_health_and_request_id() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/health")
            .insert_header(("x-request-id", "abc-123"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert!(resp.headers().contains_key("x-request-id"));
}

#[actix_web::test]
async fn test_cross_origin_preflight_is_answered() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/posts")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type"))
            .to_request(),
    )
    .await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("DELETE"));

    // Actual cross-origin requests carry the header too.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/posts")
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
