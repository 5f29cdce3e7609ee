//! End-to-end tests for the HTTP routes

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use gympal::api::{build_router, cors_layer, AppState};
use gympal::store::DataStore;
use gympal::tools::nutrition::seed_recommendations;

fn app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::open(dir.path()).unwrap();
    seed_recommendations(&store).unwrap();
    (dir, build_router(AppState::new(store), cors_layer(&[])))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    call_raw(app, method, uri, body.map(|b| b.to_string())).await
}

async fn call_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, username: &str, email: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/register",
        Some(json!({ "username": username, "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

fn routine_body() -> Value {
    json!({
        "ID": "r1",
        "username": "ana",
        "nombre": "Pierna",
        "descripcion": "Cuádriceps y glúteo",
        "ejercicios": [
            { "nombre": "Sentadilla", "peso": "60", "repeticiones": 8, "series": 3 },
            { "nombre": "Zancadas", "peso": 20, "repeticiones": "12", "series": "2" }
        ]
    })
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_flow() {
    let (_dir, app) = app();
    let id = register(&app, "ana", "ana@mail.com").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({ "username": "otra", "email": "ana@mail.com", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "El correo ya está registrado.");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({ "email": "ana@mail.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id.as_str());
    assert_eq!(body["user"]["name"], "ana");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({ "email": "ana@mail.com", "password": "mal" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Usuario o contraseña incorrectos.");

    let (status, body) = call(&app, Method::POST, "/api/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Faltan email o password.");
}

#[tokio::test]
async fn test_users_and_update() {
    let (_dir, app) = app();
    let id = register(&app, "ana", "ana@mail.com").await;

    let (status, body) = call(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert!(body[0].get("password").is_none());

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/actualizar-usuario",
        Some(json!({ "userId": id, "newUsername": "ana2", "email": "ana2@mail.com", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, &format!("/api/usuario/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana2");

    let (status, body) = call(&app, Method::GET, "/api/usuario/nadie", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Usuario no encontrado.");
}

#[tokio::test]
async fn test_profile_flow() {
    let (_dir, app) = app();
    let id = register(&app, "ana", "ana@mail.com").await;

    let (status, _) = call(&app, Method::GET, &format!("/api/configuracion/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/configuracion",
        Some(json!({
            "username": "ana",
            "objetivo": "bajar de peso",
            "edad": "30",
            "sexo": "femenino",
            "altura": "165",
            "peso": 60,
            "experiencia": "principiante"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Configuración guardada correctamente.");

    let (status, body) = call(&app, Method::GET, &format!("/api/configuracion/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objetivo"], "bajar de peso");
    assert_eq!(body["edad"], 30);
    assert_eq!(body["userId"], id.as_str());
    // 10*60 + 6.25*165 - 5*30 - 161 = 1320.25; *1.2 - 500 = 1084.3
    assert_eq!(body["metaCalorias"], 1084);

    let (status, body) = call(&app, Method::GET, "/api/plan/ana", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["objetivo"], "bajar de peso");
    assert!(body["comidas"]["Desayuno"]["proteinas"].is_array());
}

#[tokio::test]
async fn test_profile_rejects_missing_numbers() {
    let (_dir, app) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/configuracion",
        Some(json!({
            "username": "ana",
            "objetivo": "tonificar",
            "edad": "",
            "sexo": "masculino",
            "altura": 180,
            "peso": 80,
            "experiencia": "avanzado"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Por favor completa todos los campos numéricos.");
}

#[tokio::test]
async fn test_routine_crud() {
    let (_dir, app) = app();

    let (status, body) = call(&app, Method::POST, "/api/rutinas", Some(routine_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ID"], "r1");

    let (status, _) = call(&app, Method::POST, "/api/rutinas", Some(routine_body())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, Method::GET, "/api/rutinas/ana", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["descripcion"], "Cuádriceps y glúteo");
    assert_eq!(body[0]["ejercicios"][0]["peso"], 60.0);

    let mut edit = routine_body();
    edit["nombre"] = json!("Pierna pesada");
    let (status, body) = call(&app, Method::PUT, "/api/rutina/r1", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Pierna pesada");

    let (status, _) = call(&app, Method::DELETE, "/api/rutina/r1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/api/rutina/r1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Rutina no encontrada.");
}

#[tokio::test]
async fn test_routine_validation() {
    let (_dir, app) = app();
    let mut body = routine_body();
    body["ejercicios"] = json!([]);
    let (status, _) = call(&app, Method::POST, "/api/rutinas", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = routine_body();
    body["ejercicios"][1]["peso"] = json!("-5");
    let (status, res) = call(&app, Method::POST, "/api/rutinas", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "El peso del ejercicio 2 no es válido.");
}

#[tokio::test]
async fn test_progress_counters() {
    let (_dir, app) = app();
    call(&app, Method::POST, "/api/rutinas", Some(routine_body())).await;

    for _ in 0..3 {
        call(&app, Method::POST, "/api/rutina/r1/progreso/1/incrementar", None).await;
    }
    let (status, body) = call(&app, Method::GET, "/api/rutina/r1/progreso", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ejercicios"][1]["completadas"], 2);
    assert_eq!(body["completadas"], 2);
    assert_eq!(body["total"], 5);

    let (status, body) = call(&app, Method::POST, "/api/rutina/r1/progreso/0/decrementar", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ejercicios"][0]["completadas"], 0);

    let (status, body) = call(&app, Method::POST, "/api/rutina/r1/progreso/x/incrementar", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Índice de ejercicio inválido.");

    let (status, body) = call(&app, Method::DELETE, "/api/rutina/r1/progreso", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completadas"], 0);
}

#[tokio::test]
async fn test_recommendations() {
    let (_dir, app) = app();
    let (status, body) = call(&app, Method::GET, "/api/alimentacion/ganar%20masa%20muscular", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| i["objetivo"] == "ganar masa muscular"));
    assert!(items.iter().all(|i| i["comida"].is_string()));
}

#[tokio::test]
async fn test_intake_calculation() {
    let (_dir, app) = app();
    let (status, body) = call(&app, Method::GET, "/api/alimentos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alimentos"].as_array().unwrap().len(), 21);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/alimentacion/calcular",
        Some(json!({
            "alimentos": [
                { "comida": "Desayuno", "alimento": "Arroz", "cantidad": 2, "porcion": 0.5 }
            ],
            "metaCalorias": 2000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["carbohidratos"].as_f64().unwrap() > 0.0);
    assert_eq!(body["metaCalorias"], 2000.0);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/alimentacion/calcular",
        Some(json!({ "alimentos": [{ "comida": "Cena", "alimento": "Pizza", "cantidad": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_route() {
    let (_dir, app) = app();
    let (status, body) = call(&app, Method::GET, "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["files"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_bad_bodies_get_message() {
    let (_dir, app) = app();

    let (status, body) =
        call_raw(&app, Method::POST, "/api/login", Some("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "El cuerpo de la solicitud no es JSON válido.");

    let mut routine = routine_body();
    routine["ejercicios"] = json!("nope");
    let (status, body) = call(&app, Method::POST, "/api/rutinas", Some(routine)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Los datos de la solicitud no son válidos.");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/configuracion",
        Some(json!({ "username": "ana", "edad": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .body(Body::from(r#"{"username":"ana"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Se esperaba un cuerpo JSON.");
}

#[tokio::test]
async fn test_fractional_age_below_one_rejected() {
    let (_dir, app) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/configuracion",
        Some(json!({
            "username": "ana",
            "objetivo": "tonificar",
            "edad": "0.4",
            "sexo": "femenino",
            "altura": 160,
            "peso": 55,
            "experiencia": "intermedio"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "La edad no es válida.");

    let (status, _) = call(&app, Method::GET, "/api/configuracion/ana", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_intake_meal_names_any_case() {
    let (_dir, app) = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/alimentacion/calcular",
        Some(json!({
            "items": [
                { "comida": "desayuno", "alimento": "Pan", "cantidad": 1 },
                { "comida": "CENA", "alimento": "Pollo", "cantidad": 1 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["porComida"]["Desayuno"]["carbohidratos"], 30.0);
    assert_eq!(body["porComida"]["Cena"]["proteinas"], 25.0);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/alimentacion/calcular",
        Some(json!({ "items": [{ "comida": "brunch", "alimento": "Pan", "cantidad": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_multiline_description_round_trip() {
    let (_dir, app) = app();
    let mut routine = routine_body();
    routine["descripcion"] = json!("Calentar 10 min\nLuego series");
    let (status, _) = call(&app, Method::POST, "/api/rutinas", Some(routine)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::GET, "/api/rutina/r1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["descripcion"], "Calentar 10 min\nLuego series");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations() {
    let (_dir, app) = app();
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let app = app.clone();
        tasks.spawn(async move {
            let body = json!({
                "username": format!("user{}", i),
                "email": format!("user{}@mail.com", i),
                "password": "pw"
            });
            call(&app, Method::POST, "/api/register", Some(body)).await.0
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let (status, body) = call(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 16);
}
