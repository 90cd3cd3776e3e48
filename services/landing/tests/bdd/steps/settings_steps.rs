//! BDD step definitions for the settings endpoint

use cucumber::{given, then, when};
use landing::io::{HttpClient, ReqwestHttpClient};

use crate::world::LandingWorld;

#[given("no stored settings")]
fn no_stored_settings(world: &mut LandingWorld) {
    world.settings_dir = None;
}

#[given(expr = "stored settings with welcome message {string}")]
fn stored_settings(world: &mut LandingWorld, message: String) {
    write_row(world, &message, false);
}

#[given(expr = "stored settings with welcome message {string} in maintenance mode")]
fn stored_settings_maintenance(world: &mut LandingWorld, message: String) {
    write_row(world, &message, true);
}

#[given("a corrupt settings file")]
fn corrupt_settings(world: &mut LandingWorld) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join("settings.json"), "{ broken").expect("failed to write");
    world.settings_dir = Some(dir);
}

fn write_row(world: &mut LandingWorld, message: &str, maintenance: bool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let rows = serde_json::json!([{
        "id": 1,
        "maintenanceMode": maintenance,
        "welcomeMessage": message,
    }]);
    std::fs::write(dir.path().join("settings.json"), rows.to_string()).expect("failed to write");
    world.settings_dir = Some(dir);
}

#[given("the landing server is running")]
async fn server_running(world: &mut LandingWorld) {
    world.start_server().await;
}

#[given("the landing server is unreachable")]
fn server_unreachable(world: &mut LandingWorld) {
    world.base_url = Some("http://127.0.0.1:1".to_string());
}

#[when(expr = "I request {string}")]
async fn request(world: &mut LandingWorld, path: String) {
    let url = format!("{}{}", world.base_url(), path);
    let response = ReqwestHttpClient::new()
        .get(&url)
        .await
        .expect("request failed");
    world.response = Some(response);
}

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut LandingWorld, status: u16) {
    let response = world.response.as_ref().expect("no response");
    assert_eq!(response.status, status);
}

#[then(expr = "the response JSON field {string} should be {string}")]
fn response_field(world: &mut LandingWorld, field: String, expected: String) {
    let response = world.response.as_ref().expect("no response");
    let json: serde_json::Value =
        serde_json::from_str(&response.body).expect("response is not JSON");
    let actual = match &json[&field] {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    assert_eq!(actual, expected, "field {}", field);
}
