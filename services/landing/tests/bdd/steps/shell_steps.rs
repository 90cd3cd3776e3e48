//! BDD step definitions for the page shell

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use landing::client::SettingsClient;
use landing::io::ReqwestHttpClient;
use landing::shell::{run_shell, ShellOutcome, TerminalRenderer, MAINTENANCE_NOTICE};
use tokio_util::sync::CancellationToken;

use crate::world::LandingWorld;

#[given(expr = "a splash lasting {int}ms")]
fn short_splash(world: &mut LandingWorld, ms: u64) {
    world.config.preloader.min_duration = Duration::from_millis(ms);
    world.config.preloader.settle_delay = Duration::from_millis(20);
    world.config.preloader.exit_delay = Duration::from_millis(30);
}

#[when("the page shell runs")]
async fn shell_runs(world: &mut LandingWorld) {
    let client = SettingsClient::new(world.base_url(), Arc::new(ReqwestHttpClient::new()));
    let mut renderer = TerminalRenderer::new(Vec::new());
    let outcome = run_shell(&world.config, client, &mut renderer, CancellationToken::new())
        .await
        .expect("shell failed");
    world.outcome = Some(outcome);
    world.output = String::from_utf8(renderer.into_inner()).expect("output is not UTF-8");
}

#[then("the landing content should be shown")]
fn landing_shown(world: &mut LandingWorld) {
    assert!(matches!(world.outcome, Some(ShellOutcome::Landed(_))));
    assert!(world.output.contains("Designed by\nSalim Sokurov\n"));
}

#[then(expr = "the output should contain {string}")]
fn output_contains(world: &mut LandingWorld, text: String) {
    assert!(world.output.contains(&text), "output: {:?}", world.output);
}

#[then("the maintenance notice should be shown")]
fn notice_shown(world: &mut LandingWorld) {
    assert!(world.output.contains(MAINTENANCE_NOTICE));
}

#[then("the maintenance notice should not be shown")]
fn notice_hidden(world: &mut LandingWorld) {
    assert!(!world.output.contains(MAINTENANCE_NOTICE));
}
