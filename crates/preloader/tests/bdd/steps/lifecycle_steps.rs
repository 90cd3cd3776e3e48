//! BDD step definitions for the preloader lifecycle feature

use std::time::Duration;

use cucumber::{given, then, when};

use crate::world::PreloaderWorld;

#[given(expr = "a preloader with a minimum duration of {int} ms")]
fn min_duration(world: &mut PreloaderWorld, ms: u64) {
    world.config.min_duration = Duration::from_millis(ms);
}

#[given(expr = "content becomes ready after {int} ms")]
fn ready_after(world: &mut PreloaderWorld, ms: u64) {
    world.config.ready_delay = Duration::from_millis(ms);
}

#[given("content never becomes ready")]
fn never_ready(world: &mut PreloaderWorld) {
    world.never_ready = true;
}

#[when("the preloader starts")]
fn starts(world: &mut PreloaderWorld) {
    world.start();
}

#[when(expr = "{int} ms have elapsed since start")]
async fn elapsed(world: &mut PreloaderWorld, ms: u64) {
    let target = Duration::from_millis(ms);
    let elapsed = world.elapsed();
    if target > elapsed {
        tokio::time::sleep(target - elapsed).await;
    }
}

#[when("the preloader is torn down")]
fn torn_down(world: &mut PreloaderWorld) {
    assert!(world.handle().teardown(), "preloader had already finished");
}

#[when("the preloader finishes")]
async fn finishes(world: &mut PreloaderWorld) {
    world.handle().completed().await;
}

#[then(expr = "the progress should be {int}")]
fn progress_is(world: &mut PreloaderWorld, expected: u8) {
    assert_eq!(world.handle().progress(), expected);
}

#[then("the preloader should not be exiting")]
fn not_exiting(world: &mut PreloaderWorld) {
    assert!(!world.handle().is_exiting());
}

#[then("the preloader should be exiting")]
fn exiting(world: &mut PreloaderWorld) {
    assert!(world.handle().is_exiting());
}

#[then(expr = "the completion callback should have fired {int} time(s)")]
fn fired_times(world: &mut PreloaderWorld, expected: u32) {
    assert_eq!(world.calls(), expected);
}

#[then(expr = "completion should have fired between {int} and {int} ms after start")]
fn fired_between(world: &mut PreloaderWorld, low: u64, high: u64) {
    let fired = world
        .completed_after()
        .expect("completion callback never fired");
    assert!(
        fired >= Duration::from_millis(low) && fired <= Duration::from_millis(high),
        "completion fired after {:?}",
        fired
    );
}
