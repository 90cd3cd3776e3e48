//! BDD step definitions for phase and presentation checks

use cucumber::then;

use crate::world::PreloaderWorld;

#[then(expr = "the phase should be {string}")]
fn phase_is(world: &mut PreloaderWorld, expected: String) {
    assert_eq!(world.handle().snapshot().phase().to_string(), expected);
}

#[then(expr = "the end background should be {string}")]
fn background_is(world: &mut PreloaderWorld, expected: String) {
    let crossfade = world.handle().snapshot().presentation.background_crossfade;
    match expected.as_str() {
        "hidden" => assert_eq!(crossfade, 0.0),
        "shown" => assert_eq!(crossfade, 1.0),
        other => panic!("Unknown background state: {}", other),
    }
}

#[then("the progress figure should be emphasized")]
fn emphasized(world: &mut PreloaderWorld) {
    assert!(world.handle().snapshot().presentation.emphasis_scale > 1.0);
}
