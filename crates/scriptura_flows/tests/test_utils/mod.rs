//! Test utilities for flow tests.
//!
//! This module provides mock backends and request fixtures.

pub mod mock_driver;
pub mod mock_images;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockDriver, MockResponse};
#[allow(unused_imports)]
pub use mock_images::MockImageGenerator;

use scriptura_config::ScripturaConfig;
use scriptura_core::{CharacterProfile, StoryDetails};

/// Bundled configuration, as every test starts from it.
#[allow(dead_code)]
pub fn test_config() -> ScripturaConfig {
    ScripturaConfig::bundled().expect("bundled config should parse")
}

/// A character with every optional field filled in.
#[allow(dead_code)]
pub fn keeper() -> CharacterProfile {
    CharacterProfile::new("A weary lighthouse keeper with salt-cracked hands")
        .with_name("Maren")
        .with_personality("stubborn, quietly funny")
        .with_role("protagonist")
}

/// A minimal story.
#[allow(dead_code)]
pub fn coastal_story() -> StoryDetails {
    StoryDetails::new("gothic mystery", "a drowned village in 1890s Cornwall")
}
