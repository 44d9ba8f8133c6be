//! Fuzz target: `IncubatorConfig::from_json`
//!
//! Feeds arbitrary bytes to the config override parser.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Anything the parser accepts also passes `validate()`
//! - Anything the parser accepts can construct an `IncubationService`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use incubator::app::service::IncubationService;
use incubator::config::IncubatorConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = IncubatorConfig::from_json(json) {
        assert!(config.validate().is_ok(), "accepted config must validate");
        assert!(config.incubation_days < config.total_days);
        assert!(
            IncubationService::new(config).is_ok(),
            "accepted config must build the service"
        );
    }
});
