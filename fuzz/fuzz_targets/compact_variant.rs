#![no_main]

use compact_variant_fuzz::Scenario;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|scenario: Scenario| {
    scenario.run();
});
