use afl::fuzz;
use compact_variant_fuzz::Scenario;

pub fn main() {
    fuzz!(|scenario: Scenario| {
        // run our scenario!
        scenario.run();
    });
}
