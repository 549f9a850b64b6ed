//! Binary for generating contract schemas from odra modules.
#![doc = "Binary for generating contract schemas from odra modules."]

#[allow(unused_imports)]
use stake_farm_contracts;

fn main() {
    // Invoked by the Odra build system; schemas are emitted by odra-build
}
