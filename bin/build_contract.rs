//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use stake_farm_contracts;

fn main() {
    // Invoked by the Odra build system; compilation itself is done by odra-build
}
