use inlinable_string::InlinableString;
use num_bigint::BigInt;
use seahash::SeaHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

pub type Bindings = HashMap<InlinableString, BigInt, BuildHasherDefault<SeaHasher>>;

// variable table; keys are the raw identifier text, values are owned
#[derive(Debug)]
pub struct Env {
    bindings: Bindings,
}

impl Env {
    pub fn new() -> Self {
        Env { bindings: Bindings::default() }
    }

    pub fn get(&self, name: &str) -> Option<&BigInt> {
        self.bindings.get(&InlinableString::from(name))
    }

    // overwrite semantics: assigning to an existing name replaces its value
    pub fn set(&mut self, name: &str, value: BigInt) {
        self.bindings.insert(InlinableString::from(name), value);
    }
}
