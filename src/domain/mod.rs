// Domain layer: provenance model and the ports every backend plugs into.

pub mod model;
pub mod ports;
