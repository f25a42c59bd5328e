// Domain layer: playlist model, seek bar value and ports. No dependencies beyond std/serde.

pub mod model;
pub mod ports;
pub mod seekbar;
