// Domain layer: models and ports (interfaces). Nothing here performs I/O.

pub mod model;
pub mod ports;
pub mod weather;
