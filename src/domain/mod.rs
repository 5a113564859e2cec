// Domain layer: shipping model and the ports the use cases require and provide.

pub mod model;
pub mod ports;
