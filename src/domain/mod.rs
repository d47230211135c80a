// Domain layer: launch configuration, step descriptions and the process-runner port.

pub mod model;
pub mod ports;
