// Domain layer: configuration object, group metadata and the ports the resolver talks through.

pub mod model;
pub mod ports;
