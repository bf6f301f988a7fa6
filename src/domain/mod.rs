// Domain layer: payment and dispense models plus the ports the core drives.

pub mod model;
pub mod ports;
