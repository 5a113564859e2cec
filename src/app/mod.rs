// Application layer: use cases implementing the provided ports, plus decorators over them.

pub mod running_total;
pub mod use_cases;
