// Adapters layer: concrete implementations of the ports (storage) and input/output rendering (presentation).

pub mod presentation;
pub mod storage;
