//! Headless ClipPin: wires the engine to the system clipboard and runs it.

pub mod bootstrap;
