//! Small deterministic helpers that run inside Stylus / WASM.

pub mod crypto;
