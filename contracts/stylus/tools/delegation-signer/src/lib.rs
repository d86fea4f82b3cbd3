pub mod encoder;
pub mod relay;
pub mod signer;
pub mod wire;
