pub mod node;
pub mod transport;
