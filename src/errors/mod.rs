mod node_error;

pub use node_error::{NodeError, NodeErrorKind};
