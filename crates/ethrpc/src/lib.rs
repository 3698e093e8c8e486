pub mod alloy;

use ::alloy::providers::DynProvider;

/// Type erased provider used to talk to the node.
pub type AlloyProvider = DynProvider;
