/// Parse-tree nodes and the rule kinds the generator understands.
pub mod node;
/// Grammar loading and parsing through the PEG VM.
pub mod parser;
