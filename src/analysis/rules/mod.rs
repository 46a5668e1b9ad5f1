// Independent rule families for the manifest policy analyzer.
// Each rule is a pure function from document context to finding messages;
// the traversal engine in `analysis::manifest` composes them.

mod kubernetes;
mod pipeline;
mod secrets;
mod text;
mod workload;

pub use kubernetes::{container_name, containers, check_security_context, workload_kind};
pub use pipeline::PipelineRules;
pub use secrets::SecretRules;
pub use text::TextRules;
pub use workload::check_workload_policy;
