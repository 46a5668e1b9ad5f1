use super::kubernetes::{container_name, containers, workload_kind};
use serde_yaml::Value;

/// Workload-policy checks for one parsed document
///
/// Applies only to documents shaped like a Pod or Deployment: low replica
/// counts, mutable image tags, and missing resource limits or probes. Each
/// check is independent; a container can produce several findings.
pub fn check_workload_policy(document: &Value) -> Vec<String> {
    let Some(kind) = workload_kind(document) else {
        return Vec::new();
    };

    let mut findings = Vec::new();

    if let Some(replicas) = document
        .get("spec")
        .and_then(|spec| spec.get("replicas"))
        .and_then(Value::as_i64)
    {
        if replicas < 2 {
            findings.push(format!(
                "Workload has fewer than 2 replicas (replicas: {})",
                replicas
            ));
        }
    }

    for container in containers(document, kind) {
        let name = container_name(container);

        let image = container.get("image").and_then(Value::as_str).unwrap_or("");
        if image.ends_with(":latest") {
            findings.push(format!("Container '{}' uses mutable ':latest' image tag", name));
        }

        let has_limits = container
            .get("resources")
            .and_then(|resources| resources.get("limits"))
            .is_some();
        if !has_limits {
            findings.push(format!("Container '{}' has no resource limits", name));
        }

        if container.get("livenessProbe").is_none() {
            findings.push(format!("Container '{}' has no liveness probe", name));
        }

        if container.get("readinessProbe").is_none() {
            findings.push(format!("Container '{}' has no readiness probe", name));
        }
    }

    findings
}
