use serde_yaml::Value;

/// Workload kind of a document-shaped value, when it is one
pub fn workload_kind(document: &Value) -> Option<&str> {
    document
        .get("kind")
        .and_then(Value::as_str)
        .filter(|kind| matches!(*kind, "Pod" | "Deployment"))
}

/// Container list of a workload, reached via the workload-appropriate path:
/// `spec.containers` for a bare Pod, `spec.template.spec.containers` for a
/// Deployment. An unexpected shape yields an empty list, never an error.
pub fn containers<'a>(resource: &'a Value, kind: &str) -> Vec<&'a Value> {
    let spec = match kind {
        "Pod" => resource.get("spec"),
        "Deployment" => resource
            .get("spec")
            .and_then(|spec| spec.get("template"))
            .and_then(|template| template.get("spec")),
        _ => None,
    };

    spec.and_then(|spec| spec.get("containers"))
        .and_then(Value::as_sequence)
        .map(|sequence| sequence.iter().collect())
        .unwrap_or_default()
}

/// Container name, or a placeholder when absent
pub fn container_name(container: &Value) -> &str {
    container
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
}

/// Security-context hazards of one container: privileged mode and the root
/// numeric user id
pub fn check_security_context(container: &Value) -> Vec<String> {
    let name = container_name(container);
    let mut findings = Vec::new();

    let security_context = container.get("securityContext");

    let privileged = security_context
        .and_then(|context| context.get("privileged"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if privileged {
        findings.push(format!("Container '{}' runs as privileged", name));
    }

    let run_as_user = security_context
        .and_then(|context| context.get("runAsUser"))
        .and_then(Value::as_i64);
    if run_as_user == Some(0) {
        findings.push(format!("Container '{}' runs as root user", name));
    }

    findings
}
