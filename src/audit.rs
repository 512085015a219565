use serde_json::Value;

/// Records a session action on the `audit` tracing target.
///
/// Carts are never persisted, so this is the only trail of what a customer
/// did before submitting.
pub fn log_audit(action: &str, resource: Option<&str>, metadata: Option<Value>) {
    let metadata = metadata.unwrap_or(Value::Null);
    tracing::info!(
        target: "audit",
        action,
        resource = resource.unwrap_or("-"),
        metadata = %metadata,
        "audit"
    );
}
