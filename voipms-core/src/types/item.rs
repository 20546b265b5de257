use std::collections::BTreeMap;

/// One unit of input work: the node parameters an upstream step set for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct InvocationItem {
    pub parameters: BTreeMap<String, String>,
}

impl InvocationItem {
    pub fn new(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::default()
            .with_param("resource", resource)
            .with_param("operation", operation)
    }

    pub fn send_sms(
        source: impl Into<String>,
        destination: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new("sms", "sendSMS")
            .with_param("source", source)
            .with_param("destination", destination)
            .with_param("message", message)
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn resource(&self) -> Option<&str> {
        self.get("resource")
    }

    pub fn operation(&self) -> Option<&str> {
        self.get("operation")
    }
}

/// Provider response for one processed item.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputRecord {
    pub json: serde_json::Value,
}

impl OutputRecord {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_is_a_flat_parameter_map() {
        let item = InvocationItem::send_sms("5551234567", "5557654321", "hi");
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "resource": "sms",
                "operation": "sendSMS",
                "source": "5551234567",
                "destination": "5557654321",
                "message": "hi"
            })
        );
    }

    #[test]
    fn selectors_are_optional() {
        let item: InvocationItem = serde_json::from_str("{}").unwrap();
        assert!(item.resource().is_none());
        assert!(item.operation().is_none());
    }
}
