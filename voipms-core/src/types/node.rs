use std::collections::BTreeMap;

use crate::dispatch::{operations_for, Resource, SMS_FIELDS};
use crate::types::credential::CREDENTIAL_TYPE;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum PropertyKind {
    Options(Vec<PropertyOption>),
    String,
}

/// A property is shown only when every listed parameter currently holds one
/// of its allowed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<String>>,
}

impl DisplayOptions {
    fn show_when(pairs: &[(&str, &str)]) -> Self {
        let show = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
            .collect();
        Self { show }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub default: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    pub fn is_visible(&self, params: &BTreeMap<String, String>) -> bool {
        let Some(display) = &self.display_options else {
            return true;
        };
        display.show.iter().all(|(param, allowed)| {
            params
                .get(param)
                .is_some_and(|current| allowed.iter().any(|a| a == current))
        })
    }

    pub fn allows(&self, value: &str) -> bool {
        match &self.kind {
            PropertyKind::Options(options) => options.iter().any(|o| o.value == value),
            PropertyKind::String => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeDefaults {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NodeCredential {
    pub name: String,
    pub required: bool,
}

/// Parameter schema the host renders for the node and resolves defaults from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub credentials: Vec<NodeCredential>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    pub fn voipms() -> Self {
        let mut properties = vec![NodeProperty {
            display_name: "Resource".to_string(),
            name: "resource".to_string(),
            kind: PropertyKind::Options(
                Resource::ALL
                    .into_iter()
                    .map(|r| PropertyOption {
                        name: r.display_name().to_string(),
                        value: r.as_str().to_string(),
                    })
                    .collect(),
            ),
            default: Resource::Account.as_str().to_string(),
            required: false,
            display_options: None,
        }];

        for resource in Resource::ALL {
            let options: Vec<PropertyOption> = operations_for(resource)
                .map(|d| PropertyOption {
                    name: d.display_name.to_string(),
                    value: d.operation.as_str().to_string(),
                })
                .collect();
            let default = options.first().map(|o| o.value.clone()).unwrap_or_default();
            properties.push(NodeProperty {
                display_name: "Operation".to_string(),
                name: "operation".to_string(),
                kind: PropertyKind::Options(options),
                default,
                required: false,
                display_options: Some(DisplayOptions::show_when(&[(
                    "resource",
                    resource.as_str(),
                )])),
            });
        }

        let sms_labels = ["Source (From)", "Destination (To)", "Message"];
        for (name, label) in SMS_FIELDS.iter().zip(sms_labels) {
            properties.push(NodeProperty {
                display_name: label.to_string(),
                name: name.to_string(),
                kind: PropertyKind::String,
                default: String::new(),
                required: true,
                display_options: Some(DisplayOptions::show_when(&[
                    ("resource", "sms"),
                    ("operation", "sendSMS"),
                ])),
            });
        }

        Self {
            display_name: "VoIP.ms".to_string(),
            name: "voipMs".to_string(),
            group: vec!["transform".to_string()],
            version: 1,
            description: "Interact with the VoIP.ms API".to_string(),
            defaults: NodeDefaults {
                name: "VoIP.ms".to_string(),
                color: "#00aaff".to_string(),
            },
            credentials: vec![NodeCredential {
                name: CREDENTIAL_TYPE.to_string(),
                required: true,
            }],
            properties,
        }
    }

    pub fn visible_properties<'a>(
        &'a self,
        params: &'a BTreeMap<String, String>,
    ) -> impl Iterator<Item = &'a NodeProperty> + 'a {
        self.properties.iter().filter(move |p| p.is_visible(params))
    }

    /// Default of the first visible property called `name`.
    pub fn parameter_default(&self, name: &str, params: &BTreeMap<String, String>) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name && p.is_visible(params))
            .map(|p| p.default.as_str())
    }

    /// Fills `resource` and `operation` from schema defaults when an item
    /// leaves them out. Other parameters are left untouched.
    pub fn resolve_selectors(&self, params: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut resolved = params.clone();
        for name in ["resource", "operation"] {
            if !resolved.contains_key(name) {
                if let Some(default) = self.parameter_default(name, &resolved) {
                    resolved.insert(name.to_string(), default.to_string());
                }
            }
        }
        resolved
    }
}
