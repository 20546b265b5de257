use crate::dispatch::lookup;
use crate::types::{InvocationItem, NodeDescription};
use crate::validate::validator::{Validator, MAX_SMS_CHARS, PHONE_RE};

pub(crate) fn validate_item(
    v: &mut Validator,
    node: &NodeDescription,
    path: &str,
    item: &InvocationItem,
) {
    let params = node.resolve_selectors(&item.parameters);
    let resource = params.get("resource").map(String::as_str).unwrap_or_default();
    let operation = params.get("operation").map(String::as_str).unwrap_or_default();

    let Some(descriptor) = lookup(resource, operation) else {
        v.push(
            format!("{path}.operation"),
            format!("unsupported resource/operation combination \"{resource}/{operation}\""),
        );
        return;
    };

    for prop in node.visible_properties(&params) {
        let ipath = format!("{path}.{}", prop.name);
        match item.get(&prop.name) {
            None | Some("") if prop.required => v.push(ipath, "is required"),
            Some(value) if !prop.allows(value) => {
                v.push(ipath, format!("'{value}' is not an allowed option"))
            }
            _ => {}
        }
    }

    for key in item.parameters.keys() {
        let known = node.visible_properties(&params).any(|p| &p.name == key);
        if !known {
            v.push(
                format!("{path}.{key}"),
                format!("unknown parameter for {}/{}", descriptor.resource, descriptor.operation),
            );
        }
    }

    for field in ["source", "destination"] {
        if let Some(number) = item.get(field).filter(|s| !s.is_empty()) {
            if descriptor.extra_fields.contains(&field) && !PHONE_RE.is_match(number) {
                v.push(format!("{path}.{field}"), "must be a phone number (digits only)");
            }
        }
    }

    if let Some(message) = item.get("message") {
        let len = message.chars().count();
        if descriptor.extra_fields.contains(&"message") && len > MAX_SMS_CHARS {
            v.push(
                format!("{path}.message"),
                format!("exceeds {MAX_SMS_CHARS} characters ({len})"),
            );
        }
    }
}
