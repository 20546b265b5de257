use crate::error::ParseError;
use crate::types::InvocationItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedItems {
    pub items: Vec<InvocationItem>,
    pub format: DocumentFormat,
}

/// Either a list of items or a single bare item.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ItemsDocument {
    Many(Vec<InvocationItem>),
    One(InvocationItem),
}

impl From<ItemsDocument> for Vec<InvocationItem> {
    fn from(doc: ItemsDocument) -> Self {
        match doc {
            ItemsDocument::Many(items) => items,
            ItemsDocument::One(item) => vec![item],
        }
    }
}

pub fn parse_items_str(input: &str, format: DocumentFormat) -> Result<ParsedItems, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedItems {
            items: serde_json::from_str::<ItemsDocument>(input)?.into(),
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedItems {
            items: serde_yaml::from_str::<ItemsDocument>(input)?.into(),
            format,
        }),
        DocumentFormat::Auto => parse_items_auto(input),
    }
}

fn parse_items_auto(input: &str) -> Result<ParsedItems, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::UnknownFormat);
    }

    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<ItemsDocument>(input) {
            Ok(doc) => Ok(ParsedItems {
                items: doc.into(),
                format: DocumentFormat::Json,
            }),
            // flow-style YAML also starts with a bracket
            Err(e) => match serde_yaml::from_str::<ItemsDocument>(input) {
                Ok(doc) => Ok(ParsedItems {
                    items: doc.into(),
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<ItemsDocument>(input) {
        Ok(doc) => Ok(ParsedItems {
            items: doc.into(),
            format: DocumentFormat::Yaml,
        }),
        Err(e) => Err(ParseError::Yaml(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_json_object_becomes_one_item() {
        let parsed =
            parse_items_str(r#"{"resource":"account","operation":"getBalance"}"#, DocumentFormat::Auto)
                .unwrap();
        assert_eq!(parsed.format, DocumentFormat::Json);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].resource(), Some("account"));
    }

    #[test]
    fn yaml_list_is_detected() {
        let input = r#"
- resource: did
  operation: listDIDs
- resource: sms
  operation: sendSMS
  source: "5551234567"
  destination: "5557654321"
  message: hello there
"#;
        let parsed = parse_items_str(input, DocumentFormat::Auto).unwrap();
        assert_eq!(parsed.format, DocumentFormat::Yaml);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[1].get("message"), Some("hello there"));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            parse_items_str("   \n", DocumentFormat::Auto),
            Err(ParseError::UnknownFormat)
        ));
    }

    #[test]
    fn non_string_values_are_rejected() {
        let err = parse_items_str(r#"[{"resource": 5}]"#, DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
