mod credential;
mod item;
mod node;

pub use credential::{
    CredentialBundle, CredentialDescriptor, CredentialField, FieldType, CREDENTIAL_TYPE,
    DEFAULT_BASE_URL,
};
pub use item::{InvocationItem, OutputRecord};
pub use node::{
    DisplayOptions, NodeCredential, NodeDefaults, NodeDescription, NodeProperty, PropertyKind,
    PropertyOption,
};
