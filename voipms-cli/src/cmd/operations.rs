use voipms_core::InvocationItem;

use crate::{ClientArgs, CredentialArgs, OutputArgs};

use super::run::run_items;
use super::validate::preflight;

pub async fn balance_cmd(output: OutputArgs, credentials: CredentialArgs, client: ClientArgs) -> i32 {
    let item = InvocationItem::new("account", "getBalance");
    run_items(vec![item], false, &output, &credentials, &client).await
}

pub async fn dids_cmd(output: OutputArgs, credentials: CredentialArgs, client: ClientArgs) -> i32 {
    let item = InvocationItem::new("did", "listDIDs");
    run_items(vec![item], false, &output, &credentials, &client).await
}

pub async fn send_sms_cmd(
    source: &str,
    destination: &str,
    message: &str,
    output: OutputArgs,
    credentials: CredentialArgs,
    client: ClientArgs,
) -> i32 {
    let item = InvocationItem::send_sms(source, destination, message);
    if let Err(code) = preflight(std::slice::from_ref(&item), &output) {
        return code;
    }
    run_items(vec![item], false, &output, &credentials, &client).await
}
