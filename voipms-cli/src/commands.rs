use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::args::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescribeTarget {
    Credentials,
    Node,
    Operations,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the account balance.
    Balance {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// List the DIDs on the account.
    Dids {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Send one SMS.
    SendSms {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        message: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Run every item in a JSON or YAML file, in order.
    Execute {
        path: PathBuf,
        /// Run even when the items fail the pre-flight check.
        #[arg(long)]
        no_validate: bool,
        /// Also write execution events as JSON lines on stderr.
        #[arg(long)]
        events: bool,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Check an items file against the node schema without calling the API.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the credential schema, node schema or operation table.
    Describe {
        #[arg(value_enum, default_value_t = DescribeTarget::Node)]
        target: DescribeTarget,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check that credentials resolve and look usable.
    Doctor {
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
