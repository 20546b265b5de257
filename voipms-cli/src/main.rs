#![forbid(unsafe_code)]

use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod logging;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "voipms", version, about = "VoIP.ms connector host")]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Balance {
            output,
            credentials,
            client,
        } => cmd::operations::balance_cmd(output, credentials, client).await,
        Command::Dids {
            output,
            credentials,
            client,
        } => cmd::operations::dids_cmd(output, credentials, client).await,
        Command::SendSms {
            source,
            destination,
            message,
            output,
            credentials,
            client,
        } => {
            cmd::operations::send_sms_cmd(
                &source,
                &destination,
                &message,
                output,
                credentials,
                client,
            )
            .await
        }
        Command::Execute {
            path,
            no_validate,
            events,
            output,
            credentials,
            client,
        } => {
            cmd::execute::execute_cmd(&path, no_validate, events, output, credentials, client)
                .await
        }
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Describe { target, output } => cmd::describe::describe_cmd(target, output),
        Command::Doctor {
            credentials,
            output,
        } => cmd::doctor::doctor_cmd(credentials, output).await,
    }
}
