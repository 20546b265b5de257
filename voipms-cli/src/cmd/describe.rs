use serde::Serialize;
use voipms_core::{CredentialDescriptor, NodeDescription, OPERATIONS};

use crate::commands::DescribeTarget;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct OperationRow {
    resource: &'static str,
    operation: &'static str,
    name: &'static str,
    method: &'static str,
    fields: &'static [&'static str],
}

pub fn describe_cmd(target: DescribeTarget, output: OutputArgs) -> i32 {
    match target {
        DescribeTarget::Credentials => {
            print_result(output.format, output.quiet, &CredentialDescriptor::voipms());
        }
        DescribeTarget::Node => {
            print_result(output.format, output.quiet, &NodeDescription::voipms());
        }
        DescribeTarget::Operations => {
            let rows: Vec<OperationRow> = OPERATIONS
                .iter()
                .map(|d| OperationRow {
                    resource: d.resource.as_str(),
                    operation: d.operation.as_str(),
                    name: d.display_name,
                    method: d.wire_method,
                    fields: d.extra_fields,
                })
                .collect();
            if output.format == OutputFormat::Text && !output.quiet {
                for r in &rows {
                    print!("{}/{} -> {}", r.resource, r.operation, r.method);
                    if !r.fields.is_empty() {
                        print!(" [{}]", r.fields.join(", "));
                    }
                    println!();
                }
            } else {
                print_result(output.format, output.quiet, &rows);
            }
        }
    }
    exit_codes::SUCCESS
}
