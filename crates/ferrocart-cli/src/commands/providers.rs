use std::process::ExitCode;

use ferrocart_commands::Platform;
use ferrocart_core::{ProviderRegistry, RecordTable};
use serde_json::Value;

use crate::error::CliError;
use crate::output::format_table_clipped;

pub fn run(platform: &Platform) -> Result<ExitCode, CliError> {
    let providers = platform.runner().registry();
    if providers.is_empty() {
        println!("No providers registered.");
    } else {
        let table = provider_table(providers, |name| std::env::var(name).ok());
        print!("{}", format_table_clipped(&table, usize::MAX, usize::MAX));
    }

    for warning in platform.discovery().warnings() {
        eprintln!("warning: {warning}");
    }
    Ok(ExitCode::SUCCESS)
}

fn provider_table<F>(providers: &ProviderRegistry, lookup: F) -> RecordTable
where
    F: Fn(&str) -> Option<String>,
{
    RecordTable {
        columns: ["name", "description", "models", "missing_credentials"]
            .map(String::from)
            .to_vec(),
        rows: providers
            .providers()
            .map(|provider| {
                vec![
                    Value::from(provider.name()),
                    Value::from(provider.description()),
                    Value::from(provider.models().join(", ")),
                    Value::from(provider.missing_credentials(&lookup).join(",")),
                ]
            })
            .collect(),
    }
}
