//! Dome9 API CLI binary.
//!
//! A command-line interface for interacting with the Dome9 API.

use clap::Parser;
use dome9::cli::{AuthArgs, AzureCommand, Cli, Command, HistoryCommand, TrustCommand};
use dome9::{
    AccountTrust, AccountTrustsApi, AssessmentHistoriesApi, AzureAccountNameMode,
    AzureAccountOperationMode, AzureCloudAccount, AzureCloudAccountsApi, Client, ClientOption,
    Credentials, Dome9Error, MissingPermission, PrettyPrint,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = match build_client(&cli.auth) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set DOME9_ACCESS_ID and DOME9_SECRET_KEY environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Dome9Error::Status { body, .. } = &e {
                if !body.is_empty() {
                    eprintln!("{body}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn build_client(auth: &AuthArgs) -> dome9::Result<Client> {
    let credentials = match (&auth.access_id, &auth.secret_key) {
        (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
        _ => None,
    };

    let mut options = vec![ClientOption::UserAgent(format!(
        "dome9-cli/{}",
        env!("CARGO_PKG_VERSION")
    ))];
    if let Some(ref url) = auth.base_url {
        options.push(ClientOption::BaseUrl(url.clone()));
    }

    Client::with_options(None, credentials, options)
}

async fn run(client: &Client, command: Command, json: bool) -> dome9::Result<()> {
    match command {
        Command::Trusts(cmd) => handle_trusts(client, cmd, json).await,
        Command::Azure(cmd) => handle_azure(client, cmd, json).await,
        Command::History(cmd) => handle_history(client, cmd, json).await,
    }
}

async fn handle_trusts(client: &Client, cmd: TrustCommand, json: bool) -> dome9::Result<()> {
    let trusts = client.account_trusts();
    match cmd {
        TrustCommand::Roles => {
            let roles = trusts.get_assumable_roles().await?.into_inner();
            if json {
                println!("{}", serde_json::to_string_pretty(&roles).map_err(Dome9Error::Encoding)?);
            } else {
                let rows: Vec<RoleRow> = roles
                    .iter()
                    .map(|r| RoleRow {
                        account: r.account_name.clone(),
                        account_id: r.account_id,
                        roles: r.roles.join(", "),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        TrustCommand::List { direction } => {
            let items = trusts.list(direction).await?.into_inner();
            output_list(&items, json, |t| TrustRow::from(t))?;
        }
        TrustCommand::Delete { id } => {
            trusts.delete(&id).await?;
            println!("Deleted trust {id}");
        }
    }
    Ok(())
}

async fn handle_azure(client: &Client, cmd: AzureCommand, json: bool) -> dome9::Result<()> {
    let azure = client.azure_cloud_accounts();
    match cmd {
        AzureCommand::List => {
            let accounts = azure.list().await?.into_inner();
            output_list(&accounts, json, |a| AzureRow::from(a))?;
        }
        AzureCommand::Delete { id } => {
            azure.delete(&id).await?;
            println!("Deleted Azure account {id}");
        }
        AzureCommand::MissingPermissions {
            id,
            entity_type: Some(entity_type),
            sub_type: Some(sub_type),
        } => {
            let perms = azure
                .get_missing_permissions_by_entity_type(&id, &entity_type, &sub_type)
                .await?
                .into_inner();
            output_list(&perms, json, |p| PermissionRow::from(p))?;
        }
        AzureCommand::MissingPermissions { id, .. } => {
            let perms = azure.get_missing_permissions(&id).await?.into_inner();
            output_single(&perms, json)?;
        }
        AzureCommand::ResetPermissions { id } => {
            azure.reset_missing_permissions(&id).await?;
            println!("Missing permissions reset for {id}");
        }
        AzureCommand::Rename { id, name } => {
            let account = azure
                .update_account_name(&id, &AzureAccountNameMode { name })
                .await?
                .into_inner();
            output_single(&account, json)?;
        }
        AzureCommand::Mode { id, mode } => {
            let body = AzureAccountOperationMode {
                operation_mode: mode,
            };
            let account = azure.update_operation_mode(&id, &body).await?.into_inner();
            output_single(&account, json)?;
        }
    }
    Ok(())
}

async fn handle_history(client: &Client, cmd: HistoryCommand, json: bool) -> dome9::Result<()> {
    let history = client.assessment_histories();
    match cmd {
        HistoryCommand::Get { id } => {
            let result = history.get_assessment_result(id).await?.into_inner();
            output_single(&result, json)?;
        }
        HistoryCommand::Delete { id } => {
            history.delete_assessment_result(id).await?;
            println!("Deleted assessment result {id}");
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> dome9::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item).map_err(Dome9Error::Encoding)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> dome9::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items).map_err(Dome9Error::Encoding)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct RoleRow {
    account: String,
    account_id: i64,
    roles: String,
}

#[derive(Tabled)]
struct TrustRow {
    id: String,
    source: String,
    target: String,
    roles: String,
}

impl From<&AccountTrust> for TrustRow {
    fn from(t: &AccountTrust) -> Self {
        Self {
            id: t.id.clone(),
            source: t.source_account_name.clone(),
            target: t.target_account_name.clone(),
            roles: t
                .restrictions
                .as_ref()
                .map(|r| r.roles.join(", "))
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct AzureRow {
    id: String,
    name: String,
    subscription: String,
    mode: String,
}

impl From<&AzureCloudAccount> for AzureRow {
    fn from(a: &AzureCloudAccount) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            subscription: a.subscription_id.clone(),
            mode: a.operation_mode.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PermissionRow {
    srl: String,
    fails: i32,
    #[tabled(rename = "last error")]
    last_error: String,
    permissions: String,
}

impl From<&MissingPermission> for PermissionRow {
    fn from(p: &MissingPermission) -> Self {
        Self {
            srl: p.srl.clone(),
            fails: p.consecutive_fails,
            last_error: p.last_fail_error_code.clone().unwrap_or_default(),
            permissions: p
                .retry_metadata
                .as_ref()
                .map(|m| m.permissions.join(", "))
                .unwrap_or_default(),
        }
    }
}
