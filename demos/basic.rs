//! Basic example demonstrating the Dome9 API client.
//!
//! Run with:
//! ```
//! DOME9_ACCESS_ID=your-id DOME9_SECRET_KEY=your-secret cargo run --example basic
//! ```

use dome9::{
    AccountTrustsApi, AzureCloudAccountsApi, Client, PrettyPrint, TrustDirection,
};

#[tokio::main]
async fn main() -> dome9::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Dome9 client...");
    let client = Client::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Listing Azure Accounts ---");
    let azure = client.azure_cloud_accounts();
    let accounts = azure.list().await?.into_inner();
    println!("Found {} accounts", accounts.len());

    for account in &accounts {
        println!("  - {} ({})", account.name, account.id);
    }

    // Permission diagnostics for the first account
    if let Some(first) = accounts.first() {
        println!("\n--- Missing Permissions ---");
        let perms = azure.get_missing_permissions(&first.id).await?.into_inner();
        println!("{}", perms.pretty_print());
    }

    println!("\n--- Listing Account Trusts ---");
    let trusts = client.account_trusts();
    for direction in [TrustDirection::MyAccountIsTarget, TrustDirection::MyAccountIsSource] {
        let items = trusts.list(direction).await?.into_inner();
        println!("{direction}: {} trusts", items.len());
        for trust in items.iter().take(5) {
            println!(
                "  - {} -> {}",
                trust.source_account_name, trust.target_account_name
            );
        }
    }

    let roles = trusts.get_assumable_roles().await?.into_inner();
    println!("\nAssumable roles in {} accounts", roles.len());

    println!("\nDone!");
    Ok(())
}
