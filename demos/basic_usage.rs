// Example usage of the fb_page_sync library
// This needs network access and a valid page access token in FB_ACCESS_TOKEN
// to fetch anything, but it demonstrates the API usage

use anyhow::Result;
use fb_page_sync::*;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    // Example 1: Parse a Graph API listing
    let response = r#"{"data":[{"id":"123_456","message":"Hello from the page"}],"paging":{}}"#;
    let records = parse_graph_response(response)?;
    println!("Parsed {} records", records.len());

    // Example 2: Write records to disk
    let path = std::env::temp_dir().join("fb_page_sync_demo").join("records.json");
    let count = save_records(&path, &[json!({"id": "1"})])?;
    println!("Saved {} items to {}", count, path.display());

    // Example 3: Mirror a single resource
    let token = std::env::var("FB_ACCESS_TOKEN").unwrap_or_default();
    let config = SyncConfig::new(DEFAULT_PAGE_ID, token).with_data_dir("demo_data");
    let client = GraphClient::new(config)?;
    println!(
        "Requesting {}",
        redact_token(client.request_url(Resource::Posts)?.as_str())
    );

    let report = client.sync(Resource::Posts).await?;
    if let Some(err) = &report.error {
        println!("Error fetching {}: {}", report.resource, err);
    }
    println!("Saved {} items to {}", report.count, report.path.display());

    // Example 4: Mirror everything
    for report in client.sync_all().await {
        let report = report?;
        println!("{}: {} items", report.resource, report.count);
    }

    Ok(())
}
