use recon_core::AppConfig;
use recon_extract::{ExtractionPipeline, ScrapeOutcome};
use recon_harvest::{domain_from_url, merge_outcome, read_harvest, HarvestOutcome};

fn scrape(json: &str) -> recon_core::ContactResult {
    let outcome: ScrapeOutcome = serde_json::from_str(json).expect("parse scrape outcome");
    ExtractionPipeline::from_config(&AppConfig::default()).extract_contacts(&outcome)
}

#[test]
fn test_scrape_then_harvest() {
    let scraped = scrape(
        r#"{"url": "https://www.acme.io/about", "about": "Contact: sales@acme.io"}"#,
    );
    let domain = domain_from_url(
        scraped
            .metadata
            .source_url
            .as_deref()
            .expect("source url recorded"),
    )
    .expect("derive domain");
    assert_eq!(domain, "acme.io");

    let dir = tempfile::tempdir().expect("create temp dir");
    let report = dir.path().join("harvest.json");
    std::fs::write(
        &report,
        r#"{"emails": ["sales@acme.io", "jobs@acme.io", "jobs@acme.io"], "hosts": ["mail.acme.io"]}"#,
    )
    .expect("write report");

    let merged = merge_outcome(scraped, &read_harvest(&report, &domain));

    assert_eq!(
        merged.emails.as_slice(),
        &["sales@acme.io".to_string(), "jobs@acme.io".to_string()]
    );
    assert_eq!(merged.metadata.additional_emails_from_harvester, Some(1));
    assert_eq!(merged.metadata.total_emails_found, 2);
    assert!(merged.counts_consistent());

    let value = serde_json::to_value(&merged).expect("serialize merged result");
    assert_eq!(value["metadata"]["theharvester_used"], true);
    assert_eq!(value["metadata"]["theharvester_domain"], "acme.io");
}

#[test]
fn test_failed_harvest_keeps_scraped_contacts() {
    let scraped = scrape(r#"{"url": "https://acme.io", "about": "ops@acme.io"}"#);
    let outcome: HarvestOutcome = serde_json::from_str(
        r#"{"error": "theHarvester not found. Please install it.", "domain": "acme.io"}"#,
    )
    .expect("parse failure marker");

    let merged = merge_outcome(scraped.clone(), &outcome);

    assert_eq!(merged.emails, scraped.emails);
    assert_eq!(
        merged.metadata.harvester_error.as_deref(),
        Some("theHarvester not found. Please install it.")
    );
    assert!(merged.counts_consistent());
}
