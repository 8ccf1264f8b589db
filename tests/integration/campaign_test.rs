//! Integration tests for campaign build and read routes.

mod helpers;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::StatusCode;
use serde_json::{Value, json};

use copydeck_core::traits::{DriveStore, NewFile, NewFolder};

use helpers::{ROOT, TestApp};

fn b64(text: &str) -> String {
    STANDARD.encode(text)
}

fn launch_body() -> Value {
    json!({
        "challengeName": "Launch",
        "files": [
            {"name": "brief.txt", "type": "text/plain", "size": 5, "content": b64("brief")},
        ],
        "links": [],
        "channels": [{"name": "Email"}, {"name": "Website", "description": "Landing pages"}],
        "touchpoints": [
            {"id": 6, "name": "Last Chance", "channel": "Email", "purpose": "Final push"},
            {"id": 1, "name": "Teaser", "channel": "Email", "purpose": "Build anticipation"},
            {"id": 4, "name": "Start Orders", "channel": "Email", "purpose": "Open orders"},
        ]
    })
}

async fn create_launch(app: &TestApp) -> Value {
    let response = app.post("/api/create-campaign", launch_body()).await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
    response.body
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["driveProvider"], "memory");
}

#[tokio::test]
async fn test_create_campaign_builds_tree() {
    let app = TestApp::new();
    let body = create_launch(&app).await;

    assert_eq!(body["success"], true);
    let campaign = &body["campaign"];
    assert_eq!(campaign["challengeName"], "Launch");
    assert_eq!(campaign["dataFolder"]["name"], "Data");
    assert_eq!(campaign["totalFolders"], 2 + 2 + 3);
    assert_eq!(campaign["totalFiles"], 1);
    assert_eq!(
        body["message"],
        "Campaign \"Launch\" created successfully with 2 channels and 1 uploaded files"
    );

    let ids: Vec<i64> = campaign["channels"][0]["touchpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 4, 6]);
    assert!(campaign["channels"][1]["touchpoints"].as_array().unwrap().is_empty());

    let campaign_folder = &app.store.items_named("Launch").await[0];
    assert_eq!(campaign_folder.parents, vec![ROOT.to_string()]);
    assert_eq!(
        campaign_folder.description.as_deref(),
        Some("Campaign folder for: Launch")
    );
}

#[tokio::test]
async fn test_create_campaign_rejects_missing_channels() {
    let app = TestApp::new();
    let mut body = launch_body();
    body["channels"] = json!([]);

    let response = app.post("/api/create-campaign", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "At least one channel must be selected");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_campaign_rejects_blank_name() {
    let app = TestApp::new();
    let mut body = launch_body();
    body["challengeName"] = json!("   ");

    let response = app.post("/api/create-campaign", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "Challenge name is required");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_campaign_tolerates_one_failed_upload() {
    let app = TestApp::new();
    app.store.fail_uploads_named("two.txt").await;

    let mut body = launch_body();
    body["files"] = json!([
        {"name": "one.txt", "type": "text/plain", "content": b64("1")},
        {"name": "two.txt", "type": "text/plain", "content": b64("2")},
        {"name": "three.txt", "type": "text/plain", "content": b64("3")},
    ]);

    let response = app.post("/api/create-campaign", body).await;
    assert_eq!(response.status, StatusCode::OK);
    let campaign = &response.body["campaign"];
    assert_eq!(campaign["totalFiles"], 2);
    assert_eq!(campaign["uploadedFiles"].as_array().unwrap().len(), 2);

    let failed: Vec<&Value> = campaign["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|o| o["outcome"]["status"] == "failed")
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["item"], "two.txt");
}

#[tokio::test]
async fn test_create_campaign_copies_blobs_and_exports_links() {
    let app = TestApp::new();
    app.blobs
        .put("https://blobs.test/video.mp4", Bytes::from_static(b"video"))
        .await;
    app.store
        .seed_document(
            "slides1234567",
            "Pitch",
            "application/vnd.google-apps.presentation",
            "elsewhere",
            Bytes::from_static(b"%PDF"),
        )
        .await;

    let mut body = launch_body();
    body["files"] = json!([]);
    body["blobFiles"] = json!([{"url": "https://blobs.test/video.mp4", "name": "video.mp4", "type": "video/mp4"}]);
    body["links"] = json!(["https://docs.google.com/presentation/d/slides1234567/edit"]);

    let response = app.post("/api/create-campaign", body).await;
    assert_eq!(response.status, StatusCode::OK);
    let uploaded = response.body["campaign"]["uploadedFiles"].as_array().unwrap().clone();
    assert_eq!(uploaded.len(), 2);
    assert_eq!(uploaded[0]["type"], "blob");
    assert_eq!(uploaded[1]["type"], "exported-pdf");
    assert_eq!(uploaded[1]["name"], "Copy - Google Slides - slides12.pdf");
    assert_eq!(uploaded[1]["originalType"], "Google Slides");
    assert!(!app.blobs.contains("https://blobs.test/video.mp4").await);
}

#[tokio::test]
async fn test_blobs_stay_staged_when_cleanup_is_disabled() {
    let mut config = TestApp::config();
    config.blob.delete_after_transfer = false;
    let app = TestApp::with_config(config);
    app.blobs
        .put("https://blobs.test/deck.pdf", Bytes::from_static(b"deck"))
        .await;

    let mut body = launch_body();
    body["files"] = json!([]);
    body["blobFiles"] = json!([{"url": "https://blobs.test/deck.pdf", "name": "deck.pdf", "type": "application/pdf"}]);

    let response = app.post("/api/create-campaign", body).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["campaign"]["totalFiles"], 1);
    assert!(app.blobs.contains("https://blobs.test/deck.pdf").await);
}

#[tokio::test]
async fn test_list_campaigns_skips_global() {
    let app = TestApp::new();
    create_launch(&app).await;
    app.store
        .create_folder(NewFolder::new("Global", ROOT))
        .await
        .unwrap();

    let response = app.get("/api/campaigns").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCampaigns"], 1);
    assert_eq!(response.body["campaigns"][0]["name"], "Launch");
    assert_eq!(response.body["campaigns"][0]["channels"], json!(["Email", "Website"]));
}

#[tokio::test]
async fn test_workspace_query_overrides_default() {
    let app = TestApp::new();
    create_launch(&app).await;

    let response = app.get("/api/campaigns?workspaceId=other-root").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalCampaigns"], 0);
}

#[tokio::test]
async fn test_missing_workspace_is_rejected() {
    let app = TestApp::with_workspace("");
    let response = app.get("/api/campaigns").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "No workspace ID specified");
}

#[tokio::test]
async fn test_get_campaign_structure() {
    let app = TestApp::new();
    create_launch(&app).await;

    let response = app.get("/api/campaigns/Launch").await;
    assert_eq!(response.status, StatusCode::OK);
    let campaign = &response.body["campaign"];
    assert_eq!(campaign["dataFolder"]["name"], "Data");
    assert_eq!(campaign["channelCount"], 2);
    assert_eq!(campaign["totalTouchpoints"], 3);
    let channels: Vec<&str> = campaign["channels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(channels, vec!["Email", "Website"]);
}

#[tokio::test]
async fn test_get_campaign_not_found() {
    let app = TestApp::new();
    let response = app.get("/api/campaigns/Nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_details(), "Campaign \"Nope\" not found");
}

#[tokio::test]
async fn test_blank_names_are_rejected_without_reading_drive() {
    let app = TestApp::new();
    app.store.fail_listing_of(ROOT).await;

    let response = app.get("/api/campaigns/%20%20").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "Challenge name is required");

    let response = app.get("/api/campaigns/Launch/%20/touchpoints").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "Channel name is required");
}

#[tokio::test]
async fn test_duplicate_campaign_names_resolve_to_first() {
    let app = TestApp::new();
    let first = create_launch(&app).await;
    create_launch(&app).await;

    let response = app.get("/api/campaigns/Launch").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["campaign"]["id"],
        first["campaign"]["challengeFolder"]["id"]
    );
}

#[tokio::test]
async fn test_touchpoint_content_classifies_text_files() {
    let app = TestApp::new();
    let created = create_launch(&app).await;
    let teaser_id = created["campaign"]["channels"][0]["touchpoints"][0]["folderId"]
        .as_str()
        .unwrap()
        .to_string();

    app.store
        .create_file(NewFile::new(
            "notes.md",
            &teaser_id,
            "application/octet-stream",
            Bytes::from_static(b"Teaser headline"),
        ))
        .await
        .unwrap();
    app.store
        .create_file(NewFile::new(
            "image.png",
            &teaser_id,
            "image/png",
            Bytes::from_static(b"\x89PNG"),
        ))
        .await
        .unwrap();

    let response = app.get("/api/campaigns/Launch/Email/touchpoints").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = &response.body;
    assert_eq!(body["totalTouchpoints"], 3);
    assert_eq!(body["totalFiles"], 2);
    assert_eq!(body["totalTextFiles"], 1);

    let teaser = body["touchpoints"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Teaser")
        .unwrap();
    let png = teaser["files"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "image.png")
        .unwrap();
    assert_eq!(png["isTextFile"], false);
    assert_eq!(teaser["textFiles"][0]["name"], "notes.md");
    assert_eq!(teaser["textFiles"][0]["content"], "Teaser headline");
}

#[tokio::test]
async fn test_channel_without_touchpoints_has_zero_totals() {
    let app = TestApp::new();
    create_launch(&app).await;

    let response = app.get("/api/campaigns/Launch/Website/touchpoints").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["touchpoints"], json!([]));
    assert_eq!(response.body["totalTouchpoints"], 0);
    assert_eq!(response.body["totalFiles"], 0);
    assert_eq!(response.body["totalTextFiles"], 0);
}

#[tokio::test]
async fn test_duplicate_channel_names_conflict() {
    let app = TestApp::new();
    let created = create_launch(&app).await;
    let campaign_id = created["campaign"]["challengeFolder"]["id"].as_str().unwrap();
    app.store
        .create_folder(NewFolder::new("Email", campaign_id))
        .await
        .unwrap();

    let response = app.get("/api/campaigns/Launch/Email/touchpoints").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.error_details().starts_with("Multiple channels found with name \"Email\""));
}

#[tokio::test]
async fn test_data_folder_is_not_a_channel() {
    let app = TestApp::new();
    create_launch(&app).await;

    let response = app.get("/api/campaigns/Launch/Data/touchpoints").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_file() {
    let app = TestApp::new();
    let item = app
        .store
        .create_file(NewFile::new(
            "brief.md",
            ROOT,
            "text/markdown",
            Bytes::from_static(b"Launch Monday"),
        ))
        .await
        .unwrap();

    let response = app
        .post("/api/analyze-file", json!({"fileId": item.id, "prompt": "Summarize"}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["fileName"], "brief.md");
    assert_eq!(response.body["fileType"], "text/markdown");
    assert_eq!(response.body["prompt"], "Summarize");
    assert!(response.body["analysis"].as_str().unwrap().starts_with("Analyzed "));
}

#[tokio::test]
async fn test_analyze_file_requires_both_fields() {
    let app = TestApp::new();
    let response = app.post("/api/analyze-file", json!({"fileId": "x"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "Both fileId and prompt are required");
}

#[tokio::test]
async fn test_touchpoint_catalog() {
    let app = TestApp::new();
    let response = app.get("/api/touchpoints/catalog").await;
    assert_eq!(response.status, StatusCode::OK);
    let channels = response.body["channels"].as_array().unwrap();
    assert_eq!(channels.len(), 3);
    assert_eq!(channels[0]["options"][0]["name"], "Teaser");
}
