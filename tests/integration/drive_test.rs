//! Integration tests for path-addressed Drive routes.

mod helpers;

use bytes::Bytes;
use http::StatusCode;
use serde_json::json;

use copydeck_core::traits::{DriveStore, NewFile};

use helpers::{ROOT, TestApp};

#[tokio::test]
async fn test_ensure_then_resolve_agree() {
    let app = TestApp::new();

    let ensured = app.post("/api/drive/ensure", json!({"path": "/Reports/2024/Q1"})).await;
    assert_eq!(ensured.status, StatusCode::OK, "body: {}", ensured.body);
    assert_eq!(ensured.body["path"], "/Reports/2024/Q1");
    assert_eq!(ensured.body["created"], true);
    assert_eq!(ensured.body["createdFolders"], json!(["Reports", "2024", "Q1"]));

    let resolved = app.post("/api/drive/resolve", json!({"path": "Reports/2024/Q1/"})).await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body["exists"], true);
    assert_eq!(resolved.body["folderId"], ensured.body["folderId"]);

    let again = app.post("/api/drive/ensure", json!({"path": "/Reports/2024/Q1"})).await;
    assert_eq!(again.body["created"], false);
    assert_eq!(again.body["folderId"], ensured.body["folderId"]);
    assert_eq!(app.store.len().await, 3);
}

#[tokio::test]
async fn test_empty_path_is_root() {
    let app = TestApp::new();
    for path in [json!(null), json!(""), json!("/"), json!("//")] {
        let response = app.post("/api/drive/resolve", json!({"path": path})).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["folderId"], ROOT);
        assert_eq!(response.body["path"], "/");
        assert_eq!(response.body["exists"], true);
    }
}

#[tokio::test]
async fn test_partial_path_reports_first_missing_segment() {
    let app = TestApp::new();
    app.post("/api/drive/ensure", json!({"path": "/A"})).await;

    let response = app.post("/api/drive/resolve", json!({"path": "/A/B/C"})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["exists"], false);
    assert_eq!(response.body["path"], "/A/B");
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = TestApp::new();
    app.post("/api/drive/ensure", json!({"path": "/Projects"})).await;

    let created = app
        .post(
            "/api/drive/folder",
            json!({"name": "Alpha", "parentPath": "/Projects"}),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "body: {}", created.body);
    assert_eq!(created.body["folder"]["fullPath"], "/Projects/Alpha");
    assert_eq!(created.body["folder"]["parentFolderPath"], "/Projects");

    let listed = app.get("/api/drive/folders?path=/Projects").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["count"], 1);
    assert_eq!(listed.body["folders"][0]["name"], "Alpha");
    assert_eq!(
        listed.body["folders"][0]["description"],
        "Folder created via CopyDeck"
    );
}

#[tokio::test]
async fn test_overlong_folder_name_is_rejected() {
    let app = TestApp::new();
    let response = app
        .post("/api/drive/folder", json!({"name": "a".repeat(300)}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_details(),
        "Folder name must be at most 255 characters"
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_folder_under_missing_parent() {
    let app = TestApp::new();
    let response = app
        .post("/api/drive/folder", json!({"name": "Alpha", "parentPath": "/Nope"}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.error_details(),
        "Parent folder path '/Nope' does not exist"
    );
}

#[tokio::test]
async fn test_create_file_with_ensure_path() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/drive/file",
            json!({
                "name": "notes.md",
                "content": "# Notes",
                "mimeType": "text/markdown",
                "folderPath": "/Docs/Drafts",
                "ensurePath": true
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
    let file = &response.body["file"];
    assert_eq!(file["folderPath"], "/Docs/Drafts");
    assert_eq!(file["createdFolders"], json!(["Docs", "Drafts"]));

    let contents = app.get("/api/drive/contents?path=/Docs/Drafts").await;
    assert_eq!(contents.status, StatusCode::OK);
    assert_eq!(contents.body["contents"][0]["name"], "notes.md");
    assert_eq!(contents.body["contents"][0]["description"], "File created via CopyDeck");
}

#[tokio::test]
async fn test_create_file_in_missing_path() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/drive/file",
            json!({"name": "notes.md", "content": "x", "folderPath": "/Docs"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.error_details(),
        "Target folder path '/Docs' does not exist"
    );
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_list_root_files_excludes_folders() {
    let app = TestApp::new();
    app.post("/api/drive/ensure", json!({"path": "/Folder"})).await;
    app.post("/api/drive/file", json!({"name": "root.txt", "content": "r"}))
        .await;

    let response = app.get("/api/drive/files").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["files"][0]["name"], "root.txt");
}

#[tokio::test]
async fn test_delete_by_id() {
    let app = TestApp::new();
    let created = app
        .post("/api/drive/file", json!({"name": "old.txt", "content": "x"}))
        .await;
    let id = created.body["file"]["id"].as_str().unwrap().to_string();

    let response = app.post("/api/drive/delete", json!({"fileId": id})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["deletedFile"]["name"], "old.txt");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_delete_by_ambiguous_name_conflicts() {
    let app = TestApp::new();
    for _ in 0..2 {
        app.store
            .create_file(NewFile::new("dup.txt", ROOT, "text/plain", Bytes::from_static(b"d")))
            .await
            .unwrap();
    }

    let response = app.post("/api/drive/delete", json!({"fileName": "dup.txt"})).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.error_details(),
        "Multiple files found with name 'dup.txt' in root. Please use file ID for deletion."
    );
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn test_delete_by_name_in_folder() {
    let app = TestApp::new();
    app.post(
        "/api/drive/file",
        json!({"name": "a.txt", "content": "a", "folderPath": "/X", "ensurePath": true}),
    )
    .await;

    let missing = app
        .post("/api/drive/delete", json!({"fileName": "b.txt", "folderPath": "/X"}))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_details(), "File 'b.txt' not found in /X");

    let response = app
        .post("/api/drive/delete", json!({"fileName": "a.txt", "folderPath": "/X"}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["deletedFile"]["path"], "/X");
}

#[tokio::test]
async fn test_delete_requires_a_target() {
    let app = TestApp::new();
    let response = app.post("/api/drive/delete", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_details(), "Either fileId or fileName is required");
}

#[tokio::test]
async fn test_delete_without_permission() {
    let app = TestApp::new();
    let item = app
        .store
        .create_file(NewFile::new("locked.txt", ROOT, "text/plain", Bytes::from_static(b"l")))
        .await
        .unwrap();
    app.store.set_can_delete(&item.id, false).await;

    let response = app.post("/api/drive/delete", json!({"fileId": item.id})).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error_details(),
        "Permission denied: cannot delete 'locked.txt'"
    );
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let response = app
        .raw("POST", "/api/drive/ensure", "{not json".to_string())
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}
