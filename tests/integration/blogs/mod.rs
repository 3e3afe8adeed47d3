//! Blog lifecycle integration tests

use axum::http::{Method, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use folio_blogs::BlogPost;

use crate::common::{request, MultipartForm, TestApp};

fn seeded_post(title: &str, created_at: chrono::DateTime<Utc>) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: "seeded".to_string(),
        image_url: "https://cdn.example/seeded.png".to_string(),
        created_at,
    }
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

mod test_lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_login_create_list_delete_get() {
        let app = TestApp::new();
        let token = app.login().await;

        let form = MultipartForm::new()
            .text("title", "A")
            .text("description", "B")
            .text("image_url", "http://x/y.png");
        let (status, created) = app.send_json(form.into_request(Some(&token))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "A");
        assert_eq!(created["description"], "B");
        assert_eq!(created["image_url"], "http://x/y.png");
        assert!(created["created_at"].is_string());
        let id = created["id"].as_str().unwrap().to_string();
        assert!(Uuid::parse_str(&id).is_ok());

        let (status, list) = app.send_json(request(Method::GET, "/api/blogs", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list.as_array().unwrap().contains(&created));

        let (status, fetched) = app
            .send_json(request(Method::GET, &format!("/api/blogs/{}", id), None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, deleted) = app
            .send_json(request(Method::DELETE, &format!("/api/blogs/{}", id), None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({ "deletedCount": 1 }));

        let (status, body) = app
            .send_json(request(Method::GET, &format!("/api/blogs/{}", id), None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_with_uploaded_file() {
        let app = TestApp::new();
        let token = app.login().await;

        let form = MultipartForm::new()
            .text("title", "Cover story")
            .text("description", "Has an uploaded cover")
            .file("image", "cover.webp", "image/webp", b"RIFF....WEBP");
        let (status, created) = app.send_json(form.into_request(Some(&token))).await;
        assert_eq!(status, StatusCode::CREATED);

        let upload = app.media.last_upload().unwrap();
        assert_eq!(upload.folder, "portfolio_blogs");
        assert_eq!(upload.bytes, b"RIFF....WEBP");
        assert_eq!(created["image_url"], upload.url.as_str());
        assert!(!upload.path.exists(), "staged file was not removed");
    }

    #[tokio::test]
    async fn test_image_url_wins_over_uploaded_file() {
        let app = TestApp::new();
        let token = app.login().await;

        let form = MultipartForm::new()
            .text("title", "A")
            .text("description", "B")
            .text("image_url", "https://cdn.example/pre-hosted.jpg")
            .file("image", "ignored.png", "image/png", b"png");
        let (status, created) = app.send_json(form.into_request(Some(&token))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["image_url"], "https://cdn.example/pre-hosted.jpg");
        assert!(app.media.attempted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_zero_not_error() {
        let app = TestApp::new();
        let (status, body) = app
            .send_json(request(
                Method::DELETE,
                &format!("/api/blogs/{}", Uuid::new_v4()),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "deletedCount": 0 }));
    }
}

mod test_create_validation {
    use super::*;

    #[tokio::test]
    async fn test_missing_fields_are_400_and_persist_nothing() {
        let app = TestApp::new();
        let token = app.login().await;

        let forms = vec![
            MultipartForm::new()
                .text("description", "B")
                .text("image_url", "http://x/y.png"),
            MultipartForm::new()
                .text("title", "A")
                .text("image_url", "http://x/y.png"),
            MultipartForm::new()
                .text("title", "")
                .text("description", "B")
                .text("image_url", "http://x/y.png"),
            MultipartForm::new().text("title", "A").text("description", "B"),
        ];

        for form in forms {
            let (status, body) = app.send_json(form.into_request(Some(&token))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        }
        assert!(app.repo.is_empty().await);
        assert!(app.media.attempted_paths().is_empty());
    }

    #[tokio::test]
    async fn test_relative_image_url_is_rejected() {
        let app = TestApp::new();
        let token = app.login().await;

        let form = MultipartForm::new()
            .text("title", "A")
            .text("description", "B")
            .text("image_url", "y.png");
        let (status, _) = app.send_json(form.into_request(Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_failure_is_500_and_cleans_up() {
        let app = TestApp::new();
        app.media.fail_uploads("invalid api key");
        let token = app.login().await;

        let form = MultipartForm::new()
            .text("title", "A")
            .text("description", "B")
            .file("image", "cover.png", "image/png", b"png");
        let (status, body) = app.send_json(form.into_request(Some(&token))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("invalid api key"));
        assert!(app.repo.is_empty().await);

        let attempted = app.media.attempted_paths();
        assert_eq!(attempted.len(), 1);
        assert!(!attempted[0].exists());
    }
}

mod test_lookup {
    use super::*;

    #[tokio::test]
    async fn test_malformed_id_is_400_for_get_and_delete() {
        let app = TestApp::new();

        for method in [Method::GET, Method::DELETE] {
            let (status, body) = app
                .send_json(request(method, "/api/blogs/definitely-not-an-id", None))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "INVALID_IDENTIFIER");
        }
    }

    #[tokio::test]
    async fn test_list_by_date_window() {
        let app = TestApp::new();
        let day = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        app.repo
            .seed(vec![
                seeded_post("just-before", day - Duration::seconds(1)),
                seeded_post("start", day),
                seeded_post("noon", day + Duration::hours(12)),
                seeded_post("just-after", day + Duration::days(1)),
            ])
            .await;

        let (status, body) = app
            .send_json(request(Method::GET, "/api/blogs/date/2024-03-05", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["start", "noon"]);

        let (status, body) = app
            .send_json(request(Method::GET, "/api/blogs/date/2024-03-06", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["just-after"]);
    }

    #[tokio::test]
    async fn test_list_by_date_rejects_bad_format() {
        let app = TestApp::new();
        for raw in ["05-03-2024", "2024-3-5", "today"] {
            let (status, _) = app
                .send_json(request(
                    Method::GET,
                    &format!("/api/blogs/date/{}", raw),
                    None,
                ))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} should be rejected", raw);
        }
    }

    #[tokio::test]
    async fn test_store_outage_is_generic_500() {
        let app = TestApp::new();
        app.repo.set_unavailable(true);

        for uri in [
            "/api/blogs".to_string(),
            format!("/api/blogs/{}", Uuid::new_v4()),
            "/api/blogs/date/2024-03-05".to_string(),
        ] {
            let (status, body) = app.send_json(request(Method::GET, &uri, None)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"]["message"], "Service temporarily unavailable");
        }
    }
}
