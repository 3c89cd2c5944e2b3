mod common;

use common::{handle_for, png_bytes, unreachable_handle};
use pet_classifier_lib::commands::panel::{
    classify_image, drop_image, get_panel_view, reset_panel, select_image,
};
use pet_classifier_lib::models::view_types::ConfidenceLevel;
use pet_classifier_lib::services::render::render_text;
use pet_classifier_lib::{PanelPhase, PetClass};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_cat(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/predict/"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_class": "cat",
            "confidence": 0.97,
            "probabilities": { "cat": 0.97, "dog": 0.03 }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_classification_renders_percentages() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);

    let view = drop_image(&handle, "tom.png".to_string(), Some("image/png".to_string()), png_bytes())
        .await
        .unwrap();
    assert_eq!(view.phase, PanelPhase::FileSelected);
    assert!(view.can_submit);
    assert!(view.preview.is_some());

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.phase, PanelPhase::Result);
    assert!(!view.loading);
    assert!(view.error.is_none());

    let result = view.result.clone().unwrap();
    assert_eq!(result.predicted_class, PetClass::Cat);
    assert_eq!(result.confidence_text, "97.0%");
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(result.probabilities[0].percent_text, "97.0%");
    assert_eq!(result.probabilities[1].percent_text, "3.0%");

    let text = render_text(&view);
    assert!(text.contains("cat"));
    assert!(text.contains("97.0%"));
    assert!(text.contains("3.0%"));
}

#[tokio::test]
async fn upload_uses_image_field() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);

    drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    classify_image(&handle).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body).to_ascii_lowercase();
    assert!(body.contains(r#"name="image""#));
    assert!(body.contains(r#"filename="tom.png""#));
    assert!(body.contains("content-type: image/png"));
}

#[tokio::test]
async fn http_error_detail_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "model unavailable" })))
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    drop_image(&handle, "rex.png".to_string(), Some("image/png".to_string()), png_bytes())
        .await
        .unwrap();
    let view = classify_image(&handle).await.unwrap();

    assert_eq!(view.phase, PanelPhase::Failed);
    assert!(view.error.as_deref().unwrap().contains("model unavailable"));
    assert!(view.result.is_none());
    assert!(!view.loading);
    assert!(view.can_submit, "selection survives an HTTP failure");
}

#[tokio::test]
async fn http_error_without_json_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    drop_image(&handle, "rex.png".to_string(), None, png_bytes()).await.unwrap();
    let view = classify_image(&handle).await.unwrap();

    assert_eq!(
        view.error.as_deref(),
        Some("Could not classify the image: HTTP error: 503 Service Unavailable")
    );
    assert!(view.result.is_none());
}

#[tokio::test]
async fn unexpected_success_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "cat" })))
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    let view = classify_image(&handle).await.unwrap();

    assert_eq!(view.phase, PanelPhase::Failed);
    assert!(view.result.is_none());
}

#[tokio::test]
async fn network_failure_shows_generic_error() {
    let handle = unreachable_handle();

    drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    let view = classify_image(&handle).await.unwrap();

    assert_eq!(view.phase, PanelPhase::Failed);
    assert_eq!(
        view.error.as_deref(),
        Some("Could not classify the image: could not reach the classification service")
    );
    assert!(view.result.is_none());
    assert!(!view.loading);
}

#[tokio::test]
async fn submit_without_file_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.phase, PanelPhase::Failed);
    assert_eq!(view.error.as_deref(), Some("Please select an image first."));
    assert!(!view.can_submit);
}

#[tokio::test]
async fn non_image_drop_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    let view = drop_image(
        &handle,
        "report.pdf".to_string(),
        Some("application/pdf".to_string()),
        b"%PDF-1.4".to_vec(),
    )
    .await
    .unwrap();
    assert_eq!(view.error.as_deref(), Some("Please select only image files."));
    assert!(!view.can_submit);

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.error.as_deref(), Some("Please select an image first."));
}

#[tokio::test]
async fn picked_files_go_through_the_same_checks() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);

    let mut text = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    text.write_all(b"not an image").unwrap();
    let view = select_image(&handle, text.path()).await.unwrap();
    assert_eq!(view.error.as_deref(), Some("Please select only image files."));
    assert!(!view.can_submit);

    let mut photo = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    photo.write_all(&png_bytes()).unwrap();
    let view = select_image(&handle, photo.path()).await.unwrap();
    assert_eq!(view.phase, PanelPhase::FileSelected);
    assert!(view.error.is_none(), "a new selection clears the previous error");
    assert!(view.can_submit);

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.phase, PanelPhase::Result);
}

#[tokio::test]
async fn reset_after_result_and_failure_restores_initial_view() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);
    let initial = get_panel_view(&handle).await.unwrap();
    assert!(initial.show_empty_hint);

    drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    classify_image(&handle).await.unwrap();
    let view = reset_panel(&handle).await.unwrap();
    assert_eq!(view, initial);

    let failing = unreachable_handle();
    drop_image(&failing, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    classify_image(&failing).await.unwrap();
    let view = reset_panel(&failing).await.unwrap();
    assert_eq!(view, initial);
}

#[tokio::test]
async fn reset_during_request_discards_the_late_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_json(json!({
                    "predicted_class": "dog",
                    "confidence": 0.9,
                    "probabilities": { "cat": 0.1, "dog": 0.9 }
                })),
        )
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    drop_image(&handle, "rex.png".to_string(), None, png_bytes()).await.unwrap();

    let in_flight = {
        let handle = handle.clone();
        tokio::spawn(async move { classify_image(&handle).await })
    };

    // Wait until the panel reports the request as outstanding.
    for _ in 0..100 {
        if get_panel_view(&handle).await.unwrap().loading {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(get_panel_view(&handle).await.unwrap().loading);

    reset_panel(&handle).await.unwrap();
    let view = in_flight.await.unwrap().unwrap();

    assert_eq!(view.phase, PanelPhase::Idle);
    assert!(view.result.is_none());
}

#[tokio::test]
async fn reselect_during_request_discards_the_late_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_json(json!({
                    "predicted_class": "dog",
                    "confidence": 0.9,
                    "probabilities": { "cat": 0.1, "dog": 0.9 }
                })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let handle = handle_for(&server);

    drop_image(&handle, "rex.png".to_string(), None, png_bytes()).await.unwrap();

    let in_flight = {
        let handle = handle.clone();
        tokio::spawn(async move { classify_image(&handle).await })
    };

    for _ in 0..100 {
        if get_panel_view(&handle).await.unwrap().loading {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(get_panel_view(&handle).await.unwrap().loading);

    let view = drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    assert_eq!(view.phase, PanelPhase::FileSelected);
    assert!(!view.loading);

    let view = in_flight.await.unwrap().unwrap();
    assert_eq!(view.phase, PanelPhase::FileSelected);
    assert_eq!(view.file_name.as_deref(), Some("tom.png"));
    assert!(view.result.is_none());
    assert!(view.can_submit);
}

#[tokio::test]
async fn svg_drop_is_previewed_and_classified() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);

    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="tan"/></svg>"#;
    let view = drop_image(
        &handle,
        "cat.svg".to_string(),
        Some("image/svg+xml".to_string()),
        svg.to_vec(),
    )
    .await
    .unwrap();

    assert_eq!(view.phase, PanelPhase::FileSelected);
    assert!(view.error.is_none());
    assert!(view.can_submit);
    let preview = view.preview.unwrap();
    assert!(preview.data_url.starts_with("data:image/svg+xml;base64,"));

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.phase, PanelPhase::Result);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_image_drop_keeps_the_previous_photo() {
    let server = MockServer::start().await;
    mount_cat(&server).await;
    let handle = handle_for(&server);

    drop_image(&handle, "tom.png".to_string(), None, png_bytes()).await.unwrap();
    let view = drop_image(
        &handle,
        "report.pdf".to_string(),
        Some("application/pdf".to_string()),
        b"%PDF-1.4".to_vec(),
    )
    .await
    .unwrap();

    assert_eq!(view.error.as_deref(), Some("Please select only image files."));
    assert_eq!(view.file_name.as_deref(), Some("tom.png"));

    let view = classify_image(&handle).await.unwrap();
    assert_eq!(view.phase, PanelPhase::Result);
    let requests = server.received_requests().await.unwrap();
    assert!(String::from_utf8_lossy(&requests[0].body).contains(r#"filename="tom.png""#));
}
