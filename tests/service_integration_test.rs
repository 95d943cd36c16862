use panoptic_caption::client::CaptionClient;
use panoptic_caption_common::{ImageFile, ServiceConfig, BACKEND_URL_ENV};

/// 1x1 の透過PNG
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[tokio::test]
async fn caption_service_integration() {
    let base_url = match std::env::var(BACKEND_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("{} not set; skipping integration test", BACKEND_URL_ENV);
            return;
        }
    };

    let client = CaptionClient::new(ServiceConfig::with_base_url(base_url).expect("invalid base url"));

    let health = client.health().await.expect("health check failed");
    assert!(health.is_ok());

    let image = ImageFile {
        file_name: "integration-test.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: TINY_PNG.to_vec(),
    };
    let result = client.caption(&image, 3).await.expect("caption request failed");

    assert!(result.labels_topk.len() <= 3);
    assert!(result.baseline_caption.is_some());
}
