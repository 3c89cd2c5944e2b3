#![allow(dead_code)]

use pet_classifier_lib::{ClassifierConfig, PanelHandle};
use std::io::Cursor;
use wiremock::MockServer;

pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(8, 6, image::Rgb([220, 180, 140]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}

pub fn handle_for(server: &MockServer) -> PanelHandle {
    let config = ClassifierConfig::default().with_endpoint(format!("{}/api/predict/", server.uri()));
    PanelHandle::from_config(&config).unwrap()
}

/// Endpoint on a port nothing listens on.
pub fn unreachable_handle() -> PanelHandle {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ClassifierConfig::default().with_endpoint(format!("http://{}/api/predict/", addr));
    PanelHandle::from_config(&config).unwrap()
}
