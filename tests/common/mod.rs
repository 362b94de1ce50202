//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds a fresh [`AppContext`] with its own
//! image store and thumbnail cache. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing, and the
//! fixture helpers synthesize real JPEG/PNG payloads in memory.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use mg_core::config::Config;
use mg_server::context::AppContext;
use mg_server::router::build_router;

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            ctx: AppContext::new(config),
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// POST a single file to `/upload` under the `image` field.
pub async fn upload(
    addr: SocketAddr,
    filename: &str,
    mime_type: &str,
    data: Vec<u8>,
) -> reqwest::Response {
    upload_field(addr, "image", filename, mime_type, data).await
}

/// POST a single file to `/upload` under an arbitrary field name.
pub async fn upload_field(
    addr: SocketAddr,
    field: &str,
    filename: &str,
    mime_type: &str,
    data: Vec<u8>,
) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(data)
        .file_name(filename.to_string())
        .mime_str(mime_type)
        .expect("valid mime type");
    let form = reqwest::multipart::Form::new().part(field.to_string(), part);

    reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed")
}

/// Deterministic high-entropy image so encoders cannot shrink it much.
pub fn noisy_image(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x2545_F491;
    RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        };
        image::Rgb([next(), next(), next()])
    })
}

/// Smooth gradient image.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(img)
        .expect("encode jpeg");
    buf
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// Decode returned thumbnail bytes and report their dimensions.
pub fn jpeg_dimensions(data: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
        .expect("thumbnail is a JPEG");
    (img.width(), img.height())
}
