//! Document fixtures and a mock file host

use placement_archiver::DocumentDescriptor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Smallest body that looks like a PDF to a human reading a test failure
pub fn pdf_bytes(tag: &str) -> Vec<u8> {
    format!("%PDF-1.7\n% {tag}\n%%EOF\n").into_bytes()
}

/// Start a mock file host serving each `(path, body)` with HTTP 200
///
/// Any other path answers 404.
pub async fn file_host(files: &[(&str, Vec<u8>)]) -> MockServer {
    let server = MockServer::start().await;

    for (file_path, body) in files {
        Mock::given(method("GET"))
            .and(path(*file_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "application/pdf")
                    .set_body_bytes(body.clone()),
            )
            .mount(&server)
            .await;
    }

    server
}

/// Descriptor for a file on `server`
pub fn descriptor_on(
    server: &MockServer,
    file_path: &str,
    student_name: &str,
    roll_no: &str,
    document_type: Option<&str>,
) -> DocumentDescriptor {
    let descriptor = DocumentDescriptor::new(
        format!("{}{}", server.uri(), file_path),
        student_name,
        roll_no,
    );
    match document_type {
        Some(kind) => descriptor.with_category(kind),
        None => descriptor,
    }
}

/// A URL on a port nothing listens on
pub fn unreachable_url(file_name: &str) -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .unwrap_or(9);
    format!("http://127.0.0.1:{port}/{file_name}")
}
