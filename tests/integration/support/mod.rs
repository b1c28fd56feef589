//! Shared fixtures: an in-process HTTP responder, zip builders, and tree
//! helpers.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;

/// One canned HTTP response served by [`serve`].
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl CannedResponse {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn zip(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: "application/zip",
            body,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: Vec::new(),
        }
    }
}

/// Serve the given responses, one per connection and in order, on an
/// ephemeral loopback port. Returns the base URL. The listener thread exits
/// after the last response.
pub fn serve(responses: Vec<CannedResponse>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    std::thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            // Drain the request head; the content never matters here.
            let mut buf = [0u8; 4096];
            let mut head = Vec::new();
            loop {
                match stream.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        head.extend_from_slice(&buf[..n]);
                        if head.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            let reason = match response.status {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Response",
            };
            let header = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status,
                reason,
                response.content_type,
                response.body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&response.body);
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

/// Build an in-memory release zip wrapping `files` in one top-level
/// directory, the shape every supported upstream produces.
pub fn release_zip(top_dir: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default();
        zip.add_directory(format!("{top_dir}/"), options).expect("add dir");
        for (relative, contents) in files {
            zip.start_file(format!("{top_dir}/{relative}"), options).expect("start file");
            zip.write_all(contents.as_bytes()).expect("write entry");
        }
        zip.finish().expect("finish zip");
    }
    cursor.into_inner()
}

/// Materialize `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        std::fs::write(path, contents).expect("write file");
    }
}

/// Snapshot the tree as relative-path -> contents, skipping the `storage`
/// area (staging and backups churn there by design).
pub fn read_tree(root: &Path) -> BTreeMap<String, String> {
    let mut tree = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1) {
        let entry = entry.expect("walk entry");
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).expect("relative").to_path_buf();
        if relative.starts_with("storage") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path()).unwrap_or_default();
        tree.insert(relative.to_string_lossy().replace('\\', "/"), contents);
    }
    tree
}
