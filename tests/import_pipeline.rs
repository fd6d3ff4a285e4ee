//! Drives a native traversal the way a content-addressed import
//! pipeline would: pull candidates one at a time, hash the content
//! chunks as they arrive and report `(identifier, path, size)` per file.

use futures_lite::StreamExt;
use import_source::NativeItem;
use import_source::NativeSource;
use import_source::SourceOptions;
use import_source::TestRoot;
use sha2::Digest;
use sha2::Sha256;

struct Report {
    identifier: String,
    path: String,
    size: u64,
}

async fn import_all(root: &TestRoot, subdir: &str) -> Vec<Report> {
    let source = NativeSource;
    let item = NativeItem::from_path(root.path().join(subdir)).await.unwrap();
    let options = SourceOptions {
        only_files: true,
        ..Default::default()
    };
    let mut stream = source.candidates(item, options);

    let mut reports = Vec::new();
    while let Some(candidate) = stream.next().await {
        let candidate = candidate.unwrap();
        let path = candidate.path.clone();
        let mut content = candidate.content.expect("only_files yields content");
        let mut hasher = Sha256::new();
        let mut size = 0u64;
        while let Some(chunk) = content.next().await {
            let chunk = chunk.unwrap();
            size += chunk.len() as u64;
            hasher.update(&chunk);
        }
        reports.push(Report {
            identifier: format!("{:x}", hasher.finalize()),
            path,
            size,
        });
    }
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}

#[tokio::test]
async fn reports_identifier_path_and_size_per_file() {
    let root = TestRoot::new().unwrap();
    let big = vec![7u8; 20_000];
    root.create_file("data/big.bin", &big).unwrap();
    root.create_file("data/small.txt", b"hello import").unwrap();
    root.create_file("data/sub/nested.txt", b"nested").unwrap();

    let reports = import_all(&root, "data").await;
    let paths: Vec<_> = reports.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        ["data/big.bin", "data/small.txt", "data/sub/nested.txt"]
    );

    // The streamed digest must match hashing the whole buffer at once,
    // even when the content arrives in multiple chunks.
    assert_eq!(reports[0].identifier, format!("{:x}", Sha256::digest(&big)));
    assert_eq!(reports[0].size, 20_000);
    assert_eq!(
        reports[1].identifier,
        format!("{:x}", Sha256::digest(b"hello import"))
    );
    assert_eq!(reports[1].size, 12);
    assert_eq!(reports[2].size, 6);
}

#[tokio::test]
async fn identical_content_yields_identical_identifiers() {
    let root = TestRoot::new().unwrap();
    root.create_file("data/one.txt", b"same bytes").unwrap();
    root.create_file("data/two.txt", b"same bytes").unwrap();

    let reports = import_all(&root, "data").await;
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].identifier, reports[1].identifier);
    assert_ne!(reports[0].path, reports[1].path);
}
