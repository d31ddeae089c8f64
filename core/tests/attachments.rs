//! Attachment sub-protocol tests: the 5-file / 10 MiB guard and
//! removal-by-position semantics.

use minwon_core::draft::{
    mime_hint, ComplaintDraft, FileRef, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES,
};
use minwon_core::error::PortalError;

fn draft() -> ComplaintDraft {
    ComplaintDraft {
        category_id: "env-noise".to_string(),
        title: "층간소음".to_string(),
        content: "밤마다 소음".to_string(),
        attachments: Vec::new(),
    }
}

fn files(count: usize) -> Vec<FileRef> {
    (0..count)
        .map(|i| FileRef::new(&format!("photo-{i}.jpg"), 1024))
        .collect()
}

#[test]
fn batch_within_limit_is_accepted() {
    let mut draft = draft();
    draft.attach_all(files(MAX_ATTACHMENTS)).unwrap();
    assert_eq!(draft.attachments.len(), MAX_ATTACHMENTS);
}

/// A batch that would push the count past the cap is rejected wholesale:
/// no partial accept, sequence unchanged.
#[test]
fn over_limit_batch_is_rejected_whole() {
    let mut draft = draft();
    draft.attach_all(files(3)).unwrap();

    let result = draft.attach_all(files(3));

    assert!(matches!(result, Err(PortalError::LimitExceeded(_))));
    assert_eq!(draft.attachments.len(), 3);
}

/// One oversize file poisons its whole batch.
#[test]
fn oversize_file_rejects_batch() {
    let mut draft = draft();
    let batch = vec![
        FileRef::new("small.png", 512),
        FileRef::new("huge.pdf", MAX_ATTACHMENT_BYTES + 1),
    ];

    let result = draft.attach_all(batch);

    assert!(matches!(result, Err(PortalError::LimitExceeded(_))));
    assert!(draft.attachments.is_empty());
}

#[test]
fn file_at_exact_size_cap_is_accepted() {
    let mut draft = draft();
    draft
        .attach_all(vec![FileRef::new("exact.pdf", MAX_ATTACHMENT_BYTES)])
        .unwrap();
    assert_eq!(draft.attachments.len(), 1);
}

#[test]
fn empty_batch_is_a_noop() {
    let mut draft = draft();
    draft.attach_all(Vec::new()).unwrap();
    assert!(draft.attachments.is_empty());
}

/// Removal is by position in the ordered sequence; later files shift
/// down. Out-of-range indices are ignored.
#[test]
fn removal_is_by_position() {
    let mut draft = draft();
    draft.attach_all(files(3)).unwrap();

    let removed = draft.remove_attachment(1).unwrap();
    assert_eq!(removed.name, "photo-1.jpg");
    assert_eq!(draft.attachments.len(), 2);
    assert_eq!(draft.attachments[1].name, "photo-2.jpg");

    assert!(draft.remove_attachment(5).is_none());
    assert_eq!(draft.attachments.len(), 2);
}

/// Removing frees capacity for a later batch.
#[test]
fn removal_frees_capacity() {
    let mut draft = draft();
    draft.attach_all(files(MAX_ATTACHMENTS)).unwrap();
    draft.remove_attachment(0).unwrap();
    draft
        .attach_all(vec![FileRef::new("extra.png", 2048)])
        .unwrap();
    assert_eq!(draft.attachments.len(), MAX_ATTACHMENTS);
}

#[test]
fn mime_hint_follows_extension() {
    assert_eq!(mime_hint("scan.PDF"), "application/pdf");
    assert_eq!(mime_hint("photo.jpeg"), "image/jpeg");
    assert_eq!(mime_hint("photo.jpg"), "image/jpeg");
    assert_eq!(mime_hint("shot.png"), "image/png");
    assert_eq!(mime_hint("archive.zip"), "application/octet-stream");
    assert_eq!(mime_hint("noext"), "application/octet-stream");
}
