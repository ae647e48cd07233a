//! Picture intake: uploaded file handles to ordered byte buffers.

use bytes::Bytes;
use thiserror::Error;

/// An uploaded picture as received from the multipart boundary.
#[derive(Debug, Clone)]
pub struct PictureUpload {
    /// Original filename, if the client sent one.
    pub filename: Option<String>,
    /// MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// Raw payload.
    pub data: Bytes,
}

/// A picture part carried no readable binary content.
///
/// This is a fault, not a business outcome: the boundary layer logs it and
/// answers with a generic server-class failure.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("picture at index {index} has no readable content")]
pub struct AttachmentReadError {
    /// Zero-based position of the offending part in the submission.
    pub index: usize,
}

/// Normalizes uploaded pictures into raw byte buffers, preserving order.
///
/// An empty input is valid and yields an empty output; whether a listing
/// may end up with zero pictures is not this layer's decision.
///
/// # Errors
///
/// Returns `AttachmentReadError` with the offending index when a part has
/// no readable content.
pub fn collect_picture_buffers(
    uploads: Vec<PictureUpload>,
) -> Result<Vec<Bytes>, AttachmentReadError> {
    uploads
        .into_iter()
        .enumerate()
        .map(|(index, upload)| {
            if upload.data.is_empty() {
                Err(AttachmentReadError { index })
            } else {
                Ok(upload.data)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn upload(data: &[u8]) -> PictureUpload {
        PictureUpload {
            filename: Some("photo.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            data: Bytes::copy_from_slice(data),
        }
    }

    #[test]
    fn test_empty_input_is_valid() {
        let buffers = collect_picture_buffers(Vec::new()).unwrap();
        assert!(buffers.is_empty());
    }

    #[test]
    fn test_unreadable_part_reports_index() {
        let uploads = vec![upload(b"a"), upload(b""), upload(b"c")];
        let err = collect_picture_buffers(uploads).unwrap_err();
        assert_eq!(err, AttachmentReadError { index: 1 });
    }

    proptest! {
        /// Buffers come back in submission order, byte for byte.
        #[test]
        fn prop_order_preserved(payloads in prop::collection::vec(
            prop::collection::vec(any::<u8>(), 1..64), 0..8
        )) {
            let uploads: Vec<_> = payloads.iter().map(|p| upload(p)).collect();
            let buffers = collect_picture_buffers(uploads).unwrap();

            prop_assert_eq!(buffers.len(), payloads.len());
            for (buffer, payload) in buffers.iter().zip(&payloads) {
                prop_assert_eq!(buffer.as_ref(), payload.as_slice());
            }
        }
    }
}
