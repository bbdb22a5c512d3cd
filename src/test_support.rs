use rusoto_core::signature::{SignedRequest, SignedRequestPayload};

/// The encoded body a client sent, as seen by a mock dispatcher.
pub(crate) fn request_body(request: &SignedRequest) -> String {
    match request.payload {
        Some(SignedRequestPayload::Buffer(ref buffer)) => String::from_utf8_lossy(buffer).into_owned(),
        _ => String::new(),
    }
}
