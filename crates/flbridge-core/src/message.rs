use std::fmt;

/// Owned payload for a single outbound inter-process data message.
///
/// The external application receives a tagged byte buffer; the tag is free
/// for the receiving side to interpret and the payload is opaque to the
/// bridge. Owning the bytes keeps the buffer valid for the full duration of
/// the platform call, so no caller-managed pointer lifetime is involved.
#[derive(Clone, PartialEq, Eq)]
pub struct DataMessage {
    tag: u32,
    payload: Vec<u8>,
}

impl DataMessage {
    pub fn new(tag: u32, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Byte length forwarded to the external window alongside the buffer.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Debug for DataMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads are opaque and can be large; log tag and length only.
        f.debug_struct("DataMessage")
            .field("tag", &self.tag)
            .field("len", &self.payload.len())
            .finish()
    }
}
