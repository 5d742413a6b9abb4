use bytes::Bytes;

/// One complete access unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// Raw stream bytes of the access unit.
    pub data: Bytes,
    /// Presentation time in microseconds.
    pub pts: Option<i64>,
    /// True for keyframes.
    pub is_key: bool,
}

impl Packet {
    /// Creates a packet without timestamp or key flag.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pts: None,
            is_key: false,
        }
    }

    /// Sets the presentation time.
    pub fn with_pts(mut self, pts: i64) -> Self {
        self.pts = Some(pts);
        self
    }

    /// Sets the keyframe flag.
    pub fn with_key_flag(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    /// Size of the packet in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the packet holds no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
