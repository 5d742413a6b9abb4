/// MIME type reported for MPEG-2 video tracks.
pub const MIME_VIDEO_MPEG2: &str = "video/mpeg2";

/// `picture_start_code`
pub const START_PICTURE: u8 = 0x00;
/// `user_data_start_code`
pub const START_USER_DATA: u8 = 0xB2;
/// `sequence_header_code`
pub const START_SEQUENCE_HEADER: u8 = 0xB3;
/// `extension_start_code`
pub const START_EXTENSION: u8 = 0xB5;
/// `sequence_end_code`
pub const START_SEQUENCE_END: u8 = 0xB7;
/// `group_start_code`
pub const START_GROUP: u8 = 0xB8;

/// Classification of the value byte following a `00 00 01` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartCode {
    /// Start of a picture header.
    Picture,
    /// Slice start codes, `0x01..=0xAF`. Never a frame boundary.
    Slice(u8),
    /// Start of a sequence header.
    SequenceHeader,
    /// Start of a sequence, picture or other extension.
    Extension,
    /// Start of a group of pictures header.
    GroupOfPictures,
    /// User data, sequence end, reserved and system start codes.
    Other(u8),
}

impl From<u8> for StartCode {
    fn from(value: u8) -> Self {
        match value {
            START_PICTURE => StartCode::Picture,
            0x01..=0xAF => StartCode::Slice(value),
            START_SEQUENCE_HEADER => StartCode::SequenceHeader,
            START_EXTENSION => StartCode::Extension,
            START_GROUP => StartCode::GroupOfPictures,
            _ => StartCode::Other(value),
        }
    }
}

impl StartCode {
    /// The raw start code value.
    pub fn value(&self) -> u8 {
        match *self {
            StartCode::Picture => START_PICTURE,
            StartCode::SequenceHeader => START_SEQUENCE_HEADER,
            StartCode::Extension => START_EXTENSION,
            StartCode::GroupOfPictures => START_GROUP,
            StartCode::Slice(value) | StartCode::Other(value) => value,
        }
    }

    /// True for slice start codes.
    pub fn is_slice(&self) -> bool {
        matches!(self, StartCode::Slice(_))
    }
}

/// `aspect_ratio_information` values with a defined display aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AspectRatio {
    /// Code 1, square samples.
    Square,
    /// Code 2, 4:3 display.
    Display4x3,
    /// Code 3, 16:9 display.
    Display16x9,
    /// Code 4, 2.21:1 display.
    Display221x100,
    /// Forbidden or reserved codes.
    Reserved(u8),
}

impl From<u8> for AspectRatio {
    fn from(value: u8) -> Self {
        match value {
            1 => AspectRatio::Square,
            2 => AspectRatio::Display4x3,
            3 => AspectRatio::Display16x9,
            4 => AspectRatio::Display221x100,
            _ => AspectRatio::Reserved(value),
        }
    }
}

impl AspectRatio {
    /// Display width divided by display height, where the code defines one.
    pub fn display_ratio(&self) -> Option<f32> {
        match self {
            AspectRatio::Display4x3 => Some(4.0 / 3.0),
            AspectRatio::Display16x9 => Some(16.0 / 9.0),
            AspectRatio::Display221x100 => Some(2.21),
            AspectRatio::Square | AspectRatio::Reserved(_) => None,
        }
    }
}

/// Frames per second for a `frame_rate_code`.
pub fn frame_rate(code: u8) -> Option<f32> {
    match code {
        1 => Some(24000.0 / 1001.0),
        2 => Some(24.0),
        3 => Some(25.0),
        4 => Some(30000.0 / 1001.0),
        5 => Some(30.0),
        6 => Some(50.0),
        7 => Some(60000.0 / 1001.0),
        8 => Some(60.0),
        _ => None,
    }
}
