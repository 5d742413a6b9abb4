/// MPEG-2 video (H.262)
pub mod h262;

// Re-export common types and functions
pub use h262::H262Reader;
pub use h262::SequenceHeader;
pub use h262::StartCode;
