#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VendorError {
    #[error("vendor id is empty")]
    Empty,

    #[error("segment {index} of vendor id {id:?} is empty")]
    EmptySegment { id: String, index: usize },
}
