use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("invalid {what} size ({width}, {height})")]
    InvalidSize {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("padding {padding} overflows the size of '{id}'")]
    InvalidPadding { id: String, padding: u32 },

    #[error("no free space for '{id}' ({width}, {height})")]
    NoSpace {
        id: String,
        width: u32,
        height: u32,
    },

    #[error("{unplaced} rectangles did not fit into ({width}, {height})")]
    CapacityExceeded {
        unplaced: usize,
        width: u32,
        height: u32,
    },

    #[error("rectangle '{id}' has no position to place it at")]
    Unpositioned { id: String },
}
