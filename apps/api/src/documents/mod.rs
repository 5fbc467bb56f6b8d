//! Resume uploads shared by the cover-letter and review endpoints.

pub mod pdf;
pub mod upload;
