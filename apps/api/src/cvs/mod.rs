// CV management: CRUD, file upload, plain-text export and assistant re-analysis.

pub mod handlers;
pub mod upload;
