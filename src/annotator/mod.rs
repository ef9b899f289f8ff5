pub mod annotator_model;
pub mod annotator_service;
pub mod fragment_store;

pub use annotator_model::{Annotation, FragmentId, ReplacementSpan};
pub use annotator_service::TextAnnotator;
pub use fragment_store::FragmentStore;
