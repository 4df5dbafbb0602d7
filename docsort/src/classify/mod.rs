//! Client side of the folder classification service.
//!
//! The service receives a document's joined chunk text and answers with the
//! name of the folder the document belongs in. It is a best-effort
//! collaborator: any failure resolves to the configured fallback label
//! (`ClassifierConfig::fallback_label`, "Unclassified documents" by default)
//! and is only logged.
//!
//! ```rust,ignore
//! let classifier = ClassifierClient::new(&config.classifier)?;
//! let folder = classifier.classify(&result.joined_text()).await;
//! ```

mod api;

pub use api::ClassifierClient;
