//! In-memory adapters for version persistence.

mod version;

pub use version::InMemoryVersionRepository;
