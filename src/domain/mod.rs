// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with. No file I/O, no HTTP, no ML framework types.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Idiom records and detection outcomes
pub mod idiom;

// Seams implemented by the data and infra layers
pub mod traits;
