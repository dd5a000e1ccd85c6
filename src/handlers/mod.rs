// Route handlers. Each file owns one concern:
// schools (the public create/list API), system (root, health, fallback)
// and payload (the create-body extractor).
pub mod payload;
pub mod schools;
pub mod system;
