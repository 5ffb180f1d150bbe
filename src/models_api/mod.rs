pub mod commentary;
pub mod error_body;
pub mod innings;
pub mod match_summary;
