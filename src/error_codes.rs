//! Stable error code constants embedded in user-facing messages.

pub const LOCATOR_NOT_FOUND: &str = "GRIDCHECK_LOCATE_001";
pub const STRUCTURAL_MISMATCH: &str = "GRIDCHECK_COMPARE_001";
pub const INVALID_TEMPLATE: &str = "GRIDCHECK_TEMPLATE_001";
pub const TRANSIENT_DOCUMENT: &str = "GRIDCHECK_DOCUMENT_001";
