//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [script] Section Defaults
// ============================================================================

pub mod script {
    pub fn implementors() -> String {
        "implementors".into()
    }

    pub fn sources() -> String {
        "sourcesIndex".into()
    }

    pub fn register() -> String {
        "register_implementors".into()
    }

    pub fn pending() -> String {
        "pending_implementors".into()
    }

    pub fn sidebar() -> String {
        "createSourceSidebar".into()
    }
}
