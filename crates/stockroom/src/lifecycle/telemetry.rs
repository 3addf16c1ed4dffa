//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber. Call it once, from
//! the binary.
//!
//! Levels come from `RUST_LOG`; with nothing set only errors are printed, so
//! the command-line output stays clean.
//!
//! ```bash
//! RUST_LOG=info stockroom product list     # actor lifecycle, creates, updates
//! RUST_LOG=debug stockroom adjust W-1 decrease 3   # full request payloads
//! ```
//!
//! Log lines carry `entity_type` (`Product`, `Transaction`, `User`) instead of
//! the module path:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! DEBUG adjust_quantity: Sending request request=AdjustmentRequest { sku: Some("W-1"), amount: "3", direction: Decrease }
//! INFO Action ok entity_type="Product"
//! INFO record_adjustment: Created entity_type="Transaction" id=1714564800001 size=1
//! ```

/// Logs go to stderr so they never mix with command output.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
