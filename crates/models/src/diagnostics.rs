//! Advisory reporting for lenient enum substitutions.
//!
//! Responsibilities:
//! - Define the [`DiagnosticSink`] seam that decode calls report into.
//! - Provide a collecting sink and a `tracing`-backed sink.
//!
//! Explicitly does NOT handle:
//! - Installing a tracing subscriber; that belongs to the embedding application.
//!
//! Invariants / assumptions:
//! - Reporting never fails and never blocks the assignment that triggered it.

/// One lenient enum value that was replaced by the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSubstitution {
    pub model: &'static str,
    pub field: &'static str,
    pub enum_name: &'static str,
    pub received: String,
}

/// Receiver for decode-time diagnostics.
pub trait DiagnosticSink {
    fn enum_substituted(&mut self, substitution: EnumSubstitution);
}

/// Emits each substitution as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn enum_substituted(&mut self, substitution: EnumSubstitution) {
        tracing::debug!(
            model = substitution.model,
            field = substitution.field,
            enum_name = substitution.enum_name,
            received = %substitution.received,
            "Unknown enum value replaced with sentinel"
        );
    }
}

/// Keeps every substitution for later inspection.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub substitutions: Vec<EnumSubstitution>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn enum_substituted(&mut self, substitution: EnumSubstitution) {
        self.substitutions.push(substitution);
    }
}
