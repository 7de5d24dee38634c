//! User-facing notices.
//!
//! The session reports every outcome through these values. The texts are
//! the application's fixed strings; tests assert on them verbatim, so
//! changing one is a contract change, not a cosmetic edit.

use domain_quote::Quote;

/// Kind of notice, driving how a screen renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A completed action.
    Success,
    /// Neutral guidance.
    Info,
    /// The action may have succeeded; verification advised.
    Warning,
    /// The action failed.
    Failure,
    /// Field-level validation problems; the details carry the messages.
    Validation,
}

/// A single notice line with optional per-field details.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Validation messages in form field order; empty for other kinds.
    pub details: Vec<String>,
}

impl Notice {
    fn plain(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            details: Vec::new(),
        }
    }

    /// Success after a create.
    pub fn saved(quote: &Quote) -> Self {
        Self::plain(
            NoticeKind::Success,
            format!(
                "Quote successfully saved! Quote #{} is ready for review.",
                quote_reference(quote)
            ),
        )
    }

    /// Success after an update.
    pub fn updated(quote: &Quote) -> Self {
        Self::plain(
            NoticeKind::Success,
            format!(
                "Quote successfully updated! Quote #{} is ready for review.",
                quote_reference(quote)
            ),
        )
    }

    /// The write may have landed; the list is being re-fetched.
    pub fn ambiguous() -> Self {
        Self::plain(
            NoticeKind::Warning,
            "Quote may have been saved successfully. Please refresh the quote list to verify.",
        )
    }

    /// Generic save failure.
    pub fn save_failed() -> Self {
        Self::plain(
            NoticeKind::Failure,
            "Unable to save quote. Please check your information and try again.",
        )
    }

    /// Validation problems, client- or server-reported.
    pub fn validation(messages: Vec<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            text: "Please correct the highlighted fields.".to_string(),
            details: messages,
        }
    }

    /// A fresh draft is ready for input.
    pub fn new_quote_ready() -> Self {
        Self::plain(
            NoticeKind::Info,
            "New quote form is ready! Please fill in your business information.",
        )
    }

    /// A persisted quote was loaded for editing.
    pub fn editing(quote: &Quote) -> Self {
        Self::plain(
            NoticeKind::Info,
            format!(
                "Quote #{} loaded for editing. Make your changes and save when ready.",
                quote_reference(quote)
            ),
        )
    }

    /// Whether this notice reports a completed save.
    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

/// The identifier shown to the user: the backend id once assigned,
/// falling back to the reference number.
fn quote_reference(quote: &Quote) -> String {
    quote
        .id
        .map(|id| id.to_string())
        .or_else(|| quote.quote_number.clone())
        .unwrap_or_else(|| "pending".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_kernel::QuoteId;

    #[test]
    fn save_notices_carry_the_quote_reference() {
        let mut quote = Quote::draft();
        quote.id = Some(QuoteId::new(7));

        let saved = Notice::saved(&quote);
        assert!(saved.is_success());
        assert_eq!(
            saved.text,
            "Quote successfully saved! Quote #7 is ready for review."
        );

        let updated = Notice::updated(&quote);
        assert!(updated.text.contains("successfully updated"));
        assert!(updated.text.contains("Quote #7"));
    }

    #[test]
    fn unsaved_quote_reference_falls_back() {
        let quote = Quote::draft();
        assert!(Notice::saved(&quote).text.contains("Quote #pending"));
    }

    #[test]
    fn validation_notice_keeps_message_order() {
        let notice = Notice::validation(vec![
            "Business name must be at least 2 characters long".to_string(),
            "State must be a 2-letter code".to_string(),
        ]);

        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.details.len(), 2);
        assert!(notice.details[0].contains("Business name"));
        assert!(!notice.is_success());
    }

    #[test]
    fn ambiguous_notice_advises_a_refresh() {
        let notice = Notice::ambiguous();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert!(notice.text.contains("may have been saved"));
        assert!(notice.text.contains("refresh"));
    }
}
