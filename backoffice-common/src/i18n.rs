//! Translation seam
//!
//! The engine generates a handful of user-facing strings itself (validation
//! messages, confirm-dialog text, the empty-table message). All of them go
//! through `Translate`; the embedding application supplies its own
//! implementation backed by whatever i18n layer it uses. `EnglishFallback`
//! is the built-in catalog used when nothing is injected.

/// Resolves a message key plus named arguments into display text.
///
/// Arguments are `(name, value)` pairs substituted into `{name}`
/// placeholders by the implementation.
pub trait Translate: Send + Sync {
    fn t(&self, key: &str, args: &[(&str, &str)]) -> String;
}

/// Built-in English catalog for every key the engine emits.
///
/// Unknown keys resolve to the key itself so a missing entry is visible in
/// the UI instead of panicking or vanishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFallback;

impl EnglishFallback {
    fn template(key: &str) -> Option<&'static str> {
        Some(match key {
            "validation.required" => "{field} is required",
            "validation.too_short" => "{field} must be at least {min} characters",
            "validation.too_long" => "{field} must be at most {max} characters",
            "validation.not_a_number" => "{field} must be a number",
            "validation.too_small" => "{field} must be at least {min}",
            "validation.too_large" => "{field} must be at most {max}",
            "validation.not_a_boolean" => "{field} must be on or off",
            "validation.not_text" => "{field} must be text",
            "validation.not_a_list" => "{field} must be a list of values",
            "validation.not_attachments" => "{field} must be a list of attachments",
            "validation.unknown_option" => "{field} has no option named {value}",
            "upload.failed" => "upload failed: {reason}",
            "table.empty" => "No records found",
            "confirm.delete" => "Delete this item?",
            "confirm.batch_delete" => "Delete {count} selected items?",
            _ => return None,
        })
    }
}

impl Translate for EnglishFallback {
    fn t(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = Self::template(key) else {
            return key.to_string();
        };
        let mut out = template.to_string();
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_named_args() {
        let msg = EnglishFallback.t("validation.required", &[("field", "Title")]);
        assert_eq!(msg, "Title is required");
    }

    #[test]
    fn substitutes_multiple_args() {
        let msg = EnglishFallback.t("validation.too_long", &[("field", "Name"), ("max", "80")]);
        assert_eq!(msg, "Name must be at most 80 characters");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(EnglishFallback.t("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn batch_confirm_message() {
        let msg = EnglishFallback.t("confirm.batch_delete", &[("count", "3")]);
        assert_eq!(msg, "Delete 3 selected items?");
    }
}
