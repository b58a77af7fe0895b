//! Text views rendered to the terminal

pub mod agents;
pub mod integrations;

use integrations_core::{Toast, ToastVariant};

/// Render toasts, one per line (descriptions indented below)
pub fn render_toasts(toasts: &[Toast]) -> String {
    let mut out = String::new();
    for toast in toasts {
        let marker = match toast.variant {
            ToastVariant::Default => "✓",
            ToastVariant::Destructive => "✗",
        };
        out.push_str(&format!("{} {}\n", marker, toast.title));
        if let Some(ref description) = toast.description {
            out.push_str(&format!("  {}\n", description));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_toasts() {
        let toasts = vec![
            Toast::new("Credentials deleted", Duration::from_secs(2)),
            Toast::destructive("Something went wrong", Duration::from_secs(2))
                .with_description("details"),
        ];
        assert_eq!(
            render_toasts(&toasts),
            "✓ Credentials deleted\n✗ Something went wrong\n  details\n"
        );
    }
}
