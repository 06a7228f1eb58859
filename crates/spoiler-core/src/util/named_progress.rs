use indicatif::ProgressStyle;

const LABEL_WIDTH: usize = 24;

/// Extension trait for creating labelled progress bars.
pub trait NamedProgress {
    /// Creates a progress bar style prefixed with `name`, padded to a fixed width.
    fn named_bar(name: &str) -> Self;
}

impl NamedProgress for ProgressStyle {
    fn named_bar(name: &str) -> Self {
        let template = format!(
            "{:<width$} {{wide_bar:40.cyan/blue}} {{pos:>3}}/{{len:<3}} [{{elapsed_precise}} ({{eta}} remaining)] {{msg}}",
            name,
            width = LABEL_WIDTH
        );
        ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or(ProgressStyle::default_bar())
    }
}
