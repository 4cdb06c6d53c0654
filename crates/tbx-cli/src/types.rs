use tbx_cli::pipeline::ConversionSummary;

#[derive(Debug)]
pub struct ConvertResult {
    pub summary: ConversionSummary,
    /// Whether the summary should be printed.
    pub show_summary: bool,
}
