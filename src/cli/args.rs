/// Arguments for the generate command after CLI parsing
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Model override; `None` falls back to the configured default
    pub model: Option<String>,
    pub no_interactive: bool,
    pub verbose: bool,
}
