//! Token stream formatting for the CLI

use rtf_config::OutputFormat;
use rtf_parser::rtf::token::detokenize;
use rtf_parser::Token;

/// Render tokens in the requested format
pub fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::TokenSimple => Ok(tokens
            .iter()
            .map(|token| format!("{}\n", token))
            .collect()),
        OutputFormat::TokenJson => serde_json::to_string_pretty(tokens)
            .map(|json| json + "\n")
            .map_err(|e| e.to_string()),
        OutputFormat::TokenYaml => serde_yaml::to_string(tokens).map_err(|e| e.to_string()),
        OutputFormat::Detokenize => Ok(detokenize(tokens)),
    }
}
