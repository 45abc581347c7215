use syntect::{
    dumps::from_uncompressed_data,
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::{SyntaxReference, SyntaxSet, SyntaxSetBuilder},
    util::LinesWithEndings,
};
use tracing::warn;

use super::types::MarkdownError;

const PLAIN_TOKENS: [&str; 4] = ["text", "plain", "plaintext", "txt"];

/// Class-based syntax highlighter backed by the build-time syntax pack.
pub(crate) struct CodeHighlighter {
    syntax_set: SyntaxSet,
    class_style: ClassStyle,
}

impl CodeHighlighter {
    pub(crate) fn load() -> Self {
        let syntax_bytes = include_bytes!(env!("SYNTAX_PACK_FILE"));
        let syntax_set = match from_uncompressed_data::<SyntaxSet>(syntax_bytes) {
            Ok(set) => set,
            Err(err) => {
                warn!(
                    target = "application::markdown::highlight",
                    error = %err,
                    "Syntax pack unreadable, code blocks will not be highlighted"
                );
                plain_text_only()
            }
        };

        Self {
            syntax_set,
            class_style: ClassStyle::SpacedPrefixed { prefix: "syntax-" },
        }
    }

    /// Inner HTML for a `<code>` element, or `None` for unknown languages.
    pub(crate) fn highlight(
        &self,
        code: &str,
        language: &str,
    ) -> Result<Option<String>, MarkdownError> {
        let token = language.trim().to_ascii_lowercase();
        if token.is_empty() || PLAIN_TOKENS.contains(&token.as_str()) {
            return Ok(None);
        }
        let Some(syntax) = self.find_syntax(&token) else {
            return Ok(None);
        };

        let mut code_with_newline = code.to_string();
        if !code_with_newline.ends_with('\n') {
            code_with_newline.push('\n');
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, self.class_style);

        for line in LinesWithEndings::from(code_with_newline.as_str()) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| MarkdownError::Highlighting {
                    language: token.clone(),
                    message: err.to_string(),
                })?;
        }

        Ok(Some(generator.finalize()))
    }

    fn find_syntax(&self, token: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(token)
            .or_else(|| self.syntax_set.find_syntax_by_name(token))
            .or_else(|| self.syntax_set.find_syntax_by_extension(token))
    }
}

fn plain_text_only() -> SyntaxSet {
    let mut builder = SyntaxSetBuilder::new();
    builder.add_plain_text_syntax();
    builder.build()
}
