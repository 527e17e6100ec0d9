use std::fmt::Write as _;

use syntect::{
    highlighting::ThemeSet,
    html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style},
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::application::render::types::RenderError;

const CLASS_PREFIX: &str = "syntax-";
const STYLESHEET_THEME: &str = "InspiredGitHub";
const PLAIN_LANGUAGE: &str = "text";

/// Language and trailing metadata of a code block's info string.
///
/// ```text
/// python title=example.py
/// ^^^^^^ ^^^^^^^^^^^^^^^^
/// language        meta
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FenceInfo {
    pub language: Option<String>,
    pub meta: Option<String>,
}

impl FenceInfo {
    pub(crate) fn parse(info: &str) -> Self {
        let mut words = info.split_whitespace();
        let language = words.next().map(str::to_owned);
        let meta = words.collect::<Vec<_>>().join(" ");

        Self {
            language,
            meta: (!meta.is_empty()).then_some(meta),
        }
    }

    fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(PLAIN_LANGUAGE)
    }
}

/// Syntect highlighter for documentation code samples.
///
/// Token classes carry the `syntax-` prefix so the generated stylesheet can
/// sit next to the site styles without collisions.
pub(crate) struct CodeHighlighter {
    syntaxes: SyntaxSet,
    style: ClassStyle,
}

impl CodeHighlighter {
    pub(crate) fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            style: ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        }
    }

    /// Highlight one code sample into a `<pre>` block tagged with its language.
    pub(crate) fn highlight(&self, fence: &FenceInfo, code: &str) -> Result<String, RenderError> {
        let language = fence.language();
        let spans = self.classed_spans(self.syntax_for(language), code).map_err(|message| {
            RenderError::Highlighting {
                language: language.to_owned(),
                message,
            }
        })?;

        Ok(CodeMarkup {
            language,
            meta: fence.meta.as_deref(),
        }
        .wrap(&spans))
    }

    /// CSS for the `syntax-` classes, using the bundled light theme.
    pub(crate) fn stylesheet(&self) -> Result<String, RenderError> {
        let stylesheet_error = |message: String| RenderError::Highlighting {
            language: "css".to_owned(),
            message,
        };

        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(STYLESHEET_THEME)
            .ok_or_else(|| stylesheet_error(format!("theme `{STYLESHEET_THEME}` is not bundled")))?;

        css_for_theme_with_class_style(theme, self.style)
            .map_err(|err| stylesheet_error(err.to_string()))
    }

    /// Unknown languages highlight as plain text.
    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_token(&language.to_ascii_lowercase())
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    fn classed_spans(&self, syntax: &SyntaxReference, code: &str) -> Result<String, String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, self.style);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| err.to_string())?;
        }
        if !code.is_empty() && !code.ends_with('\n') {
            generator
                .parse_html_for_line_which_includes_newline("\n")
                .map_err(|err| err.to_string())?;
        }

        Ok(generator.finalize())
    }
}

/// Wrapper markup around highlighted spans.
struct CodeMarkup<'a> {
    language: &'a str,
    meta: Option<&'a str>,
}

impl CodeMarkup<'_> {
    fn wrap(&self, spans: &str) -> String {
        let class = ammonia::clean_text(&self.language.to_ascii_lowercase());
        let mut html = String::with_capacity(spans.len() + 160);

        let _ = write!(
            html,
            "<pre class=\"syntax-highlight syntax-lang-{class}\" data-language=\"{}\">",
            ammonia::clean_text(self.language)
        );
        let _ = write!(html, "<code class=\"language-{class} syntax-code\"");
        if let Some(meta) = self.meta {
            let _ = write!(html, " data-meta=\"{}\"", ammonia::clean_text(meta));
        }
        html.push('>');
        html.push_str(spans);
        html.push_str("</code></pre>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(info: &str) -> FenceInfo {
        FenceInfo::parse(info)
    }

    #[test]
    fn info_string_splits_language_from_meta() {
        assert_eq!(
            fence("python  title=example.py  linenos"),
            FenceInfo {
                language: Some("python".to_owned()),
                meta: Some("title=example.py linenos".to_owned()),
            }
        );
        assert_eq!(fence("").language(), "text");
        assert_eq!(fence("pycon").meta, None);
    }

    #[test]
    fn python_samples_produce_classed_spans() {
        let html = CodeHighlighter::new()
            .highlight(&fence("python"), "def main():\n    return 1")
            .expect("highlight");

        assert!(html.starts_with(
            "<pre class=\"syntax-highlight syntax-lang-python\" data-language=\"python\">"
        ));
        assert!(html.contains("<code class=\"language-python syntax-code\">"));
        assert!(html.contains("<span class=\"syntax-keyword"));
        assert!(html.contains("return"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn language_lookup_ignores_case_and_accepts_extensions() {
        let highlighter = CodeHighlighter::new();

        assert_eq!(highlighter.syntax_for("Python").name, "Python");
        assert_eq!(highlighter.syntax_for("py").name, "Python");
        assert_eq!(highlighter.syntax_for("no-such-language").name, "Plain Text");
    }

    #[test]
    fn unknown_language_keeps_its_label_and_escapes_code() {
        let html = CodeHighlighter::new()
            .highlight(&fence("no-such-language title=demo"), "a < b")
            .expect("highlight");

        assert!(html.contains("data-language=\"no-such-language\""));
        assert!(html.contains("data-meta=\"title&#61;demo\""));
        assert!(html.contains("a &lt; b"));
    }
}
