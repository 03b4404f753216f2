// Command line assembly for adb and the analysis tool
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    value: String,
    quoted: bool,
}

impl Token {
    fn render(&self) -> String {
        if self.quoted {
            format!("\"{}\"", self.value)
        } else {
            self.value.clone()
        }
    }
}

/// Ordered list of command line tokens.
///
/// Quoting is a rendering concern only: `build()` and `tokens()` show quoted
/// tokens wrapped in double quotes, while `argv()` yields the raw values that
/// are handed to the OS one entry per token. No escaping of shell
/// metacharacters is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBuilder {
    tokens: Vec<Token>,
}

impl ArgumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(mut self, token: impl Into<String>) -> Self {
        self.push(token.into(), false);
        self
    }

    /// Flag followed by its value, e.g. `-s <serial>`.
    pub fn append_pair(self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(flag).append(value)
    }

    pub fn append_all<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.push(token.into(), false);
        }
        self
    }

    pub fn append_quoted(mut self, token: impl Into<String>) -> Self {
        self.push(token.into(), true);
        self
    }

    pub fn append_range_quoted<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            self.push(token.into(), true);
        }
        self
    }

    /// Replace a previously set `name=value` token.
    ///
    /// The first token whose rendered text starts with `name` is removed and
    /// `token` is appended at the end. Without a match this is `append`.
    pub fn override_arg(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        let name = token.split('=').next().unwrap_or_default();
        if let Some(index) = self.tokens.iter().position(|t| t.render().starts_with(name)) {
            self.tokens.remove(index);
        }
        self.push(token, false);
        self
    }

    pub fn build(&self) -> String {
        self.tokens().join(" ")
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.iter().map(Token::render).collect()
    }

    pub fn argv(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(&mut self, value: String, quoted: bool) {
        self.tokens.push(Token { value, quoted });
    }
}

impl fmt::Display for ArgumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_joins_in_call_order() {
        let args = ArgumentBuilder::new()
            .append("devices")
            .append("-l")
            .append_pair("-s", "emulator-5554");
        assert_eq!(args.build(), "devices -l -s emulator-5554");
        assert_eq!(args.to_string(), args.build());
    }

    #[test]
    fn fluent_getprop_tokens() {
        let args = ArgumentBuilder::new()
            .append_pair("-s", "X")
            .append("shell")
            .append_all(["getprop", "ro.product.model"]);
        assert_eq!(
            args.tokens(),
            vec!["-s", "X", "shell", "getprop", "ro.product.model"]
        );
        assert_eq!(args.argv(), vec!["-s", "X", "shell", "getprop", "ro.product.model"]);
    }

    #[test]
    fn quoted_tokens_render_wrapped_but_argv_stays_raw() {
        let args = ArgumentBuilder::new()
            .append("install")
            .append_quoted("/tmp/My App.apk");
        assert_eq!(args.build(), "install \"/tmp/My App.apk\"");
        assert_eq!(args.argv(), vec!["install", "/tmp/My App.apk"]);
    }

    #[test]
    fn range_quoted_keeps_order() {
        let args = ArgumentBuilder::new()
            .append("--analyze-workspace")
            .append_range_quoted(["/a", "/b c"]);
        assert_eq!(args.tokens(), vec!["--analyze-workspace", "\"/a\"", "\"/b c\""]);
    }

    #[test]
    fn override_replaces_matching_token() {
        let args = ArgumentBuilder::new()
            .append("x=1")
            .append("y")
            .override_arg("x=2");
        assert_eq!(args.tokens(), vec!["y", "x=2"]);
    }

    #[test]
    fn override_only_removes_first_match() {
        let args = ArgumentBuilder::new()
            .append("-p:Conf=Debug")
            .append("-p:Conf=Release")
            .override_arg("-p:Conf=Test");
        assert_eq!(args.tokens(), vec!["-p:Conf=Release", "-p:Conf=Test"]);
    }

    #[test]
    fn override_without_match_is_append() {
        let overridden = ArgumentBuilder::new().append("a").override_arg("x=2");
        let appended = ArgumentBuilder::new().append("a").append("x=2");
        assert_eq!(overridden.tokens(), appended.tokens());
    }

    #[test]
    fn empty_builder() {
        let args = ArgumentBuilder::new();
        assert!(args.is_empty());
        assert_eq!(args.build(), "");
    }
}
