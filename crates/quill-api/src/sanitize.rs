/// Reduce rich-text editor output to plain text: tags are dropped, text
/// content is kept, and the handful of entities the editor emits are
/// decoded. Unknown entities pass through literally.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '<' => {
                // Skip to the closing '>'; an unterminated tag swallows the rest.
                for c in chars.by_ref() {
                    if c == '>' {
                        break;
                    }
                }
            }
            '&' => {
                let mut name = String::new();
                let mut terminated = false;
                while let Some(&c) = chars.peek() {
                    if c == ';' {
                        chars.next();
                        terminated = true;
                        break;
                    }
                    // Entity names are short; bail on anything that is
                    // clearly not one.
                    if name.len() >= 8 || !(c.is_ascii_alphanumeric() || c == '#') {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }

                if terminated {
                    match name.as_str() {
                        "amp" => out.push('&'),
                        "lt" => out.push('<'),
                        "gt" => out.push('>'),
                        "quot" => out.push('"'),
                        "#39" | "apos" => out.push('\''),
                        "nbsp" => out.push(' '),
                        other => {
                            out.push('&');
                            out.push_str(other);
                            out.push(';');
                        }
                    }
                } else {
                    out.push('&');
                    out.push_str(&name);
                }
            }
            _ => out.push(ch),
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags() {
        assert_eq!(strip_markup("<b>hello</b>"), "hello");
    }

    #[test]
    fn strips_nested_markup_keeping_text() {
        assert_eq!(
            strip_markup("<p>one <em>two</em> three</p>"),
            "one two three"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("just words"), "just words");
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(strip_markup("a &amp; b &lt;ok&gt;"), "a & b <ok>");
        assert_eq!(strip_markup("it&#39;s&nbsp;fine"), "it's fine");
    }

    #[test]
    fn unknown_entity_is_kept_literally() {
        assert_eq!(strip_markup("&copy; 2026"), "&copy; 2026");
    }

    #[test]
    fn bare_ampersand_is_kept() {
        assert_eq!(strip_markup("fish & chips"), "fish & chips");
    }

    #[test]
    fn unterminated_tag_swallows_the_rest() {
        assert_eq!(strip_markup("hello <b attr=oops"), "hello");
    }

    #[test]
    fn markup_only_input_becomes_empty() {
        assert_eq!(strip_markup("<p><br/></p>"), "");
    }
}
