//! Plain-Text Sanitization
//!
//! Comment fields are plain text: markup is stripped, not escaped. Tags are
//! removed and their text content kept, except `<script>` and `<style>`
//! elements, which are removed together with their content. This is
//! deliberately not an HTML sanitizer toolkit — the output is never rendered
//! as HTML.

/// Elements whose text content is dropped along with the tags
const CONTENT_ELEMENTS: &[&str] = &["script", "style"];

/// Remove markup from `input`, keeping ordinary text content
///
/// - `<tag ...>` and `</tag>` are removed, their inner text kept
/// - `<script>`/`<style>` are removed including their content
/// - `<!-- comments -->` are removed
/// - An unterminated tag is dropped through the end of the input
/// - A `<` that does not start a tag (e.g. `a < b`) is kept as-is
/// - Nothing is entity-escaped
pub fn strip_markup(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' && is_tag_start(&chars, i) {
            if starts_comment(&chars, i) {
                i = skip_comment(&chars, i + 4);
                continue;
            }

            let mut j = i + 1;
            let closing = chars[j] == '/';
            if closing {
                j += 1;
            }

            let name_start = j;
            while j < chars.len() && chars[j].is_ascii_alphanumeric() {
                j += 1;
            }
            let name: String = chars[name_start..j]
                .iter()
                .collect::<String>()
                .to_ascii_lowercase();

            while j < chars.len() && chars[j] != '>' {
                j += 1;
            }
            if j == chars.len() {
                // Unterminated tag: drop the rest
                break;
            }
            i = j + 1;

            if !closing && CONTENT_ELEMENTS.contains(&name.as_str()) {
                i = skip_content_element(&chars, i, &name);
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// Strip markup, trim surrounding whitespace, truncate to `max_chars`
/// codepoints
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    strip_markup(input).trim().chars().take(max_chars).collect()
}

/// A `<` only opens a tag when followed by a name, `/`, or `!`
fn is_tag_start(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        Some(c) => c.is_ascii_alphabetic() || *c == '/' || *c == '!',
        None => false,
    }
}

fn starts_comment(chars: &[char], i: usize) -> bool {
    chars.get(i + 1) == Some(&'!') && chars.get(i + 2) == Some(&'-') && chars.get(i + 3) == Some(&'-')
}

/// Skip past `-->`; an unterminated comment swallows the rest of the input
fn skip_comment(chars: &[char], mut i: usize) -> usize {
    while i + 2 < chars.len() {
        if chars[i] == '-' && chars[i + 1] == '-' && chars[i + 2] == '>' {
            return i + 3;
        }
        i += 1;
    }
    chars.len()
}

/// Skip through the matching `</name>`; content is discarded, not emitted
fn skip_content_element(chars: &[char], mut i: usize, name: &str) -> usize {
    let name_chars: Vec<char> = name.chars().collect();

    while i < chars.len() {
        if chars[i] == '<' && chars.get(i + 1) == Some(&'/') {
            let mut j = i + 2;
            let mut k = 0;
            while j < chars.len()
                && k < name_chars.len()
                && chars[j].to_ascii_lowercase() == name_chars[k]
            {
                j += 1;
                k += 1;
            }
            let boundary = matches!(chars.get(j), None | Some('>'))
                || chars.get(j).is_some_and(|c| c.is_whitespace());
            if k == name_chars.len() && boundary {
                while j < chars.len() && chars[j] != '>' {
                    j += 1;
                }
                return if j < chars.len() { j + 1 } else { chars.len() };
            }
        }
        i += 1;
    }

    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_stripped_with_content() {
        assert_eq!(
            sanitize_text("  <script>alert(1)</script> hello  ", 2000),
            "hello"
        );
    }

    #[test]
    fn test_plain_tags_keep_text() {
        assert_eq!(strip_markup("<b>bold</b> and <i>italic</i>"), "bold and italic");
        assert_eq!(
            strip_markup("<a href=\"https://example.com\">link</a>"),
            "link"
        );
    }

    #[test]
    fn test_style_stripped_with_content() {
        assert_eq!(strip_markup("<style>body{color:red}</style>text"), "text");
    }

    #[test]
    fn test_script_case_insensitive() {
        assert_eq!(strip_markup("<SCRIPT>alert(1)</SCRIPT>ok"), "ok");
        assert_eq!(strip_markup("<ScRiPt>x</sCrIpT>ok"), "ok");
    }

    #[test]
    fn test_unterminated_tag_dropped() {
        assert_eq!(strip_markup("hello <img src=\"x"), "hello ");
        assert_eq!(strip_markup("<script>never closed"), "");
    }

    #[test]
    fn test_non_tag_angle_bracket_kept() {
        assert_eq!(strip_markup("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_comment_removed() {
        assert_eq!(strip_markup("<!-- hidden -->visible"), "visible");
        assert_eq!(strip_markup("a<!-- unterminated"), "a");
    }

    #[test]
    fn test_no_entity_escaping() {
        // Plain text passes through untouched, ampersands included
        assert_eq!(strip_markup("fish & chips"), "fish & chips");
        assert_eq!(strip_markup("&lt;already encoded&gt;"), "&lt;already encoded&gt;");
    }

    #[test]
    fn test_truncates_to_codepoints() {
        let body = "あ".repeat(3000);
        let sanitized = sanitize_text(&body, 2000);
        assert_eq!(sanitized.chars().count(), 2000);
    }

    #[test]
    fn test_trim_applied_after_stripping() {
        assert_eq!(sanitize_text("   <br>   ", 64), "");
        assert_eq!(sanitize_text("\t name \n", 64), "name");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_text("", 64), "");
    }
}
