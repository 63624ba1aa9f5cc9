//! String mode: emoji become `<img>` markup.

use log::debug;

use super::{EMOJI_CLASS, Token, image_source, tokenize};
use crate::generator::SourceGenerator;
use crate::matcher::EmojiMatcher;

/// Replace every renderable emoji in `input` with an `<img>` tag.
///
/// Everything else, declined emoji included, is copied through unchanged.
/// The input is not parsed as HTML. The generated `src` is written with `&`,
/// `"`, `<` and `>` escaped, so a source containing them differs byte-wise
/// from the raw generator output but decodes to the same URL.
pub fn rewrite_str<M, G>(input: &str, matcher: &M, generator: &G) -> String
where
    M: EmojiMatcher + ?Sized,
    G: SourceGenerator + ?Sized,
{
    let mut output = String::with_capacity(input.len());
    let mut rendered = 0usize;

    for token in tokenize(input, matcher) {
        match token {
            Token::Text(run) => output.push_str(run),
            Token::Emoji(m) => match image_source(m.raw, generator) {
                Some(src) => {
                    push_img(&mut output, m.raw, &src);
                    rendered += 1;
                }
                None => output.push_str(m.raw),
            },
        }
    }

    debug!("string rewrite: {rendered} emoji rendered");
    output
}

fn push_img(output: &mut String, alt: &str, src: &str) {
    output.push_str(r#"<img class=""#);
    output.push_str(EMOJI_CLASS);
    output.push_str(r#"" draggable="false" alt=""#);
    output.push_str(alt);
    output.push_str(r#"" src=""#);
    push_escaped_attr(output, src);
    output.push_str(r#""/>"#);
}

fn push_escaped_attr(output: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}
