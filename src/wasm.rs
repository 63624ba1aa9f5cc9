//! WASM bindings for browser-side emoji rewriting.
//!
//! Exposes string and HTML-fragment mode to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{CdnGenerator, Emojifier, SourceGenerator};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn generator(base: Option<String>) -> CdnGenerator {
    match base {
        Some(base) => CdnGenerator::default().with_base(base),
        None => CdnGenerator::default(),
    }
}

/// Replace emoji in a string with `<img>` tags.
///
/// `base` overrides the CDN root, e.g. `"/assets/twemoji/"`.
#[wasm_bindgen]
pub fn parse(input: &str, base: Option<String>) -> String {
    let generator = generator(base);
    Emojifier::new().parse_str(input, Some(&generator as &dyn SourceGenerator))
}

/// Replace emoji inside the text of an HTML fragment, leaving markup intact.
#[wasm_bindgen]
pub fn parse_html(html: &str, base: Option<String>) -> String {
    let generator = generator(base);
    Emojifier::new().parse_html(html, Some(&generator as &dyn SourceGenerator))
}
